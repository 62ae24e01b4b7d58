//! Admin booking filters and the query string they turn into.

use chrono::NaiveDate;

use crate::error::{AppError, Result};

pub const ALL_BOOKINGS_PATH: &str = "/api/admin/all_bookings";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingFilter {
    pub date_start: Option<NaiveDate>,
    pub date_end: Option<NaiveDate>,
    pub floor: Option<i32>,
}

impl BookingFilter {
    /// Parses raw form values. Blank fields mean "no filter".
    pub fn from_inputs(date_start: &str, date_end: &str, floor: &str) -> Result<Self> {
        Ok(Self {
            date_start: parse_date("date_start", date_start)?,
            date_end: parse_date("date_end", date_end)?,
            floor: match floor.trim() {
                "" => None,
                raw => Some(raw.parse::<i32>().map_err(|_| {
                    AppError::ValidationError(format!("andar: '{raw}' is not a floor number"))
                })?),
            },
        })
    }

    /// `date_start=..&date_end=..&andar=..`, leaving out unset fields.
    pub fn query_string(&self) -> String {
        let mut pairs = Vec::with_capacity(3);
        if let Some(start) = self.date_start {
            pairs.push(format!("date_start={start}"));
        }
        if let Some(end) = self.date_end {
            pairs.push(format!("date_end={end}"));
        }
        if let Some(floor) = self.floor {
            pairs.push(format!("andar={floor}"));
        }
        pairs.join("&")
    }

    pub fn bookings_path(&self) -> String {
        let query = self.query_string();
        if query.is_empty() {
            ALL_BOOKINGS_PATH.to_string()
        } else {
            format!("{ALL_BOOKINGS_PATH}?{query}")
        }
    }
}

fn parse_date(field: &str, raw: &str) -> Result<Option<NaiveDate>> {
    match raw.trim() {
        "" => Ok(None),
        raw => raw
            .parse::<NaiveDate>()
            .map(Some)
            .map_err(|_| AppError::ValidationError(format!("{field}: '{raw}' is not a YYYY-MM-DD date"))),
    }
}
