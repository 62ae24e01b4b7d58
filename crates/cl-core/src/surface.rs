//! # Page surface
//!
//! In-memory stand-in for the page markup the controllers write into. Every
//! region a controller touches is addressed by one of the element ids in
//! [`ids`]; the page templates read the same ids back out.

use std::collections::HashMap;

/// Element ids shared with the page markup.
pub mod ids {
    pub const USER_FLOOR: &str = "user-floor";
    pub const USER_APARTMENT: &str = "user-apartment";
    pub const SCHEDULE_DATE: &str = "schedule-date";
    pub const SELECTED_DATE_DISPLAY: &str = "selected-date-display";
    pub const TIME_SLOTS_LAUNDRY_1: &str = "time-slots-laundry-1";
    pub const TIME_SLOTS_LAUNDRY_2: &str = "time-slots-laundry-2";
    pub const MY_BOOKINGS_LIST: &str = "my-bookings-list";

    pub const BOOKINGS_TABLE_BODY: &str = "bookings-table-body";
    pub const LAUNDRIES_TABLE_BODY: &str = "laundries-table-body";
    pub const FILTER_DATE_START: &str = "filter-date-start";
    pub const FILTER_DATE_END: &str = "filter-date-end";
    pub const FILTER_FLOOR: &str = "filter-floor";
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    html: HashMap<String, String>,
    values: HashMap<String, String>,
    attributes: HashMap<String, HashMap<String, String>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the inner markup of an element.
    pub fn set_html(&mut self, id: &str, html: impl Into<String>) {
        self.html.insert(id.to_string(), html.into());
    }

    /// Replaces the inner markup with escaped text.
    pub fn set_text(&mut self, id: &str, text: &str) {
        self.set_html(id, html_escape::encode_text(text));
    }

    pub fn clear(&mut self, id: &str) {
        self.set_html(id, String::new());
    }

    pub fn html(&self, id: &str) -> &str {
        self.html.get(id).map(String::as_str).unwrap_or("")
    }

    /// Current value of a form control; empty when never set.
    pub fn value(&self, id: &str) -> &str {
        self.values.get(id).map(String::as_str).unwrap_or("")
    }

    pub fn set_value(&mut self, id: &str, value: impl Into<String>) {
        self.values.insert(id.to_string(), value.into());
    }

    pub fn attribute(&self, id: &str, name: &str) -> Option<&str> {
        self.attributes
            .get(id)
            .and_then(|attrs| attrs.get(name))
            .map(String::as_str)
    }

    pub fn set_attribute(&mut self, id: &str, name: &str, value: impl Into<String>) {
        self.attributes
            .entry(id.to_string())
            .or_default()
            .insert(name.to_string(), value.into());
    }
}
