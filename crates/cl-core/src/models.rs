//! # Domain Models
//!
//! Resident-side records live only in the client; the admin-side types
//! mirror the backend's JSON payloads field for field.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::TimeSlot;

/// Renders a calendar date the way the pages show it (dd/mm/yyyy).
pub fn display_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// The mock resident whose page is being rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidentProfile {
    pub floor: i32,
    pub apartment: String,
}

/// An entry in the resident's personal booking list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRecord {
    /// UUID v7, so ids are time-ordered as well as unique
    pub id: Uuid,
    pub date: NaiveDate,
    /// Slot label as displayed (e.g. "07:00 - 11:00")
    pub time: String,
    /// Laundry display name (e.g. "Lavanderia 1")
    pub laundry: String,
}

impl BookingRecord {
    pub fn slot(&self) -> Option<&'static TimeSlot> {
        TimeSlot::by_label(&self.time)
    }

    /// Ordering key for the personal list: date first, then slot start.
    pub fn sort_key(&self) -> (NaiveDate, u32) {
        let start = self.slot().map(TimeSlot::start_hour).unwrap_or(u32::MAX);
        (self.date, start)
    }
}

/// Operational state of a laundry room, as the backend spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaundryStatus {
    #[serde(rename = "ativa")]
    Active,
    #[serde(rename = "manutencao")]
    Maintenance,
}

impl LaundryStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            LaundryStatus::Active => "ativa",
            LaundryStatus::Maintenance => "manutencao",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            LaundryStatus::Active => LaundryStatus::Maintenance,
            LaundryStatus::Maintenance => LaundryStatus::Active,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LaundryStatus::Active => "Ativa",
            LaundryStatus::Maintenance => "Em Manutenção",
        }
    }

    /// Caption of the button that moves the room *out* of this status.
    pub fn action_label(self) -> &'static str {
        match self {
            LaundryStatus::Active => "Pôr em Manutenção",
            LaundryStatus::Maintenance => "Ativar Lavanderia",
        }
    }

    pub fn button_class(self) -> &'static str {
        match self {
            LaundryStatus::Active => "deactivate",
            LaundryStatus::Maintenance => "activate",
        }
    }
}

/// A laundry room as listed by `GET /api/admin/all_laundries`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaundryResource {
    #[serde(rename = "id_lavanderia")]
    pub id: i64,
    #[serde(rename = "andar_num")]
    pub floor: i32,
    #[serde(rename = "identificador")]
    pub identifier: String,
    pub status: LaundryStatus,
}

/// Read-only booking row from `GET /api/admin/all_bookings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminBookingView {
    #[serde(rename = "id_agendamento")]
    pub id: i64,
    #[serde(rename = "data")]
    pub date: NaiveDate,
    #[serde(rename = "horario_desc")]
    pub time_slot: String,
    #[serde(rename = "andar_num")]
    pub floor: i32,
    #[serde(rename = "lavanderia_identificador")]
    pub laundry: String,
    #[serde(rename = "morador_nome")]
    pub resident_name: String,
    #[serde(rename = "morador_apto")]
    pub resident_apartment: String,
    #[serde(rename = "status_agendamento")]
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Floor {
    #[serde(rename = "id_andar", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "numero_andar")]
    pub number: i32,
}

/// Body of `PUT /api/admin/laundry/{id}/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    pub status: LaundryStatus,
}

/// Response of the status update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(rename = "lavanderia")]
    pub laundry: UpdatedLaundry,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatedLaundry {
    #[serde(rename = "id_lavanderia")]
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<LaundryStatus>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiMethod {
    Get,
    Put,
}

/// A request against the backend, relative to its base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: ApiMethod,
    /// Path plus query string, e.g. "/api/admin/floors"
    pub path: String,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: ApiMethod::Get,
            path: path.into(),
            body: None,
        }
    }

    pub fn put_json(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: ApiMethod::Put,
            path: path.into(),
            body: Some(body),
        }
    }
}

/// What came back over the wire, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub status_text: String,
    pub body: Vec<u8>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: serde::de::DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_slice(&self.body)
    }

    /// The server's `{"error": "..."}` message, or the status text when the
    /// body carries none.
    pub fn error_message(&self) -> String {
        self.json::<ErrorBody>()
            .ok()
            .and_then(|body| body.error)
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| self.status_text.clone())
    }
}
