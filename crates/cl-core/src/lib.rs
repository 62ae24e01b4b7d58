//! condo-laundry/crates/cl-core/src/lib.rs
//!
//! The central domain logic and interface definitions for the condo laundry
//! booking client.

pub mod catalog;
pub mod error;
pub mod filter;
pub mod models;
pub mod store;
pub mod surface;
pub mod traits;

// Re-exporting for easier access in other crates
pub use catalog::*;
pub use error::*;
pub use filter::*;
pub use models::*;
pub use store::*;
pub use surface::{ids, Document};
pub use traits::*;

#[cfg(test)]
mod tests {
    use super::models::*;

    #[test]
    fn laundry_status_round_trips_backend_spelling() {
        let resource: LaundryResource = serde_json::from_value(serde_json::json!({
            "id_lavanderia": 3,
            "andar_num": 2,
            "identificador": "Lavanderia 1",
            "status": "manutencao"
        }))
        .unwrap();
        assert_eq!(resource.status, LaundryStatus::Maintenance);
        assert_eq!(resource.status.toggled(), LaundryStatus::Active);
        assert_eq!(resource.status.toggled().as_str(), "ativa");
    }

    #[test]
    fn error_message_prefers_server_text() {
        let with_body = ApiResponse {
            status: 404,
            status_text: "Not Found".into(),
            body: r#"{"error":"Lavanderia não encontrada."}"#.as_bytes().to_vec(),
        };
        assert_eq!(with_body.error_message(), "Lavanderia não encontrada.");

        let without_body = ApiResponse {
            status: 500,
            status_text: "Internal Server Error".into(),
            body: b"<html>boom</html>".to_vec(),
        };
        assert_eq!(without_body.error_message(), "Internal Server Error");
        assert!(!without_body.is_success());
    }

    #[test]
    fn display_date_is_day_first() {
        let date = chrono::NaiveDate::from_ymd_opt(2025, 5, 20).unwrap();
        assert_eq!(display_date(date), "20/05/2025");
    }
}
