//! # cl-ui
//!
//! Askama templates for both pages. The fragment templates produce the inner
//! markup of one element; the page templates stitch a [`Document`] back into
//! full HTML.

use askama::Template;
use cl_core::{display_date, AdminBookingView, Document, LaundryResource};

/// One slot widget as it is about to be drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotView {
    /// ISO date the widget books
    pub date: String,
    pub laundry_id: &'static str,
    pub slot_id: &'static str,
    pub label: &'static str,
    pub booked: bool,
    /// Confirmation prompt shown before the booking is submitted
    pub confirm: String,
}

#[derive(Template)]
#[template(path = "slots.html")]
pub struct SlotPanel<'a> {
    pub slots: &'a [SlotView],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingItem {
    pub id: String,
    /// "dd/mm/yyyy - 07:00 - 11:00 (Lavanderia 1)"
    pub summary: String,
    pub confirm: String,
    /// Date the page is showing, so the cancel round trip lands back on it
    pub selected_date: String,
}

#[derive(Template)]
#[template(path = "my_bookings.html")]
pub struct BookingList<'a> {
    pub items: &'a [BookingItem],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloorOption {
    pub value: String,
    pub selected: bool,
}

#[derive(Template)]
#[template(path = "floor_options.html")]
pub struct FloorOptions<'a> {
    pub options: &'a [FloorOption],
}

/// Single full-width row used for loading, empty and error states.
#[derive(Template)]
#[template(path = "message_row.html")]
pub struct MessageRow<'a> {
    pub colspan: u8,
    pub message: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRow {
    pub date: String,
    pub time_slot: String,
    pub floor: i32,
    pub laundry: String,
    pub resident_name: String,
    pub resident_apartment: String,
    pub status: String,
}

impl From<&AdminBookingView> for BookingRow {
    fn from(booking: &AdminBookingView) -> Self {
        Self {
            date: display_date(booking.date),
            time_slot: booking.time_slot.clone(),
            floor: booking.floor,
            laundry: booking.laundry.clone(),
            resident_name: booking.resident_name.clone(),
            resident_apartment: booking.resident_apartment.clone(),
            status: booking.status.clone(),
        }
    }
}

#[derive(Template)]
#[template(path = "booking_rows.html")]
pub struct BookingRows<'a> {
    pub rows: &'a [BookingRow],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaundryRow {
    pub id: i64,
    pub floor: i32,
    pub identifier: String,
    pub status_value: &'static str,
    pub status_label: &'static str,
    pub button_class: &'static str,
    pub action_label: &'static str,
    pub confirm: String,
}

impl LaundryRow {
    pub fn new(laundry: &LaundryResource, confirm: String) -> Self {
        Self {
            id: laundry.id,
            floor: laundry.floor,
            identifier: laundry.identifier.clone(),
            status_value: laundry.status.as_str(),
            status_label: laundry.status.label(),
            button_class: laundry.status.button_class(),
            action_label: laundry.status.action_label(),
            confirm,
        }
    }
}

#[derive(Template)]
#[template(path = "laundry_rows.html")]
pub struct LaundryRows<'a> {
    pub rows: &'a [LaundryRow],
}

#[derive(Template)]
#[template(path = "resident.html")]
pub struct ResidentPageTemplate<'a> {
    pub doc: &'a Document,
    pub flashes: &'a [String],
}

#[derive(Template)]
#[template(path = "admin.html")]
pub struct AdminPageTemplate<'a> {
    pub doc: &'a Document,
    pub flashes: &'a [String],
}

/// Renders a template, logging and yielding empty markup on failure.
pub fn render<T: Template>(template: &T) -> String {
    match template.render() {
        Ok(body) => body,
        Err(err) => {
            tracing::error!("Template render error: {err}");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cl_core::{ids, LaundryStatus};

    fn slot(slot_id: &'static str, label: &'static str, booked: bool) -> SlotView {
        SlotView {
            date: "2025-05-20".into(),
            laundry_id: "1",
            slot_id,
            label,
            booked,
            confirm: format!("Confirmar agendamento para Lavanderia 1 no dia 20/05/2025 ({label})?"),
        }
    }

    #[test]
    fn booked_slots_are_inert_available_slots_submit() {
        let slots = [slot("07-11", "07:00 - 11:00", true), slot("11-15", "11:00 - 15:00", false)];
        let html = render(&SlotPanel { slots: &slots });

        assert_eq!(html.matches("Horário Ocupado").count(), 1);
        assert_eq!(html.matches("Clique para agendar").count(), 1);
        assert_eq!(html.matches("<form").count(), 1);
        assert!(html.contains(r#"name="slot" value="11-15""#));
        assert!(!html.contains(r#"name="slot" value="07-11""#));
    }

    #[test]
    fn empty_booking_list_shows_placeholder() {
        let html = render(&BookingList { items: &[] });
        assert!(html.contains(r#"<li class="no-bookings">Nenhum agendamento encontrado.</li>"#));
    }

    #[test]
    fn floor_options_start_with_wildcard() {
        let options = [
            FloorOption { value: "1".into(), selected: false },
            FloorOption { value: "2".into(), selected: true },
        ];
        let html = render(&FloorOptions { options: &options });
        let wildcard = html.find("Todos os Andares").unwrap();
        let first = html.find(r#"<option value="1""#).unwrap();
        assert!(wildcard < first);
        assert!(html.contains(r#"<option value="2" selected>"#));
    }

    #[test]
    fn laundry_row_reflects_status() {
        let laundry = LaundryResource {
            id: 7,
            floor: 3,
            identifier: "Lavanderia 2".into(),
            status: LaundryStatus::Maintenance,
        };
        let rows = [LaundryRow::new(&laundry, "ok?".into())];
        let html = render(&LaundryRows { rows: &rows });
        assert!(html.contains("Em Manutenção"));
        assert!(html.contains("Ativar Lavanderia"));
        assert!(html.contains(r#"class="maintenance-btn activate""#));
        assert!(html.contains(r#"data-current-status="manutencao""#));
    }

    #[test]
    fn page_template_reads_document_regions() {
        let mut doc = Document::new();
        doc.set_html(ids::TIME_SLOTS_LAUNDRY_2, "<div>slot</div>");
        doc.set_value(ids::SCHEDULE_DATE, "2025-05-20");
        doc.set_attribute(ids::SCHEDULE_DATE, "min", "2025-05-01");
        let flashes = vec!["Agendamento realizado com sucesso! (Simulação)".to_string()];

        let html = render(&ResidentPageTemplate { doc: &doc, flashes: &flashes });
        assert!(html.contains(r#"<div id="time-slots-laundry-2" class="time-slots"><div>slot</div></div>"#));
        assert!(html.contains(r#"value="2025-05-20""#));
        assert!(html.contains(r#"min="2025-05-01""#));
        assert!(html.contains("Agendamento realizado com sucesso!"));
    }
}
