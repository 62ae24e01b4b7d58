//! # Resident booking view
//!
//! Slot rendering for the resident's two laundry rooms and the booking
//! create/cancel flow against the client-side [`BookingStore`].

use chrono::NaiveDate;
use cl_core::{
    display_date, ids, BookingRecord, BookingStore, Dialog, Document, LaundryUnit,
    ResidentProfile, TimeSlot, TIME_SLOTS,
};
use cl_ui::{render, BookingItem, BookingList, SlotPanel, SlotView};
use tracing::{info, warn};
use uuid::Uuid;

pub const NO_DATE_SELECTED: &str = "Data não selecionada";
pub const SLOT_TAKEN: &str = "Este horário já está ocupado.";
pub const UNKNOWN_SLOT: &str = "Horário inválido.";
pub const UNKNOWN_LAUNDRY: &str = "Lavanderia inválida.";
pub const INVALID_DATE: &str = "Data inválida.";
pub const PAST_DATE: &str = "Não é possível agendar em uma data anterior a hoje.";
pub const BOOKING_CREATED: &str = "Agendamento realizado com sucesso! (Simulação)";
pub const BOOKING_CANCELLED: &str = "Agendamento cancelado com sucesso! (Simulação)";
pub const CANCEL_NOT_FOUND: &str = "Erro ao encontrar agendamento para cancelar.";

fn panel_id(unit: LaundryUnit) -> &'static str {
    match unit {
        LaundryUnit::One => ids::TIME_SLOTS_LAUNDRY_1,
        LaundryUnit::Two => ids::TIME_SLOTS_LAUNDRY_2,
    }
}

fn booking_prompt(unit: LaundryUnit, date: NaiveDate, slot: &TimeSlot) -> String {
    format!(
        "Confirmar agendamento para {} no dia {} ({})?",
        unit.name(),
        display_date(date),
        slot.label
    )
}

fn cancel_prompt(booking: &BookingRecord) -> String {
    format!(
        "Tem certeza que deseja cancelar o agendamento: {} em {} ({})?",
        booking.laundry, booking.date, booking.time
    )
}

/// Date currently picked in the schedule input.
pub fn selected_date(doc: &Document) -> Option<NaiveDate> {
    doc.value(ids::SCHEDULE_DATE).parse().ok()
}

fn min_date(doc: &Document) -> Option<NaiveDate> {
    doc.attribute(ids::SCHEDULE_DATE, "min")?.parse().ok()
}

pub fn update_selected_date_display(doc: &mut Document, date: Option<NaiveDate>) {
    match date {
        Some(date) => doc.set_text(ids::SELECTED_DATE_DISPLAY, &display_date(date)),
        None => doc.set_text(ids::SELECTED_DATE_DISPLAY, NO_DATE_SELECTED),
    }
}

/// Page controller for the resident view. Holds no booking state itself;
/// every operation works on the store it is handed.
#[derive(Debug, Clone)]
pub struct ResidentPage {
    profile: ResidentProfile,
}

impl ResidentPage {
    pub fn new(profile: ResidentProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &ResidentProfile {
        &self.profile
    }

    /// First paint: today as both the default and the earliest date.
    pub fn initialize(&self, store: &BookingStore, doc: &mut Document, today: NaiveDate) {
        doc.set_attribute(ids::SCHEDULE_DATE, "min", today.to_string());
        doc.set_value(ids::SCHEDULE_DATE, today.to_string());

        self.update_user_info(doc);
        update_selected_date_display(doc, Some(today));
        self.load_available_slots(store, doc, Some(today));
        self.load_my_bookings(store, doc);
    }

    pub fn update_user_info(&self, doc: &mut Document) {
        doc.set_text(ids::USER_FLOOR, &self.profile.floor.to_string());
        doc.set_text(ids::USER_APARTMENT, &self.profile.apartment);
    }

    /// Handles a change of the schedule input. Both panels are redrawn from
    /// scratch. Returns false when the date was refused.
    pub fn change_date(
        &self,
        store: &BookingStore,
        doc: &mut Document,
        dialog: &dyn Dialog,
        date: Option<NaiveDate>,
    ) -> bool {
        if let Some(date) = date {
            if reject_past(doc, dialog, date) {
                return false;
            }
        }

        doc.set_value(ids::SCHEDULE_DATE, date.map(|d| d.to_string()).unwrap_or_default());
        update_selected_date_display(doc, date);
        self.load_available_slots(store, doc, date);
        true
    }

    pub fn load_available_slots(
        &self,
        store: &BookingStore,
        doc: &mut Document,
        date: Option<NaiveDate>,
    ) -> Vec<SlotView> {
        let mut views = Vec::with_capacity(LaundryUnit::ALL.len() * TIME_SLOTS.len());
        for unit in LaundryUnit::ALL {
            views.extend(self.render_time_slots(store, doc, unit, date));
        }
        views
    }

    /// Draws the full slot catalog for one laundry. With no date selected the
    /// panel is left empty.
    pub fn render_time_slots(
        &self,
        store: &BookingStore,
        doc: &mut Document,
        unit: LaundryUnit,
        date: Option<NaiveDate>,
    ) -> Vec<SlotView> {
        let Some(date) = date else {
            doc.clear(panel_id(unit));
            return Vec::new();
        };

        let slots: Vec<SlotView> = TIME_SLOTS
            .iter()
            .map(|slot| SlotView {
                date: date.to_string(),
                laundry_id: unit.id(),
                slot_id: slot.id,
                label: slot.label,
                booked: store.is_booked(date, unit, slot),
                confirm: booking_prompt(unit, date, slot),
            })
            .collect();

        doc.set_html(panel_id(unit), render(&SlotPanel { slots: &slots }));
        slots
    }

    pub fn handle_slot_click(
        &self,
        store: &mut BookingStore,
        doc: &mut Document,
        dialog: &dyn Dialog,
        date: NaiveDate,
        unit: LaundryUnit,
        slot_id: &str,
    ) -> Option<BookingRecord> {
        let Some(slot) = TimeSlot::by_id(slot_id) else {
            dialog.alert(UNKNOWN_SLOT);
            return None;
        };
        if reject_past(doc, dialog, date) {
            return None;
        }
        if store.is_booked(date, unit, slot) {
            dialog.alert(SLOT_TAKEN);
            return None;
        }
        if !dialog.confirm(&booking_prompt(unit, date, slot)) {
            info!("Booking declined by user");
            return None;
        }

        info!(laundry = unit.id(), slot = slot.id, %date, "Booking requested");
        let record = match store.create(date, unit, slot) {
            Ok(record) => record,
            Err(err) => {
                warn!(%err, "Booking rejected by store");
                dialog.alert(SLOT_TAKEN);
                return None;
            }
        };

        self.load_available_slots(store, doc, Some(date));
        self.load_my_bookings(store, doc);
        dialog.alert(BOOKING_CREATED);
        Some(record)
    }

    /// Redraws the personal list, which the store keeps sorted by date and
    /// slot start.
    pub fn load_my_bookings(&self, store: &BookingStore, doc: &mut Document) -> Vec<BookingItem> {
        let selected = doc.value(ids::SCHEDULE_DATE).to_string();
        let items: Vec<BookingItem> = store
            .my_bookings()
            .iter()
            .map(|booking| BookingItem {
                id: booking.id.to_string(),
                summary: format!(
                    "{} - {} ({})",
                    display_date(booking.date),
                    booking.time,
                    booking.laundry
                ),
                confirm: cancel_prompt(booking),
                selected_date: selected.clone(),
            })
            .collect();

        doc.set_html(ids::MY_BOOKINGS_LIST, render(&BookingList { items: &items }));
        items
    }

    pub fn handle_cancel_booking(
        &self,
        store: &mut BookingStore,
        doc: &mut Document,
        dialog: &dyn Dialog,
        booking_id: &str,
    ) -> Option<BookingRecord> {
        let booking = booking_id
            .parse::<Uuid>()
            .ok()
            .and_then(|id| store.find(id).cloned());
        let Some(booking) = booking else {
            warn!(booking_id, "Cancel target not in personal list");
            dialog.alert(CANCEL_NOT_FOUND);
            return None;
        };

        if !dialog.confirm(&cancel_prompt(&booking)) {
            return None;
        }

        info!(booking_id = %booking.id, "Cancellation requested");
        let cancelled = match store.cancel(booking.id) {
            Ok(cancelled) => cancelled,
            Err(err) => {
                warn!(%err, "Cancellation failed");
                dialog.alert(CANCEL_NOT_FOUND);
                return None;
            }
        };

        let date = selected_date(doc);
        self.load_available_slots(store, doc, date);
        self.load_my_bookings(store, doc);
        dialog.alert(BOOKING_CANCELLED);
        Some(cancelled)
    }
}

/// Alerts and returns true when `date` is before the input's minimum.
fn reject_past(doc: &Document, dialog: &dyn Dialog, date: NaiveDate) -> bool {
    match min_date(doc) {
        Some(min) if date < min => {
            dialog.alert(PAST_DATE);
            true
        }
        _ => false,
    }
}
