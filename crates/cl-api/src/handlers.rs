//! # cl-api Handlers
//!
//! Each handler rebuilds the page's [`Document`], replays the user action
//! through the page controller and renders the result. Alerts become flash
//! messages; a redirect requested by the controller becomes a 303.

use std::sync::{Mutex, MutexGuard};

use actix_web::{http::header, web, HttpResponse, Responder};
use chrono::{Local, NaiveDate};
use cl_core::{ids, BookingStore, Dialog, Document, HttpTransport, LaundryStatus, LaundryUnit};
use cl_pages::{resident, AdminDashboard, FlashDialog, MaintenanceToggle, ResidentPage};
use cl_ui::{render, AdminPageTemplate, ResidentPageTemplate};
use serde::Deserialize;
use tracing::warn;

/// State shared across all Actix-web workers.
pub struct AppState {
    pub store: Mutex<BookingStore>,
    pub resident: ResidentPage,
    pub admin: AdminDashboard<Box<dyn HttpTransport>>,
}

impl AppState {
    pub fn new(resident: ResidentPage, transport: Box<dyn HttpTransport>) -> Self {
        Self {
            store: Mutex::new(BookingStore::new()),
            resident,
            admin: AdminDashboard::new(transport),
        }
    }

    fn store(&self) -> MutexGuard<'_, BookingStore> {
        // The store is only mutated through methods that leave it consistent.
        self.store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SlotForm {
    pub date: String,
    pub laundry: String,
    pub slot: String,
}

#[derive(Debug, Deserialize)]
pub struct CancelForm {
    pub date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    pub date_start: Option<String>,
    pub date_end: Option<String>,
    pub andar: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusForm {
    pub current_status: LaundryStatus,
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

fn see_other(location: String) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// `None` for a blank input, `Err` for anything that is not a date.
fn parse_date(raw: &str) -> Result<Option<NaiveDate>, chrono::ParseError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<NaiveDate>().map(Some)
}

/// Paints the resident page and moves it to `date`. Returns false when the
/// date was unusable.
fn open_resident_page(
    state: &AppState,
    store: &BookingStore,
    doc: &mut Document,
    dialog: &FlashDialog,
    date: Option<&str>,
) -> bool {
    state.resident.initialize(store, doc, today());
    let Some(raw) = date else {
        return true;
    };
    match parse_date(raw) {
        Ok(date) => state.resident.change_date(store, doc, dialog, date),
        Err(err) => {
            warn!(date = raw, %err, "Rejected malformed date");
            dialog.alert(resident::INVALID_DATE);
            false
        }
    }
}

fn resident_response(
    state: &AppState,
    store: &BookingStore,
    mut doc: Document,
    dialog: &FlashDialog,
) -> HttpResponse {
    // Cancel forms carry the selected date, so the list is drawn last.
    state.resident.load_my_bookings(store, &mut doc);
    let flashes = dialog.alerts();
    html(render(&ResidentPageTemplate {
        doc: &doc,
        flashes: &flashes,
    }))
}

pub async fn resident_page(
    data: web::Data<AppState>,
    query: web::Query<DateQuery>,
) -> impl Responder {
    let store = data.store();
    let dialog = FlashDialog::confirming();
    let mut doc = Document::new();

    open_resident_page(&data, &store, &mut doc, &dialog, query.date.as_deref());
    resident_response(&data, &store, doc, &dialog)
}

pub async fn create_booking(
    data: web::Data<AppState>,
    form: web::Form<SlotForm>,
) -> impl Responder {
    let form = form.into_inner();
    let mut store = data.store();
    let dialog = FlashDialog::confirming();
    let mut doc = Document::new();

    if open_resident_page(&data, &store, &mut doc, &dialog, Some(&form.date)) {
        match (resident::selected_date(&doc), LaundryUnit::from_id(&form.laundry)) {
            (Some(date), Some(unit)) => {
                data.resident
                    .handle_slot_click(&mut store, &mut doc, &dialog, date, unit, &form.slot);
            }
            (None, _) => dialog.alert(resident::NO_DATE_SELECTED),
            (_, None) => dialog.alert(resident::UNKNOWN_LAUNDRY),
        }
    }
    resident_response(&data, &store, doc, &dialog)
}

pub async fn cancel_booking(
    data: web::Data<AppState>,
    path: web::Path<String>,
    form: web::Form<CancelForm>,
) -> impl Responder {
    let booking_id = path.into_inner();
    let mut store = data.store();
    let dialog = FlashDialog::confirming();
    let mut doc = Document::new();

    open_resident_page(&data, &store, &mut doc, &dialog, form.date.as_deref());
    data.resident
        .handle_cancel_booking(&mut store, &mut doc, &dialog, &booking_id);
    resident_response(&data, &store, doc, &dialog)
}

fn admin_document(filters: &FilterQuery) -> Document {
    let mut doc = Document::new();
    doc.set_value(ids::FILTER_DATE_START, filters.date_start.clone().unwrap_or_default());
    doc.set_value(ids::FILTER_DATE_END, filters.date_end.clone().unwrap_or_default());
    doc.set_value(ids::FILTER_FLOOR, filters.andar.clone().unwrap_or_default());
    doc
}

fn admin_response(doc: &Document, dialog: &FlashDialog) -> HttpResponse {
    if let Some(location) = dialog.redirect_target() {
        return see_other(location);
    }
    let flashes = dialog.alerts();
    html(render(&AdminPageTemplate {
        doc,
        flashes: &flashes,
    }))
}

pub async fn admin_dashboard(
    data: web::Data<AppState>,
    query: web::Query<FilterQuery>,
) -> impl Responder {
    let dialog = FlashDialog::confirming();
    let mut doc = admin_document(&query);

    data.admin.initialize(&mut doc, &dialog).await;
    admin_response(&doc, &dialog)
}

pub async fn toggle_laundry_status(
    data: web::Data<AppState>,
    path: web::Path<i64>,
    form: web::Form<StatusForm>,
) -> impl Responder {
    let dialog = FlashDialog::confirming();
    let mut doc = admin_document(&FilterQuery::default());
    let toggle = MaintenanceToggle {
        laundry_id: path.into_inner(),
        current_status: form.current_status,
    };

    let toggled = data
        .admin
        .handle_toggle_maintenance(&mut doc, &dialog, toggle)
        .await;
    if dialog.redirect_target().is_none() {
        data.admin.load_floors(&mut doc, &dialog).await;
        data.admin.load_bookings(&mut doc, &dialog).await;
        // A successful toggle has already redrawn the laundry table.
        if !toggled {
            data.admin.load_laundries(&mut doc, &dialog).await;
        }
    }
    admin_response(&doc, &dialog)
}
