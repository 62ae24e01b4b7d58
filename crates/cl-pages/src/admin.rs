//! # Admin dashboard
//!
//! Fetches bookings and laundry rooms from the backend, renders them as
//! table bodies and drives the maintenance toggle. Every request goes
//! through [`AdminDashboard::fetch_with_auth`], the one place where auth
//! expiry and API errors are turned into user feedback.

use cl_core::{
    ids, AdminBookingView, ApiRequest, AppError, BookingFilter, Dialog, Document, Floor,
    HttpTransport, LaundryResource, LaundryStatus, Result, StatusChange, StatusUpdate,
};
use cl_ui::{
    render, BookingRow, BookingRows, FloorOption, FloorOptions, LaundryRow, LaundryRows,
    MessageRow,
};
use serde::de::DeserializeOwned;
use tracing::{error, info, warn};

pub const FLOORS_PATH: &str = "/api/admin/floors";
pub const LAUNDRIES_PATH: &str = "/api/admin/all_laundries";
pub const LOGIN_ROUTE: &str = "/";

pub const AUTH_EXPIRED: &str =
    "Acesso não autorizado ou sessão expirada. Faça login como administrador.";
pub const LOADING_BOOKINGS: &str = "Carregando agendamentos...";
pub const NO_BOOKINGS: &str = "Nenhum agendamento encontrado para os filtros aplicados.";
pub const BOOKINGS_ERROR: &str = "Erro ao carregar agendamentos.";
pub const LOADING_LAUNDRIES: &str = "Carregando lavanderias...";
pub const NO_LAUNDRIES: &str = "Nenhuma lavanderia encontrada.";
pub const LAUNDRIES_ERROR: &str = "Erro ao carregar lavanderias.";
pub const TOGGLE_FAILED: &str = "Falha ao atualizar status da lavanderia.";

const BOOKING_COLUMNS: u8 = 7;
const LAUNDRY_COLUMNS: u8 = 4;

fn message_row(colspan: u8, message: &str) -> String {
    render(&MessageRow { colspan, message })
}

fn status_path(laundry_id: i64) -> String {
    format!("/api/admin/laundry/{laundry_id}/status")
}

fn toggle_prompt(laundry_id: i64, new_status: LaundryStatus) -> String {
    let action = match new_status {
        LaundryStatus::Active => "ativar",
        LaundryStatus::Maintenance => "colocar em manutenção",
    };
    format!("Tem certeza que deseja {action} a lavanderia {laundry_id}?")
}

fn toggled_message(laundry_id: i64, new_status: LaundryStatus) -> String {
    let done = match new_status {
        LaundryStatus::Active => "ativada",
        LaundryStatus::Maintenance => "colocada em manutenção",
    };
    format!("Lavanderia {laundry_id} foi {done} com sucesso.")
}

/// A wired maintenance button: which room it acts on and the status it saw
/// when the row was drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaintenanceToggle {
    pub laundry_id: i64,
    pub current_status: LaundryStatus,
}

pub struct AdminDashboard<T> {
    transport: T,
}

impl<T: HttpTransport> AdminDashboard<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Sends the request and classifies the outcome.
    async fn fetch<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R> {
        let response = self
            .transport
            .send(request)
            .await
            .map_err(|err| AppError::Internal(err.to_string()))?;

        if matches!(response.status, 401 | 403) {
            return Err(AppError::AuthExpired(response.status));
        }
        if !response.is_success() {
            return Err(AppError::Api {
                status: response.status,
                message: response.error_message(),
            });
        }
        response
            .json()
            .map_err(|err| AppError::Internal(format!("invalid response body: {err}")))
    }

    /// Returns the parsed body, or `None` after telling the user what went
    /// wrong. On 401/403 the user is also sent back to the login page.
    pub async fn fetch_with_auth<R: DeserializeOwned>(
        &self,
        dialog: &dyn Dialog,
        request: ApiRequest,
    ) -> Option<R> {
        let path = request.path.clone();
        match self.fetch(request).await {
            Ok(data) => Some(data),
            Err(AppError::AuthExpired(status)) => {
                warn!(%path, status, "Admin session rejected");
                dialog.alert(AUTH_EXPIRED);
                dialog.redirect(LOGIN_ROUTE);
                None
            }
            Err(err) => {
                error!(%path, %err, "API request failed");
                dialog.alert(&format!("Erro ao buscar dados: {err}"));
                None
            }
        }
    }

    pub async fn initialize(&self, doc: &mut Document, dialog: &dyn Dialog) {
        self.load_floors(doc, dialog).await;
        self.load_bookings(doc, dialog).await;
        self.load_laundries(doc, dialog).await;
    }

    /// Fills the floor selector, keeping the current choice selected. Left
    /// untouched when the request fails.
    pub async fn load_floors(&self, doc: &mut Document, dialog: &dyn Dialog) -> Option<Vec<Floor>> {
        let floors: Vec<Floor> = self
            .fetch_with_auth(dialog, ApiRequest::get(FLOORS_PATH))
            .await?;

        let current = doc.value(ids::FILTER_FLOOR).to_string();
        let options: Vec<FloorOption> = floors
            .iter()
            .map(|floor| {
                let value = floor.number.to_string();
                FloorOption {
                    selected: value == current,
                    value,
                }
            })
            .collect();
        doc.set_html(ids::FILTER_FLOOR, render(&FloorOptions { options: &options }));
        Some(floors)
    }

    pub async fn load_bookings(
        &self,
        doc: &mut Document,
        dialog: &dyn Dialog,
    ) -> Option<Vec<AdminBookingView>> {
        doc.set_html(
            ids::BOOKINGS_TABLE_BODY,
            message_row(BOOKING_COLUMNS, LOADING_BOOKINGS),
        );

        let filter = match BookingFilter::from_inputs(
            doc.value(ids::FILTER_DATE_START),
            doc.value(ids::FILTER_DATE_END),
            doc.value(ids::FILTER_FLOOR),
        ) {
            Ok(filter) => filter,
            Err(err) => {
                warn!(%err, "Rejected booking filter");
                dialog.alert(&format!("Filtro inválido: {err}"));
                doc.set_html(
                    ids::BOOKINGS_TABLE_BODY,
                    message_row(BOOKING_COLUMNS, BOOKINGS_ERROR),
                );
                return None;
            }
        };

        let bookings: Option<Vec<AdminBookingView>> = self
            .fetch_with_auth(dialog, ApiRequest::get(filter.bookings_path()))
            .await;

        let body = match &bookings {
            Some(bookings) if !bookings.is_empty() => {
                let rows: Vec<BookingRow> = bookings.iter().map(BookingRow::from).collect();
                render(&BookingRows { rows: &rows })
            }
            Some(_) => message_row(BOOKING_COLUMNS, NO_BOOKINGS),
            None => message_row(BOOKING_COLUMNS, BOOKINGS_ERROR),
        };
        doc.set_html(ids::BOOKINGS_TABLE_BODY, body);
        bookings
    }

    /// Draws every laundry room and returns the toggle wired to each row.
    pub async fn load_laundries(
        &self,
        doc: &mut Document,
        dialog: &dyn Dialog,
    ) -> Vec<MaintenanceToggle> {
        doc.set_html(
            ids::LAUNDRIES_TABLE_BODY,
            message_row(LAUNDRY_COLUMNS, LOADING_LAUNDRIES),
        );

        let laundries: Option<Vec<LaundryResource>> = self
            .fetch_with_auth(dialog, ApiRequest::get(LAUNDRIES_PATH))
            .await;

        match laundries {
            Some(laundries) if !laundries.is_empty() => {
                let rows: Vec<LaundryRow> = laundries
                    .iter()
                    .map(|laundry| {
                        LaundryRow::new(laundry, toggle_prompt(laundry.id, laundry.status.toggled()))
                    })
                    .collect();
                doc.set_html(ids::LAUNDRIES_TABLE_BODY, render(&LaundryRows { rows: &rows }));

                laundries
                    .iter()
                    .map(|laundry| MaintenanceToggle {
                        laundry_id: laundry.id,
                        current_status: laundry.status,
                    })
                    .collect()
            }
            Some(_) => {
                doc.set_html(
                    ids::LAUNDRIES_TABLE_BODY,
                    message_row(LAUNDRY_COLUMNS, NO_LAUNDRIES),
                );
                Vec::new()
            }
            None => {
                doc.set_html(
                    ids::LAUNDRIES_TABLE_BODY,
                    message_row(LAUNDRY_COLUMNS, LAUNDRIES_ERROR),
                );
                Vec::new()
            }
        }
    }

    /// Asks for confirmation, then requests the opposite status. The table is
    /// only redrawn from a fresh fetch after the server accepted the change.
    pub async fn handle_toggle_maintenance(
        &self,
        doc: &mut Document,
        dialog: &dyn Dialog,
        toggle: MaintenanceToggle,
    ) -> bool {
        let new_status = toggle.current_status.toggled();
        if !dialog.confirm(&toggle_prompt(toggle.laundry_id, new_status)) {
            return false;
        }

        let body = match serde_json::to_value(StatusChange { status: new_status }) {
            Ok(body) => body,
            Err(err) => {
                error!(%err, "Could not encode status change");
                dialog.alert(TOGGLE_FAILED);
                return false;
            }
        };
        let request = ApiRequest::put_json(status_path(toggle.laundry_id), body);

        match self.fetch_with_auth::<StatusUpdate>(dialog, request).await {
            Some(update) => {
                info!(
                    laundry_id = update.laundry.id,
                    status = new_status.as_str(),
                    "Laundry status updated"
                );
                dialog.alert(&toggled_message(update.laundry.id, new_status));
                self.load_laundries(doc, dialog).await;
                true
            }
            None => {
                dialog.alert(TOGGLE_FAILED);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialog::FlashDialog;
    use cl_core::{ApiMethod, ApiResponse, MockHttpTransport};
    use serde_json::json;

    fn respond(status: u16, status_text: &str, body: serde_json::Value) -> ApiResponse {
        ApiResponse {
            status,
            status_text: status_text.to_string(),
            body: serde_json::to_vec(&body).unwrap(),
        }
    }

    fn dashboard_answering(
        status: u16,
        status_text: &'static str,
        body: serde_json::Value,
    ) -> AdminDashboard<MockHttpTransport> {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_send()
            .times(1)
            .returning(move |_| Ok(respond(status, status_text, body.clone())));
        AdminDashboard::new(transport)
    }

    #[tokio::test]
    async fn auth_failures_redirect_once() {
        for status in [401, 403] {
            let dashboard = dashboard_answering(status, "Unauthorized", json!({ "error": "Não autenticado" }));
            let dialog = FlashDialog::confirming();

            let floors: Option<Vec<Floor>> = dashboard
                .fetch_with_auth(&dialog, ApiRequest::get(FLOORS_PATH))
                .await;

            assert!(floors.is_none());
            assert_eq!(dialog.redirects(), vec![LOGIN_ROUTE]);
            assert_eq!(dialog.alerts(), vec![AUTH_EXPIRED]);
        }
    }

    #[tokio::test]
    async fn api_errors_alert_without_redirect() {
        let dashboard = dashboard_answering(404, "Not Found", json!({ "error": "Lavanderia não encontrada." }));
        let dialog = FlashDialog::confirming();
        let result: Option<StatusUpdate> = dashboard
            .fetch_with_auth(&dialog, ApiRequest::get(status_path(99)))
            .await;
        assert!(result.is_none());
        assert!(dialog.redirects().is_empty());
        assert_eq!(dialog.alerts(), vec!["Erro ao buscar dados: Lavanderia não encontrada."]);

        let dashboard = dashboard_answering(500, "Internal Server Error", json!(null));
        let dialog = FlashDialog::confirming();
        let result: Option<Vec<Floor>> = dashboard
            .fetch_with_auth(&dialog, ApiRequest::get(FLOORS_PATH))
            .await;
        assert!(result.is_none());
        assert!(dialog.redirects().is_empty());
        assert_eq!(dialog.alerts(), vec!["Erro ao buscar dados: Internal Server Error"]);
    }

    #[tokio::test]
    async fn success_returns_parsed_json() {
        let dashboard = dashboard_answering(
            200,
            "OK",
            json!([{ "id_andar": 1, "numero_andar": 1 }, { "id_andar": 2, "numero_andar": 2 }]),
        );
        let dialog = FlashDialog::confirming();
        let floors: Option<Vec<Floor>> = dashboard
            .fetch_with_auth(&dialog, ApiRequest::get(FLOORS_PATH))
            .await;

        let numbers: Vec<i32> = floors.unwrap().iter().map(|f| f.number).collect();
        assert_eq!(numbers, vec![1, 2]);
        assert!(dialog.alerts().is_empty());
    }

    #[tokio::test]
    async fn transport_failure_is_reported() {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_send()
            .returning(|_| Err(anyhow::anyhow!("connection refused")));
        let dashboard = AdminDashboard::new(transport);
        let dialog = FlashDialog::confirming();

        let floors: Option<Vec<Floor>> = dashboard
            .fetch_with_auth(&dialog, ApiRequest::get(FLOORS_PATH))
            .await;
        assert!(floors.is_none());
        assert_eq!(dialog.alerts(), vec!["Erro ao buscar dados: connection refused"]);
    }

    #[tokio::test]
    async fn bookings_query_omits_empty_filters() {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_send()
            .withf(|request: &ApiRequest| {
                request.method == ApiMethod::Get
                    && request.path == "/api/admin/all_bookings?date_start=2025-05-01&andar=3"
            })
            .times(1)
            .returning(|_| Ok(respond(200, "OK", json!([]))));
        let dashboard = AdminDashboard::new(transport);

        let mut doc = Document::new();
        doc.set_value(ids::FILTER_DATE_START, "2025-05-01");
        doc.set_value(ids::FILTER_DATE_END, "");
        doc.set_value(ids::FILTER_FLOOR, "3");
        let dialog = FlashDialog::confirming();

        let bookings = dashboard.load_bookings(&mut doc, &dialog).await;
        assert_eq!(bookings, Some(Vec::new()));
        assert!(doc.html(ids::BOOKINGS_TABLE_BODY).contains(NO_BOOKINGS));
    }

    #[tokio::test]
    async fn bookings_render_rows_or_error_row() {
        let dashboard = dashboard_answering(
            200,
            "OK",
            json!([{
                "id_agendamento": 12,
                "data": "2025-05-20",
                "horario_desc": "07:00-11:00",
                "andar_num": 5,
                "lavanderia_identificador": "Lavanderia 1",
                "morador_nome": "Ana Souza",
                "morador_apto": "502",
                "status_agendamento": "confirmado"
            }]),
        );
        let mut doc = Document::new();
        let dialog = FlashDialog::confirming();
        dashboard.load_bookings(&mut doc, &dialog).await;
        let body = doc.html(ids::BOOKINGS_TABLE_BODY);
        assert!(body.contains("<td>20/05/2025</td>"));
        assert!(body.contains("<td>Ana Souza</td>"));
        assert!(!body.contains(LOADING_BOOKINGS));

        let dashboard = dashboard_answering(500, "Internal Server Error", json!({}));
        let mut doc = Document::new();
        dashboard.load_bookings(&mut doc, &dialog).await;
        assert!(doc.html(ids::BOOKINGS_TABLE_BODY).contains(BOOKINGS_ERROR));
    }

    #[tokio::test]
    async fn malformed_filter_skips_the_request() {
        let mut transport = MockHttpTransport::new();
        transport.expect_send().times(0);
        let dashboard = AdminDashboard::new(transport);

        let mut doc = Document::new();
        doc.set_value(ids::FILTER_FLOOR, "térreo");
        let dialog = FlashDialog::confirming();

        assert!(dashboard.load_bookings(&mut doc, &dialog).await.is_none());
        assert!(doc.html(ids::BOOKINGS_TABLE_BODY).contains(BOOKINGS_ERROR));
        assert_eq!(dialog.alerts().len(), 1);
    }

    #[tokio::test]
    async fn floors_keep_wildcard_and_selection() {
        let dashboard = dashboard_answering(
            200,
            "OK",
            json!([{ "numero_andar": 1 }, { "numero_andar": 2 }]),
        );
        let mut doc = Document::new();
        doc.set_value(ids::FILTER_FLOOR, "2");
        let dialog = FlashDialog::confirming();

        dashboard.load_floors(&mut doc, &dialog).await;
        let html = doc.html(ids::FILTER_FLOOR);
        assert!(html.starts_with(r#"<option value="">Todos os Andares</option>"#));
        assert!(html.contains(r#"<option value="2" selected>2</option>"#));
    }

    #[tokio::test]
    async fn failed_floor_load_leaves_selector_alone() {
        let dashboard = dashboard_answering(403, "Forbidden", json!({}));
        let mut doc = Document::new();
        doc.set_html(ids::FILTER_FLOOR, "<option>keep</option>");
        let dialog = FlashDialog::confirming();

        assert!(dashboard.load_floors(&mut doc, &dialog).await.is_none());
        assert_eq!(doc.html(ids::FILTER_FLOOR), "<option>keep</option>");
    }

    #[tokio::test]
    async fn laundries_wire_one_toggle_per_row() {
        let dashboard = dashboard_answering(
            200,
            "OK",
            json!([
                { "id_lavanderia": 1, "andar_num": 1, "identificador": "Lavanderia 1", "status": "ativa" },
                { "id_lavanderia": 2, "andar_num": 1, "identificador": "Lavanderia 2", "status": "manutencao" }
            ]),
        );
        let mut doc = Document::new();
        let dialog = FlashDialog::confirming();

        let toggles = dashboard.load_laundries(&mut doc, &dialog).await;
        assert_eq!(
            toggles,
            vec![
                MaintenanceToggle { laundry_id: 1, current_status: LaundryStatus::Active },
                MaintenanceToggle { laundry_id: 2, current_status: LaundryStatus::Maintenance },
            ]
        );
        let html = doc.html(ids::LAUNDRIES_TABLE_BODY);
        assert_eq!(html.matches("maintenance-btn").count(), 2);
        assert!(html.contains("Pôr em Manutenção"));
        assert!(html.contains("Ativar Lavanderia"));
    }

    #[tokio::test]
    async fn empty_laundry_list_has_its_own_row() {
        let dashboard = dashboard_answering(200, "OK", json!([]));
        let mut doc = Document::new();
        let dialog = FlashDialog::confirming();

        assert!(dashboard.load_laundries(&mut doc, &dialog).await.is_empty());
        assert!(doc.html(ids::LAUNDRIES_TABLE_BODY).contains(NO_LAUNDRIES));
    }

    #[tokio::test]
    async fn declined_toggle_sends_nothing() {
        let mut transport = MockHttpTransport::new();
        transport.expect_send().times(0);
        let dashboard = AdminDashboard::new(transport);
        let mut doc = Document::new();
        let dialog = FlashDialog::declining();

        let toggle = MaintenanceToggle { laundry_id: 4, current_status: LaundryStatus::Active };
        assert!(!dashboard.handle_toggle_maintenance(&mut doc, &dialog, toggle).await);
        assert_eq!(
            dialog.prompts(),
            vec!["Tem certeza que deseja colocar em manutenção a lavanderia 4?"]
        );
    }

    #[tokio::test]
    async fn rejected_toggle_reports_failure() {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_send()
            .withf(|request: &ApiRequest| {
                request.method == ApiMethod::Put
                    && request.path == "/api/admin/laundry/4/status"
                    && request.body == Some(json!({ "status": "ativa" }))
            })
            .times(1)
            .returning(|_| Ok(respond(400, "Bad Request", json!({ "error": "Status inválido." }))));
        let dashboard = AdminDashboard::new(transport);
        let mut doc = Document::new();
        let dialog = FlashDialog::confirming();

        let toggle = MaintenanceToggle { laundry_id: 4, current_status: LaundryStatus::Maintenance };
        assert!(!dashboard.handle_toggle_maintenance(&mut doc, &dialog, toggle).await);
        assert_eq!(
            dialog.alerts(),
            vec!["Erro ao buscar dados: Status inválido.", TOGGLE_FAILED]
        );
        assert_eq!(doc.html(ids::LAUNDRIES_TABLE_BODY), "");
    }
}
