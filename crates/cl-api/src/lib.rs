//! # cl-api
//!
//! The web routing and orchestration layer for the condo laundry pages.

pub mod handlers;
pub mod middleware;

pub use handlers::AppState;

use actix_web::web;

/// Mounts both pages and their form endpoints.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("")
            // Resident booking view
            .route("/", web::get().to(handlers::resident_page))
            .route("/bookings", web::post().to(handlers::create_booking))
            .route("/bookings/{id}/cancel", web::post().to(handlers::cancel_booking))
            // Admin dashboard
            .route("/admin", web::get().to(handlers::admin_dashboard))
            .route(
                "/admin/laundry/{id}/status",
                web::post().to(handlers::toggle_laundry_status),
            ),
    );
}
