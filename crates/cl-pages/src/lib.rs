//! Page controllers. Each one mirrors a page's script: it reads inputs from a
//! [`cl_core::Document`], talks to the store or the backend, and writes the
//! redrawn regions back.

pub mod admin;
pub mod dialog;
pub mod resident;

pub use admin::{AdminDashboard, MaintenanceToggle};
pub use dialog::FlashDialog;
pub use resident::{selected_date, update_selected_date_display, ResidentPage};
