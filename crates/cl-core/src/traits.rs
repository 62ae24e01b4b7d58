//! # Core Traits (Ports)
//!
//! The page controllers only reach the outside world through these.

use async_trait::async_trait;

use crate::models::{ApiRequest, ApiResponse};

/// Raw HTTP access to the condominium backend.
///
/// Implementations only move bytes; status interpretation (auth expiry,
/// error bodies) belongs to the admin controller's `fetch_with_auth`.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> anyhow::Result<ApiResponse>;
}

#[async_trait]
impl<T: HttpTransport + ?Sized> HttpTransport for Box<T> {
    async fn send(&self, request: ApiRequest) -> anyhow::Result<ApiResponse> {
        (**self).send(request).await
    }
}

/// User-facing interaction: the page's alert, confirm and navigation.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait Dialog {
    fn alert(&self, message: &str);
    /// Returns true when the user accepts.
    fn confirm(&self, message: &str) -> bool;
    fn redirect(&self, location: &str);
}
