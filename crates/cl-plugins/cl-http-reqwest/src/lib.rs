//! # cl-http-reqwest
//! condo-laundry/crates/cl-plugins/cl-http-reqwest/src/lib.rs
//! `reqwest` implementation of `HttpTransport`: joins request paths onto the
//! backend origin and forwards the admin session cookie.

use anyhow::Context;
use async_trait::async_trait;
use cl_core::{ApiMethod, ApiRequest, ApiResponse, HttpTransport};
use reqwest::header::{ACCEPT, COOKIE};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};

pub struct ReqwestTransport {
    client: Client,
    /// Backend origin without a trailing slash (e.g., "http://localhost:5000")
    base_url: String,
    session_cookie: Option<SecretString>,
}

impl ReqwestTransport {
    pub fn new(base_url: &str, session_cookie: Option<SecretString>) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("condo-laundry/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self::with_client(client, base_url, session_cookie))
    }

    pub fn with_client(client: Client, base_url: &str, session_cookie: Option<SecretString>) -> Self {
        Self {
            client,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            session_cookie,
        }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> anyhow::Result<ApiResponse> {
        let url = self.url(&request.path);
        let mut builder = match request.method {
            ApiMethod::Get => self.client.get(&url),
            ApiMethod::Put => self.client.put(&url),
        }
        .header(ACCEPT, "application/json");

        if let Some(cookie) = &self.session_cookie {
            builder = builder.header(COOKIE, cookie.expose_secret());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        tracing::debug!(method = ?request.method, %url, "Backend request");
        let response = builder
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .with_context(|| format!("reading response from {url} failed"))?;

        Ok(ApiResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body: body.to_vec(),
        })
    }
}
