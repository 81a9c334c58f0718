//! Appointments listing client.
//!
//! `AppointmentsApi` is the seam between the aggregator store and the
//! wire. The real client issues one GET against the listing endpoint;
//! the mock drives tests. The portal API has no server-side status
//! filter today, so callers request an oversized page and filter in
//! memory. If the server ever grows a filter parameter, only this
//! boundary changes.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::auth::TokenStore;
use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::models::{AppointmentPage, AppointmentRecord};

/// Sort direction forwarded verbatim to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    Asc,
    Desc,
}

impl SortDir {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Query parameters for the listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAppointmentsQuery {
    pub page_no: u32,
    pub page_size: u32,
    pub sort_by: String,
    pub sort_dir: SortDir,
    /// Sent only when non-empty after trimming.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_term: Option<String>,
}

/// Listing access used by the aggregator store.
pub trait AppointmentsApi {
    fn list_appointments(
        &self,
        query: &ListAppointmentsQuery,
    ) -> Result<AppointmentPage, ApiError>;
}

impl<T: AppointmentsApi + ?Sized> AppointmentsApi for Arc<T> {
    fn list_appointments(
        &self,
        query: &ListAppointmentsQuery,
    ) -> Result<AppointmentPage, ApiError> {
        (**self).list_appointments(query)
    }
}

// ─── HTTP client ──────────────────────────────────────────────────────────────

/// Blocking HTTP client for the portal appointments API.
pub struct HttpAppointmentsApi {
    base_url: String,
    client: reqwest::blocking::Client,
    tokens: Arc<TokenStore>,
}

impl HttpAppointmentsApi {
    /// Create a client from connection settings and the shared token store.
    pub fn new(config: &ApiConfig, tokens: Arc<TokenStore>) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: config.base_url.clone(),
            client,
            tokens,
        }
    }

    fn listing_url(&self) -> String {
        format!("{}/api/v1/appointments", self.base_url)
    }
}

impl AppointmentsApi for HttpAppointmentsApi {
    fn list_appointments(
        &self,
        query: &ListAppointmentsQuery,
    ) -> Result<AppointmentPage, ApiError> {
        let url = self.listing_url();
        tracing::debug!(%url, page_size = query.page_size, "GET appointments");

        let mut request = self.client.get(&url).query(query);
        if let Some(token) = self.tokens.bearer() {
            request = request.bearer_auth(token);
        }

        let response = request.send().map_err(|e| {
            if e.is_connect() {
                ApiError::Connect(self.base_url.clone())
            } else if e.is_timeout() {
                ApiError::Timeout
            } else {
                ApiError::Http(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            // Error bodies carry at most a human-readable `message` field.
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
                .unwrap_or(body);
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response.json().map_err(|e| ApiError::Parse(e.to_string()))
    }
}

// ─── Mock client ──────────────────────────────────────────────────────────────

/// Mock listing API for tests.
///
/// Serves scripted one-shot responses first, then a fallback, and
/// records every query it sees along with a call count.
pub struct MockAppointmentsApi {
    script: Mutex<VecDeque<Result<AppointmentPage, String>>>,
    fallback: Result<AppointmentPage, String>,
    calls: AtomicUsize,
    queries: Mutex<Vec<ListAppointmentsQuery>>,
}

impl MockAppointmentsApi {
    /// Mock that always returns a single page holding `records`.
    pub fn returning(records: Vec<AppointmentRecord>) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: Ok(Self::page(records)),
            calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Mock that always fails with a simulated transport error.
    pub fn failing(message: &str) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: Err(message.to_string()),
            calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Queue a one-shot success ahead of the fallback.
    pub fn push_page(&self, records: Vec<AppointmentRecord>) {
        self.script
            .lock()
            .unwrap()
            .push_back(Ok(Self::page(records)));
    }

    /// Queue a one-shot failure ahead of the fallback.
    pub fn push_failure(&self, message: &str) {
        self.script
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
    }

    /// Number of `list_appointments` calls served so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The most recent query, if any call was made.
    pub fn last_query(&self) -> Option<ListAppointmentsQuery> {
        self.queries.lock().unwrap().last().cloned()
    }

    fn page(records: Vec<AppointmentRecord>) -> AppointmentPage {
        let total = records.len() as u64;
        AppointmentPage {
            content: records,
            page_no: 0,
            page_size: 1000,
            total_elements: total,
            total_pages: 1,
            last: true,
        }
    }
}

impl AppointmentsApi for MockAppointmentsApi {
    fn list_appointments(
        &self,
        query: &ListAppointmentsQuery,
    ) -> Result<AppointmentPage, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.clone());

        let scripted = self.script.lock().unwrap().pop_front();
        let outcome = match scripted {
            Some(response) => response,
            None => self.fallback.clone(),
        };
        outcome.map_err(ApiError::Http)
    }
}
