use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "CarePort";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Oversized page size for the bulk listing fetch. The portal API has no
/// server-side status filter, so the store pulls effectively all records
/// in one page and filters in memory.
pub const DEFAULT_BULK_PAGE_SIZE: u32 = 1000;

/// Default request timeout for the HTTP client.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Local development backend.
const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Environment variable overriding the API base URL.
pub const API_URL_ENV: &str = "CAREPORT_API_URL";

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> String {
    "info,careport_client=debug".to_string()
}

/// Connection settings for the portal API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL without a trailing slash.
    pub base_url: String,
    /// Page size used by the bulk listing fetch.
    pub bulk_page_size: u32,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ApiConfig {
    /// Create a config pointing at `base_url` (trailing slashes trimmed).
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            bulk_page_size: DEFAULT_BULK_PAGE_SIZE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Read the base URL from `CAREPORT_API_URL`, falling back to the
    /// local development default.
    pub fn from_env() -> Self {
        let base =
            std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(&base)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_bulk_page_size(mut self, page_size: u32) -> Self {
        self.bulk_page_size = page_size;
        self
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
