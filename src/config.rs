//! Client configuration.
//!
//! Immutable after construction. The composition root builds one
//! `ClientConfig`, hands it to `RequestClient::new`, and shares the
//! client via `Arc` for the life of the process.

use std::time::Duration;

use crate::version::ApiVersionTable;

/// Environment variable naming the backend origin.
const BASE_URL_ENV: &str = "SKYLINE_API_URL";

/// Local development origin used when no environment override is set.
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:28000";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend origin. Stored without a trailing slash; request paths
    /// are expected to start with `/`.
    pub base_url: String,

    /// Default transport timeout. `None` means none is enforced;
    /// callers may still set one per call through `RequestOptions`.
    pub timeout: Option<Duration>,

    /// URL-prefix table for API-version negotiation.
    pub version_table: ApiVersionTable,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: None,
            version_table: ApiVersionTable::openstack_defaults(),
        }
    }

    /// Backend origin from `SKYLINE_API_URL`, falling back to the local
    /// development origin.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(&base_url)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_version_table(mut self, table: ApiVersionTable) -> Self {
        self.version_table = table;
        self
    }
}
