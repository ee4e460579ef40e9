//! Per-call request options.

use std::time::Duration;

/// Caller-supplied overrides applied to a single dispatch.
///
/// Header entries win over the client defaults on name conflict.
/// `is_form_data` drops the default JSON content-type so the transport
/// can set its own multipart boundary. `timeout` is handed straight to
/// the transport; no timeout applies unless one is set here or on the
/// client configuration.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub headers: Vec<(String, String)>,
    pub is_form_data: bool,
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or override a header for this call.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Mark the body as multipart form data.
    pub fn form_data(mut self) -> Self {
        self.is_form_data = true;
        self
    }

    /// Per-call transport timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
