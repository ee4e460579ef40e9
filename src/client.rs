//! HTTP client for the Skyline dashboard backend.
//!
//! One client issues every outbound API call. Session auth rides on a
//! browser-managed cookie, so the transport keeps a cookie store and no
//! bearer token is ever attached. Every dispatch is stamped with a fresh
//! `X-Openstack-Request-Id` trace header and, when the path belongs to a
//! versioned service, the matching microversion header. Responses come
//! back unwrapped: the payload alone on 2xx, the server's error payload
//! verbatim otherwise.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CACHE_CONTROL, CONTENT_TYPE, PRAGMA};
use reqwest::{Client, Method, StatusCode, Url};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::error::RequestError;
use crate::navigate::Navigator;
use crate::options::RequestOptions;
use crate::params::{normalize, to_query_pairs, Params};

/// Trace header name (wire form `X-Openstack-Request-Id`).
pub const REQUEST_ID_HEADER: &str = "x-openstack-request-id";

/// Verbs whose query parameters are normalized before serialization.
/// Write verbs carry their body through untouched.
static READ_VERBS: [Method; 2] = [Method::GET, Method::HEAD];

/// Request body for one dispatch.
enum Payload {
    None,
    Json(Value),
    Form(reqwest::multipart::Form),
}

/// Client wrapper enforcing the dashboard's request contract.
///
/// Configuration is immutable after construction. The hosting
/// application builds one instance at its composition root and shares it
/// via `Arc`; concurrent calls are independent (each gets its own trace
/// id and header set), so no locking is involved.
pub struct RequestClient {
    client: Client,
    config: ClientConfig,
    navigator: Arc<dyn Navigator>,
}

impl RequestClient {
    /// Build a client bound to the configured base origin, with the
    /// cookie store enabled so the `skyline_session` cookie flows on
    /// every request.
    pub fn new(config: ClientConfig, navigator: Arc<dyn Navigator>) -> Self {
        let client = Client::builder()
            .cookie_store(true)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            config,
            navigator,
        }
    }

    /// Dispatch a GET. `params` are normalized (trimmed, nil/empty
    /// fields dropped) and serialized with repeated keys for arrays.
    ///
    /// Resolves with the response payload on 2xx; rejects with the
    /// server's error payload on other statuses, or with a network error
    /// if no response was received.
    pub async fn get(
        &self,
        url: &str,
        params: Params,
        options: RequestOptions,
    ) -> Result<Value, RequestError> {
        self.dispatch(Method::GET, url, params, Payload::None, options)
            .await
    }

    /// Dispatch a POST with a JSON body. The body passes through
    /// unmodified; `params` are serialized but not normalized.
    pub async fn post<T: Serialize + ?Sized>(
        &self,
        url: &str,
        data: &T,
        params: Params,
        options: RequestOptions,
    ) -> Result<Value, RequestError> {
        let body = serde_json::to_value(data).map_err(RequestError::Serialize)?;
        self.dispatch(Method::POST, url, params, Payload::Json(body), options)
            .await
    }

    /// Dispatch a multipart POST. The default JSON content-type is
    /// dropped so the transport can set its own multipart boundary.
    pub async fn post_form(
        &self,
        url: &str,
        form: reqwest::multipart::Form,
        params: Params,
        options: RequestOptions,
    ) -> Result<Value, RequestError> {
        let options = options.form_data();
        self.dispatch(Method::POST, url, params, Payload::Form(form), options)
            .await
    }

    async fn dispatch(
        &self,
        method: Method,
        url: &str,
        params: Params,
        payload: Payload,
        options: RequestOptions,
    ) -> Result<Value, RequestError> {
        let request_id = fresh_request_id();
        let headers = self.assemble_headers(url, &request_id, &options);
        let full_url = self.absolute_url(url);

        let params = if READ_VERBS.contains(&method) {
            normalize(params)
        } else {
            params
        };

        let mut builder = self
            .client
            .request(method.clone(), &full_url)
            .headers(headers);
        if !params.is_empty() {
            builder = builder.query(&to_query_pairs(&params));
        }
        match payload {
            Payload::None => {}
            Payload::Json(body) => builder = builder.json(&body),
            Payload::Form(form) => builder = builder.multipart(form),
        }
        if let Some(timeout) = options.timeout.or(self.config.timeout) {
            builder = builder.timeout(timeout);
        }

        log::debug!("dispatching {} {} ({})", method, full_url, request_id);
        let response = builder.send().await.map_err(|err| {
            log::warn!("request {} failed before a response arrived: {}", request_id, err);
            RequestError::Network(err)
        })?;
        self.unwrap_envelope(response).await
    }

    /// Default headers, trace id, version header, then caller overrides,
    /// in that order -- the caller wins on name conflict.
    fn assemble_headers(
        &self,
        url: &str,
        request_id: &str,
        options: &RequestOptions,
    ) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json;charset=utf-8"),
        );
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));

        if let Ok(value) = HeaderValue::from_str(request_id) {
            headers.insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
        }

        if let Some(rule) = self.config.version_table.lookup(&request_path(url)) {
            // Table entries are configuration; entries that do not parse
            // as header name/value are skipped rather than failing the call.
            if let (Ok(name), Ok(value)) = (
                HeaderName::from_bytes(rule.header.as_bytes()),
                HeaderValue::from_str(&rule.value),
            ) {
                headers.insert(name, value);
            }
        }

        for (name, value) in &options.headers {
            if let (Ok(name), Ok(value)) = (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                headers.insert(name, value);
            }
        }

        if options.is_form_data {
            headers.remove(CONTENT_TYPE);
        }

        headers
    }

    /// Success in [200, 300) resolves with the payload alone; everything
    /// else rejects with the server's body verbatim. A 401 additionally
    /// fires the login redirect before rejecting.
    async fn unwrap_envelope(&self, response: reqwest::Response) -> Result<Value, RequestError> {
        let status = response.status();
        let body = decode_body(response).await?;

        if status.is_success() {
            return Ok(body);
        }

        if status == StatusCode::UNAUTHORIZED {
            self.redirect_to_login();
        }

        log::warn!("request rejected with status {}", status);
        Err(RequestError::Server { status, body })
    }

    /// Send the user to the login flow, unless they are already in one.
    /// Fire-and-forget: the rejection value is unaffected.
    fn redirect_to_login(&self) {
        let current_path = self.navigator.current_path();
        if !current_path.contains("login") {
            self.navigator.navigate_to_login(&current_path);
        }
    }

    /// Resolve a request path against the base origin. Absolute URLs
    /// pass through untouched.
    fn absolute_url(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            return url.to_string();
        }
        format!("{}{}", self.config.base_url, url)
    }
}

/// A fresh `req-<uuid>` trace id, generated once per dispatch and never
/// reused.
fn fresh_request_id() -> String {
    format!("req-{}", Uuid::new_v4())
}

/// The path component used for version lookup. Version negotiation
/// depends on the URL alone, independent of verb or payload.
fn request_path(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        // Relative URLs are already paths.
        Err(_) => url.to_string(),
    }
}

/// Read the response body as JSON, falling back to a raw string for
/// non-JSON payloads and null for empty bodies. A failure while pulling
/// the body over the wire is a network error, not a server one.
async fn decode_body(response: reqwest::Response) -> Result<Value, RequestError> {
    let bytes = response.bytes().await.map_err(RequestError::Network)?;
    if bytes.is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned())))
}
