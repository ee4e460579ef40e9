//! HTTP request client for the Skyline dashboard backend.
//!
//! Every outbound API call the dashboard makes goes through one
//! [`RequestClient`]: cookie-based session auth against a fixed origin,
//! a fresh `X-Openstack-Request-Id` trace header per call, microversion
//! negotiation from a URL-prefix table, query normalization for read
//! verbs, and a uniform success/error envelope. Build the client once at
//! the composition root with a [`ClientConfig`] and a [`Navigator`] for
//! the login redirect, then share it via `Arc`.

pub mod client;
pub mod config;
pub mod error;
pub mod navigate;
pub mod options;
pub mod params;
pub mod version;

// Multipart forms appear in the `post_form` signature.
pub use reqwest::multipart;

pub use client::{RequestClient, REQUEST_ID_HEADER};
pub use config::ClientConfig;
pub use error::RequestError;
pub use navigate::Navigator;
pub use options::RequestOptions;
pub use params::Params;
pub use version::{ApiVersionRule, ApiVersionTable};
