//
//  confluence-connect
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/07/18.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Confluence REST Client
//!
//! This module wraps the Confluence Cloud REST API behind a catalog of
//! typed methods, one per endpoint, all funnelled through a single
//! authenticated [`Transport`].
//!
//! ## Architecture
//!
//! - [`transport`]: request dispatch, Basic auth, status mapping
//! - [`params`]: query-parameter builder (`expand` joining, empty-drop)
//! - [`types`]: cross-resource models (`ResultsPage`, `Version`, refs)
//! - [`content`], [`spaces`], [`properties`], [`labels`], [`restrictions`],
//!   [`attachments`], [`search`], [`users`], [`groups`], [`tasks`],
//!   [`addon`]: one module per REST resource family
//!
//! ## Usage
//!
//! ```rust,no_run
//! use confluence_connect::api::{ConfluenceClient, Credentials, Params};
//!
//! # async fn example() -> Result<(), confluence_connect::api::ApiError> {
//! let client = ConfluenceClient::new(Credentials::new(
//!     "https://example.atlassian.net/wiki",
//!     "fred@example.com",
//!     "api-token",
//! )?)?;
//!
//! if let Some(space) = client.get_space("DEV", Params::new()).await? {
//!     println!("space id: {}", space.id);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error handling
//!
//! Fallible calls return [`ApiResult`]. Absence is not an error: a GET that
//! hits a 404 resolves `Ok(None)`. See [`ApiError`] for the taxonomy.

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use thiserror::Error;

pub mod addon;
pub mod attachments;
pub mod content;
pub mod groups;
pub mod labels;
pub mod params;
pub mod properties;
pub mod restrictions;
pub mod search;
pub mod spaces;
pub mod tasks;
pub mod transport;
pub mod types;
pub mod users;

pub use params::Params;
pub use transport::{Credentials, Method, RequestBody, RequestSpec, ResponseBody, Transport};

/// Result alias for all API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified error type for Confluence API operations.
///
/// The remote's own error documents are passed through verbatim in
/// [`ApiError::Api`]; nothing is reworded on the way up. Failures that
/// never reached a meaningful HTTP status (network, parse) report a
/// [`status`](ApiError::status) of 500.
///
/// # Example
///
/// ```rust
/// use confluence_connect::api::ApiError;
///
/// fn describe(err: &ApiError) -> String {
///     match err {
///         ApiError::Api { status, .. } => format!("remote rejected with {status}"),
///         other => format!("local failure: {other}"),
///     }
/// }
/// ```
#[derive(Error, Debug)]
pub enum ApiError {
    /// Client-side setup problem: bad base URL or unusable credentials.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A network-level failure: DNS, connect, TLS, or mid-body errors.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A 2xx reply whose body should have been JSON but was not.
    #[error("Could not parse response")]
    InvalidBody,

    /// The remote rejected the request with a JSON error document.
    ///
    /// `status` is taken from the HTTP status line; `body` is the remote's
    /// document, untouched.
    #[error("API error ({status}): {body}")]
    Api {
        /// HTTP status of the rejection.
        status: u16,
        /// The remote's error document, verbatim.
        body: Value,
    },

    /// The remote rejected the request with a non-JSON body.
    #[error("API error: {message}")]
    Opaque {
        /// The raw response text.
        message: String,
    },

    /// A compound operation needed a resource that turned out to be absent.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// A request payload could not be serialized to JSON, or a JSON reply
    /// could not be read into its typed model.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP-like status for this failure.
    ///
    /// Remote rejections report their real status; everything that never
    /// produced one (network failures, parse failures, setup errors) maps
    /// to 500, and [`ApiError::NotFound`] to 404.
    pub fn status(&self) -> u16 {
        match self {
            Self::Api { status, .. } => *status,
            Self::NotFound(_) => 404,
            _ => 500,
        }
    }

    /// `true` when the remote reported an optimistic-concurrency conflict.
    pub fn is_conflict(&self) -> bool {
        self.status() == 409
    }
}

/// The Confluence REST client.
///
/// A thin, stateless catalog over [`Transport`]: every method builds one
/// [`RequestSpec`] and maps the reply into a typed model. The only
/// multi-request operations are `set_content` (read-merge-write with
/// conflict retries) and `create_or_update_attachment` (download then
/// upload).
///
/// Cloning is cheap and the client is safe to share across tasks.
///
/// # Example
///
/// ```rust,no_run
/// use confluence_connect::api::{ConfluenceClient, Credentials};
/// use confluence_connect::api::content::ContentDraft;
///
/// # async fn example() -> Result<(), confluence_connect::api::ApiError> {
/// let client = ConfluenceClient::new(Credentials::new(
///     "https://example.atlassian.net/wiki",
///     "fred@example.com",
///     "api-token",
/// )?)?;
///
/// let draft = ContentDraft::page("Release notes", "DEV")
///     .body_storage("<p>Hello</p>");
/// let page = client.create_content(&draft).await?;
/// println!("created {}", page.id);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ConfluenceClient {
    transport: Transport,
}

impl ConfluenceClient {
    /// Creates a client for the given credentials.
    ///
    /// # Errors
    ///
    /// Propagates [`Transport::new`] failures.
    pub fn new(credentials: Credentials) -> ApiResult<Self> {
        Ok(Self {
            transport: Transport::new(credentials)?,
        })
    }

    /// Wraps an existing transport (e.g. one carrying default headers).
    pub fn with_transport(transport: Transport) -> Self {
        Self { transport }
    }

    /// The underlying transport.
    pub fn transport(&self) -> &Transport {
        &self.transport
    }
}

/// Reads a reply that must carry a typed JSON body (create/update paths).
pub(crate) fn parse_required<T: DeserializeOwned>(body: Option<ResponseBody>) -> ApiResult<T> {
    match body {
        Some(ResponseBody::Json(value)) => Ok(serde_json::from_value(value)?),
        _ => Err(ApiError::InvalidBody),
    }
}

/// Reads a reply that may be absent (GET paths): `None` stays `None`.
pub(crate) fn parse_optional<T: DeserializeOwned>(
    body: Option<ResponseBody>,
) -> ApiResult<Option<T>> {
    match body {
        None => Ok(None),
        Some(ResponseBody::Json(value)) => Ok(Some(serde_json::from_value(value)?)),
        Some(_) => Err(ApiError::InvalidBody),
    }
}

/// Reads a reply as loose JSON; an empty body becomes `{"status":"ok"}`.
pub(crate) fn value_or_ack(body: Option<ResponseBody>) -> ApiResult<Value> {
    match body {
        Some(ResponseBody::Json(value)) => Ok(value),
        Some(ResponseBody::Empty) | None => Ok(json!({"status": "ok"})),
        Some(ResponseBody::Binary(_)) => Err(ApiError::InvalidBody),
    }
}

/// Reads a possibly-absent reply as loose JSON.
pub(crate) fn optional_value(body: Option<ResponseBody>) -> ApiResult<Option<Value>> {
    match body {
        None => Ok(None),
        Some(ResponseBody::Json(value)) => Ok(Some(value)),
        Some(ResponseBody::Empty) => Ok(Some(json!({"status": "ok"}))),
        Some(ResponseBody::Binary(_)) => Err(ApiError::InvalidBody),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        let api = ApiError::Api {
            status: 409,
            body: json!({"message": "conflict"}),
        };
        assert_eq!(api.status(), 409);
        assert!(api.is_conflict());

        assert_eq!(ApiError::InvalidBody.status(), 500);
        assert_eq!(
            ApiError::Opaque {
                message: "boom".to_string()
            }
            .status(),
            500
        );
        assert_eq!(ApiError::NotFound("page 1".to_string()).status(), 404);
    }

    #[test]
    fn test_empty_reply_becomes_ok_ack() {
        let ack = value_or_ack(Some(ResponseBody::Empty)).unwrap();
        assert_eq!(ack, json!({"status": "ok"}));
    }

    #[test]
    fn test_absent_stays_absent() {
        let parsed: Option<Value> = parse_optional(None).unwrap();
        assert!(parsed.is_none());
    }
}
