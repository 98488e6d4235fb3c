//
//  confluence-connect
//  api/transport.rs
//
//  Created by Ngonidzashe Mangudya on 2026/07/18.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authenticated HTTP Transport
//!
//! This module provides the single outbound HTTP path for the Confluence
//! client. Every REST operation builds a declarative [`RequestSpec`] and
//! hands it to [`Transport::send`], which:
//!
//! - assembles the final URL as `base_url + path` (the path already carries
//!   any serialized query string),
//! - merges headers with an explicit precedence: caller-supplied beats
//!   instance defaults beats built-in defaults,
//! - always injects `Authorization: Basic <base64(user:token)>` last, so no
//!   caller header can drop or replace it,
//! - dispatches via `reqwest` and maps the outcome to
//!   `Result<Option<ResponseBody>, ApiError>`.
//!
//! ## Status mapping
//!
//! | Outcome | Result |
//! |---------|--------|
//! | transport failure | `Err(ApiError::Network)` |
//! | `< 300`, empty body | `Ok(Some(ResponseBody::Empty))` |
//! | `< 300`, binary flag | `Ok(Some(ResponseBody::Binary(bytes)))` |
//! | `< 300`, JSON body | `Ok(Some(ResponseBody::Json(value)))` |
//! | `< 300`, unparseable body | `Err(ApiError::InvalidBody)` |
//! | GET + 404 | `Ok(None)`, the canonical "absent" signal |
//! | other non-2xx, JSON body | `Err(ApiError::Api { status, body })` |
//! | other non-2xx, other body | `Err(ApiError::Opaque { message })` |
//!
//! Transport performs no retries, timeouts, or logging; the only retry
//! policy in the crate lives in `set_content`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::{multipart, Client, StatusCode};
use serde::Serialize;
use url::Url;

use crate::api::{ApiError, ApiResult};

/// Immutable connection settings for a Confluence site.
///
/// Holds the site base URL plus the username/API-token pair used for HTTP
/// Basic authentication. Validated once at construction; the Basic header
/// value is derived from it per transport, not per request.
///
/// # Example
///
/// ```rust
/// use confluence_connect::api::Credentials;
///
/// let creds = Credentials::new(
///     "https://example.atlassian.net/wiki",
///     "fred@example.com",
///     "api-token",
/// )?;
/// assert_eq!(creds.base_url(), "https://example.atlassian.net/wiki");
/// # Ok::<(), confluence_connect::api::ApiError>(())
/// ```
#[derive(Clone)]
pub struct Credentials {
    base_url: String,
    username: String,
    api_token: String,
}

impl Credentials {
    /// Creates credentials for a Confluence site.
    ///
    /// The base URL is validated as an absolute URL and trailing slashes
    /// are trimmed so that path concatenation stays predictable.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] when the base URL does not parse.
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        api_token: impl Into<String>,
    ) -> ApiResult<Self> {
        let mut base_url = base_url.into();
        Url::parse(&base_url).map_err(|e| ApiError::Config(format!("invalid base URL: {e}")))?;
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self {
            base_url,
            username: username.into(),
            api_token: api_token.into(),
        })
    }

    /// The validated base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The username part of the Basic pair.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Renders the `Authorization` header value.
    fn auth_header(&self) -> ApiResult<HeaderValue> {
        let encoded = STANDARD.encode(format!("{}:{}", self.username, self.api_token));
        let mut value = HeaderValue::from_str(&format!("Basic {encoded}"))
            .map_err(|_| ApiError::Config("credentials render an invalid header".to_string()))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("api_token", &"***")
            .finish()
    }
}

/// HTTP method for a [`RequestSpec`]. Defaults to `Get`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Head,
    Patch,
}

impl Method {
    /// Lenient, case-insensitive parse of a method name.
    ///
    /// Unknown or empty names fall back to `Get`; `del` is accepted as an
    /// alias for `Delete`.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "post" => Self::Post,
            "put" => Self::Put,
            "delete" | "del" => Self::Delete,
            "head" => Self::Head,
            "patch" => Self::Patch,
            _ => Self::Get,
        }
    }

    fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Delete => reqwest::Method::DELETE,
            Self::Head => reqwest::Method::HEAD,
            Self::Patch => reqwest::Method::PATCH,
        }
    }
}

/// Request payload attached to a [`RequestSpec`].
pub enum RequestBody {
    /// A structured JSON document, serialized once at spec construction.
    Json(serde_json::Value),
    /// A multipart upload carrying a single `file` part.
    File {
        /// Filename reported in the multipart headers.
        file_name: String,
        /// The part's bytes or stream.
        content: reqwest::Body,
    },
}

impl std::fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(value) => f.debug_tuple("Json").field(value).finish(),
            Self::File { file_name, .. } => f
                .debug_struct("File")
                .field("file_name", file_name)
                .finish_non_exhaustive(),
        }
    }
}

/// Declarative description of one outbound request.
///
/// Built fresh per call by the client catalog, then consumed by
/// [`Transport::send`]. The path is relative to the transport's base URL
/// and already carries any serialized query string (see
/// [`Params`](crate::api::Params)).
///
/// # Example
///
/// ```rust,no_run
/// use confluence_connect::api::{Method, RequestSpec};
///
/// let spec = RequestSpec::get("/rest/api/space/DEV")
///     .header("Accept", "application/json");
/// assert_eq!(spec.method(), Method::Get);
/// ```
#[derive(Debug)]
pub struct RequestSpec {
    method: Method,
    path: String,
    headers: Vec<(HeaderName, HeaderValue)>,
    body: Option<RequestBody>,
    binary: bool,
}

impl RequestSpec {
    /// Creates a spec with an explicit method.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: Vec::new(),
            body: None,
            binary: false,
        }
    }

    /// GET spec for the given path.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// POST spec for the given path.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    /// PUT spec for the given path.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    /// DELETE spec for the given path.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// The spec's method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// The spec's path, relative to the transport base URL.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Adds a caller header. Caller headers override transport defaults
    /// but can never displace the `Authorization` header.
    ///
    /// Malformed names or values are dropped with a warning rather than
    /// failing the whole request.
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        match (
            HeaderName::try_from(name.as_ref()),
            HeaderValue::try_from(value.as_ref()),
        ) {
            (Ok(name), Ok(value)) => self.headers.push((name, value)),
            _ => tracing::warn!(header = name.as_ref(), "dropping malformed header"),
        }
        self
    }

    /// Attaches a JSON body, serializing the structured value now.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Serialization`] when the payload cannot be
    /// converted to JSON.
    pub fn json<B: Serialize>(mut self, body: &B) -> ApiResult<Self> {
        self.body = Some(RequestBody::Json(serde_json::to_value(body)?));
        Ok(self)
    }

    /// Attaches a multipart upload with a single `file` part.
    pub fn upload(mut self, file_name: impl Into<String>, content: impl Into<reqwest::Body>) -> Self {
        self.body = Some(RequestBody::File {
            file_name: file_name.into(),
            content: content.into(),
        });
        self
    }

    /// Marks the response as binary: a 2xx body is returned as raw bytes
    /// instead of being parsed as JSON.
    pub fn binary(mut self) -> Self {
        self.binary = true;
        self
    }
}

/// Successful response payload, as mapped by [`Transport::send`].
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// Status < 300 with an empty body (the remote's bare acknowledgement).
    Empty,
    /// Status < 300 with a JSON body.
    Json(serde_json::Value),
    /// Status < 300 on a binary-flagged request.
    Binary(Bytes),
}

/// The authenticated HTTP dispatcher.
///
/// One `Transport` is built per site and shared by every client method.
/// Cloning is cheap: the inner `reqwest::Client` is reference-counted.
///
/// # Example
///
/// ```rust,no_run
/// use confluence_connect::api::{Credentials, RequestSpec, Transport};
///
/// # async fn example() -> Result<(), confluence_connect::api::ApiError> {
/// let creds = Credentials::new("https://example.atlassian.net/wiki", "fred", "token")?;
/// let transport = Transport::new(creds)?;
/// let reply = transport.send(RequestSpec::get("/rest/api/space")).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Transport {
    http: Client,
    credentials: Credentials,
    auth: HeaderValue,
    default_headers: Vec<(HeaderName, HeaderValue)>,
}

impl Transport {
    /// Creates a transport for the given credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] when the underlying HTTP client cannot
    /// be built, or [`ApiError::Config`] when the credentials cannot be
    /// rendered into an `Authorization` header.
    pub fn new(credentials: Credentials) -> ApiResult<Self> {
        let http = Client::builder()
            .user_agent(format!("confluence-connect/{}", crate::VERSION))
            .build()?;
        let auth = credentials.auth_header()?;

        Ok(Self {
            http,
            credentials,
            auth,
            default_headers: Vec::new(),
        })
    }

    /// Adds an instance-level default header.
    ///
    /// Defaults apply to every request sent through this transport and are
    /// overridden by same-named caller headers on a [`RequestSpec`].
    pub fn with_default_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        match (
            HeaderName::try_from(name.as_ref()),
            HeaderValue::try_from(value.as_ref()),
        ) {
            (Ok(name), Ok(value)) => self.default_headers.push((name, value)),
            _ => tracing::warn!(header = name.as_ref(), "dropping malformed default header"),
        }
        self
    }

    /// The site base URL this transport talks to.
    pub fn base_url(&self) -> &str {
        self.credentials.base_url()
    }

    /// Sends one request and maps the outcome per the module rules.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(body))` for any status < 300,
    /// - `Ok(None)` for GET + 404 (the resource is absent),
    /// - `Err(_)` for everything else.
    pub async fn send(&self, spec: RequestSpec) -> ApiResult<Option<ResponseBody>> {
        let url = format!("{}{}", self.credentials.base_url(), spec.path);

        let mut headers = HeaderMap::new();
        for (name, value) in &self.default_headers {
            headers.insert(name.clone(), value.clone());
        }
        for (name, value) in &spec.headers {
            headers.insert(name.clone(), value.clone());
        }
        headers.insert(AUTHORIZATION, self.auth.clone());

        let mut request = self
            .http
            .request(spec.method.as_reqwest(), &url)
            .headers(headers);

        request = match spec.body {
            Some(RequestBody::Json(value)) => request.json(&value),
            Some(RequestBody::File { file_name, content }) => {
                let part = multipart::Part::stream(content).file_name(file_name);
                request.multipart(multipart::Form::new().part("file", part))
            }
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();

        if status.as_u16() < 300 {
            if spec.binary {
                return Ok(Some(ResponseBody::Binary(response.bytes().await?)));
            }

            let text = response.text().await?;
            if text.is_empty() {
                return Ok(Some(ResponseBody::Empty));
            }
            return match serde_json::from_str(&text) {
                Ok(value) => Ok(Some(ResponseBody::Json(value))),
                Err(_) => Err(ApiError::InvalidBody),
            };
        }

        // Reads resolve absence instead of failing.
        if spec.method == Method::Get && status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let text = response.text().await.unwrap_or_default();
        match serde_json::from_str::<serde_json::Value>(&text) {
            Ok(body) => Err(ApiError::Api {
                status: status.as_u16(),
                body,
            }),
            Err(_) => Err(ApiError::Opaque { message: text }),
        }
    }
}
