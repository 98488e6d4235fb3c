//
//  confluence-connect
//  connect/auth.rs
//
//  Created by Ngonidzashe Mangudya on 2026/07/18.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Connect session authentication for inbound webhook calls.
//!
//! Confluence signs its calls with an HS256 JWT whose secret is handed to
//! us once, in the `/installed` lifecycle payload. Verification therefore
//! runs in two steps: read the unverified `iss` claim to pick the
//! installation, then check the signature and expiry against that
//! installation's shared secret.
//!
//! Tokens may also carry a `qsh` (query string hash) claim binding them to
//! one request shape. It is re-derived here from the method, path, and
//! query and compared; the literal `context-qsh` a context token carries
//! is accepted as-is.

use std::collections::HashMap;
use std::sync::Arc;

use axum::http::{header, HeaderMap};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tokio::sync::RwLock;

/// Errors raised while authenticating a webhook call.
///
/// Every variant maps to a 401 response; the distinction is for logs.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No token in the `Authorization` header or `jwt` query parameter.
    #[error("Missing session token")]
    MissingToken,

    /// The token is not three base64url segments with an `iss` claim.
    #[error("Malformed session token")]
    Malformed,

    /// No installation recorded for the token's issuer.
    #[error("No installation recorded for issuer")]
    UnknownIssuer,

    /// Signature or registered-claim validation failed.
    #[error("Invalid session token: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),

    /// The `qsh` claim does not match this request.
    #[error("Query string hash mismatch")]
    QshMismatch,
}

/// Lifecycle payload Confluence posts to `/installed`.
///
/// Only `clientKey` and `sharedSecret` matter for verification; the rest
/// is kept for logging and inspection.
#[derive(Debug, Clone, Deserialize)]
pub struct Installation {
    /// Identifies the tenant; doubles as the `iss` claim of its tokens.
    #[serde(rename = "clientKey")]
    pub client_key: String,

    /// HS256 secret for this tenant's session tokens.
    #[serde(rename = "sharedSecret")]
    pub shared_secret: String,

    /// The tenant's base URL.
    #[serde(default, rename = "baseUrl")]
    pub base_url: Option<String>,

    /// The add-on key the tenant installed.
    #[serde(default)]
    pub key: Option<String>,

    /// Lifecycle event name, `installed` on first contact.
    #[serde(default, rename = "eventType")]
    pub event_type: Option<String>,
}

/// In-memory store of installations, keyed by client key.
///
/// Clones share the same map; the registry is handed to the router state
/// and to the lifecycle handler.
#[derive(Debug, Clone, Default)]
pub struct InstallRegistry {
    inner: Arc<RwLock<HashMap<String, Installation>>>,
}

impl InstallRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records or replaces an installation.
    pub async fn record(&self, installation: Installation) {
        self.inner
            .write()
            .await
            .insert(installation.client_key.clone(), installation);
    }

    /// Looks up the shared secret for a client key.
    pub async fn secret_for(&self, client_key: &str) -> Option<String> {
        self.inner
            .read()
            .await
            .get(client_key)
            .map(|installation| installation.shared_secret.clone())
    }
}

/// Claims carried by a Connect session token.
#[derive(Debug, Deserialize)]
pub struct SessionClaims {
    /// The issuing tenant's client key.
    pub iss: String,

    /// Expiry, seconds since the epoch.
    pub exp: u64,

    /// Query string hash, absent on some token kinds.
    #[serde(default)]
    pub qsh: Option<String>,
}

/// Pulls the session token out of a request.
///
/// Checks the `Authorization` header for the `JWT` or `Bearer` scheme
/// first, then falls back to a `jwt` query parameter.
pub fn session_token(headers: &HeaderMap, query: &[(String, String)]) -> Option<String> {
    if let Some(value) = headers.get(header::AUTHORIZATION) {
        if let Ok(value) = value.to_str() {
            if let Some(token) = value.strip_prefix("JWT ").or_else(|| value.strip_prefix("Bearer ")) {
                return Some(token.trim().to_string());
            }
        }
    }
    query
        .iter()
        .find(|(key, _)| key == "jwt")
        .map(|(_, value)| value.clone())
}

/// Verifies a session token against the install registry.
///
/// Resolves the issuer from the unverified payload, checks signature and
/// expiry with the issuer's shared secret, and compares the `qsh` claim
/// against the canonical hash of this request when one is present.
pub async fn verify_session(
    registry: &InstallRegistry,
    token: &str,
    method: &str,
    path: &str,
    query: &[(String, String)],
) -> Result<SessionClaims, AuthError> {
    let issuer = unverified_issuer(token)?;
    let secret = registry
        .secret_for(&issuer)
        .await
        .ok_or(AuthError::UnknownIssuer)?;

    let validation = Validation::new(Algorithm::HS256);
    let token_data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;

    if let Some(qsh) = token_data.claims.qsh.as_deref() {
        // Context tokens carry the literal instead of a hash.
        if qsh != "context-qsh" && qsh != canonical_request_hash(method, path, query) {
            return Err(AuthError::QshMismatch);
        }
    }

    Ok(token_data.claims)
}

/// Reads the `iss` claim without verifying the token.
///
/// The issuer selects which shared secret to verify with, so it has to be
/// read before verification can happen.
fn unverified_issuer(token: &str) -> Result<String, AuthError> {
    #[derive(Deserialize)]
    struct IssuerOnly {
        iss: String,
    }

    let payload = token.split('.').nth(1).ok_or(AuthError::Malformed)?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| AuthError::Malformed)?;
    let claims: IssuerOnly = serde_json::from_slice(&bytes).map_err(|_| AuthError::Malformed)?;
    Ok(claims.iss)
}

/// Canonical request hash for the `qsh` claim.
///
/// Uppercased method, the path, and the sorted percent-encoded query
/// pairs minus `jwt`, joined with `&` and hashed with SHA-256. The hex
/// digest is what a token's `qsh` claim must equal.
pub fn canonical_request_hash(method: &str, path: &str, query: &[(String, String)]) -> String {
    let mut pairs: Vec<(String, String)> = query
        .iter()
        .filter(|(key, _)| key.as_str() != "jwt")
        .map(|(key, value)| {
            (
                urlencoding::encode(key).into_owned(),
                urlencoding::encode(value).into_owned(),
            )
        })
        .collect();
    pairs.sort();

    let canonical_query = pairs
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");

    let canonical = format!("{}&{path}&{canonical_query}", method.to_uppercase());
    let digest = Sha256::digest(canonical.as_bytes());
    digest.iter().map(|byte| format!("{byte:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde::Serialize;

    #[derive(Serialize)]
    struct TestClaims {
        iss: String,
        exp: u64,
        qsh: String,
    }

    fn far_future() -> u64 {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
            + 3600
    }

    fn sign(secret: &str, claims: &TestClaims) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn install(client_key: &str, secret: &str) -> Installation {
        Installation {
            client_key: client_key.to_string(),
            shared_secret: secret.to_string(),
            base_url: None,
            key: None,
            event_type: None,
        }
    }

    #[tokio::test]
    async fn test_verify_accepts_signed_token() {
        let registry = InstallRegistry::new();
        registry.record(install("tenant-1", "s3cret")).await;

        let path = "/rest/my-sample-app/1/event/page_moved";
        let claims = TestClaims {
            iss: "tenant-1".to_string(),
            exp: far_future(),
            qsh: canonical_request_hash("POST", path, &[]),
        };
        let token = sign("s3cret", &claims);

        let verified = verify_session(&registry, &token, "POST", path, &[])
            .await
            .unwrap();
        assert_eq!(verified.iss, "tenant-1");
    }

    #[tokio::test]
    async fn test_verify_rejects_wrong_secret() {
        let registry = InstallRegistry::new();
        registry.record(install("tenant-1", "s3cret")).await;

        let path = "/rest/my-sample-app/1/event/page_moved";
        let claims = TestClaims {
            iss: "tenant-1".to_string(),
            exp: far_future(),
            qsh: canonical_request_hash("POST", path, &[]),
        };
        let token = sign("wrong", &claims);

        let result = verify_session(&registry, &token, "POST", path, &[]).await;
        assert!(matches!(result, Err(AuthError::Invalid(_))));
    }

    #[tokio::test]
    async fn test_verify_rejects_unknown_issuer() {
        let registry = InstallRegistry::new();
        let claims = TestClaims {
            iss: "nobody".to_string(),
            exp: far_future(),
            qsh: "context-qsh".to_string(),
        };
        let token = sign("s3cret", &claims);

        let result = verify_session(&registry, &token, "POST", "/x", &[]).await;
        assert!(matches!(result, Err(AuthError::UnknownIssuer)));
    }

    #[tokio::test]
    async fn test_verify_rejects_qsh_for_other_request() {
        let registry = InstallRegistry::new();
        registry.record(install("tenant-1", "s3cret")).await;

        let claims = TestClaims {
            iss: "tenant-1".to_string(),
            exp: far_future(),
            qsh: canonical_request_hash("GET", "/somewhere/else", &[]),
        };
        let token = sign("s3cret", &claims);

        let result = verify_session(
            &registry,
            &token,
            "POST",
            "/rest/my-sample-app/1/event/page_moved",
            &[],
        )
        .await;
        assert!(matches!(result, Err(AuthError::QshMismatch)));
    }

    #[tokio::test]
    async fn test_verify_accepts_context_qsh() {
        let registry = InstallRegistry::new();
        registry.record(install("tenant-1", "s3cret")).await;

        let claims = TestClaims {
            iss: "tenant-1".to_string(),
            exp: far_future(),
            qsh: "context-qsh".to_string(),
        };
        let token = sign("s3cret", &claims);

        let result = verify_session(&registry, &token, "POST", "/anything", &[]).await;
        assert!(result.is_ok());
    }

    #[test]
    fn test_canonical_hash_sorts_and_drops_jwt() {
        let with_jwt = canonical_request_hash(
            "post",
            "/rest/app/1/event/page_moved",
            &[
                ("b".to_string(), "2".to_string()),
                ("jwt".to_string(), "token".to_string()),
                ("a".to_string(), "1".to_string()),
            ],
        );
        let without_jwt = canonical_request_hash(
            "POST",
            "/rest/app/1/event/page_moved",
            &[
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "2".to_string()),
            ],
        );
        assert_eq!(with_jwt, without_jwt);
    }

    #[test]
    fn test_session_token_prefers_header() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "JWT abc.def.ghi".parse().unwrap());
        let query = vec![("jwt".to_string(), "from-query".to_string())];
        assert_eq!(
            session_token(&headers, &query).as_deref(),
            Some("abc.def.ghi")
        );

        let empty = HeaderMap::new();
        assert_eq!(session_token(&empty, &query).as_deref(), Some("from-query"));
        assert!(session_token(&empty, &[]).is_none());
    }
}
