//
//  confluence-connect
//  connect/webhook.rs
//
//  Created by Ngonidzashe Mangudya on 2026/07/18.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! The `page_moved` webhook handler.
//!
//! Confluence posts here whenever a page moves. After session
//! verification the handler writes the content property
//! `{key: "<addonKey>-flag", value: true}` onto the moved page: created
//! when absent, version-bumped when the page moved before. 200 means the
//! flag is on the page; 500 carries the client error back to the caller's
//! webhook log.

use std::fmt;

use axum::extract::{RawQuery, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::api::properties::{PropertyDraft, PropertyUpdate};
use crate::api::{ApiResult, ConfluenceClient, Params};
use crate::connect::auth;
use crate::connect::AppState;

/// The slice of the `page_moved` payload the handler needs.
#[derive(Debug, Clone, Deserialize)]
pub struct PageMovedEvent {
    pub page: PageRef,
}

/// The moved page.
#[derive(Debug, Clone, Deserialize)]
pub struct PageRef {
    pub id: PageId,
}

/// Content id as delivered in webhook payloads.
///
/// Confluence sends numbers here even though the REST API deals in
/// numeric strings; both spellings are accepted.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PageId {
    Number(i64),
    Text(String),
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

/// `POST /rest/{addon-key}/1/event/page_moved`
pub async fn page_moved(
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
    headers: HeaderMap,
    Json(event): Json<PageMovedEvent>,
) -> Response {
    let query = parse_query(raw_query.as_deref().unwrap_or(""));

    let Some(token) = auth::session_token(&headers, &query) else {
        return (
            StatusCode::UNAUTHORIZED,
            auth::AuthError::MissingToken.to_string(),
        )
            .into_response();
    };

    let path = state.settings.webhook_path();
    if let Err(err) = auth::verify_session(&state.installs, &token, "POST", &path, &query).await {
        tracing::warn!(error = %err, "rejected webhook call");
        return (StatusCode::UNAUTHORIZED, err.to_string()).into_response();
    }

    let page_id = event.page.id.to_string();
    let flag_key = state.settings.flag_property_key();
    match flag_moved_page(&state.client, &flag_key, &page_id).await {
        Ok(()) => {
            tracing::info!(page = %page_id, "flagged moved page");
            StatusCode::OK.into_response()
        }
        Err(err) => {
            tracing::error!(page = %page_id, error = %err, "failed to flag moved page");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}

/// Creates the flag property, or bumps its version when it already exists.
async fn flag_moved_page(client: &ConfluenceClient, key: &str, page_id: &str) -> ApiResult<()> {
    let draft = PropertyDraft::new(key, json!(true));
    match client.create_content_property(page_id, &draft).await {
        Ok(_) => Ok(()),
        Err(err) if err.is_conflict() => {
            let current = client
                .get_content_property(page_id, key, Params::new().expand(["version"]))
                .await?;
            let next = current
                .and_then(|property| property.version)
                .map(|version| version.number + 1)
                .unwrap_or(1);
            client
                .update_content_property(page_id, key, &PropertyUpdate::new(json!(true), next))
                .await?;
            Ok(())
        }
        Err(err) => Err(err),
    }
}

fn parse_query(raw: &str) -> Vec<(String, String)> {
    url::form_urlencoded::parse(raw.as_bytes())
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect()
}
