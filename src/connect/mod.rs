//
//  confluence-connect
//  connect/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/07/18.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Connect Module
//!
//! The HTTP face of the add-on: an axum router serving
//!
//! - `GET /` → redirect to the descriptor
//! - `GET /atlassian-connect.json` → the [`descriptor::Descriptor`]
//! - `POST /installed` → lifecycle callback, records the tenant's secret
//! - `POST /rest/{addon-key}/1/event/page_moved` → the webhook handler
//!
//! The webhook route is built from [`Settings::webhook_path`], the same
//! function the descriptor advertises, so Confluence always posts to a
//! route that exists.
//!
//! ## Submodules
//!
//! - [`auth`]: install registry and Connect JWT verification
//! - [`descriptor`]: the typed descriptor document
//! - [`webhook`]: the `page_moved` handler and its property write

pub mod auth;
pub mod descriptor;
pub mod webhook;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Redirect;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::ConfluenceClient;
use crate::config::Settings;

use auth::{InstallRegistry, Installation};
use descriptor::Descriptor;

/// Shared state behind every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Runtime settings, immutable once the server is up.
    pub settings: Arc<Settings>,

    /// Authenticated Confluence client the webhook writes through.
    pub client: ConfluenceClient,

    /// Installations recorded via `/installed`.
    pub installs: InstallRegistry,
}

impl AppState {
    pub fn new(settings: Settings, client: ConfluenceClient) -> Self {
        Self {
            settings: Arc::new(settings),
            client,
            installs: InstallRegistry::new(),
        }
    }
}

/// Builds the add-on router.
pub fn router(state: AppState) -> Router {
    let webhook_path = state.settings.webhook_path();
    Router::new()
        .route("/", get(|| async { Redirect::to("/atlassian-connect.json") }))
        .route("/atlassian-connect.json", get(serve_descriptor))
        .route("/installed", post(record_install))
        .route(&webhook_path, post(webhook::page_moved))
        .with_state(state)
}

async fn serve_descriptor(State(state): State<AppState>) -> Json<Descriptor> {
    Json(Descriptor::for_settings(&state.settings))
}

async fn record_install(
    State(state): State<AppState>,
    Json(installation): Json<Installation>,
) -> StatusCode {
    tracing::info!(
        client_key = %installation.client_key,
        base_url = installation.base_url.as_deref().unwrap_or("-"),
        "recording installation"
    );
    state.installs.record(installation).await;
    StatusCode::NO_CONTENT
}
