//
//  confluence-connect
//  api/spaces.rs
//
//  Created by Ngonidzashe Mangudya on 2026/07/18.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Space API: creation, lookup, update, deletion, and space content.
//!
//! Space deletion is asynchronous on the remote; `DELETE` answers with a
//! long-task pointer rather than the deleted space, so
//! [`ConfluenceClient::delete_space`] hands back the raw document. Track
//! its progress with [`ConfluenceClient::get_task`](crate::api::tasks).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::types::ResultsPage;
use crate::api::{
    optional_value, parse_optional, parse_required, value_or_ack, ApiResult, ConfluenceClient,
    Params, RequestSpec,
};

/// A space.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Space {
    /// Numeric space id.
    pub id: i64,

    /// The space key.
    pub key: String,

    /// Display name.
    pub name: String,

    /// `global` or `personal`.
    #[serde(default, rename = "type")]
    pub space_type: Option<String>,

    /// Lifecycle status.
    #[serde(default)]
    pub status: Option<String>,

    /// Description document, present when expanded.
    #[serde(default)]
    pub description: Option<Value>,

    /// Navigation links, kept loose.
    #[serde(default, rename = "_links")]
    pub links: Option<Value>,
}

/// Payload for creating or updating a space.
#[derive(Debug, Clone, Serialize)]
pub struct SpaceDraft {
    /// The space key.
    pub key: String,

    /// Display name.
    pub name: String,

    /// Optional plain-text description document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
}

impl SpaceDraft {
    /// Draft with the given key and name.
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            description: None,
        }
    }

    /// Attaches a plain-representation description.
    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.description = Some(serde_json::json!({
            "plain": {"value": text.into(), "representation": "plain"}
        }));
        self
    }
}

impl ConfluenceClient {
    /// Lists spaces. `GET /rest/api/space`
    pub async fn get_spaces(&self, params: Params) -> ApiResult<Option<ResultsPage<Space>>> {
        let spec = RequestSpec::get(params.append_to("/rest/api/space"));
        parse_optional(self.transport().send(spec).await?)
    }

    /// Creates a space. `POST /rest/api/space`
    pub async fn create_space<B: Serialize>(&self, draft: &B) -> ApiResult<Space> {
        let spec = RequestSpec::post("/rest/api/space").json(draft)?;
        parse_required(self.transport().send(spec).await?)
    }

    /// Updates a space. `PUT /rest/api/space/{key}`
    pub async fn update_space<B: Serialize>(&self, key: &str, update: &B) -> ApiResult<Space> {
        let spec = RequestSpec::put(format!("/rest/api/space/{key}")).json(update)?;
        parse_required(self.transport().send(spec).await?)
    }

    /// Deletes a space. `DELETE /rest/api/space/{key}`
    ///
    /// Resolves the remote's long-task pointer.
    pub async fn delete_space(&self, key: &str) -> ApiResult<Value> {
        let spec = RequestSpec::delete(format!("/rest/api/space/{key}"));
        value_or_ack(self.transport().send(spec).await?)
    }

    /// Fetches one space. `GET /rest/api/space/{key}`
    ///
    /// Resolves `Ok(None)` when the key does not exist.
    pub async fn get_space(&self, key: &str, params: Params) -> ApiResult<Option<Space>> {
        let spec = RequestSpec::get(params.append_to(&format!("/rest/api/space/{key}")));
        parse_optional(self.transport().send(spec).await?)
    }

    /// Fetches the space content envelope. `GET /rest/api/space/{key}/content`
    pub async fn get_space_content(&self, key: &str, params: Params) -> ApiResult<Option<Value>> {
        let spec = RequestSpec::get(params.append_to(&format!("/rest/api/space/{key}/content")));
        optional_value(self.transport().send(spec).await?)
    }

    /// Lists space content of one type. `GET /rest/api/space/{key}/content/{type}`
    pub async fn get_space_content_by_type(
        &self,
        key: &str,
        content_type: &str,
        params: Params,
    ) -> ApiResult<Option<Value>> {
        let spec = RequestSpec::get(
            params.append_to(&format!("/rest/api/space/{key}/content/{content_type}")),
        );
        optional_value(self.transport().send(spec).await?)
    }
}
