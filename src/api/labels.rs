//
//  confluence-connect
//  api/labels.rs
//
//  Created by Ngonidzashe Mangudya on 2026/07/18.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Labels attached to content.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::types::ResultsPage;
use crate::api::{
    parse_optional, parse_required, value_or_ack, ApiResult, ConfluenceClient, Params, RequestSpec,
};

/// A label as Confluence returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Label {
    /// Label namespace, normally `global`.
    pub prefix: String,

    /// The label text.
    pub name: String,

    /// Label id; a string on cloud, numeric on server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
}

/// Payload for adding a label.
#[derive(Debug, Clone, Serialize)]
pub struct LabelDraft {
    /// Label namespace.
    pub prefix: String,

    /// The label text.
    pub name: String,
}

impl LabelDraft {
    /// Draft in the `global` namespace.
    pub fn global(name: impl Into<String>) -> Self {
        Self {
            prefix: "global".to_string(),
            name: name.into(),
        }
    }
}

impl ConfluenceClient {
    /// Lists labels. `GET /rest/api/content/{id}/label`
    pub async fn get_content_labels(
        &self,
        id: &str,
        params: Params,
    ) -> ApiResult<Option<ResultsPage<Label>>> {
        let spec = RequestSpec::get(params.append_to(&format!("/rest/api/content/{id}/label")));
        parse_optional(self.transport().send(spec).await?)
    }

    /// Adds labels. `POST /rest/api/content/{id}/label`
    ///
    /// The payload is a list of drafts; the response is the full label
    /// page after the addition.
    pub async fn add_content_labels<B: Serialize>(
        &self,
        id: &str,
        labels: &B,
    ) -> ApiResult<ResultsPage<Label>> {
        let spec = RequestSpec::post(format!("/rest/api/content/{id}/label")).json(labels)?;
        parse_required(self.transport().send(spec).await?)
    }

    /// Removes one label. `DELETE /rest/api/content/{id}/label/{label}`
    pub async fn remove_content_label(&self, id: &str, label: &str) -> ApiResult<Value> {
        let spec = RequestSpec::delete(format!("/rest/api/content/{id}/label/{label}"));
        value_or_ack(self.transport().send(spec).await?)
    }
}
