//
//  confluence-connect
//  api/properties.rs
//
//  Created by Ngonidzashe Mangudya on 2026/07/18.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Key-value properties stored against content or spaces.
//!
//! Confluence exposes the same property CRUD under
//! `/rest/api/content/{id}/property` and `/rest/api/space/{key}/property`.
//! The scoped operations take a [`PropertyScope`] to pick the family; the
//! named wrappers below them pin the scope for callers that prefer the
//! spelled-out form.
//!
//! Property updates are versioned like content updates: a `PUT` must name
//! the next version number or the remote answers with a conflict.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::types::{ResultsPage, Version, VersionRef};
use crate::api::{
    parse_optional, parse_required, value_or_ack, ApiResult, ConfluenceClient, Params, RequestSpec,
};

/// Which entity family a property operation addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyScope {
    /// Properties on a content entity, addressed by content id.
    Content,
    /// Properties on a space, addressed by space key.
    Space,
}

impl PropertyScope {
    /// The path segment for this scope.
    pub fn segment(self) -> &'static str {
        match self {
            Self::Content => "content",
            Self::Space => "space",
        }
    }
}

/// A stored property.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    /// The property key.
    pub key: String,

    /// The stored value, arbitrary JSON.
    pub value: Value,

    /// Version record, present when `expand=version` was requested.
    #[serde(default)]
    pub version: Option<Version>,
}

/// Payload for creating a property.
#[derive(Debug, Clone, Serialize)]
pub struct PropertyDraft {
    /// The property key.
    pub key: String,

    /// The value to store.
    pub value: Value,
}

impl PropertyDraft {
    /// Draft holding the given key and value.
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Payload for updating a property; must name the next version.
#[derive(Debug, Clone, Serialize)]
pub struct PropertyUpdate {
    /// The replacement value.
    pub value: Value,

    /// The target version, current + 1.
    pub version: VersionRef,
}

impl PropertyUpdate {
    /// Update writing `value` as version `number`.
    pub fn new(value: Value, number: u32) -> Self {
        Self {
            value,
            version: VersionRef { number },
        }
    }
}

impl ConfluenceClient {
    /// Lists properties in a scope. `GET /rest/api/{scope}/{id}/property`
    pub async fn get_properties(
        &self,
        scope: PropertyScope,
        id: &str,
        params: Params,
    ) -> ApiResult<Option<ResultsPage<Property>>> {
        let spec = RequestSpec::get(
            params.append_to(&format!("/rest/api/{}/{id}/property", scope.segment())),
        );
        parse_optional(self.transport().send(spec).await?)
    }

    /// Fetches one property. `GET /rest/api/{scope}/{id}/property/{key}`
    ///
    /// Resolves `Ok(None)` when the key is not set.
    pub async fn get_property(
        &self,
        scope: PropertyScope,
        id: &str,
        key: &str,
        params: Params,
    ) -> ApiResult<Option<Property>> {
        let spec = RequestSpec::get(
            params.append_to(&format!("/rest/api/{}/{id}/property/{key}", scope.segment())),
        );
        parse_optional(self.transport().send(spec).await?)
    }

    /// Creates a property. `POST /rest/api/{scope}/{id}/property`
    pub async fn create_property<B: Serialize>(
        &self,
        scope: PropertyScope,
        id: &str,
        draft: &B,
    ) -> ApiResult<Property> {
        let spec = RequestSpec::post(format!("/rest/api/{}/{id}/property", scope.segment()))
            .json(draft)?;
        parse_required(self.transport().send(spec).await?)
    }

    /// Updates a property. `PUT /rest/api/{scope}/{id}/property/{key}`
    ///
    /// The payload must name version current + 1; a stale number draws a
    /// conflict from the remote.
    pub async fn update_property<B: Serialize>(
        &self,
        scope: PropertyScope,
        id: &str,
        key: &str,
        update: &B,
    ) -> ApiResult<Property> {
        let spec = RequestSpec::put(format!("/rest/api/{}/{id}/property/{key}", scope.segment()))
            .json(update)?;
        parse_required(self.transport().send(spec).await?)
    }

    /// Deletes a property. `DELETE /rest/api/{scope}/{id}/property/{key}`
    pub async fn delete_property(
        &self,
        scope: PropertyScope,
        id: &str,
        key: &str,
    ) -> ApiResult<Value> {
        let spec = RequestSpec::delete(format!("/rest/api/{}/{id}/property/{key}", scope.segment()));
        value_or_ack(self.transport().send(spec).await?)
    }

    /// Lists content properties.
    pub async fn get_all_content_properties(
        &self,
        content_id: &str,
        params: Params,
    ) -> ApiResult<Option<ResultsPage<Property>>> {
        self.get_properties(PropertyScope::Content, content_id, params)
            .await
    }

    /// Fetches one content property.
    pub async fn get_content_property(
        &self,
        content_id: &str,
        key: &str,
        params: Params,
    ) -> ApiResult<Option<Property>> {
        self.get_property(PropertyScope::Content, content_id, key, params)
            .await
    }

    /// Creates a content property.
    pub async fn create_content_property<B: Serialize>(
        &self,
        content_id: &str,
        draft: &B,
    ) -> ApiResult<Property> {
        self.create_property(PropertyScope::Content, content_id, draft)
            .await
    }

    /// Updates a content property.
    pub async fn update_content_property<B: Serialize>(
        &self,
        content_id: &str,
        key: &str,
        update: &B,
    ) -> ApiResult<Property> {
        self.update_property(PropertyScope::Content, content_id, key, update)
            .await
    }

    /// Deletes a content property.
    pub async fn delete_content_property(&self, content_id: &str, key: &str) -> ApiResult<Value> {
        self.delete_property(PropertyScope::Content, content_id, key)
            .await
    }

    /// Lists space properties.
    pub async fn get_all_space_properties(
        &self,
        space_key: &str,
        params: Params,
    ) -> ApiResult<Option<ResultsPage<Property>>> {
        self.get_properties(PropertyScope::Space, space_key, params)
            .await
    }

    /// Fetches one space property.
    pub async fn get_space_property(
        &self,
        space_key: &str,
        key: &str,
        params: Params,
    ) -> ApiResult<Option<Property>> {
        self.get_property(PropertyScope::Space, space_key, key, params)
            .await
    }

    /// Creates a space property.
    pub async fn create_space_property<B: Serialize>(
        &self,
        space_key: &str,
        draft: &B,
    ) -> ApiResult<Property> {
        self.create_property(PropertyScope::Space, space_key, draft)
            .await
    }

    /// Updates a space property.
    pub async fn update_space_property<B: Serialize>(
        &self,
        space_key: &str,
        key: &str,
        update: &B,
    ) -> ApiResult<Property> {
        self.update_property(PropertyScope::Space, space_key, key, update)
            .await
    }

    /// Deletes a space property.
    pub async fn delete_space_property(&self, space_key: &str, key: &str) -> ApiResult<Value> {
        self.delete_property(PropertyScope::Space, space_key, key)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scope_segments() {
        assert_eq!(PropertyScope::Content.segment(), "content");
        assert_eq!(PropertyScope::Space.segment(), "space");
    }

    #[test]
    fn test_draft_wire_shape() {
        let draft = PropertyDraft::new("my-addon-flag", json!(true));
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value, json!({"key": "my-addon-flag", "value": true}));
    }

    #[test]
    fn test_update_names_target_version() {
        let update = PropertyUpdate::new(json!({"seen": 3}), 4);
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value["version"]["number"], 4);
        assert_eq!(value["value"]["seen"], 3);
    }

    #[test]
    fn test_property_parses_with_and_without_version() {
        let bare: Property =
            serde_json::from_value(json!({"key": "k", "value": {"a": 1}})).unwrap();
        assert!(bare.version.is_none());

        let versioned: Property = serde_json::from_value(
            json!({"key": "k", "value": 7, "version": {"number": 2}}),
        )
        .unwrap();
        assert_eq!(versioned.version.unwrap().number, 2);
    }
}
