//
//  confluence-connect
//  api/content.rs
//
//  Created by Ngonidzashe Mangudya on 2026/07/18.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Content API: pages, blog posts, comments, and their sub-resources.
//!
//! This module carries the content models ([`Content`], [`ContentDraft`],
//! [`ContentUpdate`]) and the content half of the client catalog: CRUD,
//! move and copy, history and version listings, children, and the created
//! notifications.
//!
//! The one non-trivial operation is [`ConfluenceClient::set_content`], an
//! upsert with optimistic-concurrency retries: read the current version,
//! merge, PUT, and retry the whole cycle on a version conflict.
//!
//! # Example
//!
//! ```rust,no_run
//! use confluence_connect::api::{ConfluenceClient, Credentials, Params};
//! use confluence_connect::api::content::ContentDraft;
//!
//! # async fn example(client: &ConfluenceClient) -> Result<(), confluence_connect::api::ApiError> {
//! let draft = ContentDraft::page("Runbook", "OPS").body_storage("<p>steps</p>");
//! let page = client.create_content(&draft).await?;
//!
//! let fetched = client
//!     .get_content_by_id(&page.id, Params::new().expand(["version", "space"]))
//!     .await?;
//! assert!(fetched.is_some());
//! # Ok(())
//! # }
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::types::{ContentBody, ContentRef, ResultsPage, SpaceRef, Storage, Version, VersionRef};
use crate::api::{
    optional_value, parse_optional, parse_required, value_or_ack, ApiError, ApiResult,
    ConfluenceClient, Params, RequestSpec,
};

/// Conflict retries granted to [`ConfluenceClient::set_content`].
///
/// Two retries mean a persistently conflicting update is attempted three
/// times before the final conflict is propagated.
pub const CONFLICT_RETRIES: u32 = 2;

/// A content entity (page, blog post, comment, attachment record).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    /// The content id, as Confluence returns it (a numeric string).
    pub id: String,

    /// The content type: `page`, `blogpost`, `comment`, `attachment`.
    #[serde(rename = "type")]
    pub content_type: String,

    /// Lifecycle status (`current`, `trashed`, ...).
    #[serde(default)]
    pub status: Option<String>,

    /// The title.
    pub title: String,

    /// Owning space, present when expanded or embedded.
    #[serde(default)]
    pub space: Option<SpaceRef>,

    /// Version record, present when `expand=version` was requested.
    #[serde(default)]
    pub version: Option<Version>,

    /// Ancestor chain, present when expanded. `null` stays `None`.
    #[serde(default)]
    pub ancestors: Option<Vec<ContentRef>>,

    /// Body representations, present when expanded.
    #[serde(default)]
    pub body: Option<ContentBody>,

    /// Navigation links, kept loose.
    #[serde(default, rename = "_links")]
    pub links: Option<Value>,
}

/// Payload for creating content.
///
/// The `ancestors` field is always serialized: `Some(vec![])` pins the
/// page to the space root, a non-empty list to a parent page, and `None`
/// renders as JSON `null`, which Confluence reads as "under the space
/// homepage".
///
/// # Example
///
/// ```rust
/// use confluence_connect::api::content::ContentDraft;
///
/// let under_root = ContentDraft::page("A", "DEV");
/// let under_home = ContentDraft::page("B", "DEV").under_homepage();
/// let under_page = ContentDraft::page("C", "DEV").child_of("98306");
/// # let _ = (under_root, under_home, under_page);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ContentDraft {
    /// The content type, normally `page`.
    #[serde(rename = "type")]
    pub content_type: String,

    /// The title.
    pub title: String,

    /// Target space.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space: Option<SpaceRef>,

    /// Initial body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<ContentBody>,

    /// Placement: `null` = homepage, `[]` = space root, list = parent.
    pub ancestors: Option<Vec<ContentRef>>,
}

impl ContentDraft {
    /// Draft for a page at the space root.
    pub fn page(title: impl Into<String>, space_key: impl Into<String>) -> Self {
        Self {
            content_type: "page".to_string(),
            title: title.into(),
            space: Some(SpaceRef {
                key: space_key.into(),
            }),
            body: None,
            ancestors: Some(Vec::new()),
        }
    }

    /// Attaches a storage-format body.
    pub fn body_storage(mut self, markup: impl Into<String>) -> Self {
        self.body = Some(ContentBody {
            storage: Some(Storage::new(markup)),
            view: None,
        });
        self
    }

    /// Places the page under the space homepage instead of the root.
    pub fn under_homepage(mut self) -> Self {
        self.ancestors = None;
        self
    }

    /// Places the page under the given parent.
    pub fn child_of(mut self, parent_id: impl Into<String>) -> Self {
        self.ancestors = Some(vec![ContentRef {
            id: parent_id.into(),
        }]);
        self
    }
}

/// Payload for updating content.
///
/// All fields are optional; [`ConfluenceClient::set_content`] fills the
/// gaps from the current entity. For a plain
/// [`update_content`](ConfluenceClient::update_content) the remote requires
/// at least `type`, `title`, and `version`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContentUpdate {
    /// The content type; defaults to the current one in `set_content`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    /// The title; defaults to the current one in `set_content`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Target version; defaults to current + 1 in `set_content`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<VersionRef>,

    /// Replacement body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<ContentBody>,

    /// Replacement ancestor chain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ancestors: Option<Vec<ContentRef>>,
}

impl ContentUpdate {
    /// Update that only replaces the storage body.
    pub fn body_storage(markup: impl Into<String>) -> Self {
        Self {
            body: Some(ContentBody {
                storage: Some(Storage::new(markup)),
                view: None,
            }),
            ..Self::default()
        }
    }

    /// Fills unset fields from the current entity.
    ///
    /// Caller-supplied fields always win; the derived fields are the
    /// current type, the current title, and version number current + 1.
    fn merged_with_current(&self, current: &Content) -> ApiResult<Self> {
        let version = match self.version {
            Some(version) => version,
            None => {
                let number = current
                    .version
                    .as_ref()
                    .map(|v| v.number)
                    .ok_or(ApiError::InvalidBody)?;
                VersionRef { number: number + 1 }
            }
        };

        Ok(Self {
            content_type: self
                .content_type
                .clone()
                .or_else(|| Some(current.content_type.clone())),
            title: self.title.clone().or_else(|| Some(current.title.clone())),
            version: Some(version),
            body: self.body.clone(),
            ancestors: self.ancestors.clone(),
        })
    }
}

/// Placement of moved content relative to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovePosition {
    /// Sibling directly before the target.
    Before,
    /// Sibling directly after the target.
    After,
    /// Last child of the target.
    Append,
}

impl MovePosition {
    /// The path segment Confluence expects.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::After => "after",
            Self::Append => "append",
        }
    }
}

/// Where a page copy lands.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CopyDestinationType {
    /// Root of the space named by `value`.
    Space,
    /// Child of the page named by `value`.
    ParentPage,
    /// Overwrite the existing page named by `value`.
    ExistingPage,
}

/// Copy destination: a type plus the space key or page id it points at.
#[derive(Debug, Clone, Serialize)]
pub struct CopyDestination {
    /// The destination kind.
    #[serde(rename = "type")]
    pub destination_type: CopyDestinationType,

    /// Space key or content id, depending on the kind.
    pub value: String,
}

impl CopyDestination {
    /// Destination at the root of a space.
    pub fn space(key: impl Into<String>) -> Self {
        Self {
            destination_type: CopyDestinationType::Space,
            value: key.into(),
        }
    }

    /// Destination under a parent page.
    pub fn parent_page(id: impl Into<String>) -> Self {
        Self {
            destination_type: CopyDestinationType::ParentPage,
            value: id.into(),
        }
    }

    /// Destination replacing an existing page.
    pub fn existing_page(id: impl Into<String>) -> Self {
        Self {
            destination_type: CopyDestinationType::ExistingPage,
            value: id.into(),
        }
    }
}

/// Payload for the single-page copy endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyPageRequest {
    /// Copy the page's attachments.
    pub copy_attachments: bool,
    /// Copy the page's restrictions.
    pub copy_permissions: bool,
    /// Copy the page's content properties.
    pub copy_properties: bool,
    /// Copy the page's labels.
    pub copy_labels: bool,
    /// Copy the page's custom contents.
    pub copy_custom_contents: bool,
    /// Where the copy lands.
    pub destination: CopyDestination,
    /// Optional title override for the copy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_title: Option<String>,
    /// Optional body override; when unset the source body is copied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<ContentBody>,
}

impl CopyPageRequest {
    /// Copy request with all copy flags off.
    pub fn to(destination: CopyDestination) -> Self {
        Self {
            copy_attachments: false,
            copy_permissions: false,
            copy_properties: false,
            copy_labels: false,
            copy_custom_contents: false,
            destination,
            page_title: None,
            body: None,
        }
    }

    /// Turns every copy flag on.
    pub fn copy_everything(mut self) -> Self {
        self.copy_attachments = true;
        self.copy_permissions = true;
        self.copy_properties = true;
        self.copy_labels = true;
        self.copy_custom_contents = true;
        self
    }
}

impl ConfluenceClient {
    /// Creates content. `POST /rest/api/content`
    ///
    /// Accepts any serializable payload; [`ContentDraft`] covers the
    /// common page shapes.
    pub async fn create_content<B: Serialize>(&self, draft: &B) -> ApiResult<Content> {
        let spec = RequestSpec::post("/rest/api/content").json(draft)?;
        parse_required(self.transport().send(spec).await?)
    }

    /// Lists content. `GET /rest/api/content`
    pub async fn get_content(&self, params: Params) -> ApiResult<Option<ResultsPage<Content>>> {
        let spec = RequestSpec::get(params.append_to("/rest/api/content"));
        parse_optional(self.transport().send(spec).await?)
    }

    /// Fetches one entity by id. `GET /rest/api/content/{id}`
    ///
    /// Resolves `Ok(None)` when the id does not exist.
    pub async fn get_content_by_id(&self, id: &str, params: Params) -> ApiResult<Option<Content>> {
        let spec = RequestSpec::get(params.append_to(&format!("/rest/api/content/{id}")));
        parse_optional(self.transport().send(spec).await?)
    }

    /// Replaces content. `PUT /rest/api/content/{id}`
    ///
    /// The payload must name the target version; see
    /// [`set_content`](Self::set_content) for the managed variant.
    pub async fn update_content<B: Serialize>(&self, id: &str, update: &B) -> ApiResult<Content> {
        let spec = RequestSpec::put(format!("/rest/api/content/{id}")).json(update)?;
        parse_required(self.transport().send(spec).await?)
    }

    /// Upserts content with optimistic-concurrency retries.
    ///
    /// Reads the entity with `expand=version`, merges the update over
    /// `{type, title, version: current + 1}` (caller fields win), and PUTs
    /// the result. A 409 conflict restarts the whole read-merge-write
    /// cycle; [`CONFLICT_RETRIES`] bounds the restarts, so a persistent
    /// conflict is attempted three times before the final conflict error
    /// propagates. When the id does not exist the payload is posted to
    /// [`create_content`](Self::create_content) instead.
    pub async fn set_content(&self, id: &str, update: &ContentUpdate) -> ApiResult<Content> {
        self.set_content_with_retries(id, update, CONFLICT_RETRIES)
            .await
    }

    /// [`set_content`](Self::set_content) with an explicit retry budget.
    pub async fn set_content_with_retries(
        &self,
        id: &str,
        update: &ContentUpdate,
        retries: u32,
    ) -> ApiResult<Content> {
        let mut budget = retries;
        loop {
            let current = self
                .get_content_by_id(id, Params::new().expand(["version"]))
                .await?;

            let Some(current) = current else {
                return self.create_content(update).await;
            };

            let effective = update.merged_with_current(&current)?;
            match self.update_content(id, &effective).await {
                Err(err) if err.is_conflict() && budget > 0 => {
                    tracing::warn!(id, attempts_left = budget, "version conflict, retrying update");
                    budget -= 1;
                }
                other => return other,
            }
        }
    }

    /// Moves content relative to a target. `PUT /rest/api/content/{id}/move/{position}/{targetId}`
    pub async fn move_content(
        &self,
        id: &str,
        position: MovePosition,
        target_id: &str,
    ) -> ApiResult<Value> {
        let spec = RequestSpec::put(format!(
            "/rest/api/content/{id}/move/{}/{target_id}",
            position.as_str()
        ));
        value_or_ack(self.transport().send(spec).await?)
    }

    /// Deletes content. `DELETE /rest/api/content/{id}`
    ///
    /// Resolves `{"status": "ok"}` on the remote's empty acknowledgement.
    pub async fn delete_content(&self, id: &str) -> ApiResult<Value> {
        let spec = RequestSpec::delete(format!("/rest/api/content/{id}"));
        value_or_ack(self.transport().send(spec).await?)
    }

    /// Fetches the history document. `GET /rest/api/content/{id}/history`
    pub async fn get_history(&self, id: &str, params: Params) -> ApiResult<Option<Value>> {
        let spec = RequestSpec::get(params.append_to(&format!("/rest/api/content/{id}/history")));
        optional_value(self.transport().send(spec).await?)
    }

    /// Lists versions. `GET /rest/api/content/{id}/version`
    pub async fn get_content_history(&self, id: &str, params: Params) -> ApiResult<Option<Value>> {
        let spec = RequestSpec::get(params.append_to(&format!("/rest/api/content/{id}/version")));
        optional_value(self.transport().send(spec).await?)
    }

    /// Fetches one version. `GET /rest/api/content/{id}/version/{number}`
    pub async fn get_content_version(
        &self,
        id: &str,
        version_number: u32,
        params: Params,
    ) -> ApiResult<Option<Value>> {
        let spec = RequestSpec::get(params.append_to(&format!(
            "/rest/api/content/{id}/version/{version_number}"
        )));
        optional_value(self.transport().send(spec).await?)
    }

    /// Fetches the children envelope, all types. `GET /rest/api/content/{id}/child`
    pub async fn get_children(&self, id: &str, params: Params) -> ApiResult<Option<Value>> {
        let spec = RequestSpec::get(params.append_to(&format!("/rest/api/content/{id}/child")));
        optional_value(self.transport().send(spec).await?)
    }

    /// Lists children of one type. `GET /rest/api/content/{id}/child/{type}`
    ///
    /// The page item type follows the child type requested:
    ///
    /// ```rust,no_run
    /// use confluence_connect::api::attachments::Attachment;
    /// use confluence_connect::api::{ConfluenceClient, Params};
    ///
    /// # async fn example(client: &ConfluenceClient) -> Result<(), confluence_connect::api::ApiError> {
    /// let attachments = client
    ///     .get_children_of_type::<Attachment>("98306", "attachment", Params::new().expand(["version"]))
    ///     .await?;
    /// # let _ = attachments;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_children_of_type<T: DeserializeOwned>(
        &self,
        id: &str,
        child_type: &str,
        params: Params,
    ) -> ApiResult<Option<ResultsPage<T>>> {
        let spec = RequestSpec::get(
            params.append_to(&format!("/rest/api/content/{id}/child/{child_type}")),
        );
        parse_optional(self.transport().send(spec).await?)
    }

    /// Copies a single page. `POST /rest/api/content/{id}/copy`
    pub async fn copy_single_page<B: Serialize>(
        &self,
        id: &str,
        body: &B,
        params: Params,
    ) -> ApiResult<Content> {
        let spec = RequestSpec::post(params.append_to(&format!("/rest/api/content/{id}/copy")))
            .header("Accept", "application/json")
            .json(body)?;
        parse_required(self.transport().send(spec).await?)
    }

    /// Watch notifications for child creation.
    /// `GET /rest/api/content/{id}/notification/child-created`
    pub async fn get_notifications_for_child_content_created(
        &self,
        id: &str,
        params: Params,
    ) -> ApiResult<Option<Value>> {
        let spec = RequestSpec::get(
            params.append_to(&format!("/rest/api/content/{id}/notification/child-created")),
        );
        optional_value(self.transport().send(spec).await?)
    }

    /// Watch notifications for content creation.
    /// `GET /rest/api/content/{id}/notification/created`
    pub async fn get_notifications_for_content_created(
        &self,
        id: &str,
        params: Params,
    ) -> ApiResult<Option<Value>> {
        let spec = RequestSpec::get(
            params.append_to(&format!("/rest/api/content/{id}/notification/created")),
        );
        optional_value(self.transport().send(spec).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_draft_serializes_root_placement_as_empty_list() {
        let draft = ContentDraft::page("Title", "DEV").body_storage("<p>x</p>");
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["type"], "page");
        assert_eq!(value["space"]["key"], "DEV");
        assert_eq!(value["ancestors"], json!([]));
        assert_eq!(value["body"]["storage"]["representation"], "storage");
    }

    #[test]
    fn test_draft_serializes_homepage_placement_as_null() {
        let draft = ContentDraft::page("Title", "DEV").under_homepage();
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["ancestors"], Value::Null);
    }

    #[test]
    fn test_merge_fills_gaps_and_bumps_version() {
        let current: Content = serde_json::from_value(json!({
            "id": "42",
            "type": "page",
            "title": "Current title",
            "version": {"number": 7}
        }))
        .unwrap();

        let update = ContentUpdate::body_storage("<p>new</p>");
        let merged = update.merged_with_current(&current).unwrap();

        assert_eq!(merged.content_type.as_deref(), Some("page"));
        assert_eq!(merged.title.as_deref(), Some("Current title"));
        assert_eq!(merged.version.unwrap().number, 8);
        assert!(merged.body.is_some());
    }

    #[test]
    fn test_merge_prefers_caller_fields() {
        let current: Content = serde_json::from_value(json!({
            "id": "42",
            "type": "page",
            "title": "Current title",
            "version": {"number": 7}
        }))
        .unwrap();

        let update = ContentUpdate {
            title: Some("New title".to_string()),
            version: Some(VersionRef { number: 99 }),
            ..ContentUpdate::default()
        };
        let merged = update.merged_with_current(&current).unwrap();

        assert_eq!(merged.title.as_deref(), Some("New title"));
        assert_eq!(merged.version.unwrap().number, 99);
    }

    #[test]
    fn test_merge_without_version_on_current_is_rejected() {
        let current: Content = serde_json::from_value(json!({
            "id": "42",
            "type": "page",
            "title": "Current title"
        }))
        .unwrap();

        let update = ContentUpdate::default();
        assert!(matches!(
            update.merged_with_current(&current),
            Err(ApiError::InvalidBody)
        ));
    }

    #[test]
    fn test_copy_request_wire_shape() {
        let request = CopyPageRequest::to(CopyDestination::existing_page("131073")).copy_everything();
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["copyAttachments"], true);
        assert_eq!(value["destination"]["type"], "existing_page");
        assert_eq!(value["destination"]["value"], "131073");
        assert!(value.get("pageTitle").is_none());
        assert!(value.get("body").is_none());
    }

    #[test]
    fn test_copy_request_carries_body_override() {
        let mut request = CopyPageRequest::to(CopyDestination::space("TGT"));
        request.body = Some(ContentBody {
            storage: Some(Storage::new("<p>kept</p>")),
            view: None,
        });
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["destination"]["type"], "space");
        assert_eq!(value["body"]["storage"]["value"], "<p>kept</p>");
        assert_eq!(value["body"]["storage"]["representation"], "storage");
    }

    #[test]
    fn test_move_position_segments() {
        assert_eq!(MovePosition::Before.as_str(), "before");
        assert_eq!(MovePosition::After.as_str(), "after");
        assert_eq!(MovePosition::Append.as_str(), "append");
    }
}
