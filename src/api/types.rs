//
//  confluence-connect
//  api/types.rs
//
//  Created by Ngonidzashe Mangudya on 2026/07/18.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Cross-resource wire models.
//!
//! Types shared by more than one resource family live here: the paged
//! `{results, start, limit, size}` envelope, version records, and the
//! lightweight references Confluence embeds inside bigger documents.
//! Resource-specific models live with their resource module
//! (e.g. [`Content`](crate::api::content::Content)).
//!
//! Unknown remote fields are ignored on the way in; references serialize
//! only the fields Confluence requires on the way out, so the same types
//! work in drafts and in responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Confluence's paged list envelope.
///
/// Every list endpoint wraps its results in this shape. `_links.next`
/// carries the relative path of the following page when there is one.
///
/// # Example
///
/// ```rust
/// use confluence_connect::api::types::ResultsPage;
/// use serde_json::Value;
///
/// let json = r#"{
///     "results": [{"id": "1"}],
///     "start": 0,
///     "limit": 25,
///     "size": 1,
///     "_links": {"next": "/rest/api/space?start=25"}
/// }"#;
///
/// let page: ResultsPage<Value> = serde_json::from_str(json).unwrap();
/// assert_eq!(page.results.len(), 1);
/// assert!(page.has_next());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultsPage<T> {
    /// The items on this page.
    pub results: Vec<T>,

    /// Zero-based offset of the first item.
    #[serde(default)]
    pub start: Option<u32>,

    /// Requested page size.
    #[serde(default)]
    pub limit: Option<u32>,

    /// Number of items actually returned.
    #[serde(default)]
    pub size: Option<u32>,

    /// Navigation links (`next`, `self`, ...), kept loose.
    #[serde(default, rename = "_links")]
    pub links: Option<Value>,
}

impl<T> ResultsPage<T> {
    /// Relative path of the next page, when the remote advertised one.
    pub fn next_path(&self) -> Option<&str> {
        self.links.as_ref()?.get("next")?.as_str()
    }

    /// `true` when another page is available.
    pub fn has_next(&self) -> bool {
        self.next_path().is_some()
    }
}

/// A content or property version record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Version {
    /// Monotonic version counter, starting at 1.
    pub number: u32,

    /// When this version was created.
    #[serde(default)]
    pub when: Option<DateTime<Utc>>,

    /// Whether the edit was flagged as minor.
    #[serde(default, rename = "minorEdit")]
    pub minor_edit: bool,

    /// The author, kept loose (shape differs between endpoints).
    #[serde(default)]
    pub by: Option<Value>,

    /// Optional edit message.
    #[serde(default)]
    pub message: Option<String>,
}

/// Version pointer for update payloads: just `{number}`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VersionRef {
    /// The version number the update targets.
    pub number: u32,
}

/// Space reference embedded in content and used in drafts: `{key}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpaceRef {
    /// The space key (e.g. `DEV`).
    pub key: String,
}

/// Content reference used in ancestor lists: `{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentRef {
    /// The referenced content id.
    pub id: String,
}

/// A content body in one or more representations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentBody {
    /// The editable `storage` representation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<Storage>,

    /// The rendered `view` representation, kept loose.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view: Option<Value>,
}

/// A body value in Confluence storage format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Storage {
    /// The markup itself.
    pub value: String,

    /// The representation name, normally `storage`.
    pub representation: String,
}

impl Storage {
    /// Wraps markup in the `storage` representation.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            representation: "storage".to_string(),
        }
    }
}
