//
//  confluence-connect
//  api/params.rs
//
//  Created by Ngonidzashe Mangudya on 2026/07/18.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Query-parameter builder for Confluence REST calls.
//!
//! Confluence expresses almost every read option as a query parameter:
//! `expand` lists, pagination (`start`/`limit`), content status filters,
//! CQL queries, and so on. This module provides [`Params`], an ordered
//! builder that renders those pairs into a percent-encoded query string.
//!
//! # Rules
//!
//! - `expand` values are joined with commas into a single `expand=` pair
//!   before encoding (so the comma itself is encoded as `%2C`).
//! - A pair whose rendered value is empty is omitted entirely.
//! - Pairs keep insertion order and may repeat (e.g. `accountId` for the
//!   bulk e-mail endpoint).
//! - The `?` separator is only emitted when at least one pair survives.
//!
//! # Example
//!
//! ```rust
//! use confluence_connect::api::Params;
//!
//! let params = Params::new()
//!     .expand(["version", "space"])
//!     .set("limit", 25)
//!     .set("status", "");
//!
//! assert_eq!(params.to_query(), "expand=version%2Cspace&limit=25");
//! assert_eq!(
//!     params.append_to("/rest/api/content/123"),
//!     "/rest/api/content/123?expand=version%2Cspace&limit=25"
//! );
//! ```

/// Ordered builder for a percent-encoded query string.
///
/// Values are rendered with `ToString` when set, so numbers and booleans
/// work directly. Encoding matches `encodeURIComponent` (spaces become
/// `%20`, commas `%2C`).
#[derive(Debug, Clone, Default)]
pub struct Params {
    pairs: Vec<(String, String)>,
}

impl Params {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an `expand=` pair with the given values joined by commas.
    ///
    /// Passing an empty iterator renders an empty value, which is dropped
    /// like any other empty pair.
    ///
    /// # Example
    ///
    /// ```rust
    /// use confluence_connect::api::Params;
    ///
    /// let q = Params::new().expand(["version"]).to_query();
    /// assert_eq!(q, "expand=version");
    /// ```
    pub fn expand<I, S>(self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = values
            .into_iter()
            .map(|v| v.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(",");
        self.set("expand", joined)
    }

    /// Adds a key/value pair, dropping it when the rendered value is empty.
    ///
    /// # Parameters
    ///
    /// * `key` - The parameter name
    /// * `value` - Any `ToString` value; rendered once at insertion time
    pub fn set(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        let rendered = value.to_string();
        if rendered.is_empty() {
            return self;
        }
        self.pairs.push((key.into(), rendered));
        self
    }

    /// Returns `true` when no pair survived insertion.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Renders the pairs as `key=value&key=value`, percent-encoded.
    pub fn to_query(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Appends the rendered query to a path.
    ///
    /// The `?` separator is only added when the query is non-empty, so
    /// parameter-less calls produce clean paths.
    pub fn append_to(&self, path: &str) -> String {
        if self.is_empty() {
            path.to_string()
        } else {
            format!("{}?{}", path, self.to_query())
        }
    }
}
