//
//  confluence-connect
//  api/search.rs
//
//  Created by Ngonidzashe Mangudya on 2026/07/18.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Site search: CQL queries plus the prototype user and group searches.
//!
//! CQL (Confluence Query Language) strings go out as the `cql` query
//! parameter and are percent-encoded with the rest of the pairs. Search
//! envelopes vary by endpoint and deployment, so everything here resolves
//! loose JSON.

use serde_json::Value;

use crate::api::{optional_value, ApiResult, ConfluenceClient, Params, RequestSpec};

impl ConfluenceClient {
    /// Runs a CQL query. `GET /rest/api/search?cql=...`
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use confluence_connect::api::{ConfluenceClient, Params};
    /// # async fn example(client: &ConfluenceClient) -> Result<(), confluence_connect::api::ApiError> {
    /// let hits = client
    ///     .cql_search("space = \"DEV\" and type = page", Params::new().set("limit", 5))
    ///     .await?;
    /// # let _ = hits;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn cql_search(&self, cql: &str, params: Params) -> ApiResult<Option<Value>> {
        let params = params.set("cql", cql);
        let spec = RequestSpec::get(params.append_to("/rest/api/search"))
            .header("Accept", "application/json");
        optional_value(self.transport().send(spec).await?)
    }

    /// Searches content. `GET /rest/api/content/search`
    pub async fn search_content(&self, params: Params) -> ApiResult<Option<Value>> {
        let spec = RequestSpec::get(params.append_to("/rest/api/content/search"));
        optional_value(self.transport().send(spec).await?)
    }

    /// Searches users with CQL. `GET /rest/api/search/user`
    pub async fn search_users(&self, params: Params) -> ApiResult<Option<Value>> {
        let spec = RequestSpec::get(params.append_to("/rest/api/search/user"));
        optional_value(self.transport().send(spec).await?)
    }

    /// Prototype user search, capped at ten matches.
    /// `GET /rest/prototype/1/search/user?query=...&max-results=10`
    pub async fn user_search(&self, term: &str, params: Params) -> ApiResult<Option<Value>> {
        let params = params.set("query", term).set("max-results", 10);
        let spec = RequestSpec::get(params.append_to("/rest/prototype/1/search/user"))
            .header("Accept", "application/json");
        optional_value(self.transport().send(spec).await?)
    }

    /// Prototype group search, capped at ten matches.
    /// `GET /rest/prototype/1/search/group?query=...&max-results=10`
    pub async fn group_search(&self, term: &str, params: Params) -> ApiResult<Option<Value>> {
        let params = params.set("query", term).set("max-results", 10);
        let spec = RequestSpec::get(params.append_to("/rest/prototype/1/search/group"))
            .header("Accept", "application/json");
        optional_value(self.transport().send(spec).await?)
    }
}
