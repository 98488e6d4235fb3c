//
//  confluence-connect
//  api/users.rs
//
//  Created by Ngonidzashe Mangudya on 2026/07/18.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! User lookups, group membership, and email resolution.
//!
//! Users are addressed by Atlassian account id, passed as a query
//! parameter rather than a path segment. The email endpoints need extra
//! tenant permissions and answer 403 without them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::groups::Group;
use crate::api::types::ResultsPage;
use crate::api::{optional_value, parse_optional, ApiResult, ConfluenceClient, Params, RequestSpec};

/// A user as Confluence returns it.
///
/// Every field is optional: anonymous and scrubbed users come back with
/// most of the record blank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Atlassian account id.
    #[serde(default, rename = "accountId")]
    pub account_id: Option<String>,

    /// Display name.
    #[serde(default, rename = "displayName")]
    pub display_name: Option<String>,

    /// `known`, `unknown`, `anonymous`, or `user`.
    #[serde(default, rename = "type")]
    pub user_type: Option<String>,

    /// Email, only present for permitted callers.
    #[serde(default)]
    pub email: Option<String>,
}

/// One account-id-to-email record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailRecord {
    /// Atlassian account id.
    #[serde(rename = "accountId")]
    pub account_id: String,

    /// The resolved email address.
    pub email: String,
}

impl ConfluenceClient {
    /// Fetches a user. `GET /rest/api/user?accountId=...`
    ///
    /// The account id travels in `params`:
    ///
    /// ```rust,no_run
    /// # use confluence_connect::api::{ConfluenceClient, Params};
    /// # async fn example(client: &ConfluenceClient) -> Result<(), confluence_connect::api::ApiError> {
    /// let user = client
    ///     .get_user(Params::new().set("accountId", "5b10ac8d82e05b22cc7d4ef5"))
    ///     .await?;
    /// # let _ = user;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_user(&self, params: Params) -> ApiResult<Option<User>> {
        let spec = RequestSpec::get(params.append_to("/rest/api/user"));
        parse_optional(self.transport().send(spec).await?)
    }

    /// Fetches the anonymous user record. `GET /rest/api/user/anonymous`
    pub async fn get_user_anonymous(&self, params: Params) -> ApiResult<Option<User>> {
        let spec = RequestSpec::get(params.append_to("/rest/api/user/anonymous"));
        parse_optional(self.transport().send(spec).await?)
    }

    /// Fetches the authenticated user. `GET /rest/api/user/current`
    pub async fn get_user_current(&self, params: Params) -> ApiResult<Option<User>> {
        let spec = RequestSpec::get(params.append_to("/rest/api/user/current"));
        parse_optional(self.transport().send(spec).await?)
    }

    /// Lists the groups a user belongs to. `GET /rest/api/user/memberof`
    pub async fn get_user_groups(&self, params: Params) -> ApiResult<Option<ResultsPage<Group>>> {
        let spec = RequestSpec::get(params.append_to("/rest/api/user/memberof"));
        parse_optional(self.transport().send(spec).await?)
    }

    /// Resolves one email. `GET /rest/api/user/email?accountId=...`
    pub async fn get_email(&self, account_id: &str) -> ApiResult<Option<EmailRecord>> {
        let params = Params::new().set("accountId", account_id);
        let spec = RequestSpec::get(params.append_to("/rest/api/user/email"));
        parse_optional(self.transport().send(spec).await?)
    }

    /// Resolves emails in bulk. `GET /rest/api/user/email/bulk?accountId=a&accountId=b`
    ///
    /// The account ids are repeated as query parameters, one per id.
    pub async fn get_bulk_emails(&self, account_ids: &[&str]) -> ApiResult<Option<Value>> {
        let mut params = Params::new();
        for id in account_ids {
            params = params.set("accountId", id);
        }
        let spec = RequestSpec::get(params.append_to("/rest/api/user/email/bulk"));
        optional_value(self.transport().send(spec).await?)
    }
}
