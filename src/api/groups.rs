//
//  confluence-connect
//  api/groups.rs
//
//  Created by Ngonidzashe Mangudya on 2026/07/18.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Group lookups and membership listings.
//!
//! Group names go into the path percent-encoded; Confluence group names
//! routinely contain spaces.

use serde::{Deserialize, Serialize};

use crate::api::types::ResultsPage;
use crate::api::users::User;
use crate::api::{parse_optional, ApiResult, ConfluenceClient, Params, RequestSpec};

/// A user group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    /// The group name.
    pub name: String,

    /// Always `group` on cloud.
    #[serde(default, rename = "type")]
    pub group_type: Option<String>,

    /// Group id, present on newer deployments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl ConfluenceClient {
    /// Lists groups. `GET /rest/api/group`
    pub async fn get_groups(&self, params: Params) -> ApiResult<Option<ResultsPage<Group>>> {
        let spec = RequestSpec::get(params.append_to("/rest/api/group"));
        parse_optional(self.transport().send(spec).await?)
    }

    /// Fetches one group. `GET /rest/api/group/{name}`
    pub async fn get_group(&self, name: &str, params: Params) -> ApiResult<Option<Group>> {
        let spec = RequestSpec::get(
            params.append_to(&format!("/rest/api/group/{}", urlencoding::encode(name))),
        );
        parse_optional(self.transport().send(spec).await?)
    }

    /// Lists a group's members. `GET /rest/api/group/{name}/member`
    pub async fn get_members(
        &self,
        name: &str,
        params: Params,
    ) -> ApiResult<Option<ResultsPage<User>>> {
        let spec = RequestSpec::get(params.append_to(&format!(
            "/rest/api/group/{}/member",
            urlencoding::encode(name)
        )));
        parse_optional(self.transport().send(spec).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_group_parses_cloud_entry() {
        let group: Group = serde_json::from_value(json!({
            "type": "group",
            "name": "confluence-users",
            "id": "d7c4f9f2"
        }))
        .unwrap();
        assert_eq!(group.name, "confluence-users");
        assert_eq!(group.group_type.as_deref(), Some("group"));
    }
}
