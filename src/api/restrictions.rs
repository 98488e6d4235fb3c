//
//  confluence-connect
//  api/restrictions.rs
//
//  Created by Ngonidzashe Mangudya on 2026/07/18.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Content restrictions: who may read or update an entity.
//!
//! The by-operation endpoints grant and revoke for a single user or group.
//! Group names travel in the path and are percent-encoded here; account
//! ids travel as query parameters.

use serde::Serialize;
use serde_json::Value;

use crate::api::{optional_value, value_or_ack, ApiResult, ConfluenceClient, Params, RequestSpec};

/// The restricted operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestrictionOperation {
    /// Restricts who may view.
    Read,
    /// Restricts who may edit.
    Update,
}

impl RestrictionOperation {
    /// The path segment Confluence expects.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Update => "update",
        }
    }
}

impl ConfluenceClient {
    /// Reads the restrictions document. `GET /rest/api/content/{id}/restriction`
    pub async fn get_content_restrictions(
        &self,
        id: &str,
        params: Params,
    ) -> ApiResult<Option<Value>> {
        let spec =
            RequestSpec::get(params.append_to(&format!("/rest/api/content/{id}/restriction")));
        optional_value(self.transport().send(spec).await?)
    }

    /// Adds restrictions. `POST /rest/api/content/{id}/restriction`
    pub async fn add_content_restrictions<B: Serialize>(
        &self,
        id: &str,
        restrictions: &B,
        params: Params,
    ) -> ApiResult<Value> {
        let spec =
            RequestSpec::post(params.append_to(&format!("/rest/api/content/{id}/restriction")))
                .json(restrictions)?;
        value_or_ack(self.transport().send(spec).await?)
    }

    /// Replaces restrictions. `PUT /rest/api/content/{id}/restriction`
    pub async fn update_content_restrictions<B: Serialize>(
        &self,
        id: &str,
        restrictions: &B,
        params: Params,
    ) -> ApiResult<Value> {
        let spec =
            RequestSpec::put(params.append_to(&format!("/rest/api/content/{id}/restriction")))
                .json(restrictions)?;
        value_or_ack(self.transport().send(spec).await?)
    }

    /// Clears restrictions. `DELETE /rest/api/content/{id}/restriction`
    pub async fn remove_content_restrictions(&self, id: &str, params: Params) -> ApiResult<Value> {
        let spec =
            RequestSpec::delete(params.append_to(&format!("/rest/api/content/{id}/restriction")));
        value_or_ack(self.transport().send(spec).await?)
    }

    /// Grants one user an operation.
    /// `PUT /rest/api/content/{id}/restriction/byOperation/{operation}/user`
    pub async fn add_user_to_content_restriction(
        &self,
        id: &str,
        operation: RestrictionOperation,
        account_id: &str,
    ) -> ApiResult<Value> {
        let params = Params::new().set("accountId", account_id);
        let spec = RequestSpec::put(params.append_to(&format!(
            "/rest/api/content/{id}/restriction/byOperation/{}/user",
            operation.as_str()
        )));
        value_or_ack(self.transport().send(spec).await?)
    }

    /// Revokes one user's operation.
    /// `DELETE /rest/api/content/{id}/restriction/byOperation/{operation}/user`
    pub async fn remove_user_from_content_restriction(
        &self,
        id: &str,
        operation: RestrictionOperation,
        account_id: &str,
    ) -> ApiResult<Value> {
        let params = Params::new().set("accountId", account_id);
        let spec = RequestSpec::delete(params.append_to(&format!(
            "/rest/api/content/{id}/restriction/byOperation/{}/user",
            operation.as_str()
        )));
        value_or_ack(self.transport().send(spec).await?)
    }

    /// Grants one group an operation.
    /// `PUT /rest/api/content/{id}/restriction/byOperation/{operation}/group/{name}`
    pub async fn add_group_to_content_restriction(
        &self,
        id: &str,
        operation: RestrictionOperation,
        group_name: &str,
    ) -> ApiResult<Value> {
        let spec = RequestSpec::put(format!(
            "/rest/api/content/{id}/restriction/byOperation/{}/group/{}",
            operation.as_str(),
            urlencoding::encode(group_name)
        ));
        value_or_ack(self.transport().send(spec).await?)
    }

    /// Revokes one group's operation.
    /// `DELETE /rest/api/content/{id}/restriction/byOperation/{operation}/group/{name}`
    pub async fn remove_group_from_content_restriction(
        &self,
        id: &str,
        operation: RestrictionOperation,
        group_name: &str,
    ) -> ApiResult<Value> {
        let spec = RequestSpec::delete(format!(
            "/rest/api/content/{id}/restriction/byOperation/{}/group/{}",
            operation.as_str(),
            urlencoding::encode(group_name)
        ));
        value_or_ack(self.transport().send(spec).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_segments() {
        assert_eq!(RestrictionOperation::Read.as_str(), "read");
        assert_eq!(RestrictionOperation::Update.as_str(), "update");
    }

    #[test]
    fn test_group_names_are_path_encoded() {
        assert_eq!(urlencoding::encode("confluence users"), "confluence%20users");
        assert_eq!(urlencoding::encode("team/ops"), "team%2Fops");
    }
}
