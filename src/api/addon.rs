//
//  confluence-connect
//  api/addon.rs
//
//  Created by Ngonidzashe Mangudya on 2026/07/18.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Connect add-on properties, the add-on's private key-value store.
//!
//! These live under `/rest/atlassian-connect/1/addons/{addonKey}` rather
//! than `/rest/api`, and the endpoints reject differently: a missing
//! property can come back as a JSON rejection whose body carries
//! `"status-code": 404` instead of an HTTP 404.
//! [`ConfluenceClient::get_addon_property`] folds that shape into
//! `Ok(None)` so absence reads the same as everywhere else.

use serde::Serialize;
use serde_json::Value;

use crate::api::properties::Property;
use crate::api::{
    optional_value, parse_optional, value_or_ack, ApiError, ApiResult, ConfluenceClient, Params,
    RequestSpec,
};

/// Rejections whose JSON body smuggles the status under `status-code`.
fn body_says_not_found(err: &ApiError) -> bool {
    matches!(
        err,
        ApiError::Api { body, .. }
            if body.get("status-code").and_then(Value::as_u64) == Some(404)
    )
}

impl ConfluenceClient {
    /// Lists add-on properties.
    /// `GET /rest/atlassian-connect/1/addons/{addonKey}/properties`
    pub async fn get_addon_properties(
        &self,
        addon_key: &str,
        params: Params,
    ) -> ApiResult<Option<Value>> {
        let spec = RequestSpec::get(
            params.append_to(&format!("/rest/atlassian-connect/1/addons/{addon_key}/properties")),
        );
        optional_value(self.transport().send(spec).await?)
    }

    /// Fetches one add-on property.
    /// `GET /rest/atlassian-connect/1/addons/{addonKey}/properties/{key}`
    ///
    /// Resolves `Ok(None)` for a missing key, whether the remote says so
    /// with an HTTP 404 or with a `status-code: 404` JSON body.
    pub async fn get_addon_property(
        &self,
        addon_key: &str,
        key: &str,
        params: Params,
    ) -> ApiResult<Option<Property>> {
        let spec = RequestSpec::get(params.append_to(&format!(
            "/rest/atlassian-connect/1/addons/{addon_key}/properties/{key}"
        )));
        match self.transport().send(spec).await {
            Ok(body) => parse_optional(body),
            Err(err) if body_says_not_found(&err) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Writes an add-on property.
    /// `PUT /rest/atlassian-connect/1/addons/{addonKey}/properties/{key}`
    pub async fn set_addon_property<B: Serialize>(
        &self,
        addon_key: &str,
        key: &str,
        value: &B,
    ) -> ApiResult<Value> {
        let spec = RequestSpec::put(format!(
            "/rest/atlassian-connect/1/addons/{addon_key}/properties/{key}"
        ))
        .json(value)?;
        value_or_ack(self.transport().send(spec).await?)
    }

    /// Deletes an add-on property.
    /// `DELETE /rest/atlassian-connect/1/addons/{addonKey}/properties/{key}`
    pub async fn delete_addon_property(&self, addon_key: &str, key: &str) -> ApiResult<Value> {
        let spec = RequestSpec::delete(format!(
            "/rest/atlassian-connect/1/addons/{addon_key}/properties/{key}"
        ));
        value_or_ack(self.transport().send(spec).await?)
    }

    /// Fetches the add-on's installation record.
    /// `GET /rest/atlassian-connect/1/addons/{addonKey}`
    pub async fn get_addon_info(&self, addon_key: &str, params: Params) -> ApiResult<Option<Value>> {
        let spec = RequestSpec::get(
            params.append_to(&format!("/rest/atlassian-connect/1/addons/{addon_key}")),
        );
        optional_value(self.transport().send(spec).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_body_status_code_detection() {
        let not_found = ApiError::Api {
            status: 400,
            body: json!({"status-code": 404, "message": "no such property"}),
        };
        assert!(body_says_not_found(&not_found));

        let other = ApiError::Api {
            status: 400,
            body: json!({"status-code": 403}),
        };
        assert!(!body_says_not_found(&other));

        let plain = ApiError::Opaque {
            message: "boom".to_string(),
        };
        assert!(!body_says_not_found(&plain));
    }
}
