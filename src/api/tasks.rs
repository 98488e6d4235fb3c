//
//  confluence-connect
//  api/tasks.rs
//
//  Created by Ngonidzashe Mangudya on 2026/07/18.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Long-running task tracking.
//!
//! Asynchronous operations such as space deletion answer with a task
//! pointer; these endpoints poll its progress.

use serde_json::Value;

use crate::api::{optional_value, ApiResult, ConfluenceClient, Params, RequestSpec};

impl ConfluenceClient {
    /// Lists long-running tasks. `GET /rest/api/longtask`
    pub async fn get_tasks(&self, params: Params) -> ApiResult<Option<Value>> {
        let spec = RequestSpec::get(params.append_to("/rest/api/longtask"));
        optional_value(self.transport().send(spec).await?)
    }

    /// Fetches one task. `GET /rest/api/longtask/{id}`
    pub async fn get_task(&self, id: &str, params: Params) -> ApiResult<Option<Value>> {
        let spec = RequestSpec::get(params.append_to(&format!("/rest/api/longtask/{id}")));
        optional_value(self.transport().send(spec).await?)
    }
}
