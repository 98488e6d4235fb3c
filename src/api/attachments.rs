//
//  confluence-connect
//  api/attachments.rs
//
//  Created by Ngonidzashe Mangudya on 2026/07/18.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Attachment transfer: download bytes, upload as multipart.
//!
//! Uploads go to `PUT /rest/api/content/{id}/child/attachment` as a
//! multipart form with a single `file` part and the `X-Atlassian-Token:
//! nocheck` header that disarms Confluence's XSRF check. The remote
//! creates or replaces by filename and answers with the attachment
//! listing page.
//!
//! [`ConfluenceClient::create_or_update_attachment`] chains a download and
//! an upload to copy an existing attachment onto other content, the
//! instance-to-instance copy case. For arbitrary bytes use
//! [`ConfluenceClient::create_or_update_attachment_from_stream`].

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::types::{ResultsPage, Version};
use crate::api::{
    parse_required, ApiError, ApiResult, ConfluenceClient, Params, RequestSpec, ResponseBody,
};

/// An attachment record, a content entity of type `attachment`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    /// The attachment's content id.
    pub id: String,

    /// The filename.
    pub title: String,

    /// Version record, present when `expand=version` was requested.
    #[serde(default)]
    pub version: Option<Version>,

    /// Media metadata such as `mediaType` and `fileSize`.
    #[serde(default)]
    pub extensions: Option<Value>,

    /// Navigation links; `download` is the piece the transfer needs.
    #[serde(rename = "_links")]
    pub links: AttachmentLinks,
}

/// The links block of an attachment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachmentLinks {
    /// Instance-relative download path.
    pub download: String,

    /// Web UI path.
    #[serde(default)]
    pub webui: Option<String>,
}

impl ConfluenceClient {
    /// Downloads an attachment's bytes via its `download` link.
    ///
    /// Resolves `Ok(None)` when the binary is gone even though the record
    /// still exists.
    pub async fn attachment_data(&self, attachment: &Attachment) -> ApiResult<Option<Bytes>> {
        let spec = RequestSpec::get(&attachment.links.download).binary();
        match self.transport().send(spec).await? {
            None => Ok(None),
            Some(ResponseBody::Binary(bytes)) => Ok(Some(bytes)),
            Some(_) => Err(ApiError::InvalidBody),
        }
    }

    /// Copies an existing attachment onto the given content.
    /// `PUT /rest/api/content/{id}/child/attachment`
    ///
    /// Downloads the attachment's bytes first and uploads them under the
    /// same filename, so the source may live on another instance than the
    /// client's target. Fails with [`ApiError::NotFound`] when the source
    /// binary is gone.
    pub async fn create_or_update_attachment(
        &self,
        id: &str,
        attachment: &Attachment,
        params: Params,
    ) -> ApiResult<ResultsPage<Attachment>> {
        let data = self
            .attachment_data(attachment)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("attachment data for {}", attachment.title)))?;
        self.create_or_update_attachment_from_stream(id, data, &attachment.title, params)
            .await
    }

    /// Uploads bytes as an attachment on the given content.
    /// `PUT /rest/api/content/{id}/child/attachment`
    ///
    /// `content` is anything the HTTP client can stream: `Bytes`,
    /// `Vec<u8>`, a `String`, or a wrapped file stream.
    pub async fn create_or_update_attachment_from_stream(
        &self,
        id: &str,
        content: impl Into<reqwest::Body>,
        file_name: &str,
        params: Params,
    ) -> ApiResult<ResultsPage<Attachment>> {
        let spec =
            RequestSpec::put(params.append_to(&format!("/rest/api/content/{id}/child/attachment")))
                .header("X-Atlassian-Token", "nocheck")
                .upload(file_name, content);
        parse_required(self.transport().send(spec).await?)
    }
}
