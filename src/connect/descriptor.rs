//
//  confluence-connect
//  connect/descriptor.rs
//
//  Created by Ngonidzashe Mangudya on 2026/07/18.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! The add-on descriptor served at `/atlassian-connect.json`.
//!
//! Confluence reads this document at installation time: where to POST the
//! lifecycle callback, how calls are authenticated, and which webhooks the
//! add-on wants. The webhook URL here and the route the server registers
//! both come from [`Settings::webhook_path`], so they cannot diverge.

use serde::Serialize;

use crate::config::Settings;

/// The full descriptor document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Descriptor {
    pub key: String,
    pub name: String,
    pub description: String,
    pub base_url: String,
    pub authentication: Authentication,
    pub lifecycle: Lifecycle,
    pub scopes: Vec<String>,
    pub modules: Modules,
}

/// How Confluence authenticates calls to the add-on.
#[derive(Debug, Clone, Serialize)]
pub struct Authentication {
    #[serde(rename = "type")]
    pub auth_type: String,
}

/// Lifecycle callback URLs.
#[derive(Debug, Clone, Serialize)]
pub struct Lifecycle {
    pub installed: String,
}

/// Module declarations; only webhooks here.
#[derive(Debug, Clone, Serialize)]
pub struct Modules {
    pub webhooks: Vec<WebhookModule>,
}

/// One webhook registration.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookModule {
    pub event: String,
    pub url: String,
}

impl Descriptor {
    /// Builds the descriptor for an add-on key and public base URL.
    pub fn new(addon_key: &str, addon_base_url: &str) -> Self {
        Self {
            key: addon_key.to_string(),
            name: "Confluence Connect".to_string(),
            description: "Marks moved pages with a content property flag".to_string(),
            base_url: addon_base_url.to_string(),
            authentication: Authentication {
                auth_type: "jwt".to_string(),
            },
            lifecycle: Lifecycle {
                installed: "/installed".to_string(),
            },
            scopes: vec!["READ".to_string(), "WRITE".to_string()],
            modules: Modules {
                webhooks: vec![WebhookModule {
                    event: "page_moved".to_string(),
                    url: Settings::webhook_path_for(addon_key),
                }],
            },
        }
    }

    /// Builds the descriptor for the running configuration.
    pub fn for_settings(settings: &Settings) -> Self {
        Self::new(&settings.addon_key, &settings.addon_base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_wire_shape() {
        let settings = Settings {
            base_url: "https://example.atlassian.net/wiki".to_string(),
            username: "bot@example.com".to_string(),
            api_token: "secret".to_string(),
            addon_key: "my-sample-app".to_string(),
            addon_base_url: "https://addon.example.com".to_string(),
            listen: "127.0.0.1:3000".to_string(),
        };

        let value = serde_json::to_value(Descriptor::for_settings(&settings)).unwrap();
        assert_eq!(value["key"], "my-sample-app");
        assert_eq!(value["baseUrl"], "https://addon.example.com");
        assert_eq!(value["authentication"]["type"], "jwt");
        assert_eq!(value["lifecycle"]["installed"], "/installed");
        assert_eq!(value["modules"]["webhooks"][0]["event"], "page_moved");
        assert_eq!(
            value["modules"]["webhooks"][0]["url"],
            "/rest/my-sample-app/1/event/page_moved"
        );
    }
}
