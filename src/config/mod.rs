//
//  confluence-connect
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/07/18.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Runtime settings for the add-on process. Everything comes in through
//! command-line flags or environment variables at startup; there is no
//! configuration file to manage.
//!
//! ## Settings
//!
//! | Setting | Environment variable | Purpose |
//! |---------|---------------------|---------|
//! | `base_url` | `CONFLUENCE_BASE_URL` | The Confluence instance to talk to |
//! | `username` | `ATLASSIAN_USER` | Account email for Basic auth |
//! | `api_token` | `ATLASSIAN_API_TOKEN` | API token paired with the account |
//! | `addon_key` | `ADDON_KEY` | Key the add-on registers under |
//! | `addon_base_url` | `ADDON_BASE_URL` | Public URL Confluence reaches us at |
//! | `listen` | `ADDON_LISTEN` | Local address the server binds |
//!
//! The add-on key feeds two derived names: the webhook route Confluence
//! posts to and the property key written on moved pages. Both are computed
//! here so the descriptor, the router, and the webhook handler cannot
//! drift apart.
//!
//! ## Usage
//!
//! ```rust
//! use confluence_connect::config::Settings;
//!
//! let settings = Settings {
//!     base_url: "https://example.atlassian.net/wiki".to_string(),
//!     username: "bot@example.com".to_string(),
//!     api_token: "token".to_string(),
//!     addon_key: "my-sample-app".to_string(),
//!     addon_base_url: "https://addon.example.com".to_string(),
//!     listen: "127.0.0.1:3000".to_string(),
//! };
//!
//! assert_eq!(settings.webhook_path(), "/rest/my-sample-app/1/event/page_moved");
//! assert_eq!(settings.flag_property_key(), "my-sample-app-flag");
//! ```

use crate::api::{ApiResult, Credentials};

/// Resolved runtime settings for the add-on process.
///
/// Built by the `serve` command from flags and environment variables;
/// handlers receive it behind an `Arc` and read it immutably.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base URL of the Confluence instance, e.g.
    /// `https://example.atlassian.net/wiki`.
    pub base_url: String,

    /// Account email used for Basic authentication.
    pub username: String,

    /// API token paired with [`username`](Self::username).
    pub api_token: String,

    /// The add-on key, also the stem of the derived names below.
    pub addon_key: String,

    /// Public base URL of this add-on, advertised in the descriptor.
    pub addon_base_url: String,

    /// Local socket address the HTTP server binds, e.g. `127.0.0.1:3000`.
    pub listen: String,
}

impl Settings {
    /// Builds API credentials from the Confluence settings.
    ///
    /// # Errors
    ///
    /// Fails with a configuration error when `base_url` is not a valid
    /// absolute URL.
    pub fn credentials(&self) -> ApiResult<Credentials> {
        Credentials::new(&self.base_url, &self.username, &self.api_token)
    }

    /// The route Confluence posts `page_moved` webhooks to.
    ///
    /// Matches the URL registered in the descriptor's webhook module.
    pub fn webhook_path(&self) -> String {
        Self::webhook_path_for(&self.addon_key)
    }

    /// [`webhook_path`](Self::webhook_path) for a bare add-on key.
    ///
    /// The descriptor printer uses this without full settings.
    pub fn webhook_path_for(addon_key: &str) -> String {
        format!("/rest/{addon_key}/1/event/page_moved")
    }

    /// The content property key written on pages that have moved.
    pub fn flag_property_key(&self) -> String {
        format!("{}-flag", self.addon_key)
    }
}
