//
//  confluence-connect
//  cli/serve.rs
//
//  Created by Ngonidzashe Mangudya on 2026/07/18.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! The `serve` command: run the add-on HTTP server.
//!
//! ## Examples
//!
//! ```bash
//! export CONFLUENCE_BASE_URL=https://example.atlassian.net/wiki
//! export ATLASSIAN_USER=bot@example.com
//! export ATLASSIAN_API_TOKEN=...
//!
//! # Defaults: addon key my-sample-app, listening on 127.0.0.1:3000
//! confluence-connect serve
//!
//! # Public deployment behind a tunnel or load balancer
//! confluence-connect serve \
//!     --addon-base-url https://addon.example.com \
//!     --listen 0.0.0.0:3000
//! ```

use anyhow::{Context, Result};
use clap::Args;
use tokio::net::TcpListener;

use crate::api::ConfluenceClient;
use crate::config::Settings;
use crate::connect::{self, AppState};

/// Run the add-on server
#[derive(Args, Debug)]
pub struct ServeCommand {
    /// Base URL of the Confluence instance
    #[arg(long, env = "CONFLUENCE_BASE_URL")]
    pub base_url: String,

    /// Account email for Basic authentication
    #[arg(long, env = "ATLASSIAN_USER")]
    pub user: String,

    /// API token paired with the account
    #[arg(long, env = "ATLASSIAN_API_TOKEN", hide_env_values = true)]
    pub api_token: String,

    /// Key the add-on registers under
    #[arg(long, env = "ADDON_KEY", default_value = "my-sample-app")]
    pub addon_key: String,

    /// Public base URL Confluence reaches this add-on at
    #[arg(long, env = "ADDON_BASE_URL", default_value = "http://localhost:3000")]
    pub addon_base_url: String,

    /// Local address to bind
    #[arg(long, env = "ADDON_LISTEN", default_value = "127.0.0.1:3000")]
    pub listen: String,
}

impl ServeCommand {
    pub async fn run(self) -> Result<()> {
        let settings = Settings {
            base_url: self.base_url,
            username: self.user,
            api_token: self.api_token,
            addon_key: self.addon_key,
            addon_base_url: self.addon_base_url,
            listen: self.listen,
        };

        let client = ConfluenceClient::new(settings.credentials()?)?;

        let listen = settings.listen.clone();
        let webhook_path = settings.webhook_path();
        let app = connect::router(AppState::new(settings, client));

        let listener = TcpListener::bind(&listen)
            .await
            .with_context(|| format!("Could not bind {listen}"))?;
        tracing::info!(
            addr = %listener.local_addr()?,
            webhook = %webhook_path,
            "add-on listening"
        );

        axum::serve(listener, app).await?;
        Ok(())
    }
}
