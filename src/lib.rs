//
//  confluence-connect
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/07/18.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Confluence Connect Library
//!
//! An Atlassian Connect add-on for Confluence Cloud, plus the REST client
//! it is built on.
//!
//! ## Overview
//!
//! The crate has two halves. The [`api`] half is a typed convenience
//! client for Confluence's REST API: content, spaces, properties, labels,
//! restrictions, search, users, groups, long tasks, and attachment
//! transfer, all behind one Basic-auth transport. The [`connect`] half is
//! the add-on itself: an axum app serving the descriptor, the install
//! lifecycle, and a JWT-authenticated `page_moved` webhook that marks
//! every moved page with a content property flag.
//!
//! ## Features
//!
//! - **Uniform transport**: every endpoint goes through one request path
//!   with Basic auth, JSON decoding, binary downloads, and multipart uploads
//! - **Absence as data**: reads of missing resources resolve `Ok(None)`
//!   instead of failing
//! - **Managed updates**: `set_content` merges over the current version
//!   and retries version conflicts
//! - **Connect plumbing**: descriptor, install registry, and HS256 session
//!   verification with query-string-hash checking
//!
//! ## Module Structure
//!
//! - [`api`]: the Confluence REST client (transport, params, typed models,
//!   operation catalog)
//! - [`connect`]: the add-on's HTTP surface (descriptor, lifecycle, webhook)
//! - [`config`]: runtime settings and the names derived from the add-on key
//! - [`cli`]: `serve` and `descriptor` commands using clap
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use confluence_connect::api::{ConfluenceClient, Credentials, Params};
//!
//! # async fn example() -> Result<(), confluence_connect::api::ApiError> {
//! let credentials = Credentials::new(
//!     "https://example.atlassian.net/wiki",
//!     "bot@example.com",
//!     "api-token",
//! )?;
//! let client = ConfluenceClient::new(credentials)?;
//!
//! if let Some(space) = client.get_space("DEV", Params::new()).await? {
//!     println!("Space id: {}", space.id);
//! }
//! # Ok(())
//! # }
//! ```

/// The Confluence REST client.
///
/// Transport, parameter serialization, the error taxonomy, typed models,
/// and the full operation catalog grouped by resource.
pub mod api;

/// Command-line interface definitions.
///
/// The `serve` command runs the add-on server; `descriptor` prints the
/// descriptor JSON. Both read their settings from flags or environment
/// variables via clap's derive API.
pub mod cli;

/// Runtime settings.
///
/// The [`config::Settings`] struct carries the Confluence credentials and
/// the add-on identity, and derives the webhook route and flag property
/// key from the add-on key.
pub mod config;

/// The add-on's HTTP surface.
///
/// An axum router serving the descriptor at `/atlassian-connect.json`,
/// the `/installed` lifecycle callback, and the authenticated
/// `page_moved` webhook.
pub mod connect;

/// Re-export of the main CLI struct for convenient access.
///
/// # Example
///
/// ```rust,no_run
/// use clap::Parser;
/// use confluence_connect::Cli;
///
/// let cli = Cli::parse();
/// // Handle cli.command...
/// ```
pub use cli::Cli;

/// Application name constant.
///
/// # Value
///
/// `"confluence-connect"`
pub const APP_NAME: &str = "confluence-connect";

/// Application version constant.
///
/// Automatically derived from Cargo.toml at compile time using the
/// `CARGO_PKG_VERSION` environment variable.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the binary.
///
/// # Example
///
/// ```rust,no_run
/// use confluence_connect::exit_codes;
/// use std::process;
///
/// process::exit(exit_codes::ERROR);
/// ```
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error; check stderr for details.
    pub const ERROR: i32 = 1;

    /// Invalid usage or arguments.
    pub const USAGE: i32 = 2;
}
