//
//  confluence-connect
//  tests/support/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/07/18.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Shared fixtures for the integration tests.
//!
//! [`MockConfluence`] pairs a mockito server with a client pointed at it,
//! so tests only describe the remote's answers and assert the calls they
//! expect to see.

#![allow(dead_code)]

use confluence_connect::api::{ConfluenceClient, Credentials};
use mockito::{Server, ServerGuard};

/// Account the mock client authenticates as.
pub const TEST_USER: &str = "bot@example.com";

/// API token paired with [`TEST_USER`].
pub const TEST_TOKEN: &str = "api-token";

/// A mockito server playing Confluence, plus a client wired to it.
pub struct MockConfluence {
    pub server: ServerGuard,
    pub client: ConfluenceClient,
}

impl MockConfluence {
    /// Boots the server and builds a client against its URL.
    pub async fn start() -> Self {
        let server = Server::new_async().await;
        let credentials =
            Credentials::new(server.url(), TEST_USER, TEST_TOKEN).expect("mock server URL parses");
        let client = ConfluenceClient::new(credentials).expect("client builds");
        Self { server, client }
    }
}

/// The exact `Authorization` value the transport derives from the test
/// credentials.
pub fn basic_auth_value() -> String {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;

    format!(
        "Basic {}",
        STANDARD.encode(format!("{TEST_USER}:{TEST_TOKEN}"))
    )
}
