//
//  confluence-connect
//  cli/descriptor.rs
//
//  Created by Ngonidzashe Mangudya on 2026/07/18.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! The `descriptor` command: print the add-on descriptor JSON.
//!
//! Handy for inspecting what `/atlassian-connect.json` will serve, or for
//! registering the descriptor out of band.
//!
//! ## Examples
//!
//! ```bash
//! confluence-connect descriptor
//! confluence-connect descriptor --addon-key page-mover --addon-base-url https://addon.example.com
//! ```

use anyhow::Result;
use clap::Args;

use crate::connect::descriptor::Descriptor;

/// Print the add-on descriptor JSON
#[derive(Args, Debug)]
pub struct DescriptorCommand {
    /// Key the add-on registers under
    #[arg(long, env = "ADDON_KEY", default_value = "my-sample-app")]
    pub addon_key: String,

    /// Public base URL Confluence reaches this add-on at
    #[arg(long, env = "ADDON_BASE_URL", default_value = "http://localhost:3000")]
    pub addon_base_url: String,
}

impl DescriptorCommand {
    pub fn run(self) -> Result<()> {
        let descriptor = Descriptor::new(&self.addon_key, &self.addon_base_url);
        println!("{}", serde_json::to_string_pretty(&descriptor)?);
        Ok(())
    }
}
