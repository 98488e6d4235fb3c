//
//  confluence-connect
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/07/18.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod descriptor;
mod serve;

pub use descriptor::DescriptorCommand;
pub use serve::ServeCommand;

use clap::{Parser, Subcommand};

/// Confluence Connect add-on host
#[derive(Parser, Debug)]
#[command(
    name = "confluence-connect",
    version,
    about = "Host a Confluence Connect add-on that flags moved pages",
    long_about = "confluence-connect hosts an Atlassian Connect add-on for Confluence.\n\n\
                  It serves the add-on descriptor and an authenticated page_moved webhook\n\
                  that writes a content property flag onto every page that moves.",
    propagate_version = true,
    after_help = "Use 'confluence-connect <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the add-on server
    Serve(ServeCommand),

    /// Print the add-on descriptor JSON
    Descriptor(DescriptorCommand),
}
