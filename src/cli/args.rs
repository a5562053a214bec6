//! cli::args
//!
//! Command-line argument definitions using clap derive.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Changelist Gateway - URL-scheme and REST access to project changelists
#[derive(Parser, Debug)]
#[command(name = "clg")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Read configuration from this file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the REST gateway over an in-memory store
    Serve {
        /// Bind address (overrides the config file)
        #[arg(long)]
        bind: Option<SocketAddr>,

        /// Seed a project at startup; repeatable
        #[arg(long = "project", value_name = "NAME")]
        projects: Vec<String>,
    },

    /// Execute one URL-scheme command and print the result
    ///
    /// The command may be the bare form `changelist/<verb>?key=value&...` or
    /// a full URL whose path contains the changelist namespace. Prints
    /// nothing and exits 0 on success; prints the error message and exits
    /// nonzero otherwise.
    Handle {
        /// The command string
        command: String,
    },
}
