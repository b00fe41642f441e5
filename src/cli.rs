//! CLI definitions for dispatchq.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// dispatchq CLI.
#[derive(Parser)]
#[command(name = "dispatchq")]
#[command(about = "In-memory delivery priority queue service")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH, global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

pub(crate) const DEFAULT_CONFIG_PATH: &str = "config/dispatchq.toml";

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run the HTTP server in foreground (default)
    Run {
        /// Server host, overrides `server.host`
        #[arg(long, env = "DISPATCHQ_HOST")]
        host: Option<String>,

        /// Server port, overrides `server.port`
        #[arg(long, env = "DISPATCHQ_PORT")]
        port: Option<u16>,
    },

    /// Load and validate the configuration, then exit
    Check,
}
