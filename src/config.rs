use std::path::PathBuf;
use clap::{Parser, Subcommand};

/// Log volleyball match actions to CSV and track the running score
#[derive(Debug, Parser)]
#[command(name = "volleyball-logger", version)]
pub struct Cli {
    /// Directory holding the match logs
    #[arg(long, env = "VOLLEY_LOG_DIR", default_value = "logs")]
    pub log_dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the logging form as a web server
    Web {
        #[arg(long, env = "PORT", default_value_t = 8080)]
        port: u16,
        #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0")]
        bind: String,
    },
    /// List available logs
    List,
    /// Create an empty log
    New {
        name: Option<String>,
    },
    /// Print a log with its current score and serve state
    Show {
        name: String,
    },
    /// Append one action to a log
    Log {
        name: String,
        #[arg(long, default_value = "")]
        timestamp: String,
        #[arg(long, default_value = "")]
        player: String,
        /// "Team A" or "Team B"
        #[arg(long)]
        team: String,
        /// e.g. "Serve", "First Touch", "Start Rally"
        #[arg(long)]
        action: String,
        /// Comma-separated rotation for Serve / Rotation Init
        #[arg(long)]
        rotation: Option<String>,
    },
}

/// Server settings resolved from the command line and environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_dir: PathBuf,
    pub bind: String,
    pub port: u16,
}
