use std::path::PathBuf;

use charge_protocol::GET_BATTERY_INFO;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print one battery snapshot as JSON (default)
    #[command(alias = "get")]
    Read {
        /// Single-line JSON output
        #[arg(short, long)]
        compact: bool,
    },

    /// Dispatch a method call locally and print the response
    Call {
        /// Method name, e.g. getBatteryInfo
        method: String,

        /// Address the call to this channel instead of the configured one
        #[arg(long)]
        channel: Option<String>,

        #[arg(short, long)]
        compact: bool,
    },

    /// Answer method calls on a Unix socket
    #[command(alias = "daemon")]
    Serve {
        /// Socket path (defaults to the runtime directory)
        #[arg(short, long)]
        socket: Option<PathBuf>,

        /// Detach from the terminal and log to file
        #[arg(short, long)]
        detach: bool,
    },

    /// Send a method call to a running server
    Query {
        #[arg(default_value = GET_BATTERY_INFO)]
        method: String,

        #[arg(short, long)]
        socket: Option<PathBuf>,

        #[arg(short, long)]
        compact: bool,
    },

    /// Print raw source readings alongside the normalized snapshot
    Debug,

    /// Show or edit configuration
    Config {
        /// Print config file path
        #[arg(long)]
        path: bool,

        /// Reset config to defaults
        #[arg(long)]
        reset: bool,

        /// Open config file in $EDITOR
        #[arg(short, long)]
        edit: bool,
    },

    /// Show server logs
    Logs {
        #[arg(short, long, default_value_t = 50)]
        lines: usize,

        #[arg(short, long)]
        follow: bool,
    },
}

/// Running with no subcommand reads one snapshot.
impl Default for Commands {
    fn default() -> Self {
        Commands::Read { compact: false }
    }
}

/// Battery level, voltage, current and charging state as a snapshot
#[derive(Debug, Parser)]
#[command(name = "charge-monitor", version, verbatim_doc_comment)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Battery source (auto, sysfs, system)
    #[arg(long, global = true)]
    pub source: Option<String>,
}
