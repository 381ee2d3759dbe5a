mod channel;
mod cli;
mod commands;
mod config;
mod daemon;
mod logging;
mod source;

use clap::Parser;
use color_eyre::eyre::{eyre, Result};

use cli::{Cli, Commands};
use config::{ensure_dirs, LogLevel, SourceKind, UserConfig};
use logging::LogMode;

fn main() -> Result<()> {
    color_eyre::install()?;
    let _ = ensure_dirs();

    let cli = Cli::parse();
    let config = UserConfig::load();
    let log_level_override = cli.log_level.as_deref().map(LogLevel::from_str);

    let source = match cli.source.as_deref() {
        Some(s) => SourceKind::from_str(s)
            .ok_or_else(|| eyre!("Unknown source {:?} (expected auto, sysfs or system)", s))?,
        None => config.source,
    };

    // The server sets up its own logging once it knows whether it detaches.
    let serving = matches!(cli.command, Some(Commands::Serve { .. }));
    let _guard =
        (!serving).then(|| logging::init(config.log_level, LogMode::Stderr, log_level_override));

    match cli.command.unwrap_or_default() {
        Commands::Read { compact } => commands::read::run(&config, source, compact),
        Commands::Call {
            method,
            channel,
            compact,
        } => commands::call::run(&config, source, method, channel, compact),
        Commands::Serve { socket, detach } => {
            commands::serve::run(&config, source, socket, detach, log_level_override)
        }
        Commands::Query {
            method,
            socket,
            compact,
        } => commands::query::run(&config, method, socket, compact),
        Commands::Debug => commands::debug::run(&config, source),
        Commands::Config { path, reset, edit } => commands::config::run(path, reset, edit),
        Commands::Logs { lines, follow } => commands::logs::run(lines, follow),
    }
}
