use std::path::PathBuf;

use color_eyre::eyre::Result;

use crate::config::{LogLevel, SourceKind, UserConfig};
use crate::daemon::{run_server, ServerOptions};

pub fn run(
    config: &UserConfig,
    source: SourceKind,
    socket: Option<PathBuf>,
    detach: bool,
    log_level_override: Option<LogLevel>,
) -> Result<()> {
    let socket = socket.unwrap_or_else(|| config.socket_path());
    // Detaching changes the working directory.
    let socket = if socket.is_relative() {
        std::env::current_dir()?.join(socket)
    } else {
        socket
    };

    if detach {
        println!("Starting server on {}", socket.display());
        println!("Logs: charge-monitor logs");
    } else {
        println!("Listening on {} (Ctrl+C to stop)", socket.display());
    }

    run_server(ServerOptions {
        config,
        source,
        socket: &socket,
        detach,
        log_level: config.log_level,
        log_level_override,
    })?;

    Ok(())
}
