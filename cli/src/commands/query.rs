use std::path::PathBuf;

use charge_protocol::MethodCall;
use color_eyre::eyre::{eyre, Result};

use crate::commands::print_json;
use crate::config::UserConfig;
use crate::daemon::ChannelClient;

pub fn run(
    config: &UserConfig,
    method: String,
    socket: Option<PathBuf>,
    compact: bool,
) -> Result<()> {
    let socket = socket.unwrap_or_else(|| config.socket_path());

    let mut client = ChannelClient::connect(&socket).map_err(|e| {
        eyre!(
            "{}\nIs the server running? Start it with: charge-monitor serve --socket {}",
            e,
            socket.display()
        )
    })?;

    let call = MethodCall::on_channel(config.channel.clone(), method);
    let response = client.call(&call)?;
    print_json(&response, compact)
}
