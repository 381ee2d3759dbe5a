use charge_protocol::{MethodCall, MethodResponse};
use color_eyre::eyre::Result;

use crate::channel::BatteryChannel;
use crate::commands::print_json;
use crate::config::{SourceKind, UserConfig};
use crate::source::open_reader;

pub fn run(
    config: &UserConfig,
    source: SourceKind,
    method: String,
    channel: Option<String>,
    compact: bool,
) -> Result<()> {
    let reader = open_reader(config, source)?;
    let battery_channel = BatteryChannel::new(config.channel.clone(), reader);

    let call = MethodCall {
        channel: Some(channel.unwrap_or_else(|| config.channel.clone())),
        method,
    };
    let response = battery_channel.handle(&call);

    if let MethodResponse::NotImplemented = response {
        eprintln!(
            "{:?} is not implemented on channel {}",
            call.method,
            call.channel.as_deref().unwrap_or_default()
        );
    }
    print_json(&response, compact)
}
