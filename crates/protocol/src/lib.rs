//! Wire types for the battery method channel.
//!
//! A caller sends a [`MethodCall`] naming a method on [`CHANNEL`]; the host
//! answers with a [`MethodResponse`]. The only method with a data response is
//! [`GET_BATTERY_INFO`], whose payload is a [`BatterySnapshot`].

mod request;
mod response;
mod types;

pub use request::MethodCall;
pub use response::{MethodResponse, BAD_REQUEST};
pub use types::{BatterySnapshot, LEVEL_UNAVAILABLE};

/// Name of the channel the battery handler is registered on.
pub const CHANNEL: &str = "com.user.charge_monitor/battery";

/// The single supported method.
pub const GET_BATTERY_INFO: &str = "getBatteryInfo";
