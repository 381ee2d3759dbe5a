//! Method-call dispatch for the battery channel.

use charge_platform::{BatterySnapshotReader, PowerStatusSource};
use charge_protocol::{MethodCall, MethodResponse, GET_BATTERY_INFO};
use tracing::debug;

/// Routes method calls on one named channel to a battery reader.
pub struct BatteryChannel<S> {
    name: String,
    reader: BatterySnapshotReader<S>,
}

impl<S: PowerStatusSource> BatteryChannel<S> {
    pub fn new(name: impl Into<String>, reader: BatterySnapshotReader<S>) -> Self {
        Self {
            name: name.into(),
            reader,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn reader(&self) -> &BatterySnapshotReader<S> {
        &self.reader
    }

    /// Answer one call. Only `getBatteryInfo` on this channel has a data
    /// response; everything else is `NotImplemented`.
    pub fn handle(&self, call: &MethodCall) -> MethodResponse {
        if !call.targets(&self.name) {
            debug!(channel = ?call.channel, "Call addressed to another channel");
            return MethodResponse::NotImplemented;
        }

        match call.method.as_str() {
            GET_BATTERY_INFO => MethodResponse::Success(self.reader.read_snapshot()),
            other => {
                debug!(method = other, "Method not implemented");
                MethodResponse::NotImplemented
            }
        }
    }
}
