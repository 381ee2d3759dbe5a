use serde::{Deserialize, Serialize};

use crate::{CHANNEL, GET_BATTERY_INFO};

/// A named method invocation.
///
/// `channel` is optional on the wire; a call without one is addressed to
/// whichever channel receives it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodCall {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    pub method: String,
}

impl MethodCall {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            channel: None,
            method: method.into(),
        }
    }

    pub fn on_channel(channel: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            channel: Some(channel.into()),
            method: method.into(),
        }
    }

    pub fn get_battery_info() -> Self {
        Self::on_channel(CHANNEL, GET_BATTERY_INFO)
    }

    /// True when the call is unaddressed or addressed to `channel`.
    pub fn targets(&self, channel: &str) -> bool {
        self.channel.as_deref().map_or(true, |c| c == channel)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unaddressed_call_targets_any_channel() {
        let call = MethodCall::new("getBatteryInfo");
        assert!(call.targets(CHANNEL));
        assert!(call.targets("some/other"));
        assert_eq!(call.to_json().unwrap(), r#"{"method":"getBatteryInfo"}"#);
    }

    #[test]
    fn test_addressed_call_targets_only_its_channel() {
        let call = MethodCall::get_battery_info();
        assert!(call.targets(CHANNEL));
        assert!(!call.targets("com.example/other"));
    }

    #[test]
    fn test_call_without_method_is_rejected() {
        assert!(MethodCall::from_json(r#"{"channel":"x"}"#).is_err());
    }
}
