use serde::{Deserialize, Serialize};

use crate::types::BatterySnapshot;

/// Error code for request lines that cannot be decoded.
pub const BAD_REQUEST: &str = "bad_request";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MethodResponse {
    Success(BatterySnapshot),
    /// The method (or channel) has no handler. Distinct from a data response.
    NotImplemented,
    Error { code: String, message: String },
}

impl MethodResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        MethodResponse::Error {
            code: BAD_REQUEST.to_string(),
            message: message.into(),
        }
    }

    pub fn snapshot(&self) -> Option<&BatterySnapshot> {
        match self {
            MethodResponse::Success(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    pub fn is_not_implemented(&self) -> bool {
        matches!(self, MethodResponse::NotImplemented)
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
    fn test_not_implemented_is_not_a_data_response() {
        let resp = MethodResponse::NotImplemented;
        assert!(resp.is_not_implemented());
        assert!(resp.snapshot().is_none());
        assert_eq!(resp.to_json().unwrap(), r#""NotImplemented""#);
    }

    #[test]
    fn test_success_wraps_snapshot_map() {
        let resp = MethodResponse::Success(BatterySnapshot {
            level: 42,
            voltage: 3850,
            current: 310,
            is_charging: false,
        });
        assert_eq!(
            resp.to_json().unwrap(),
            r#"{"Success":{"level":42,"voltage":3850,"current":310,"isCharging":false}}"#
        );
        assert_eq!(resp.snapshot().map(|s| s.level), Some(42));
    }

    #[test]
    fn test_bad_request_code() {
        let resp = MethodResponse::bad_request("expected value at line 1 column 1");
        match resp {
            MethodResponse::Error { code, message } => {
                assert_eq!(code, BAD_REQUEST);
                assert!(message.contains("line 1"));
            }
            other => panic!("unexpected response: {:?}", other),
        }
    }
}
