use serde::{Deserialize, Serialize};

/// Sentinel `level` for a battery whose charge could not be read.
pub const LEVEL_UNAVAILABLE: i32 = -1;

/// One battery reading as delivered to the application layer.
///
/// Serializes to a map with exactly the keys `level`, `voltage`, `current`
/// and `isCharging`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatterySnapshot {
    /// Charge percentage in 0..=100, or [`LEVEL_UNAVAILABLE`].
    pub level: i32,
    /// Battery voltage in millivolts, 0 when unavailable.
    pub voltage: i32,
    /// Current magnitude in milliamps. Direction is not represented.
    pub current: i32,
    pub is_charging: bool,
}

impl BatterySnapshot {
    /// The snapshot reported when no battery data is available at all.
    pub const fn unavailable() -> Self {
        Self {
            level: LEVEL_UNAVAILABLE,
            voltage: 0,
            current: 0,
            is_charging: false,
        }
    }

    pub fn has_level(&self) -> bool {
        self.level != LEVEL_UNAVAILABLE
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

impl Default for BatterySnapshot {
    fn default() -> Self {
        Self::unavailable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_snapshot_has_exactly_four_keys() {
        let snapshot = BatterySnapshot {
            level: 80,
            voltage: 4200,
            current: 500,
            is_charging: true,
        };

        let value = serde_json::to_value(snapshot).unwrap();
        let map = value.as_object().unwrap();

        let mut keys: Vec<&str> = map.keys().map(|k| k.as_str()).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["current", "isCharging", "level", "voltage"]);
        assert_eq!(map["level"], 80);
        assert_eq!(map["voltage"], 4200);
        assert_eq!(map["current"], 500);
        assert_eq!(map["isCharging"], true);
    }

    #[test]
    fn test_unavailable_snapshot() {
        let snapshot = BatterySnapshot::default();
        assert_eq!(snapshot, BatterySnapshot::unavailable());
        assert!(!snapshot.has_level());
        assert_eq!(
            snapshot.to_json().unwrap(),
            r#"{"level":-1,"voltage":0,"current":0,"isCharging":false}"#
        );
    }

    #[test]
    fn test_snake_case_key_is_rejected() {
        let json = r#"{"level":50,"voltage":3900,"current":120,"is_charging":true}"#;
        assert!(BatterySnapshot::from_json(json).is_err());
    }
}
