//! Shared types for battery status sources.

use std::fmt;

/// Power-supply status as reported by the operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SupplyStatus {
    /// Status cannot be determined, or was not reported
    #[default]
    Unknown,
    /// Battery is actively charging
    Charging,
    /// Battery is discharging (on battery power)
    Discharging,
    /// External power connected but not charging (e.g., charge limit reached)
    NotCharging,
    /// Battery is full
    Full,
}

impl SupplyStatus {
    /// The matching Android `BatteryManager.BATTERY_STATUS_*` code.
    pub fn code(&self) -> i32 {
        match self {
            SupplyStatus::Unknown => 1,
            SupplyStatus::Charging => 2,
            SupplyStatus::Discharging => 3,
            SupplyStatus::NotCharging => 4,
            SupplyStatus::Full => 5,
        }
    }

    /// Maps the contents of a sysfs `status` attribute.
    pub fn from_sysfs(value: &str) -> Self {
        let value = value.trim();
        if value.eq_ignore_ascii_case("Charging") {
            SupplyStatus::Charging
        } else if value.eq_ignore_ascii_case("Discharging") {
            SupplyStatus::Discharging
        } else if value.eq_ignore_ascii_case("Not charging") {
            SupplyStatus::NotCharging
        } else if value.eq_ignore_ascii_case("Full") {
            SupplyStatus::Full
        } else {
            SupplyStatus::Unknown
        }
    }

    /// Returns a human-readable label for the status.
    pub fn label(&self) -> &'static str {
        match self {
            SupplyStatus::Unknown => "Unknown",
            SupplyStatus::Charging => "Charging",
            SupplyStatus::Discharging => "On Battery",
            SupplyStatus::NotCharging => "Not Charging",
            SupplyStatus::Full => "Full",
        }
    }

    /// True for Charging and Full, false for every other status.
    pub fn is_charging(&self) -> bool {
        matches!(self, SupplyStatus::Charging | SupplyStatus::Full)
    }
}

impl fmt::Display for SupplyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl From<starship_battery::State> for SupplyStatus {
    fn from(state: starship_battery::State) -> Self {
        match state {
            starship_battery::State::Charging => SupplyStatus::Charging,
            starship_battery::State::Discharging => SupplyStatus::Discharging,
            starship_battery::State::Empty => SupplyStatus::Discharging,
            starship_battery::State::Full => SupplyStatus::Full,
            _ => SupplyStatus::Unknown,
        }
    }
}
