//! Cross-platform source backed by `starship-battery`.

use starship_battery::units::electric_potential::{millivolt, volt};
use starship_battery::units::energy::watt_hour;
use starship_battery::units::power::watt;
use starship_battery::{Battery, Manager, State};

use crate::source::{BatteryStatus, PowerStatusSource, SourceError};
use crate::types::SupplyStatus;

pub struct SystemPowerSource {
    manager: Manager,
}

impl SystemPowerSource {
    pub fn new() -> Result<Self, SourceError> {
        Ok(Self {
            manager: Manager::new()?,
        })
    }

    pub fn is_available() -> bool {
        Manager::new()
            .ok()
            .and_then(|m| m.batteries().ok())
            .and_then(|mut b| b.next())
            .and_then(|b| b.ok())
            .is_some()
    }

    fn first_battery(&self) -> Result<Battery, SourceError> {
        let battery = self
            .manager
            .batteries()?
            .next()
            .ok_or(SourceError::NoBattery)??;
        Ok(battery)
    }
}

impl PowerStatusSource for SystemPowerSource {
    fn name(&self) -> &'static str {
        "system"
    }

    /// Level and scale are the remaining and full energy in milliwatt-hours.
    fn battery_status(&self) -> Result<BatteryStatus, SourceError> {
        let battery = self.first_battery()?;

        let (level, scale) = energy_pair(
            battery.energy().get::<watt_hour>(),
            battery.energy_full().get::<watt_hour>(),
        );

        Ok(BatteryStatus {
            level,
            scale,
            voltage_mv: battery.voltage().get::<millivolt>().round() as i32,
            status: SupplyStatus::from(battery.state()),
        })
    }

    fn current_now(&self) -> Result<i64, SourceError> {
        let battery = self.first_battery()?;
        signed_milliamps(
            battery.energy_rate().get::<watt>(),
            battery.voltage().get::<volt>(),
            battery.state(),
        )
    }
}

/// Watt-hours to a milliwatt-hour level/scale pair.
fn energy_pair(now_wh: f32, full_wh: f32) -> (i64, i64) {
    let to_mwh = |wh: f32| (f64::from(wh) * 1000.0).round() as i64;
    (to_mwh(now_wh), to_mwh(full_wh))
}

/// Current from power over voltage, in milliamps, negative while
/// discharging.
fn signed_milliamps(watts: f32, volts: f32, state: State) -> Result<i64, SourceError> {
    if volts <= 0.0 {
        return Err(SourceError::Unsupported("voltage"));
    }

    let milliamps = (f64::from(watts) / f64::from(volts) * 1000.0).round() as i64;
    Ok(match state {
        State::Discharging | State::Empty => -milliamps.abs(),
        _ => milliamps.abs(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{charge_percentage, normalize_current};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_energy_pair_is_milliwatt_hours() {
        assert_eq!(energy_pair(42.5, 57.0), (42_500, 57_000));
        assert_eq!(energy_pair(0.0, 50.0), (0, 50_000));
    }

    #[test]
    fn test_energy_pair_feeds_percentage() {
        let (level, scale) = energy_pair(45.0, 60.0);
        assert_eq!(charge_percentage(level, scale), 75);
    }

    #[test]
    fn test_current_sign_follows_state() {
        // 7.6 W at 3.8 V
        assert_eq!(signed_milliamps(7.6, 3.8, State::Discharging).unwrap(), -2000);
        assert_eq!(signed_milliamps(7.6, 3.8, State::Empty).unwrap(), -2000);
        assert_eq!(signed_milliamps(7.6, 3.8, State::Charging).unwrap(), 2000);
        assert_eq!(signed_milliamps(7.6, 3.8, State::Full).unwrap(), 2000);
        assert_eq!(signed_milliamps(7.6, 3.8, State::Unknown).unwrap(), 2000);
    }

    #[test]
    fn test_negative_rate_is_folded_into_state() {
        assert_eq!(signed_milliamps(-7.6, 3.8, State::Charging).unwrap(), 2000);
        assert_eq!(signed_milliamps(-7.6, 3.8, State::Discharging).unwrap(), -2000);
    }

    #[test]
    fn test_milliamps_stay_below_microamp_threshold() {
        let raw = signed_milliamps(7.6, 3.8, State::Discharging).unwrap();
        assert_eq!(normalize_current(raw), 2000);
    }

    #[test]
    fn test_zero_or_negative_voltage_is_unsupported() {
        for volts in [0.0, -1.0] {
            assert!(matches!(
                signed_milliamps(5.0, volts, State::Charging),
                Err(SourceError::Unsupported("voltage"))
            ));
        }
    }
}
