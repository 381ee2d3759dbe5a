use charge_protocol::BatterySnapshot;
use tracing::debug;

use crate::normalize::{charge_percentage, normalize_current};
use crate::source::{BatteryStatus, PowerStatusSource};

/// Produces one [`BatterySnapshot`] per call from a [`PowerStatusSource`].
///
/// The reader holds no state besides the source: every call re-queries it,
/// and nothing is cached between calls.
pub struct BatterySnapshotReader<S> {
    source: S,
}

impl<S: PowerStatusSource> BatterySnapshotReader<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Read a best-effort snapshot. Never fails.
    ///
    /// A failed status query reports level -1, voltage 0 and not charging; a
    /// failed current query reports current 0. Each failure only affects its
    /// own fields.
    pub fn read_snapshot(&self) -> BatterySnapshot {
        let status = self.source.battery_status().unwrap_or_else(|e| {
            debug!(source = self.source.name(), error = %e, "Battery status unavailable");
            BatteryStatus::default()
        });

        let raw_current = self.source.current_now().unwrap_or_else(|e| {
            debug!(source = self.source.name(), error = %e, "Current reading unavailable");
            0
        });

        let snapshot = BatterySnapshot {
            level: charge_percentage(status.level, status.scale),
            voltage: status.voltage_mv.max(0),
            current: normalize_current(raw_current),
            is_charging: status.status.is_charging(),
        };

        debug!(
            source = self.source.name(),
            level = status.level,
            scale = status.scale,
            status = %status.status,
            raw_current,
            ?snapshot,
            "Read battery snapshot"
        );

        snapshot
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::source::SourceError;
    use crate::types::SupplyStatus;

    struct FakeSource {
        status: Option<BatteryStatus>,
        current: Option<i64>,
        calls: Cell<u32>,
    }

    impl FakeSource {
        fn new(status: Option<BatteryStatus>, current: Option<i64>) -> Self {
            Self {
                status,
                current,
                calls: Cell::new(0),
            }
        }
    }

    impl PowerStatusSource for FakeSource {
        fn name(&self) -> &'static str {
            "fake"
        }

        fn battery_status(&self) -> Result<BatteryStatus, SourceError> {
            self.calls.set(self.calls.get() + 1);
            self.status.ok_or(SourceError::NoBattery)
        }

        fn current_now(&self) -> Result<i64, SourceError> {
            self.current.ok_or(SourceError::Unsupported("current_now"))
        }
    }

    fn status(level: i64, scale: i64, voltage_mv: i32, status: SupplyStatus) -> BatteryStatus {
        BatteryStatus {
            level,
            scale,
            voltage_mv,
            status,
        }
    }

    #[test]
    fn test_charging_with_microamp_current() {
        let reader = BatterySnapshotReader::new(FakeSource::new(
            Some(status(80, 100, 4200, SupplyStatus::Charging)),
            Some(-500_000),
        ));

        assert_eq!(
            reader.read_snapshot(),
            BatterySnapshot {
                level: 80,
                voltage: 4200,
                current: 500,
                is_charging: true,
            }
        );
    }

    #[test]
    fn test_no_battery_data() {
        let reader = BatterySnapshotReader::new(FakeSource::new(None, None));

        assert_eq!(reader.read_snapshot(), BatterySnapshot::unavailable());
    }

    #[test]
    fn test_absent_level_and_scale() {
        let reader = BatterySnapshotReader::new(FakeSource::new(
            Some(BatteryStatus::default()),
            None,
        ));

        assert_eq!(
            reader.read_snapshot(),
            BatterySnapshot {
                level: -1,
                voltage: 0,
                current: 0,
                is_charging: false,
            }
        );
    }

    #[test]
    fn test_full_with_milliamp_current() {
        let reader = BatterySnapshotReader::new(FakeSource::new(
            Some(status(100, 100, 4350, SupplyStatus::Full)),
            Some(300),
        ));

        let snapshot = reader.read_snapshot();
        assert_eq!(snapshot.current, 300);
        assert!(snapshot.is_charging);
    }

    #[test]
    fn test_current_failure_only_zeroes_current() {
        let reader = BatterySnapshotReader::new(FakeSource::new(
            Some(status(37, 50, 3800, SupplyStatus::Discharging)),
            None,
        ));

        assert_eq!(
            reader.read_snapshot(),
            BatterySnapshot {
                level: 74,
                voltage: 3800,
                current: 0,
                is_charging: false,
            }
        );
    }

    #[test]
    fn test_not_charging_and_unknown_are_not_charging() {
        for supply in [
            SupplyStatus::NotCharging,
            SupplyStatus::Unknown,
            SupplyStatus::Discharging,
        ] {
            let reader = BatterySnapshotReader::new(FakeSource::new(
                Some(status(50, 100, 3900, supply)),
                Some(-120),
            ));
            let snapshot = reader.read_snapshot();
            assert!(!snapshot.is_charging, "{supply:?}");
            assert_eq!(snapshot.current, 120);
        }
    }

    #[test]
    fn test_every_read_queries_the_source() {
        let reader = BatterySnapshotReader::new(FakeSource::new(
            Some(status(10, 100, 3600, SupplyStatus::Discharging)),
            Some(50),
        ));

        reader.read_snapshot();
        reader.read_snapshot();
        reader.read_snapshot();
        assert_eq!(reader.source().calls.get(), 3);
    }

    #[test]
    fn test_boxed_source() {
        let source: Box<dyn PowerStatusSource> = Box::new(FakeSource::new(
            Some(status(1, 2, 3700, SupplyStatus::Charging)),
            Some(-1_500_000),
        ));
        let reader = BatterySnapshotReader::new(source);

        assert_eq!(reader.source().name(), "fake");
        assert_eq!(reader.read_snapshot().current, 1500);
        assert_eq!(reader.read_snapshot().level, 50);
    }
}
