//! The capability interface every platform battery backend implements.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::SupplyStatus;

/// Raw readings from the platform's battery status broadcast.
///
/// `level`/`scale` is the platform's native charge representation, a ratio
/// pair rather than a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatteryStatus {
    pub level: i64,
    pub scale: i64,
    /// Battery voltage in millivolts.
    pub voltage_mv: i32,
    pub status: SupplyStatus,
}

impl Default for BatteryStatus {
    /// The record used when the platform has no battery data at all.
    fn default() -> Self {
        Self {
            level: -1,
            scale: -1,
            voltage_mv: 0,
            status: SupplyStatus::Unknown,
        }
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("No battery found")]
    NoBattery,

    #[error("{0} is not supported on this hardware")]
    Unsupported(&'static str),

    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unexpected value {value:?} in {path:?}")]
    Parse { path: PathBuf, value: String },

    #[error("Battery error: {0}")]
    Battery(#[from] starship_battery::Error),
}

/// Trait for platform-specific battery status sources.
///
/// Both queries are read-only and may fail independently; callers decide
/// what a failure degrades to.
pub trait PowerStatusSource {
    /// Short identifier used in logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Query charge level/scale, voltage and charging status.
    fn battery_status(&self) -> Result<BatteryStatus, SourceError>;

    /// Query instantaneous current, in whatever unit and sign convention the
    /// hardware reports.
    fn current_now(&self) -> Result<i64, SourceError>;
}

impl<S: PowerStatusSource + ?Sized> PowerStatusSource for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn battery_status(&self) -> Result<BatteryStatus, SourceError> {
        (**self).battery_status()
    }

    fn current_now(&self) -> Result<i64, SourceError> {
        (**self).current_now()
    }
}
