//! Battery status sources and snapshot normalization for charge-monitor.
//!
//! The platform-specific part is the [`PowerStatusSource`] trait: one
//! implementation per host, each exposing the raw battery-status broadcast
//! and the separate instantaneous-current query. [`BatterySnapshotReader`]
//! turns those raw readings into a [`BatterySnapshot`] using the pure
//! functions in [`normalize`], so the normalization can be tested without
//! real hardware.
//!
//! # Example
//!
//! ```ignore
//! use charge_platform::{BatterySnapshotReader, SystemPowerSource};
//!
//! let reader = BatterySnapshotReader::new(SystemPowerSource::new()?);
//! let snapshot = reader.read_snapshot();
//! println!("Charge: {}%", snapshot.level);
//! ```

pub mod normalize;
mod reader;
mod source;
mod system;
mod types;

pub use charge_protocol::BatterySnapshot;
pub use reader::BatterySnapshotReader;
pub use source::{BatteryStatus, PowerStatusSource, SourceError};
pub use system::SystemPowerSource;
pub use types::SupplyStatus;

#[cfg(any(target_os = "linux", target_os = "android"))]
pub mod linux;
