//! Linux and Android support via `/sys/class/power_supply`.

mod sysfs;

pub use sysfs::{SysfsPowerSource, POWER_SUPPLY_PATH};
