use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::source::{BatteryStatus, PowerStatusSource, SourceError};
use crate::types::SupplyStatus;

pub const POWER_SUPPLY_PATH: &str = "/sys/class/power_supply";

/// Reads a battery from the kernel's power-supply class.
///
/// Android exposes the same class, usually with the battery named `battery`.
pub struct SysfsPowerSource {
    battery_path: Option<PathBuf>,
}

impl SysfsPowerSource {
    /// Find the system battery under `root`.
    ///
    /// A missing battery is not an error here: the source still answers,
    /// and every status query reports [`SourceError::NoBattery`].
    pub fn discover(root: &Path) -> Self {
        let battery_path = find_battery_path(root);
        match &battery_path {
            Some(path) => debug!(path = ?path, "Found sysfs battery"),
            None => debug!(root = ?root, "No sysfs battery found"),
        }
        Self { battery_path }
    }

    /// Use the supply named `name` under `root`, skipping discovery.
    pub fn with_battery(root: &Path, name: &str) -> Self {
        Self {
            battery_path: Some(root.join(name)),
        }
    }

    pub fn battery_path(&self) -> Option<&Path> {
        self.battery_path.as_deref()
    }

    pub fn is_supported(root: &Path) -> bool {
        root.exists()
    }

    fn battery_dir(&self) -> Result<&Path, SourceError> {
        let path = self.battery_path.as_deref().ok_or(SourceError::NoBattery)?;
        if !path.is_dir() {
            return Err(SourceError::NoBattery);
        }
        if read_attr(path, "present").is_some_and(|p| p == "0") {
            return Err(SourceError::NoBattery);
        }
        Ok(path)
    }
}

impl PowerStatusSource for SysfsPowerSource {
    fn name(&self) -> &'static str {
        "sysfs"
    }

    fn battery_status(&self) -> Result<BatteryStatus, SourceError> {
        let dir = self.battery_dir()?;

        let (level, scale) = read_level_scale(dir);
        let voltage_mv = read_number(dir, "voltage_now")
            .map(|microvolts| (microvolts / 1000).clamp(0, i32::MAX as i64) as i32)
            .unwrap_or(0);
        let status = read_attr(dir, "status")
            .map(|s| SupplyStatus::from_sysfs(&s))
            .unwrap_or_default();

        Ok(BatteryStatus {
            level,
            scale,
            voltage_mv,
            status,
        })
    }

    fn current_now(&self) -> Result<i64, SourceError> {
        let dir = self.battery_dir()?;
        let path = dir.join("current_now");

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(SourceError::Unsupported("current_now"));
            }
            Err(source) => return Err(SourceError::Io { path, source }),
        };

        let value = content.trim();
        value.parse::<i64>().map_err(|_| SourceError::Parse {
            path: path.clone(),
            value: value.to_string(),
        })
    }
}

/// Prefers the kernel's own percentage, then the charge and energy counters.
fn read_level_scale(dir: &Path) -> (i64, i64) {
    if let Some(capacity) = read_number(dir, "capacity") {
        return (capacity, 100);
    }
    for (now, full) in [("charge_now", "charge_full"), ("energy_now", "energy_full")] {
        if let (Some(level), Some(scale)) = (read_number(dir, now), read_number(dir, full)) {
            return (level, scale);
        }
    }
    (-1, -1)
}

fn read_attr(dir: &Path, name: &str) -> Option<String> {
    fs::read_to_string(dir.join(name))
        .ok()
        .map(|s| s.trim().to_string())
}

fn read_number(dir: &Path, name: &str) -> Option<i64> {
    let value = read_attr(dir, name)?;
    match value.parse() {
        Ok(n) => Some(n),
        Err(_) => {
            trace!(attr = name, value = %value, "Ignoring non-numeric sysfs attribute");
            None
        }
    }
}

fn find_battery_path(root: &Path) -> Option<PathBuf> {
    let mut entries: Vec<PathBuf> = fs::read_dir(root)
        .ok()?
        .flatten()
        .map(|entry| entry.path())
        .collect();
    entries.sort();

    entries.into_iter().find(|path| {
        let is_battery = read_attr(path, "type").is_some_and(|t| t == "Battery");
        let is_peripheral = read_attr(path, "scope").is_some_and(|s| s == "Device");
        is_battery && !is_peripheral
    })
}
