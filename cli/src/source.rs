use charge_platform::{BatterySnapshotReader, PowerStatusSource, SystemPowerSource};
use color_eyre::eyre::{eyre, Result};
use tracing::debug;

use crate::config::{SourceKind, UserConfig};

pub type DynSource = Box<dyn PowerStatusSource>;
pub type Reader = BatterySnapshotReader<DynSource>;

pub fn open_reader(config: &UserConfig, kind: SourceKind) -> Result<Reader> {
    let source = open_source(config, kind)?;
    debug!(source = source.name(), requested = kind.label(), "Opened battery source");
    Ok(BatterySnapshotReader::new(source))
}

pub fn open_source(config: &UserConfig, kind: SourceKind) -> Result<DynSource> {
    match kind {
        SourceKind::Sysfs => open_sysfs(config),
        SourceKind::System => Ok(Box::new(SystemPowerSource::new()?)),
        SourceKind::Auto => {
            if sysfs_supported(config) {
                open_sysfs(config)
            } else {
                Ok(Box::new(SystemPowerSource::new()?))
            }
        }
    }
}

#[cfg(any(target_os = "linux", target_os = "android"))]
fn sysfs_supported(config: &UserConfig) -> bool {
    charge_platform::linux::SysfsPowerSource::is_supported(&config.power_supply_path)
}

#[cfg(not(any(target_os = "linux", target_os = "android")))]
fn sysfs_supported(_config: &UserConfig) -> bool {
    false
}

#[cfg(any(target_os = "linux", target_os = "android"))]
fn open_sysfs(config: &UserConfig) -> Result<DynSource> {
    use charge_platform::linux::SysfsPowerSource;

    let root = &config.power_supply_path;
    if !SysfsPowerSource::is_supported(root) {
        return Err(eyre!("Power supply class not found at {}", root.display()));
    }

    let source = match config.battery.as_deref() {
        Some(name) => SysfsPowerSource::with_battery(root, name),
        None => SysfsPowerSource::discover(root),
    };
    Ok(Box::new(source))
}

#[cfg(not(any(target_os = "linux", target_os = "android")))]
fn open_sysfs(_config: &UserConfig) -> Result<DynSource> {
    Err(eyre!("The sysfs source is only available on Linux and Android"))
}
