use charge_platform::normalize::{charge_percentage, normalize_current};
use charge_platform::SystemPowerSource;
use color_eyre::eyre::Result;

use crate::config::{self, config_path, SourceKind, UserConfig};
use crate::source::open_reader;

pub fn run(config: &UserConfig, source: SourceKind) -> Result<()> {
    println!("charge-monitor debug information");
    println!("{}", "=".repeat(60));

    println!("\n--- System Info ---");
    println!(
        "OS: {}",
        sysinfo::System::long_os_version().unwrap_or_else(|| "Unknown".to_string())
    );
    println!(
        "Kernel: {}",
        sysinfo::System::kernel_version().unwrap_or_else(|| "Unknown".to_string())
    );

    println!("\n--- Source ---");
    println!("Requested: {}", source.label());
    let reader = open_reader(config, source)?;
    let src = reader.source();
    println!("Selected: {}", src.name());
    println!(
        "System battery API: {}",
        if SystemPowerSource::is_available() {
            "available"
        } else {
            "no battery"
        }
    );
    if src.name() == "sysfs" {
        println!("Power supply root: {}", config.power_supply_path.display());
        if let Some(name) = &config.battery {
            println!("Battery: {}", name);
        }
    }

    println!("\n--- Battery Status ---");
    match src.battery_status() {
        Ok(status) => {
            println!("Level/scale: {}/{}", status.level, status.scale);
            println!(
                "Percentage: {}",
                charge_percentage(status.level, status.scale)
            );
            println!("Voltage: {} mV", status.voltage_mv);
            println!("Status: {} (code {})", status.status, status.status.code());
        }
        Err(e) => println!("Unavailable: {}", e),
    }

    println!("\n--- Instantaneous Current ---");
    match src.current_now() {
        Ok(raw) => {
            println!("Raw reading: {}", raw);
            println!("Normalized: {} mA", normalize_current(raw));
        }
        Err(e) => println!("Unavailable: {}", e),
    }

    println!("\n--- Snapshot ---");
    let snapshot = reader.read_snapshot();
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    if !snapshot.has_level() {
        println!("(no charge level could be read)");
    }

    println!("\n--- Paths ---");
    println!("Config: {}", config_path().display());
    println!("Runtime: {}", config::runtime_dir().display());
    println!("Socket: {}", config.socket_path().display());

    println!("\n--- Current Config ---");
    println!("{}", toml::to_string_pretty(config)?);

    Ok(())
}
