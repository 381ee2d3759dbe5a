use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use charge_protocol::CHANNEL;

const APP_DIR: &str = "charge-monitor";
const SOCKET_NAME: &str = "charge-monitor.sock";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "off" | "none" => LogLevel::Off,
            "error" => LogLevel::Error,
            "info" => LogLevel::Info,
            "debug" => LogLevel::Debug,
            "trace" => LogLevel::Trace,
            _ => LogLevel::Warn,
        }
    }

    pub fn as_tracing_level(&self) -> Option<tracing::Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(tracing::Level::ERROR),
            LogLevel::Warn => Some(tracing::Level::WARN),
            LogLevel::Info => Some(tracing::Level::INFO),
            LogLevel::Debug => Some(tracing::Level::DEBUG),
            LogLevel::Trace => Some(tracing::Level::TRACE),
        }
    }
}

/// Which battery backend to read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// sysfs when available, otherwise the system battery API
    #[default]
    Auto,
    Sysfs,
    System,
}

impl SourceKind {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Some(SourceKind::Auto),
            "sysfs" => Some(SourceKind::Sysfs),
            "system" => Some(SourceKind::System),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SourceKind::Auto => "auto",
            SourceKind::Sysfs => "sysfs",
            SourceKind::System => "system",
        }
    }
}

#[cfg(any(target_os = "linux", target_os = "android"))]
fn default_power_supply_path() -> PathBuf {
    PathBuf::from(charge_platform::linux::POWER_SUPPLY_PATH)
}

// No power-supply class elsewhere; `auto` falls through to the system source.
#[cfg(not(any(target_os = "linux", target_os = "android")))]
fn default_power_supply_path() -> PathBuf {
    PathBuf::new()
}

fn default_channel() -> String {
    CHANNEL.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    pub log_level: LogLevel,
    pub source: SourceKind,
    #[serde(default = "default_power_supply_path")]
    pub power_supply_path: PathBuf,
    /// Supply name under `power_supply_path`; discovered when unset.
    pub battery: Option<String>,
    /// Socket for `serve` and `query`; defaults to the runtime directory.
    pub socket_path: Option<PathBuf>,
    #[serde(default = "default_channel")]
    pub channel: String,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Warn,
            source: SourceKind::Auto,
            power_supply_path: default_power_supply_path(),
            battery: None,
            socket_path: None,
            channel: default_channel(),
        }
    }
}

pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("~/.config"))
        .join(APP_DIR)
}

pub fn runtime_dir() -> PathBuf {
    dirs::runtime_dir()
        .or_else(dirs::cache_dir)
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join(APP_DIR)
}

pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

pub fn ensure_dirs() -> std::io::Result<()> {
    fs::create_dir_all(config_dir())?;
    fs::create_dir_all(runtime_dir())?;
    Ok(())
}

impl UserConfig {
    pub fn load() -> Self {
        let path = config_path();
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content),
            Err(_) => Self::default(),
        }
    }

    /// Parse TOML, falling back to defaults when it is malformed.
    pub fn parse(content: &str) -> Self {
        Self::from_toml(content).unwrap_or_default()
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Settings that will not work on this host, one message each.
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();

        let root = &self.power_supply_path;
        if self.source == SourceKind::Sysfs && !root.exists() {
            problems.push(format!(
                "source is sysfs but power_supply_path {} does not exist",
                root.display()
            ));
        }
        if let Some(name) = &self.battery {
            if self.source == SourceKind::System {
                problems.push(format!("battery {:?} is ignored by the system source", name));
            } else if root.exists() && !root.join(name).is_dir() {
                problems.push(format!("battery {:?} not found under {}", name, root.display()));
            }
        }
        if self.channel.trim().is_empty() {
            problems.push("channel is empty; every call would be rejected".to_string());
        }
        if let Some(socket) = &self.socket_path {
            if socket.is_relative() {
                problems.push(format!(
                    "socket_path {} is relative to the working directory",
                    socket.display()
                ));
            }
        }

        problems
    }

    pub fn save(&self) -> std::io::Result<()> {
        let _ = ensure_dirs();
        let path = config_path();
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        fs::write(path, content)
    }

    pub fn socket_path(&self) -> PathBuf {
        self.socket_path
            .clone()
            .unwrap_or_else(|| runtime_dir().join(SOCKET_NAME))
    }
}
