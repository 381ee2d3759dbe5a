use std::os::unix::process::CommandExt;
use std::path::{Path, PathBuf};

use color_eyre::eyre::Result;

use crate::config;
use crate::logging::LOG_FILE_PREFIX;

pub fn run(lines: usize, follow: bool) -> Result<()> {
    let log_dir = config::runtime_dir();

    let Some(path) = newest_log_file(&log_dir) else {
        println!("No log files found in {:?}", log_dir);
        println!("Log files are created by `charge-monitor serve`.");
        return Ok(());
    };

    if follow {
        let err = std::process::Command::new("tail")
            .args(["-f", "-n", &lines.to_string()])
            .arg(&path)
            .exec();
        return Err(err.into());
    }

    std::process::Command::new("tail")
        .args(["-n", &lines.to_string()])
        .arg(&path)
        .status()?;

    Ok(())
}

/// Daily rotation names files `<prefix>.<date>.log`, so the last one in
/// lexical order is the newest.
fn newest_log_file(log_dir: &Path) -> Option<PathBuf> {
    let prefix = format!("{}.", LOG_FILE_PREFIX);
    let mut log_files: Vec<PathBuf> = std::fs::read_dir(log_dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .filter(|e| {
                    let name = e.file_name();
                    let name = name.to_string_lossy();
                    name.starts_with(&prefix) && name.ends_with(".log")
                })
                .map(|e| e.path())
                .collect()
        })
        .unwrap_or_default();

    log_files.sort();
    log_files.pop()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_newest_log_file() {
        let td = TempDir::new().unwrap();
        for name in [
            "charge-monitor.2026-10-17.log",
            "charge-monitor.2026-10-19.log",
            "charge-monitor.2026-10-18.log",
            "other.2026-10-20.log",
            "charge-monitor.sock",
        ] {
            fs::write(td.path().join(name), "").unwrap();
        }

        let newest = newest_log_file(td.path()).unwrap();
        assert_eq!(
            newest.file_name().unwrap().to_string_lossy(),
            "charge-monitor.2026-10-19.log"
        );
    }

    #[test]
    fn test_no_log_files() {
        let td = TempDir::new().unwrap();
        assert!(newest_log_file(td.path()).is_none());
        assert!(newest_log_file(&td.path().join("missing")).is_none());
    }
}
