use std::fs;
use std::path::Path;
use std::process::Command;

use color_eyre::eyre::{eyre, Result, WrapErr};

use crate::config::{config_path, UserConfig};

pub fn run(path: bool, reset: bool, edit: bool) -> Result<()> {
    let file = config_path();

    if path {
        println!("{}", file.display());
    } else if reset {
        UserConfig::default().save()?;
        println!("Wrote defaults to {}", file.display());
    } else if edit {
        edit_config(&file)?;
    } else {
        show_config(&file)?;
    }

    Ok(())
}

fn edit_config(file: &Path) -> Result<()> {
    if !file.exists() {
        UserConfig::default().save()?;
    }

    let editor = std::env::var("VISUAL")
        .or_else(|_| std::env::var("EDITOR"))
        .unwrap_or_else(|_| "vi".to_string());
    let status = Command::new(&editor)
        .arg(file)
        .status()
        .wrap_err_with(|| format!("failed to launch {}", editor))?;
    if !status.success() {
        return Err(eyre!("{} exited with {}", editor, status));
    }

    // `UserConfig::load` swallows parse errors.
    let content = fs::read_to_string(file)?;
    let config = UserConfig::from_toml(&content)
        .map_err(|e| eyre!("{} is invalid and will be ignored:\n{}", file.display(), e))?;
    report_problems(&config);
    Ok(())
}

fn show_config(file: &Path) -> Result<()> {
    let config = match fs::read_to_string(file) {
        Ok(content) => match UserConfig::from_toml(&content) {
            Ok(config) => {
                println!("# {}", file.display());
                config
            }
            Err(e) => {
                println!("# {} is invalid, showing defaults", file.display());
                println!("# {}", e.message());
                UserConfig::default()
            }
        },
        Err(_) => {
            println!("# {} (not created yet, showing defaults)", file.display());
            UserConfig::default()
        }
    };

    println!("{}", toml::to_string_pretty(&config)?);
    println!("# socket: {}", config.socket_path().display());
    report_problems(&config);
    Ok(())
}

fn report_problems(config: &UserConfig) {
    for problem in config.problems() {
        eprintln!("warning: {}", problem);
    }
}
