//! Configuration command handlers
//!
//! Handles the `configure` subcommand for setting dumpscope defaults.

use crate::config::Config;
use anyhow::Result;
use std::path::PathBuf;

/// Handle the configure command
pub fn handle(
    api: Option<String>,
    local: Option<PathBuf>,
    clear_local: bool,
    show: bool,
) -> Result<()> {
    let mut config = Config::load()?;

    if show {
        show_config(&config);
        return Ok(());
    }

    if api.is_none() && local.is_none() && !clear_local {
        show_usage();
        return Ok(());
    }

    apply(&mut config, api, local, clear_local);
    config.save()?;

    println!("Configuration updated");
    show_config(&config);

    Ok(())
}

fn apply(config: &mut Config, api: Option<String>, local: Option<PathBuf>, clear_local: bool) {
    if let Some(api) = api {
        config.api = Some(api);
    }
    if clear_local {
        config.local = None;
    }
    if let Some(local) = local {
        config.local = Some(local);
    }
}

/// Display current configuration
fn show_config(config: &Config) {
    match &config.api {
        Some(api) => println!("API: {}", api),
        None => println!("API: {} (default)", dumpscope::DEFAULT_API_BASE),
    }

    match &config.local {
        Some(local) => println!("Local dumps: {}", local.display()),
        None => println!("No local dumps directory configured"),
    }

    if let Ok(path) = Config::config_path() {
        println!("Config file: {}", path.display());
    }
}

/// Show usage help for the configure command
fn show_usage() {
    println!("Usage: dumpscope configure --api URL");
    println!("   or: dumpscope configure --local DIR");
    println!("   or: dumpscope configure --clear-local");
    println!("   or: dumpscope configure --show");
    println!();
    println!("Note: a local directory takes precedence over the API.");
    println!("      It should hold one subdirectory of JSON dumps per game.");
}
