//! Diagnostic command implementations.
//!
//! Provides subcommand handlers for:
//! - `plantdash health` — probe the backend and report reachability
//! - `plantdash config show|init|path` — configuration management
//!
//! These run before any terminal UI is set up, so they print with plain
//! colored output.

use std::time::Duration;

use anyhow::Result;
use colored::Colorize;

use crate::api::ApiClient;
use crate::api::trace::TraceLog;
use crate::config::{self, DashConfig};

// ---------------------------------------------------------------------------
// plantdash health
// ---------------------------------------------------------------------------

/// Probe the backend and report what the dashboard would see.
///
/// Uses a short timeout regardless of the configured one so a down backend
/// answers quickly.
pub fn run_health(config: &DashConfig) -> Result<()> {
    println!("{}", "plantdash health".bold().cyan());
    println!("{}", "=".repeat(40));
    println!("  {} {}", "Backend:".bold(), config.api.base_url);

    let client = ApiClient::new(
        &config.api.base_url,
        Duration::from_secs(5),
        TraceLog::disabled(),
    );

    match client.events() {
        Ok(events) => {
            println!(
                "  {} backend reachable, {} events available",
                "✓".green().bold(),
                events.len()
            );
        }
        Err(e) => {
            println!("  {} {}", "✗".red().bold(), e);
            println!();
            println!(
                "{}",
                "The dashboard will start but panels will show inline errors.".yellow()
            );
        }
    }

    match config::config_file() {
        Some(path) if path.exists() => {
            println!("  {} config file at {}", "✓".green().bold(), path.display());
        }
        Some(path) => {
            println!(
                "  {} no config file ({} missing, using defaults)",
                "·".dimmed(),
                path.display()
            );
        }
        None => println!("  {} could not resolve home directory", "✗".red().bold()),
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// plantdash config
// ---------------------------------------------------------------------------

/// Print the effective (fully resolved) configuration as TOML.
pub fn run_config_show() -> Result<()> {
    print!("{}", config::show_effective_config()?);
    Ok(())
}

/// Write the annotated default config file.
pub fn run_config_init(force: bool) -> Result<()> {
    let path = config::init_config(force)?;
    println!(
        "{} wrote default config to {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(())
}

/// Print the config file location.
pub fn run_config_path() -> Result<()> {
    match config::config_file() {
        Some(path) => println!("{}", path.display()),
        None => anyhow::bail!("could not determine home directory"),
    }
    Ok(())
}
