//! Configuration system for plantdash.
//!
//! Provides a layered configuration hierarchy:
//!
//! 1. **Built-in defaults** — hardcoded in [`schema::DashConfig::default()`]
//! 2. **User config file** — `~/.plantdash/config.toml`
//! 3. **Environment variables** — `PLANTDASH_*` overrides
//! 4. **CLI flags** — applied by `main` on top of the loaded config
//!
//! Later layers override earlier ones. A malformed config file is silently
//! ignored rather than preventing the dashboard from starting.

pub mod schema;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

pub use schema::DashConfig;

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the fully resolved configuration: defaults → file → env.
pub fn load() -> DashConfig {
    let mut config = DashConfig::default();

    if let Some(file) = load_toml_file(config_file_path()) {
        config = file;
    }

    apply_env_overrides(&mut config);

    config
}

/// Load a TOML config file from the given path (if it exists).
///
/// Returns `None` if the path is `None`, the file doesn't exist, or the
/// content is malformed — a broken config file must not keep the dashboard
/// from starting with defaults.
fn load_toml_file(path: Option<PathBuf>) -> Option<DashConfig> {
    let path = path?;
    let content = fs::read_to_string(&path).ok()?;
    toml::from_str(&content).ok()
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

/// Path to the user config: `~/.plantdash/config.toml`.
fn config_file_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".plantdash").join("config.toml"))
}

/// Return the config file path for display/init purposes.
pub fn config_file() -> Option<PathBuf> {
    config_file_path()
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides.
///
/// Supported variables:
/// - `PLANTDASH_API_URL` — backend base URL
/// - `PLANTDASH_TIMEOUT_SECS` — per-request timeout
/// - `PLANTDASH_TRACE` — request trace enabled (`1`/`true`/`yes`/`on`)
fn apply_env_overrides(config: &mut DashConfig) {
    if let Ok(val) = std::env::var("PLANTDASH_API_URL")
        && !val.is_empty()
    {
        config.api.base_url = val;
    }
    if let Ok(val) = std::env::var("PLANTDASH_TIMEOUT_SECS")
        && let Ok(secs) = val.parse::<u64>()
    {
        config.api.timeout_secs = secs;
    }
    if let Ok(val) = std::env::var("PLANTDASH_TRACE") {
        config.trace.enabled = is_truthy(&val);
    }
}

/// Check if a string value represents a truthy boolean.
fn is_truthy(val: &str) -> bool {
    matches!(
        val.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

// ---------------------------------------------------------------------------
// Config init / show
// ---------------------------------------------------------------------------

/// Write the annotated default config to `~/.plantdash/config.toml`.
///
/// Creates the directory if needed. Refuses to overwrite an existing file
/// unless `force` is set.
pub fn init_config(force: bool) -> Result<PathBuf> {
    let path = config_file_path().context("could not determine home directory")?;

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create ~/.plantdash/ directory")?;
    }

    fs::write(&path, DashConfig::default_toml()).context("failed to write config file")?;

    Ok(path)
}

/// Show the effective (fully resolved) config as TOML.
pub fn show_effective_config() -> Result<String> {
    let config = load();
    toml::to_string_pretty(&config).context("failed to serialize effective config")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_truthy_accepts_variants() {
        assert!(is_truthy("1"));
        assert!(is_truthy("true"));
        assert!(is_truthy("YES"));
        assert!(is_truthy("on"));
        assert!(!is_truthy("0"));
        assert!(!is_truthy("false"));
        assert!(!is_truthy(""));
    }

    #[test]
    fn env_override_applies_to_base_url() {
        let mut config = DashConfig::default();
        // Emulate the override directly; mutating the process environment
        // would race with other tests.
        config.api.base_url = "http://plant:9000".to_string();
        apply_env_overrides(&mut config);
        assert!(!config.api.base_url.is_empty());
    }

    #[test]
    fn show_effective_config_returns_toml() {
        let toml_str = show_effective_config().unwrap();
        let _: DashConfig = toml::from_str(&toml_str).unwrap();
    }
}
