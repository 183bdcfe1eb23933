//! Configuration schema and defaults.
//!
//! Defines the TOML-serializable configuration with three sections:
//! `[api]`, `[ui]`, and `[trace]`. Every field has a built-in default;
//! users only set the values they want to override.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level plantdash configuration.
///
/// Maps directly to the `~/.plantdash/config.toml` schema. All sections and
/// fields are optional — missing values fall back to built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashConfig {
    pub api: ApiConfig,
    pub ui: UiConfig,
    pub trace: TraceConfig,
}

// ---------------------------------------------------------------------------
// [api]
// ---------------------------------------------------------------------------

/// Backend endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the manufacturing events API.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8090".to_string(),
            timeout_secs: 10,
        }
    }
}

// ---------------------------------------------------------------------------
// [ui]
// ---------------------------------------------------------------------------

/// Terminal UI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Event-loop poll interval in milliseconds. Lower is smoother
    /// animation, higher is less CPU.
    pub tick_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { tick_ms: 100 }
    }
}

// ---------------------------------------------------------------------------
// [trace]
// ---------------------------------------------------------------------------

/// Request trace settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    /// Append one JSONL line per API call to `~/.plantdash/trace.jsonl`.
    pub enabled: bool,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

// ---------------------------------------------------------------------------
// Annotated default file
// ---------------------------------------------------------------------------

impl DashConfig {
    /// The annotated default config written by `plantdash config init`.
    pub fn default_toml() -> &'static str {
        r#"# plantdash configuration
# Location: ~/.plantdash/config.toml
# Every setting is optional; values shown are the built-in defaults.
# Environment overrides: PLANTDASH_API_URL, PLANTDASH_TIMEOUT_SECS,
# PLANTDASH_TRACE.

[api]
# Base URL of the manufacturing events API.
base_url = "http://localhost:8090"
# Per-request timeout in seconds.
timeout_secs = 10

[ui]
# Event-loop poll interval in milliseconds.
tick_ms = 100

[trace]
# Append one JSONL line per API call to ~/.plantdash/trace.jsonl.
enabled = true
"#
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_toml_parses_to_defaults() {
        let parsed: DashConfig = toml::from_str(DashConfig::default_toml()).unwrap();
        let defaults = DashConfig::default();
        assert_eq!(parsed.api.base_url, defaults.api.base_url);
        assert_eq!(parsed.api.timeout_secs, defaults.api.timeout_secs);
        assert_eq!(parsed.ui.tick_ms, defaults.ui.tick_ms);
        assert_eq!(parsed.trace.enabled, defaults.trace.enabled);
    }

    #[test]
    fn partial_file_falls_back_per_field() {
        let parsed: DashConfig =
            toml::from_str("[api]\nbase_url = \"http://plant:9000\"\n").unwrap();
        assert_eq!(parsed.api.base_url, "http://plant:9000");
        assert_eq!(parsed.api.timeout_secs, 10);
        assert!(parsed.trace.enabled);
    }
}
