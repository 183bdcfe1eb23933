//! Request trace — one JSONL line per API call.
//!
//! Appends to `~/.plantdash/trace.jsonl`: timestamp, method, path, outcome
//! classification, and latency. Used when diagnosing a flaky backend after
//! the fact. Best-effort — failures are silently ignored so tracing can
//! never take the dashboard down.

use std::fs::{OpenOptions, create_dir_all};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Trace entry
// ---------------------------------------------------------------------------

/// A single traced API call.
#[derive(Debug, Serialize)]
struct TraceEntry<'a> {
    timestamp: String,
    method: &'a str,
    path: &'a str,
    /// `"ok"`, `"transport"`, `"status"`, or `"parse"`.
    outcome: &'a str,
    latency_ms: u64,
}

// ---------------------------------------------------------------------------
// Trace log
// ---------------------------------------------------------------------------

/// Handle to the trace file. A disabled log records nothing.
#[derive(Debug, Clone)]
pub struct TraceLog {
    path: Option<PathBuf>,
}

impl TraceLog {
    /// Trace to `~/.plantdash/trace.jsonl` when `enabled`, otherwise no-op.
    pub fn from_enabled(enabled: bool) -> Self {
        Self {
            path: if enabled { trace_path() } else { None },
        }
    }

    /// A log that records nothing. Used by the diagnostic subcommands and
    /// in tests.
    pub fn disabled() -> Self {
        Self { path: None }
    }

    /// Record one call. Best-effort.
    pub fn record(&self, method: &str, path: &str, outcome: &str, latency: Duration) {
        let entry = TraceEntry {
            timestamp: Utc::now().to_rfc3339(),
            method,
            path,
            outcome,
            latency_ms: latency.as_millis() as u64,
        };
        let _ = self.append(&entry);
    }

    fn append(&self, entry: &TraceEntry<'_>) -> anyhow::Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        let json = serde_json::to_string(entry)?;
        writeln!(file, "{json}")?;

        Ok(())
    }
}

fn trace_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".plantdash").join("trace.jsonl"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_log_records_nothing() {
        let log = TraceLog::disabled();
        // Must not panic or touch the filesystem.
        log.record("GET", "/events", "ok", Duration::from_millis(12));
        assert!(log.path.is_none());
    }

    #[test]
    fn entry_serializes_flat() {
        let entry = TraceEntry {
            timestamp: "2025-06-01T08:00:00+00:00".to_string(),
            method: "POST",
            path: "/similarity",
            outcome: "transport",
            latency_ms: 41,
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains(r#""path":"/similarity""#));
        assert!(json.contains(r#""latency_ms":41"#));
    }
}
