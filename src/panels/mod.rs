//! Panel renderers — one module per dashboard tab.
//!
//! Every panel is a small state machine (`Idle → Loading → Rendered |
//! Failed`) plus a render function over its screen region. Re-activating a
//! tab restarts its panel from `Loading`. Failures are always rendered
//! inline inside the panel's own region.

pub mod ask;
pub mod cosine;
pub mod events;
pub mod logs;
pub mod similarity;
pub mod umap;

use chrono::NaiveDateTime;

// ---------------------------------------------------------------------------
// Panel state machine
// ---------------------------------------------------------------------------

/// Lifecycle of a panel's fetched view.
#[derive(Debug, Clone)]
pub enum PanelStatus<T> {
    /// Nothing fetched yet (form panels idle here until a submit).
    Idle,
    /// A fetch is in flight; show the progress indicator.
    Loading,
    /// Fetch succeeded and the view model is ready to draw.
    Rendered(T),
    /// Fetch failed; the message is rendered inline in the panel.
    Failed(String),
}

// A manual impl: the derive would needlessly require `T: Default`.
impl<T> Default for PanelStatus<T> {
    fn default() -> Self {
        PanelStatus::Idle
    }
}

impl<T> PanelStatus<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, PanelStatus::Loading)
    }

    pub fn rendered(&self) -> Option<&T> {
        match self {
            PanelStatus::Rendered(view) => Some(view),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Shared formatting
// ---------------------------------------------------------------------------

/// Format a backend timestamp for table display.
///
/// The backend emits naive ISO-8601 (`2025-06-01T08:30:00`); anything that
/// doesn't parse is shown verbatim rather than dropped.
pub fn fmt_timestamp(raw: &str) -> String {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

/// A similarity score in `[0,1]` as a two-decimal percentage.
pub fn fmt_percentage(score: f64) -> String {
    format!("{:.2}%", score * 100.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_formats_iso_naive() {
        assert_eq!(fmt_timestamp("2025-06-01T08:30:00"), "2025-06-01 08:30");
        assert_eq!(fmt_timestamp("2025-06-01T08:30:00.123456"), "2025-06-01 08:30");
    }

    #[test]
    fn timestamp_passes_through_unparseable() {
        assert_eq!(fmt_timestamp("yesterday"), "yesterday");
    }

    #[test]
    fn percentage_two_decimals() {
        assert_eq!(fmt_percentage(0.8731), "87.31%");
        assert_eq!(fmt_percentage(1.0), "100.00%");
        assert_eq!(fmt_percentage(0.0), "0.00%");
    }
}
