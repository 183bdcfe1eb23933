//! The closed set of dashboard tabs.
//!
//! Tab identity is a static enum; string lookup exists for the id-based
//! activation path, where an unrecognized identifier simply resolves to
//! `None` and activation becomes a no-op.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Events,
    Similarity,
    Cosine,
    AskAi,
    Umap,
    Logs,
}

impl Tab {
    /// All tabs in navigation order. Events is the startup default.
    pub const ALL: [Tab; 6] = [
        Tab::Events,
        Tab::Similarity,
        Tab::Cosine,
        Tab::AskAi,
        Tab::Umap,
        Tab::Logs,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Events => "Events",
            Tab::Similarity => "Similarity",
            Tab::Cosine => "Cosine Similarity",
            Tab::AskAi => "Ask AI",
            Tab::Umap => "UMAP",
            Tab::Logs => "Logs",
        }
    }

    /// Stable string id, used for activation by name.
    pub fn id(self) -> &'static str {
        match self {
            Tab::Events => "events",
            Tab::Similarity => "similarity",
            Tab::Cosine => "cosine",
            Tab::AskAi => "ask-ai",
            Tab::Umap => "umap",
            Tab::Logs => "logs",
        }
    }

    /// Look up a tab by its string id. Unknown ids are `None`.
    pub fn from_id(id: &str) -> Option<Tab> {
        Tab::ALL.iter().copied().find(|tab| tab.id() == id)
    }

    pub fn index(self) -> usize {
        Tab::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    pub fn next(self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn previous(self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }

    /// Whether the tab hosts a form the user can focus.
    pub fn has_form(self) -> bool {
        matches!(self, Tab::Similarity | Tab::Cosine | Tab::AskAi)
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
