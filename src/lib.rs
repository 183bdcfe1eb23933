//! plantdash — terminal dashboard client for manufacturing event analytics.
//!
//! Six tabbed panels over a remote events API: aggregate charts, embedding
//! similarity search, pairwise cosine comparison, an AI Q&A transcript, a
//! faceted UMAP projection, and raw backend logs.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────┐
//! │  app: view state, tab controller, event loop   │
//! │  panels: one renderer per tab                  │
//! │  charts: aggregates → widget data              │
//! ├────────────────────────────────────────────────┤
//! │  aggregate: pure grouped counts                │
//! │  api: ureq client + request trace              │
//! │  model: backend wire types                     │
//! ├────────────────────────────────────────────────┤
//! │  config: defaults → TOML file → env → CLI      │
//! └────────────────────────────────────────────────┘
//! ```

pub mod aggregate;
pub mod api;
pub mod app;
pub mod charts;
pub mod cli;
pub mod config;
pub mod model;
pub mod panels;
pub mod ui;
