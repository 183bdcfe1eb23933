//! Logs panel — backend log lines, verbatim.
//!
//! No parsing, no filtering, no level coloring: the lines render
//! preformatted in original order, with manual scrolling.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::api::RequestError;
use crate::panels::PanelStatus;
use crate::ui::{self, palette};

#[derive(Debug, Default)]
pub struct LogsPanel {
    pub status: PanelStatus<Vec<String>>,
    pub scroll: u16,
}

impl LogsPanel {
    pub fn apply(&mut self, result: Result<Vec<String>, RequestError>) {
        self.scroll = 0;
        self.status = match result {
            Ok(lines) => PanelStatus::Rendered(lines),
            Err(e) => PanelStatus::Failed(e.panel_message()),
        };
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        let Some(lines) = self.status.rendered() else { return };
        let max = lines.len().saturating_sub(1) as u16;
        self.scroll = (self.scroll + 1).min(max);
    }

    pub fn render(&self, f: &mut Frame, area: Rect, tick: u64) {
        match &self.status {
            PanelStatus::Idle | PanelStatus::Loading => {
                ui::loading_block(f, area, tick, "Fetching system logs…");
            }
            PanelStatus::Failed(message) => ui::error_block(f, area, message),
            PanelStatus::Rendered(lines) if lines.is_empty() => {
                let empty = Paragraph::new("No log lines recorded.")
                    .style(Style::default().fg(palette::MUTED))
                    .alignment(ratatui::layout::Alignment::Center)
                    .block(Block::default().borders(Borders::ALL).title(" System Logs "));
                f.render_widget(empty, area);
            }
            PanelStatus::Rendered(lines) => {
                // Verbatim and unwrapped; trailing newlines from the backend
                // are stripped for display only.
                let body: Vec<Line> = lines
                    .iter()
                    .map(|l| Line::raw(l.trim_end_matches('\n').to_string()))
                    .collect();
                let paragraph = Paragraph::new(body)
                    .scroll((self.scroll, 0))
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .border_style(Style::default().fg(palette::BORDER))
                            .title(format!(" System Logs ({} lines) ", lines.len())),
                    );
                f.render_widget(paragraph, area);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
