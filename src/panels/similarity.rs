//! Similarity panel — find events most alike a given event.
//!
//! A single numeric Event ID form. Submitting validates locally first; an
//! empty or non-numeric id produces an inline notice and no network call.
//! Results are rendered in backend order: the ranking is part of the
//! backend contract and is never re-sorted here.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table, TableState, Wrap};

use crate::api::RequestError;
use crate::app::worker::FetchJob;
use crate::model::SimilarEvent;
use crate::panels::{PanelStatus, fmt_percentage};
use crate::ui::{self, InputField, palette};

#[derive(Debug)]
pub struct SimilarityPanel {
    pub input: InputField,
    pub status: PanelStatus<Vec<SimilarEvent>>,
    pub notice: Option<String>,
    table: TableState,
}

impl Default for SimilarityPanel {
    fn default() -> Self {
        Self {
            input: InputField::numeric(),
            status: PanelStatus::Idle,
            notice: None,
            table: TableState::default(),
        }
    }
}

impl SimilarityPanel {
    /// Fresh form; called on every activation of the tab.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Validate the form. Returns the fetch job on success; otherwise sets
    /// the inline notice and guarantees no network call happens.
    pub fn submit(&mut self) -> Option<FetchJob> {
        let Some(event_id) = self.input.parse_id() else {
            self.notice = Some("Enter a numeric Event ID first.".to_string());
            return None;
        };
        self.notice = None;
        Some(FetchJob::Similarity { event_id })
    }

    pub fn apply(&mut self, result: Result<Vec<SimilarEvent>, RequestError>) {
        self.status = match result {
            Ok(rows) => PanelStatus::Rendered(rows),
            Err(e) => PanelStatus::Failed(e.panel_message()),
        };
        self.table.select(Some(0));
    }

    pub fn scroll_up(&mut self) {
        let current = self.table.selected().unwrap_or(0);
        self.table.select(Some(current.saturating_sub(1)));
    }

    pub fn scroll_down(&mut self) {
        let Some(rows) = self.status.rendered() else { return };
        let last = rows.len().saturating_sub(1);
        let current = self.table.selected().unwrap_or(0);
        self.table.select(Some((current + 1).min(last)));
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, tick: u64, editing: bool) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(4),
            ])
            .split(area);

        let intro = Paragraph::new(vec![
            Line::raw("Find past events most similar to one event, using the"),
            Line::raw("backend's embedding index. Useful for root-cause analysis"),
            Line::raw("and spotting recurring breakdowns."),
        ])
        .style(Style::default().fg(palette::MUTED))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::NONE));
        f.render_widget(intro, chunks[0]);

        let form = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(24), Constraint::Min(10)])
            .split(chunks[1]);
        self.input.render(f, form[0], "Event ID", editing);

        let hint = if editing {
            "Enter: search   Esc: done"
        } else {
            "i: edit   Enter submits while editing"
        };
        f.render_widget(
            Paragraph::new(ui::hint_line(hint)).block(Block::default().borders(Borders::NONE)),
            form[1],
        );

        if let Some(notice) = &self.notice {
            let warning = Paragraph::new(Line::styled(
                notice.clone(),
                Style::default().fg(palette::ERROR),
            ));
            f.render_widget(warning, chunks[2]);
        }

        match &self.status {
            PanelStatus::Idle => {}
            PanelStatus::Loading => {
                ui::loading_block(f, chunks[3], tick, "Searching for similar events…");
            }
            PanelStatus::Failed(message) => ui::error_block(f, chunks[3], message),
            PanelStatus::Rendered(rows) => {
                f.render_stateful_widget(build_table(rows), chunks[3], &mut self.table);
            }
        }
    }
}

fn build_table(rows: &[SimilarEvent]) -> Table<'static> {
    let header = Row::new(vec!["ID", "Type", "Machine", "Notes", "Similarity"])
        .style(Style::default().fg(palette::ACCENT).add_modifier(Modifier::BOLD));

    let body: Vec<Row> = rows
        .iter()
        .map(|sim| {
            Row::new(vec![
                sim.event.id.to_string(),
                sim.event.event_type.clone(),
                sim.event.machine_name.clone(),
                sim.event.notes.clone().unwrap_or_default(),
                fmt_percentage(sim.similarity),
            ])
        })
        .collect();

    Table::new(
        body,
        [
            Constraint::Length(5),
            Constraint::Length(14),
            Constraint::Length(12),
            Constraint::Min(16),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette::BORDER))
            .title(format!(" Similar Events ({}) ", rows.len())),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
