//! Cosine similarity panel — compare two specific events.
//!
//! Two numeric id fields, both required. A backend `data: null` renders a
//! calm "not found" state, which is deliberately distinct from a transport
//! failure. Comparing an event against itself is a valid request.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::api::RequestError;
use crate::app::worker::FetchJob;
use crate::model::{CosineComparison, EventRecord};
use crate::panels::{PanelStatus, fmt_percentage, fmt_timestamp};
use crate::ui::{self, InputField, palette};

/// Which of the two id fields has the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CosineField {
    #[default]
    First,
    Second,
}

#[derive(Debug)]
pub struct CosinePanel {
    pub id1: InputField,
    pub id2: InputField,
    pub focus: CosineField,
    /// `Rendered(None)` is the backend's explicit "not found".
    pub status: PanelStatus<Option<CosineComparison>>,
    pub notice: Option<String>,
}

impl Default for CosinePanel {
    fn default() -> Self {
        Self {
            id1: InputField::numeric(),
            id2: InputField::numeric(),
            focus: CosineField::First,
            status: PanelStatus::Idle,
            notice: None,
        }
    }
}

impl CosinePanel {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn focused_input(&mut self) -> &mut InputField {
        match self.focus {
            CosineField::First => &mut self.id1,
            CosineField::Second => &mut self.id2,
        }
    }

    pub fn switch_focus(&mut self) {
        self.focus = match self.focus {
            CosineField::First => CosineField::Second,
            CosineField::Second => CosineField::First,
        };
    }

    /// Validate both ids; an incomplete form produces an inline notice and
    /// no network call.
    pub fn submit(&mut self) -> Option<FetchJob> {
        match (self.id1.parse_id(), self.id2.parse_id()) {
            (Some(event_id1), Some(event_id2)) => {
                self.notice = None;
                Some(FetchJob::Cosine {
                    event_id1,
                    event_id2,
                })
            }
            _ => {
                self.notice = Some("Enter both Event IDs first.".to_string());
                None
            }
        }
    }

    pub fn apply(&mut self, result: Result<Option<CosineComparison>, RequestError>) {
        self.status = match result {
            Ok(comparison) => PanelStatus::Rendered(comparison),
            Err(e) => PanelStatus::Failed(e.panel_message()),
        };
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, tick: u64, editing: bool) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(6),
            ])
            .split(area);

        let intro = Paragraph::new(vec![
            Line::raw("Measure how close two events sit in embedding space."),
            Line::raw("Handy for checking whether two incidents share a root cause."),
        ])
        .style(Style::default().fg(palette::MUTED))
        .wrap(Wrap { trim: true });
        f.render_widget(intro, chunks[0]);

        let form = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(20),
                Constraint::Length(20),
                Constraint::Min(10),
            ])
            .split(chunks[1]);
        self.id1.render(
            f,
            form[0],
            "Event 1 ID",
            editing && self.focus == CosineField::First,
        );
        self.id2.render(
            f,
            form[1],
            "Event 2 ID",
            editing && self.focus == CosineField::Second,
        );

        let hint = if editing {
            "Tab: switch field   Enter: compare   Esc: done"
        } else {
            "i: edit"
        };
        f.render_widget(Paragraph::new(ui::hint_line(hint)), form[2]);

        if let Some(notice) = &self.notice {
            f.render_widget(
                Paragraph::new(Line::styled(
                    notice.clone(),
                    Style::default().fg(palette::ERROR),
                )),
                chunks[2],
            );
        }

        match &self.status {
            PanelStatus::Idle => {}
            PanelStatus::Loading => {
                ui::loading_block(f, chunks[3], tick, "Calculating similarity…");
            }
            PanelStatus::Failed(message) => ui::error_block(f, chunks[3], message),
            PanelStatus::Rendered(None) => render_not_found(f, chunks[3]),
            PanelStatus::Rendered(Some(comparison)) => render_card(f, chunks[3], comparison),
        }
    }
}

// ---------------------------------------------------------------------------
// Result rendering
// ---------------------------------------------------------------------------

/// The backend found no match for one of the ids. Not an error state.
fn render_not_found(f: &mut Frame, area: Rect) {
    let body = Paragraph::new(vec![
        Line::raw(""),
        Line::styled(
            "No comparison available: one of those events was not found.",
            Style::default().fg(palette::MUTED),
        ),
        Line::styled(
            "Double-check the ids and compare again.",
            Style::default().fg(palette::MUTED),
        ),
    ])
    .alignment(ratatui::layout::Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette::BORDER))
            .title(" Not Found "),
    );
    f.render_widget(body, area);
}

fn render_card(f: &mut Frame, area: Rect, comparison: &CosineComparison) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(area);

    let score = Paragraph::new(Line::styled(
        format!(
            "Cosine Similarity: {}",
            fmt_percentage(comparison.cosine_similarity)
        ),
        Style::default().fg(palette::OK).add_modifier(Modifier::BOLD),
    ))
    .alignment(ratatui::layout::Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette::OK)),
    );
    f.render_widget(score, chunks[0]);

    let sides = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    render_event_details(f, sides[0], "Event 1", &comparison.event1);
    render_event_details(f, sides[1], "Event 2", &comparison.event2);
}

fn render_event_details(f: &mut Frame, area: Rect, title: &str, event: &EventRecord) {
    let body = Paragraph::new(vec![
        Line::from(vec![
            ratatui::text::Span::styled("Type: ", Style::default().fg(palette::ACCENT)),
            ratatui::text::Span::raw(event.event_type.clone()),
        ]),
        Line::from(vec![
            ratatui::text::Span::styled("Machine: ", Style::default().fg(palette::ACCENT)),
            ratatui::text::Span::raw(event.machine_name.clone()),
        ]),
        Line::from(vec![
            ratatui::text::Span::styled("Description: ", Style::default().fg(palette::ACCENT)),
            ratatui::text::Span::raw(event.body_text().to_string()),
        ]),
        Line::from(vec![
            ratatui::text::Span::styled("Timestamp: ", Style::default().fg(palette::ACCENT)),
            ratatui::text::Span::raw(fmt_timestamp(&event.timestamp)),
        ]),
    ])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette::BORDER))
            .title(format!(" {title} (#{}) ", event.id)),
    );
    f.render_widget(body, area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_ids_required() {
        let mut panel = CosinePanel::default();
        panel.id1.push_char('3');
        assert!(panel.submit().is_none());
        assert!(panel.notice.is_some());
    }

    #[test]
    fn identical_ids_are_a_valid_request() {
        let mut panel = CosinePanel::default();
        panel.id1.push_char('7');
        panel.id2.push_char('7');
        match panel.submit() {
            Some(FetchJob::Cosine {
                event_id1,
                event_id2,
            }) => {
                assert_eq!(event_id1, 7);
                assert_eq!(event_id2, 7);
            }
            other => panic!("unexpected job: {other:?}"),
        }
    }

    #[test]
    fn null_result_renders_not_found_state() {
        let mut panel = CosinePanel::default();
        panel.apply(Ok(None));
        assert!(matches!(panel.status, PanelStatus::Rendered(None)));
    }
}
