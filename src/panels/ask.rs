//! Ask AI panel — free-text questions over an append-only transcript.
//!
//! Submitting appends a user bubble and a pending "Thinking…" bubble, then
//! fires the ask request; the answer (or a fixed error line) replaces the
//! latest pending bubble when the response lands. The transcript is never
//! cleared within a session. `e` exports the latest answer to a markdown
//! report file, the terminal counterpart of the original's PDF download.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::api::RequestError;
use crate::model::AskAnswer;
use crate::ui::{self, InputField, palette};

/// Fixed error line shown when an ask request fails; no automatic retry.
const ASK_FAILED: &str = "Sorry, there was an error getting the answer.";

// ---------------------------------------------------------------------------
// Transcript
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Assistant,
}

/// One bubble in the conversation log. `pending` marks the "Thinking…"
/// placeholder awaiting its answer.
#[derive(Debug, Clone)]
pub struct ChatBubble {
    pub speaker: Speaker,
    pub text: String,
    pub pending: bool,
}

// ---------------------------------------------------------------------------
// Panel
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct AskPanel {
    pub input: InputField,
    /// Append-only within a session; activation never clears it.
    pub transcript: Vec<ChatBubble>,
    /// Optional longer report from the latest answer.
    pub summary: Option<String>,
    pub notice: Option<String>,
    pub busy: bool,
    pub exported_to: Option<PathBuf>,
}

impl Default for AskPanel {
    fn default() -> Self {
        Self {
            input: InputField::text(),
            transcript: Vec::new(),
            summary: None,
            notice: None,
            busy: false,
            exported_to: None,
        }
    }
}

impl AskPanel {
    /// Validate and stage a question. An empty question sets an inline
    /// notice and guarantees no network call; otherwise the user bubble and
    /// the pending placeholder are appended and the question returned.
    pub fn submit(&mut self) -> Option<String> {
        if self.input.is_empty() {
            self.notice = Some("Type a question first.".to_string());
            return None;
        }
        let question = self.input.as_str().trim().to_string();
        self.notice = None;
        self.exported_to = None;
        self.transcript.push(ChatBubble {
            speaker: Speaker::User,
            text: question.clone(),
            pending: false,
        });
        self.transcript.push(ChatBubble {
            speaker: Speaker::Assistant,
            text: "Thinking…".to_string(),
            pending: true,
        });
        self.busy = true;
        self.input.clear();
        Some(question)
    }

    /// Resolve the latest pending bubble with the answer or the fixed
    /// error line.
    pub fn apply(&mut self, result: Result<AskAnswer, RequestError>) {
        self.busy = false;
        let Some(bubble) = self.transcript.iter_mut().rev().find(|b| b.pending) else {
            return;
        };
        bubble.pending = false;
        match result {
            Ok(answer) => {
                bubble.text = answer.answer;
                self.summary = answer.summary;
            }
            Err(_) => {
                bubble.text = ASK_FAILED.to_string();
                self.summary = None;
            }
        }
    }

    /// Latest completed answer, if any.
    fn latest_answer(&self) -> Option<(&str, &str)> {
        let answer_idx = self
            .transcript
            .iter()
            .rposition(|b| b.speaker == Speaker::Assistant && !b.pending && b.text != ASK_FAILED)?;
        let question = self.transcript[..answer_idx]
            .iter()
            .rev()
            .find(|b| b.speaker == Speaker::User)
            .map(|b| b.text.as_str())
            .unwrap_or("");
        Some((question, self.transcript[answer_idx].text.as_str()))
    }

    /// Write the latest answer region to a timestamped markdown report in
    /// the current directory.
    pub fn export(&mut self) -> Result<PathBuf> {
        let (question, answer) = self
            .latest_answer()
            .context("no answer to export yet")?;

        let mut report = String::new();
        report.push_str("# AI Answer Report\n\n");
        report.push_str(&format!(
            "Generated by plantdash on {}\n\n",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        ));
        report.push_str(&format!("## Question\n\n{question}\n\n"));
        report.push_str(&format!("## Answer\n\n{answer}\n"));
        if let Some(summary) = &self.summary {
            report.push_str(&format!("\n## Summary\n\n{summary}\n"));
        }

        let path = PathBuf::from(format!(
            "ask_report_{}.md",
            Local::now().format("%Y%m%d_%H%M%S")
        ));
        fs::write(&path, report).with_context(|| format!("failed to write {}", path.display()))?;

        self.exported_to = Some(path.clone());
        Ok(path)
    }

    pub fn render(&self, f: &mut Frame, area: Rect, editing: bool) {
        let has_summary = self.summary.is_some();
        let constraints: Vec<Constraint> = if has_summary {
            vec![
                Constraint::Min(6),
                Constraint::Length(7),
                Constraint::Length(3),
                Constraint::Length(1),
            ]
        } else {
            vec![
                Constraint::Min(6),
                Constraint::Length(3),
                Constraint::Length(1),
            ]
        };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        self.render_transcript(f, chunks[0]);

        let mut next = 1;
        if has_summary {
            self.render_summary(f, chunks[next]);
            next += 1;
        }

        self.input.render(f, chunks[next], "Ask about your manufacturing events", editing);
        next += 1;

        let status_line = if let Some(notice) = &self.notice {
            Line::styled(notice.clone(), Style::default().fg(palette::ERROR))
        } else if let Some(path) = &self.exported_to {
            Line::styled(
                format!("Report saved to {}", path.display()),
                Style::default().fg(palette::OK),
            )
        } else if editing {
            ui::hint_line("Enter: ask   Esc: done")
        } else {
            ui::hint_line("i: type a question   e: export latest answer")
        };
        f.render_widget(Paragraph::new(status_line), chunks[next]);
    }

    fn render_transcript(&self, f: &mut Frame, area: Rect) {
        let width = area.width.saturating_sub(4).max(8) as usize;
        let mut lines: Vec<Line> = Vec::new();

        if self.transcript.is_empty() {
            lines.push(Line::raw(""));
            lines.push(ui::hint_line(
                "Ask anything about your manufacturing events, analytics, or troubleshooting.",
            ));
        }

        for bubble in &self.transcript {
            let (prefix, color) = match bubble.speaker {
                Speaker::User => ("you ", palette::USER_BUBBLE),
                Speaker::Assistant => ("ai  ", palette::AI_BUBBLE),
            };
            let style = if bubble.pending {
                Style::default().fg(palette::MUTED).add_modifier(Modifier::ITALIC)
            } else {
                Style::default().fg(color)
            };
            lines.push(Line::from(vec![
                Span::styled(prefix, style.add_modifier(Modifier::BOLD)),
                Span::styled("▸ ", style),
                Span::styled(bubble.text.clone(), style),
            ]));
            lines.push(Line::raw(""));
        }

        // Pin the view to the latest exchange.
        let wrapped: usize = self
            .transcript
            .iter()
            .map(|b| 1 + b.text.len() / width.max(1) + 1)
            .sum();
        let visible = area.height.saturating_sub(2) as usize;
        let scroll = wrapped.saturating_sub(visible) as u16;

        let transcript = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(palette::BORDER))
                    .title(" Conversation "),
            );
        f.render_widget(transcript, area);
    }

    fn render_summary(&self, f: &mut Frame, area: Rect) {
        let Some(summary) = &self.summary else { return };
        let body = Paragraph::new(summary.clone())
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(palette::MUTED))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(palette::BORDER))
                    .title(" Full Report "),
            );
        f.render_widget(body, area);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn type_question(panel: &mut AskPanel, question: &str) {
        for c in question.chars() {
            panel.input.push_char(c);
        }
    }

    #[test]
    fn empty_question_is_rejected_locally() {
        let mut panel = AskPanel::default();
        assert!(panel.submit().is_none());
        assert!(panel.notice.is_some());
        assert!(panel.transcript.is_empty());
        assert!(!panel.busy);
    }

    #[test]
    fn submit_appends_user_and_placeholder_bubbles() {
        let mut panel = AskPanel::default();
        type_question(&mut panel, "why did M1 jam?");
        let question = panel.submit().unwrap();
        assert_eq!(question, "why did M1 jam?");
        assert_eq!(panel.transcript.len(), 2);
        assert_eq!(panel.transcript[0].speaker, Speaker::User);
        assert!(panel.transcript[1].pending);
        assert!(panel.busy);
        assert!(panel.input.is_empty());
    }

    #[test]
    fn transcript_is_append_only_across_questions() {
        let mut panel = AskPanel::default();
        type_question(&mut panel, "first?");
        panel.submit().unwrap();
        panel.apply(Ok(AskAnswer {
            answer: "answer one".to_string(),
            summary: None,
        }));
        type_question(&mut panel, "second?");
        panel.submit().unwrap();
        panel.apply(Ok(AskAnswer {
            answer: "answer two".to_string(),
            summary: Some("longer report".to_string()),
        }));

        assert_eq!(panel.transcript.len(), 4);
        assert_eq!(panel.transcript[1].text, "answer one");
        assert_eq!(panel.transcript[3].text, "answer two");
        assert_eq!(panel.summary.as_deref(), Some("longer report"));
    }

    #[test]
    fn failure_replaces_placeholder_with_fixed_message() {
        let mut panel = AskPanel::default();
        type_question(&mut panel, "anything?");
        panel.submit().unwrap();
        panel.apply(Err(RequestError::Status {
            path: "/ask-ai".to_string(),
            code: 500,
        }));
        assert_eq!(panel.transcript[1].text, ASK_FAILED);
        assert!(!panel.transcript[1].pending);
        assert!(!panel.busy);
    }

    #[test]
    fn latest_answer_pairs_question_and_answer() {
        let mut panel = AskPanel::default();
        type_question(&mut panel, "q1");
        panel.submit().unwrap();
        panel.apply(Ok(AskAnswer {
            answer: "a1".to_string(),
            summary: None,
        }));
        let (question, answer) = panel.latest_answer().unwrap();
        assert_eq!(question, "q1");
        assert_eq!(answer, "a1");
    }

    #[test]
    fn export_without_answer_fails() {
        let mut panel = AskPanel::default();
        assert!(panel.export().is_err());
    }
}
