//! Shared terminal chrome: palette, input fields, and common blocks.
//!
//! Panels pull their colors from [`palette`] so the dashboard reads as one
//! surface, and reuse the loading/error blocks so every panel degrades the
//! same way.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// Dashboard color palette.
pub mod palette {
    use ratatui::style::Color;

    pub const ACCENT: Color = Color::Rgb(255, 214, 0); // amber headings
    pub const TAB_ACTIVE: Color = Color::Rgb(255, 214, 0);
    pub const TAB_INACTIVE: Color = Color::Gray;
    pub const BORDER: Color = Color::Rgb(90, 95, 120);
    pub const OK: Color = Color::Rgb(67, 198, 172); // teal
    pub const ERROR: Color = Color::Rgb(229, 57, 53);
    pub const MUTED: Color = Color::Gray;
    pub const USER_BUBBLE: Color = Color::Rgb(161, 196, 253);
    pub const AI_BUBBLE: Color = Color::Rgb(67, 198, 172);

    /// Bar colors cycled across the four aggregate charts.
    pub const BARS: [Color; 4] = [
        Color::Rgb(255, 214, 0),
        Color::Rgb(67, 198, 172),
        Color::Rgb(161, 196, 253),
        Color::Rgb(255, 179, 71),
    ];
}

// ---------------------------------------------------------------------------
// Input field
// ---------------------------------------------------------------------------

/// A single-line text input with optional numeric filtering.
///
/// Numeric fields silently drop non-digit keystrokes, matching the original
/// number inputs; validation of *missing* input still happens on submit.
#[derive(Debug, Clone, Default)]
pub struct InputField {
    value: String,
    numeric: bool,
}

impl InputField {
    pub fn text() -> Self {
        Self {
            value: String::new(),
            numeric: false,
        }
    }

    pub fn numeric() -> Self {
        Self {
            value: String::new(),
            numeric: true,
        }
    }

    pub fn push_char(&mut self, c: char) {
        if self.numeric && !c.is_ascii_digit() {
            return;
        }
        if c.is_control() {
            return;
        }
        self.value.push(c);
    }

    pub fn backspace(&mut self) {
        self.value.pop();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.value.trim().is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Parse the field as an event id.
    pub fn parse_id(&self) -> Option<i64> {
        self.value.trim().parse().ok()
    }

    /// Render the field into `area` with a titled border; the border turns
    /// accent-colored and a cursor block appears while focused.
    pub fn render(&self, f: &mut Frame, area: Rect, title: &str, focused: bool) {
        let border = if focused {
            Style::default().fg(palette::ACCENT)
        } else {
            Style::default().fg(palette::BORDER)
        };

        let mut spans = vec![Span::raw(self.value.clone())];
        if focused {
            spans.push(Span::styled(
                "█",
                Style::default().fg(palette::ACCENT).add_modifier(Modifier::SLOW_BLINK),
            ));
        }

        let field = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(format!(" {title} ")),
        );
        f.render_widget(field, area);
    }
}

// ---------------------------------------------------------------------------
// Common blocks
// ---------------------------------------------------------------------------

const SPINNER_FRAMES: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

/// Indefinite progress indicator, animated from the app tick counter.
pub fn loading_block(f: &mut Frame, area: Rect, tick: u64, message: &str) {
    let frame = SPINNER_FRAMES[(tick as usize) % SPINNER_FRAMES.len()];
    let body = Paragraph::new(vec![
        Line::raw(""),
        Line::from(vec![
            Span::styled(frame, Style::default().fg(palette::ACCENT)),
            Span::raw(" "),
            Span::styled(message, Style::default().fg(palette::ACCENT)),
        ]),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(palette::BORDER)));
    f.render_widget(body, area);
}

/// Inline, panel-scoped failure message. Never a modal, never blocking.
pub fn error_block(f: &mut Frame, area: Rect, message: &str) {
    let body = Paragraph::new(vec![
        Line::raw(""),
        Line::styled(
            message.to_string(),
            Style::default().fg(palette::ERROR).add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::styled(
            "Press r to retry.",
            Style::default().fg(palette::MUTED),
        ),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(palette::ERROR)));
    f.render_widget(body, area);
}

/// Dimmed hint paragraph for idle form panels.
pub fn hint_line(text: &str) -> Line<'_> {
    Line::styled(text, Style::default().fg(palette::MUTED))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_field_rejects_letters() {
        let mut field = InputField::numeric();
        field.push_char('1');
        field.push_char('a');
        field.push_char('2');
        assert_eq!(field.as_str(), "12");
        assert_eq!(field.parse_id(), Some(12));
    }

    #[test]
    fn text_field_accepts_anything_printable() {
        let mut field = InputField::text();
        field.push_char('w');
        field.push_char('h');
        field.push_char('y');
        field.push_char('?');
        assert_eq!(field.as_str(), "why?");
    }

    #[test]
    fn backspace_and_clear() {
        let mut field = InputField::numeric();
        field.push_char('4');
        field.push_char('2');
        field.backspace();
        assert_eq!(field.as_str(), "4");
        field.clear();
        assert!(field.is_empty());
    }

    #[test]
    fn whitespace_only_is_empty() {
        let mut field = InputField::text();
        field.push_char(' ');
        assert!(field.is_empty());
    }
}
