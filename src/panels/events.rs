//! Events panel — aggregate charts plus a togglable raw event table.
//!
//! On activation the panel fetches all event records, folds them into the
//! four aggregates (type, city, machine, duration bucket), and renders a
//! 2×2 bar-chart grid. `t` swaps the grid for the raw table.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{BarChart, Block, Borders, Row, Table, TableState};

use crate::aggregate::{bucket_duration, group_count};
use crate::api::RequestError;
use crate::charts;
use crate::model::EventRecord;
use crate::panels::{PanelStatus, fmt_timestamp};
use crate::ui::{self, palette};

// ---------------------------------------------------------------------------
// View model
// ---------------------------------------------------------------------------

/// Chart-ready aggregates computed once per fetch and discarded on the next
/// load.
#[derive(Debug, Clone)]
pub struct EventsView {
    pub records: Vec<EventRecord>,
    pub by_type: Vec<(String, u64)>,
    pub by_city: Vec<(String, u64)>,
    pub by_machine: Vec<(String, u64)>,
    pub by_duration: Vec<(String, u64)>,
}

impl EventsView {
    pub fn from_records(records: Vec<EventRecord>) -> Self {
        let by_type = group_count(&records, |r| Some(&r.event_type));
        let by_city = group_count(&records, |r| r.city.as_deref());
        let by_machine = group_count(&records, |r| Some(&r.machine_name));
        let by_duration = bucket_duration(&records);
        Self {
            records,
            by_type,
            by_city,
            by_machine,
            by_duration,
        }
    }
}

// ---------------------------------------------------------------------------
// Panel
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct EventsPanel {
    pub status: PanelStatus<EventsView>,
    pub show_table: bool,
    table: TableState,
}

impl EventsPanel {
    pub fn apply(&mut self, result: Result<Vec<EventRecord>, RequestError>) {
        self.status = match result {
            Ok(records) => PanelStatus::Rendered(EventsView::from_records(records)),
            Err(e) => PanelStatus::Failed(e.panel_message()),
        };
        self.table.select(Some(0));
    }

    pub fn toggle_table(&mut self) {
        self.show_table = !self.show_table;
    }

    pub fn scroll_up(&mut self) {
        let current = self.table.selected().unwrap_or(0);
        self.table.select(Some(current.saturating_sub(1)));
    }

    pub fn scroll_down(&mut self) {
        let Some(view) = self.status.rendered() else { return };
        let last = view.records.len().saturating_sub(1);
        let current = self.table.selected().unwrap_or(0);
        self.table.select(Some((current + 1).min(last)));
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, tick: u64) {
        match &self.status {
            PanelStatus::Idle | PanelStatus::Loading => {
                ui::loading_block(f, area, tick, "Loading manufacturing events…");
            }
            PanelStatus::Failed(message) => ui::error_block(f, area, message),
            PanelStatus::Rendered(view) => {
                if self.show_table {
                    f.render_stateful_widget(build_table(view), area, &mut self.table);
                } else {
                    render_charts(f, area, view);
                }
            }
        }
    }
}

fn build_table(view: &EventsView) -> Table<'static> {
    let header = Row::new(vec!["ID", "Type", "Machine", "City", "Notes", "Time", "Min"])
        .style(Style::default().fg(palette::ACCENT).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = view
        .records
        .iter()
        .map(|ev| {
            Row::new(vec![
                ev.id.to_string(),
                ev.event_type.clone(),
                ev.machine_name.clone(),
                ev.city.clone().unwrap_or_default(),
                ev.notes.clone().unwrap_or_default(),
                fmt_timestamp(&ev.timestamp),
                format!("{:.0}", ev.duration()),
            ])
        })
        .collect();

    Table::new(
        rows,
        [
            Constraint::Length(5),
            Constraint::Length(14),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Min(16),
            Constraint::Length(16),
            Constraint::Length(5),
        ],
    )
    .header(header)
    .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette::BORDER))
            .title(format!(" Event Table ({}) [t: charts] ", view.records.len())),
    )
}

// ---------------------------------------------------------------------------
// Chart grid
// ---------------------------------------------------------------------------

fn render_charts(f: &mut Frame, area: Rect, view: &EventsView) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    render_bar_chart(f, top[0], "Event Types", &view.by_type, palette::BARS[0]);
    render_bar_chart(f, top[1], "Events per City", &view.by_city, palette::BARS[1]);
    render_bar_chart(f, bottom[0], "Machine Usage", &view.by_machine, palette::BARS[2]);
    render_bar_chart(f, bottom[1], "Duration Buckets", &view.by_duration, palette::BARS[3]);
}

fn render_bar_chart(
    f: &mut Frame,
    area: Rect,
    title: &str,
    rows: &[(String, u64)],
    color: ratatui::style::Color,
) {
    let data = charts::bar_data(rows);
    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette::BORDER))
                .title(format!(" {title} ")),
        )
        .data(data.as_slice())
        .bar_width(charts::bar_width(area.width, data.len()))
        .bar_gap(1)
        .bar_style(Style::default().fg(color))
        .value_style(Style::default().fg(palette::ACCENT).add_modifier(Modifier::BOLD));
    f.render_widget(chart, area);
}
