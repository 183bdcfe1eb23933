//! UMAP panel — faceted scatter plots of the embedding projection.
//!
//! One scatter sub-plot per distinct label rather than one combined plot;
//! the small multiples stay readable when label clusters overlap.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};

use crate::api::RequestError;
use crate::charts::{self, ScatterFacet};
use crate::model::UmapProjection;
use crate::panels::PanelStatus;
use crate::ui::{self, palette};

/// Facets per grid row.
const FACETS_PER_ROW: usize = 3;

#[derive(Debug, Default)]
pub struct UmapPanel {
    pub status: PanelStatus<Vec<ScatterFacet>>,
}

impl UmapPanel {
    pub fn apply(&mut self, result: Result<UmapProjection, RequestError>) {
        self.status = match result {
            Ok(projection) => PanelStatus::Rendered(charts::facet_by_label(&projection)),
            Err(e) => PanelStatus::Failed(e.panel_message()),
        };
    }

    pub fn render(&self, f: &mut Frame, area: Rect, tick: u64) {
        match &self.status {
            PanelStatus::Idle | PanelStatus::Loading => {
                ui::loading_block(f, area, tick, "Loading UMAP visualization…");
            }
            PanelStatus::Failed(message) => ui::error_block(f, area, message),
            PanelStatus::Rendered(facets) if facets.is_empty() => {
                let empty = Paragraph::new("No projection points to display.")
                    .style(Style::default().fg(palette::MUTED))
                    .alignment(ratatui::layout::Alignment::Center)
                    .block(Block::default().borders(Borders::ALL));
                f.render_widget(empty, area);
            }
            PanelStatus::Rendered(facets) => render_facets(f, area, facets),
        }
    }
}

// ---------------------------------------------------------------------------
// Facet grid
// ---------------------------------------------------------------------------

fn render_facets(f: &mut Frame, area: Rect, facets: &[ScatterFacet]) {
    let row_count = facets.len().div_ceil(FACETS_PER_ROW);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Ratio(1, row_count as u32);
            row_count
        ])
        .split(area);

    for (row_index, chunk) in facets.chunks(FACETS_PER_ROW).enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![
                Constraint::Ratio(1, chunk.len() as u32);
                chunk.len()
            ])
            .split(rows[row_index]);

        for (cell_index, facet) in chunk.iter().enumerate() {
            let color = palette::BARS[(row_index * FACETS_PER_ROW + cell_index) % palette::BARS.len()];
            render_facet(f, cells[cell_index], facet, color);
        }
    }
}

fn render_facet(f: &mut Frame, area: Rect, facet: &ScatterFacet, color: ratatui::style::Color) {
    let bounds = charts::padded_bounds(&facet.points);

    let datasets = vec![
        Dataset::default()
            .name(facet.label.clone())
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(color))
            .data(&facet.points),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette::BORDER))
                .title(format!(" {} ({}) ", facet.label, facet.points.len())),
        )
        .x_axis(
            Axis::default()
                .style(Style::default().fg(palette::MUTED))
                .bounds(bounds.x)
                .labels(vec![
                    Span::raw(format!("{:.1}", bounds.x[0])),
                    Span::raw(format!("{:.1}", bounds.x[1])),
                ]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(palette::MUTED))
                .bounds(bounds.y)
                .labels(vec![
                    Span::raw(format!("{:.1}", bounds.y[0])),
                    Span::raw(format!("{:.1}", bounds.y[1])),
                ]),
        );

    f.render_widget(chart, area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_groups_points_into_facets() {
        let mut panel = UmapPanel::default();
        panel.apply(Ok(UmapProjection {
            points: vec![[0.0, 1.0], [2.0, 3.0], [4.0, 5.0]],
            labels: vec![
                "Jam".to_string(),
                "Jam".to_string(),
                "Overheat".to_string(),
            ],
        }));
        let facets = panel.status.rendered().unwrap();
        assert_eq!(facets.len(), 2);
        assert_eq!(facets[0].points.len(), 2);
    }

    #[test]
    fn apply_failure_keeps_message() {
        let mut panel = UmapPanel::default();
        panel.apply(Err(RequestError::Status {
            path: "/umap".to_string(),
            code: 503,
        }));
        assert!(matches!(panel.status, PanelStatus::Failed(_)));
    }
}
