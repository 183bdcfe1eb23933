//! Chart adapters — aggregates and projections to widget-ready data.
//!
//! Translates the aggregation output and the UMAP projection into the
//! shapes ratatui's `BarChart` and `Chart` widgets consume: borrowed bar
//! rows, per-label scatter facets, and padded axis bounds. No drawing
//! happens here; panels own the widgets.

use crate::model::UmapProjection;

// ---------------------------------------------------------------------------
// Bar charts
// ---------------------------------------------------------------------------

/// Borrow aggregate rows in the form `BarChart::data` expects.
pub fn bar_data(rows: &[(String, u64)]) -> Vec<(&str, u64)> {
    rows.iter().map(|(label, count)| (label.as_str(), *count)).collect()
}

/// Bar width that fits `n` bars (with one-cell gaps) into `area_width`,
/// clamped to a readable range.
pub fn bar_width(area_width: u16, n: usize) -> u16 {
    if n == 0 {
        return 1;
    }
    let gaps = (n as u16).saturating_sub(1);
    let usable = area_width.saturating_sub(gaps + 2);
    (usable / n as u16).clamp(3, 12)
}

// ---------------------------------------------------------------------------
// Scatter facets
// ---------------------------------------------------------------------------

/// One scatter sub-plot: all projection points sharing a categorical label.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterFacet {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

/// Group projection points by label, one facet per distinct label in
/// first-seen order.
///
/// Points and labels are index-aligned; a length mismatch is truncated to
/// the shorter side rather than treated as fatal.
pub fn facet_by_label(projection: &UmapProjection) -> Vec<ScatterFacet> {
    let mut facets: Vec<ScatterFacet> = Vec::new();

    for (point, label) in projection.points.iter().zip(&projection.labels) {
        match facets.iter_mut().find(|f| &f.label == label) {
            Some(facet) => facet.points.push((point[0], point[1])),
            None => facets.push(ScatterFacet {
                label: label.clone(),
                points: vec![(point[0], point[1])],
            }),
        }
    }

    facets
}

// ---------------------------------------------------------------------------
// Axis bounds
// ---------------------------------------------------------------------------

/// Axis bounds for a scatter plot, padded so edge points don't sit on the
/// border.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: [f64; 2],
    pub y: [f64; 2],
}

/// Compute padded bounds for a point set. Degenerate spans (a single point,
/// or all points collinear on an axis) get a fixed margin so the axis never
/// collapses to zero width.
pub fn padded_bounds(points: &[(f64, f64)]) -> Bounds {
    if points.is_empty() {
        return Bounds {
            x: [0.0, 1.0],
            y: [0.0, 1.0],
        };
    }

    let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(x, y) in points {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }

    let x_margin = ((x_max - x_min) * 0.15).max(0.5);
    let y_margin = ((y_max - y_min) * 0.15).max(0.5);

    Bounds {
        x: [x_min - x_margin, x_max + x_margin],
        y: [y_min - y_margin, y_max + y_margin],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facets_group_in_first_seen_order() {
        let projection = UmapProjection {
            points: vec![[0.0, 0.0], [1.0, 1.0], [2.0, 2.0], [3.0, 3.0]],
            labels: vec![
                "Jam".to_string(),
                "Overheat".to_string(),
                "Jam".to_string(),
                "Overheat".to_string(),
            ],
        };
        let facets = facet_by_label(&projection);
        assert_eq!(facets.len(), 2);
        assert_eq!(facets[0].label, "Jam");
        assert_eq!(facets[0].points, vec![(0.0, 0.0), (2.0, 2.0)]);
        assert_eq!(facets[1].label, "Overheat");
    }

    #[test]
    fn facets_tolerate_length_mismatch() {
        let projection = UmapProjection {
            points: vec![[0.0, 0.0], [1.0, 1.0]],
            labels: vec!["Jam".to_string()],
        };
        let facets = facet_by_label(&projection);
        assert_eq!(facets.len(), 1);
        assert_eq!(facets[0].points.len(), 1);
    }

    #[test]
    fn bounds_pad_beyond_extremes() {
        let bounds = padded_bounds(&[(0.0, 0.0), (10.0, 4.0)]);
        assert!(bounds.x[0] < 0.0 && bounds.x[1] > 10.0);
        assert!(bounds.y[0] < 0.0 && bounds.y[1] > 4.0);
    }

    #[test]
    fn bounds_never_collapse_for_single_point() {
        let bounds = padded_bounds(&[(2.0, 3.0)]);
        assert!(bounds.x[1] - bounds.x[0] >= 1.0);
        assert!(bounds.y[1] - bounds.y[0] >= 1.0);
    }

    #[test]
    fn bar_width_fits_narrow_areas() {
        assert_eq!(bar_width(20, 10), 3);
        assert!(bar_width(120, 4) <= 12);
        assert_eq!(bar_width(40, 0), 1);
    }
}
