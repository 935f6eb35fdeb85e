//! Stacked-point overlays
//!
//! Points plotted at exactly the same `(x, y)` hide each other. Every bucket
//! of two or more coincident points gets a badge showing the count, anchored
//! at the first point's pixel position as reported by the chart itself.

mod popup;

pub use popup::{Popup, PopupContent};

use std::collections::HashMap;

use serde::Serialize;

use crate::chart::{ChartDataset, ChartHandle, ChartKind, ChartPoint};
use crate::math::Vec2;
use crate::transform::WorkspaceTransform;
use crate::window::{GraphWindow, WindowId};

/// Half the badge size; the badge is centered on its anchor
pub const BADGE_RADIUS: f32 = 9.0;

/// Location of a point inside a chart
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointRef {
    pub dataset: usize,
    pub index: usize,
}

/// Exact-equality key; `-0.0` and `0.0` share a bucket
fn point_key(x: f64, y: f64) -> (u64, u64) {
    let norm = |v: f64| if v == 0.0 { 0.0f64.to_bits() } else { v.to_bits() };
    (norm(x), norm(y))
}

/// Group every point by exact `(x, y)`, buckets in first-seen order
///
/// Points with a NaN coordinate never stack.
pub fn bucket_points(datasets: &[ChartDataset]) -> Vec<Vec<PointRef>> {
    let mut index: HashMap<(u64, u64), usize> = HashMap::new();
    let mut buckets: Vec<Vec<PointRef>> = Vec::new();

    for (d, dataset) in datasets.iter().enumerate() {
        for (i, point) in dataset.points.iter().enumerate() {
            if point.x.is_nan() || point.y.is_nan() {
                continue;
            }
            let slot = *index.entry(point_key(point.x, point.y)).or_insert_with(|| {
                buckets.push(Vec::new());
                buckets.len() - 1
            });
            buckets[slot].push(PointRef { dataset: d, index: i });
        }
    }
    buckets
}

/// Every point at exactly `(x, y)` across all datasets
pub fn stacked_at(datasets: &[ChartDataset], x: f64, y: f64) -> Vec<ChartPoint> {
    let key = point_key(x, y);
    datasets
        .iter()
        .flat_map(|ds| ds.points.iter())
        .filter(|p| !p.x.is_nan() && !p.y.is_nan() && point_key(p.x, p.y) == key)
        .cloned()
        .collect()
}

/// Chart a badge or popup belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "chart", content = "window", rename_all = "lowercase")]
pub enum ChartSource {
    /// Team performance chart above the workspace
    Performance,
    /// Chart inside a graph window
    Graph(WindowId),
}

impl From<WindowId> for ChartSource {
    fn from(id: WindowId) -> Self {
        ChartSource::Graph(id)
    }
}

/// Count badge over a stack of coincident points
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StackBadge {
    pub source: ChartSource,
    pub count: usize,
    /// Badge left edge relative to the chart area
    pub left: f32,
    /// Badge top edge relative to the chart area
    pub top: f32,
    /// The stacked points, in dataset order
    pub points: Vec<ChartPoint>,
}

impl StackBadge {
    /// Badge text
    pub fn label(&self) -> String {
        self.count.to_string()
    }

    /// Screen position of the badge's top-left corner
    pub fn screen_position(&self, window: &GraphWindow, transform: &WorkspaceTransform, header_height: f32) -> Vec2 {
        let local = window.position + Vec2::new(self.left, header_height + self.top);
        transform.workspace_to_screen(local)
    }
}

/// Regenerate the badges of one chart
///
/// Only line charts carry badges. Stacks whose first point has no pixel
/// position yet are skipped.
pub fn build_badges(source: impl Into<ChartSource>, chart: &dyn ChartHandle) -> Vec<StackBadge> {
    if chart.kind() != ChartKind::Line {
        return Vec::new();
    }
    let source = source.into();
    let datasets = chart.datasets();

    bucket_points(datasets)
        .into_iter()
        .filter(|bucket| bucket.len() > 1)
        .filter_map(|bucket| {
            let first = bucket[0];
            let anchor = chart.point_position(first.dataset, first.index)?;
            let points = bucket
                .iter()
                .filter_map(|r| datasets.get(r.dataset)?.points.get(r.index).cloned())
                .collect::<Vec<_>>();
            Some(StackBadge {
                source,
                count: points.len(),
                left: anchor.x - BADGE_RADIUS,
                top: anchor.y - BADGE_RADIUS,
                points,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingChart;

    fn point(x: f64, y: f64, team: u32) -> ChartPoint {
        ChartPoint { x, y, team, scouter: String::new(), notes: String::new() }
    }

    fn dataset(points: Vec<ChartPoint>) -> ChartDataset {
        ChartDataset { label: "t".into(), color: "#fff".into(), points }
    }

    #[test]
    fn test_two_coincident_points_make_one_badge() {
        let chart = RecordingChart::line(vec![
            dataset(vec![point(3.0, 7.0, 254)]),
            dataset(vec![point(3.0, 7.0, 1114)]),
        ]);
        let badges = build_badges(WindowId(1), &chart);
        assert_eq!(badges.len(), 1);
        assert_eq!(badges[0].source, ChartSource::Graph(WindowId(1)));
        assert_eq!(badges[0].label(), "2");
        assert_eq!(badges[0].points[0].team, 254);
        assert_eq!(badges[0].points[1].team, 1114);
    }

    #[test]
    fn test_distinct_point_makes_no_badge() {
        let chart = RecordingChart::line(vec![
            dataset(vec![point(3.0, 7.0, 254)]),
            dataset(vec![point(3.0, 7.5, 1114)]),
        ]);
        assert!(build_badges(WindowId(1), &chart).is_empty());
    }

    #[test]
    fn test_badge_anchor_uses_first_point_pixel() {
        let chart = RecordingChart::line(vec![
            dataset(vec![point(2.0, 4.0, 1)]),
            dataset(vec![point(2.0, 4.0, 2)]),
            dataset(vec![point(2.0, 4.0, 3)]),
        ]);
        let anchor = chart.point_position(0, 0).unwrap();
        let badges = build_badges(WindowId(1), &chart);
        assert_eq!(badges[0].count, 3);
        assert!((badges[0].left - (anchor.x - 9.0)).abs() < 0.001);
        assert!((badges[0].top - (anchor.y - 9.0)).abs() < 0.001);
    }

    #[test]
    fn test_no_epsilon() {
        let datasets = vec![
            dataset(vec![point(1.0, 0.1 + 0.2, 1)]),
            dataset(vec![point(1.0, 0.3, 2)]),
        ];
        assert!(bucket_points(&datasets).iter().all(|b| b.len() == 1));
    }

    #[test]
    fn test_negative_zero_and_nan() {
        let datasets = vec![
            dataset(vec![point(0.0, -0.0, 1), point(f64::NAN, 1.0, 1)]),
            dataset(vec![point(-0.0, 0.0, 2), point(f64::NAN, 1.0, 2)]),
        ];
        let buckets = bucket_points(&datasets);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].len(), 2);
    }

    #[test]
    fn test_bar_chart_has_no_badges() {
        let chart = RecordingChart::bar(vec![
            dataset(vec![point(0.0, 1.0, 1)]),
            dataset(vec![point(0.0, 1.0, 2)]),
        ]);
        assert!(build_badges(WindowId(1), &chart).is_empty());
    }

    #[test]
    fn test_performance_chart_badges() {
        let chart = RecordingChart::line(vec![
            dataset(vec![point(5.0, 12.0, 254)]),
            dataset(vec![point(5.0, 12.0, 1114)]),
        ]);
        let badges = build_badges(ChartSource::Performance, &chart);
        assert_eq!(badges.len(), 1);
        assert_eq!(badges[0].source, ChartSource::Performance);
        assert_eq!(
            serde_json::to_string(&badges[0].source).unwrap(),
            r#"{"chart":"performance"}"#
        );
    }

    #[test]
    fn test_stacked_at() {
        let datasets = vec![
            dataset(vec![point(3.0, 7.0, 1), point(4.0, 7.0, 1)]),
            dataset(vec![point(3.0, 7.0, 2)]),
        ];
        let stacked = stacked_at(&datasets, 3.0, 7.0);
        assert_eq!(stacked.len(), 2);
        assert_eq!(stacked_at(&datasets, 4.0, 7.0).len(), 1);
    }

    #[test]
    fn test_badge_screen_position() {
        let chart = RecordingChart::line(vec![
            dataset(vec![point(3.0, 7.0, 1)]),
            dataset(vec![point(3.0, 7.0, 2)]),
        ]);
        let badge = build_badges(WindowId(1), &chart).remove(0);

        let window = GraphWindow {
            id: WindowId(1),
            category: "net".into(),
            title: "Net".into(),
            position: Vec2::new(100.0, 50.0),
            size: crate::math::Size::new(900.0, 300.0),
            z_index: 100,
            visible: true,
            locked: false,
            focused: false,
            generation: 0,
            render_state: Default::default(),
        };
        let mut transform = WorkspaceTransform::default();
        transform.scale = 2.0;
        transform.offset = Vec2::new(10.0, 10.0);

        let screen = badge.screen_position(&window, &transform, 32.0);
        assert!((screen.x - (10.0 + (100.0 + badge.left) * 2.0)).abs() < 0.001);
        assert!((screen.y - (10.0 + (50.0 + 32.0 + badge.top) * 2.0)).abs() < 0.001);
    }
}
