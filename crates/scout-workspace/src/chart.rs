//! Chart seam and chart descriptions
//!
//! The workspace never draws charts itself. It builds a [`ChartSpec`] that the
//! host hands to its charting library, and talks to the rendered chart through
//! the [`ChartHandle`] trait.

use serde::{Deserialize, Serialize};

use crate::api::{CategoryPoint, ClimbHistogram, TeamPerformancePoint};
use crate::config::WorkspaceConfig;
use crate::math::Vec2;

/// One plotted data point with the scouting details shown in popups
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
    pub team: u32,
    pub scouter: String,
    pub notes: String,
}

/// Kind of chart
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
}

/// One series on a chart (one per team)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartDataset {
    pub label: String,
    pub color: String,
    pub points: Vec<ChartPoint>,
}

/// Redraw mode passed to the chart library
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateMode {
    /// Library default (animated)
    Default,
    /// Redraw without animation
    Immediate,
}

/// Rendered chart owned by a graph window
pub trait ChartHandle {
    /// Kind of chart; stacked-point badges only apply to line charts
    fn kind(&self) -> ChartKind;

    /// Datasets currently plotted
    fn datasets(&self) -> &[ChartDataset];

    /// Pixel position of a point relative to the chart area, if it is laid out
    fn point_position(&self, dataset: usize, index: usize) -> Option<Vec2>;

    /// Re-measure the container after a size change
    fn resize(&mut self);

    fn update(&mut self, mode: UpdateMode);

    /// Release the chart; the handle is dropped afterwards
    fn destroy(&mut self);
}

/// Axis range
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: Option<f64>,
}

/// Chart description handed to the host's charting library
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    /// Category labels (bar charts only)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
    pub x_axis: AxisRange,
    pub y_axis: AxisRange,
}

/// Labels of the climb histogram, in display order
pub const CLIMB_LABELS: [&str; 4] = ["Parked", "Shallow", "Deep", "None"];

/// Lower bound for the y-axis maximum of category charts
pub const CATEGORY_Y_FLOOR: f64 = 5.0;
/// Lower bound for the y-axis maximum of the team performance chart
pub const PERFORMANCE_Y_FLOOR: f64 = 10.0;

impl ChartSpec {
    /// Line chart, one dataset per team
    ///
    /// The x axis spans `0..ceil(max(max_x, 1) * 1.1)` and the y axis
    /// `0..ceil(max(max_y, y_floor) * 1.1)`.
    pub fn line(series: Vec<(u32, Vec<ChartPoint>)>, y_floor: f64, config: &WorkspaceConfig) -> Self {
        let datasets: Vec<ChartDataset> = series
            .into_iter()
            .enumerate()
            .map(|(i, (team, points))| ChartDataset {
                label: format!("Team {}", team),
                color: config.chart_color(i).to_string(),
                points,
            })
            .collect();

        let all = || datasets.iter().flat_map(|ds| ds.points.iter());
        let max_x = all().map(|p| p.x).fold(1.0, f64::max);
        let max_y = all().map(|p| p.y).fold(y_floor, f64::max);

        Self {
            kind: ChartKind::Line,
            labels: Vec::new(),
            x_axis: AxisRange { min: 0.0, max: Some((max_x * 1.1).ceil()) },
            y_axis: AxisRange { min: 0.0, max: Some((max_y * 1.1).ceil()) },
            datasets,
        }
    }

    /// Line chart of one category's value per match
    pub fn category(series: Vec<(u32, Vec<CategoryPoint>)>, config: &WorkspaceConfig) -> Self {
        let series = series
            .into_iter()
            .map(|(team, points)| (team, points.into_iter().map(|p| p.into_chart_point(team)).collect()))
            .collect();
        Self::line(series, CATEGORY_Y_FLOOR, config)
    }

    /// Line chart of total score per match
    pub fn performance(series: Vec<(u32, Vec<TeamPerformancePoint>)>, config: &WorkspaceConfig) -> Self {
        let series = series
            .into_iter()
            .map(|(team, points)| (team, points.into_iter().map(|p| p.into_chart_point(team)).collect()))
            .collect();
        Self::line(series, PERFORMANCE_Y_FLOOR, config)
    }

    /// Climb histogram: one bar per end state, one dataset per team
    pub fn climb(series: Vec<(u32, ClimbHistogram)>, config: &WorkspaceConfig) -> Self {
        let datasets = series
            .into_iter()
            .enumerate()
            .map(|(i, (team, histogram))| ChartDataset {
                label: format!("Team {}", team),
                color: config.chart_color(i).to_string(),
                points: histogram
                    .counts()
                    .iter()
                    .enumerate()
                    .map(|(bucket, count)| ChartPoint {
                        x: bucket as f64,
                        y: *count as f64,
                        team,
                        scouter: String::new(),
                        notes: String::new(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            kind: ChartKind::Bar,
            labels: CLIMB_LABELS.iter().map(|l| l.to_string()).collect(),
            datasets,
            x_axis: AxisRange { min: 0.0, max: None },
            y_axis: AxisRange { min: 0.0, max: None },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: f64, y: f64, team: u32) -> ChartPoint {
        ChartPoint { x, y, team, scouter: "ana".into(), notes: String::new() }
    }

    #[test]
    fn test_line_axes() {
        let config = WorkspaceConfig::default();
        let spec = ChartSpec::line(
            vec![(254, vec![point(1.0, 3.0, 254), point(12.0, 9.0, 254)])],
            CATEGORY_Y_FLOOR,
            &config,
        );
        assert_eq!(spec.kind, ChartKind::Line);
        assert_eq!(spec.x_axis.max, Some(14.0));
        assert_eq!(spec.y_axis.max, Some(10.0));
    }

    #[test]
    fn test_line_axes_floor_when_empty() {
        let config = WorkspaceConfig::default();
        let spec = ChartSpec::line(vec![(254, vec![])], CATEGORY_Y_FLOOR, &config);
        assert_eq!(spec.x_axis.max, Some(2.0));
        assert_eq!(spec.y_axis.max, Some(6.0));
    }

    #[test]
    fn test_line_colors_and_labels() {
        let config = WorkspaceConfig::default();
        let series = (0..6).map(|i| (100 + i, vec![])).collect();
        let spec = ChartSpec::line(series, CATEGORY_Y_FLOOR, &config);
        assert_eq!(spec.datasets[0].label, "Team 100");
        assert_eq!(spec.datasets[1].color, "#ff5252");
        assert_eq!(spec.datasets[5].color, spec.datasets[0].color);
    }

    #[test]
    fn test_climb_histogram() {
        let config = WorkspaceConfig::default();
        let histogram = ClimbHistogram { parked: 2, shallow: 0, deep: 5, none: 1 };
        let spec = ChartSpec::climb(vec![(1114, histogram)], &config);
        assert_eq!(spec.kind, ChartKind::Bar);
        assert_eq!(spec.labels, vec!["Parked", "Shallow", "Deep", "None"]);
        let ys: Vec<f64> = spec.datasets[0].points.iter().map(|p| p.y).collect();
        assert_eq!(ys, vec![2.0, 0.0, 5.0, 1.0]);
    }
}
