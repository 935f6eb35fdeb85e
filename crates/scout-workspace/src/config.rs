//! Workspace configuration
//!
//! Every tunable constant of the graph workspace lives here. The host may
//! pass a partial JSON object; missing fields keep their defaults.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::WorkspaceError;
use crate::math::{Size, Vec2};

/// Configuration for a [`ScoutWorkspace`](crate::ScoutWorkspace)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Lower bound for the canvas scale
    pub min_scale: f32,
    /// Upper bound for the canvas scale
    pub max_scale: f32,
    /// Wheel factor applied when scrolling up (negative deltaY)
    pub zoom_in_step: f32,
    /// Wheel factor applied when scrolling down (positive deltaY)
    pub zoom_out_step: f32,
    /// Pointer button that pans the canvas (1 = middle)
    pub pan_button: u8,
    /// Whether panning stays available while the workspace is locked
    pub pan_while_locked: bool,
    /// Size given to newly opened graph windows
    pub default_window_size: Size,
    /// Smallest size a resize gesture may produce
    pub min_window_size: Size,
    /// Position of the first graph window
    pub cascade_base: Vec2,
    /// Offset added per already-open window
    pub cascade_step: f32,
    /// Gap between windows in the auto-layout grid
    pub layout_gap: f32,
    /// Padding kept around the windows by reset view
    pub fit_padding: f32,
    /// Fraction of the viewport a focused window fills
    pub focus_fill_ratio: f32,
    /// Stacking order of unfocused windows
    pub z_baseline: i32,
    /// Stacking order of the focused window
    pub z_focused: i32,
    /// Background grid cell size at scale 1
    pub grid_size: f32,
    /// Height of a graph window's header above its chart
    pub graph_header_height: f32,
    /// Maximum number of team selectors
    pub max_teams: usize,
    /// Divide resize deltas by the canvas scale (move deltas always are)
    pub resize_scale_compensation: bool,
    /// Settle delay after auto-layout before re-framing (ms)
    pub layout_settle_ms: f64,
    /// Settle delay after a resize ends before re-measuring overlays (ms)
    pub resize_settle_ms: f64,
    /// Duration of animated canvas transforms (ms)
    pub transform_animation_ms: f64,
    /// Settle delay after re-rendering every graph (ms)
    pub refresh_settle_ms: f64,
    /// Dataset colors, cycled per team
    pub chart_colors: Vec<String>,
    /// Display names for known categories
    pub category_names: BTreeMap<String, String>,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.3,
            max_scale: 3.0,
            zoom_in_step: 1.1,
            zoom_out_step: 0.9,
            pan_button: 1,
            pan_while_locked: false,
            default_window_size: Size::new(900.0, 300.0),
            min_window_size: Size::new(200.0, 150.0),
            cascade_base: Vec2::new(50.0, 50.0),
            cascade_step: 30.0,
            layout_gap: 20.0,
            fit_padding: 50.0,
            focus_fill_ratio: 0.7,
            z_baseline: 100,
            z_focused: 200,
            grid_size: 50.0,
            graph_header_height: 32.0,
            max_teams: 5,
            resize_scale_compensation: false,
            layout_settle_ms: 100.0,
            resize_settle_ms: 50.0,
            transform_animation_ms: 500.0,
            refresh_settle_ms: 500.0,
            chart_colors: DEFAULT_CHART_COLORS
                .iter()
                .map(|c| c.to_string())
                .collect(),
            category_names: default_category_names(),
        }
    }
}

const DEFAULT_CHART_COLORS: [&str; 5] = ["#5ca8ff", "#ff5252", "#4caf50", "#ffa726", "#ab47bc"];

fn default_category_names() -> BTreeMap<String, String> {
    [
        ("auto_coral", "Auto Coral"),
        ("autoncoral1", "Auto L1"),
        ("autoncoral2", "Auto L2"),
        ("autoncoral3", "Auto L3"),
        ("autoncoral4", "Auto L4"),
        ("tele_coral", "Tele Coral"),
        ("telecoral1", "Tele L1"),
        ("telecoral2", "Tele L2"),
        ("telecoral3", "Tele L3"),
        ("telecoral4", "Tele L4"),
        ("total_coral", "Total Coral"),
        ("net", "Net"),
        ("processor", "Processor"),
        ("climb", "Climb"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

impl WorkspaceConfig {
    /// Parse a (possibly partial) JSON configuration
    pub fn from_json(json: &str) -> Result<Self, WorkspaceError> {
        let mut config: WorkspaceConfig = serde_json::from_str(json)?;
        config.sanitize();
        Ok(config)
    }

    /// Repair values that would break the transform invariants.
    ///
    /// [`from_json`](Self::from_json) and [`ScoutWorkspace::new`](crate::ScoutWorkspace::new)
    /// both apply it, so struct literals and plain serde configs are covered.
    pub fn sanitize(&mut self) {
        if !(self.min_scale > 0.0) {
            self.min_scale = 0.3;
        }
        if !(self.max_scale >= self.min_scale) {
            self.max_scale = self.min_scale;
        }
        self.default_window_size = self.default_window_size.at_least(self.min_window_size);
        if self.chart_colors.is_empty() {
            self.chart_colors = DEFAULT_CHART_COLORS.iter().map(|c| c.to_string()).collect();
        }
    }

    /// Human readable title for a category
    pub fn category_display_name(&self, category: &str) -> String {
        match self.category_names.get(category) {
            Some(name) => name.clone(),
            None => category.replace('_', " ").to_uppercase(),
        }
    }

    /// Color for the dataset at `index`; an empty palette uses the default one
    pub fn chart_color(&self, index: usize) -> &str {
        match self.chart_colors.len() {
            0 => DEFAULT_CHART_COLORS[index % DEFAULT_CHART_COLORS.len()],
            n => &self.chart_colors[index % n],
        }
    }
}
