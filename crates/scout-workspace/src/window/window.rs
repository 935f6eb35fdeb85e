//! Graph window state

use serde::Serialize;

use crate::math::{Rect, Size, Vec2};
use super::WindowId;

/// Render status of a window's chart
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "lowercase")]
pub enum RenderState {
    /// A render ticket is outstanding
    #[default]
    Pending,
    /// A chart is attached
    Ready,
    /// The last render failed; only this window is affected
    Failed(String),
}

/// A floating window showing one category chart
#[derive(Clone, Debug, Serialize)]
pub struct GraphWindow {
    pub id: WindowId,
    /// Category shown by this window (at most one window per category)
    pub category: String,
    pub title: String,
    /// Top-left corner in workspace coordinates
    pub position: Vec2,
    pub size: Size,
    pub z_index: i32,
    pub visible: bool,
    pub locked: bool,
    pub focused: bool,
    /// Render generation; results carrying an older one are discarded
    pub generation: u64,
    pub render_state: RenderState,
}

impl GraphWindow {
    /// Window bounds in workspace coordinates
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.position, self.size)
    }
}
