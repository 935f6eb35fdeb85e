//! The single gesture the workspace is tracking

use crate::math::{Size, Vec2};
use crate::window::{ResizeHandle, WindowId};

/// Gesture in progress, either on the canvas or on one graph window
#[derive(Clone, Debug)]
pub enum DragState {
    /// Canvas pan started with the pan button at `start` (screen px)
    PanCanvas { start: Vec2 },
    /// Window following the drag library's move deltas
    MoveWindow { window_id: WindowId },
    /// Window being resized from `handle`.
    ///
    /// `start_pos`/`start_size` are the geometry when the gesture began and
    /// `accumulated` is the raw screen travel since then, so each step
    /// recomputes the rect from the origin instead of compounding rounding.
    ResizeWindow {
        window_id: WindowId,
        handle: ResizeHandle,
        start_pos: Vec2,
        start_size: Size,
        accumulated: Vec2,
    },
}

impl DragState {
    #[inline]
    pub fn is_pan(&self) -> bool {
        matches!(self, DragState::PanCanvas { .. })
    }

    #[inline]
    pub fn is_resize(&self) -> bool {
        matches!(self, DragState::ResizeWindow { .. })
    }

    /// Graph window the gesture belongs to; `None` while panning
    pub fn window_id(&self) -> Option<WindowId> {
        match *self {
            DragState::PanCanvas { .. } => None,
            DragState::MoveWindow { window_id } | DragState::ResizeWindow { window_id, .. } => {
                Some(window_id)
            }
        }
    }
}
