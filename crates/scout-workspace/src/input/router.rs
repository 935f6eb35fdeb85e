//! Gesture tracking for the canvas and graph windows

use crate::math::{Size, Vec2};
use crate::window::WindowId;
use super::{DragState, Gesture};

/// Holds at most one gesture; beginning another replaces it.
#[derive(Debug, Default)]
pub struct InputRouter {
    drag: Option<DragState>,
}

impl InputRouter {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn drag_state(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    #[inline]
    pub fn is_panning(&self) -> bool {
        self.drag.as_ref().is_some_and(DragState::is_pan)
    }

    /// Pan button went down on the canvas at `start` (screen px)
    pub fn start_pan(&mut self, start: Vec2) {
        self.drag = Some(DragState::PanCanvas { start });
    }

    /// Track a move or resize of `window_id`.
    ///
    /// `position` and `size` are the window geometry at the moment the
    /// gesture begins; resizes are computed relative to them.
    pub fn begin_window_gesture(
        &mut self,
        window_id: WindowId,
        gesture: Gesture,
        position: Vec2,
        size: Size,
    ) {
        self.drag = Some(match gesture {
            Gesture::Move => DragState::MoveWindow { window_id },
            Gesture::Resize(handle) => DragState::ResizeWindow {
                window_id,
                handle,
                start_pos: position,
                start_size: size,
                accumulated: Vec2::ZERO,
            },
        });
    }

    /// Fold a pointer delta into an active resize and return the gesture.
    /// Moves and pans are returned unchanged.
    pub fn accumulate(&mut self, delta: Vec2) -> Option<&DragState> {
        if let Some(DragState::ResizeWindow { accumulated, .. }) = &mut self.drag {
            *accumulated += delta;
        }
        self.drag.as_ref()
    }

    pub fn end_drag(&mut self) -> Option<DragState> {
        self.drag.take()
    }

    /// Forget the gesture if it belongs to `window_id`
    pub fn cancel_for(&mut self, window_id: WindowId) {
        if self.drag.as_ref().and_then(DragState::window_id) == Some(window_id) {
            self.drag = None;
        }
    }
}
