//! Input handling for pointer, wheel and drag-library events

use crate::input::{calculate_resize, DragCallbacks, DragState, Gesture, InputResult};
use crate::math::Vec2;
use crate::window::WindowId;
use super::{ScoutWorkspace, SettleTask};

impl ScoutWorkspace {
    /// Handle pointer down on the workspace background
    ///
    /// Only the pan button is handled; windows receive their gestures through
    /// [`DragCallbacks`].
    pub fn handle_pointer_down(&mut self, x: f32, y: f32, button: u8) -> InputResult {
        if button != self.config.pan_button {
            return InputResult::Unhandled;
        }
        if self.registry.is_locked() && !self.config.pan_while_locked {
            return InputResult::Unhandled;
        }
        // a window drag or resize keeps the pointer until it ends
        if self.window_gesture_active() {
            return InputResult::Unhandled;
        }

        let screen_pos = Vec2::new(x, y);
        self.transform.begin_pan(screen_pos);
        self.input.start_pan(screen_pos);
        self.transform_animated = false;
        InputResult::Handled
    }

    /// Handle pointer move; follows an active pan
    pub fn handle_pointer_move(&mut self, x: f32, y: f32) -> InputResult {
        if !self.input.is_panning() {
            return InputResult::Unhandled;
        }
        if !self.transform.pan_to(Vec2::new(x, y)) {
            return InputResult::Unhandled;
        }
        self.refresh_all_overlays();
        InputResult::Handled
    }

    /// Handle pointer up; only the pan button ends a pan
    pub fn handle_pointer_up(&mut self, button: u8) -> InputResult {
        if button != self.config.pan_button {
            return InputResult::Unhandled;
        }
        self.handle_pointer_leave()
    }

    /// Pointer left the workspace element; a pan in progress ends
    pub fn handle_pointer_leave(&mut self) -> InputResult {
        self.end_pan().into()
    }

    /// Stop a canvas pan. Returns whether one was active.
    pub(crate) fn end_pan(&mut self) -> bool {
        let was_panning = self.transform.end_pan();
        if self.input.is_panning() {
            self.input.end_drag();
        }
        was_panning
    }

    /// Handle wheel zoom about the cursor
    ///
    /// Scrolling down zooms out, up zooms in. Zoom works while locked.
    pub fn handle_wheel(&mut self, x: f32, y: f32, dy: f32) -> InputResult {
        if dy == 0.0 || !dy.is_finite() {
            return InputResult::Unhandled;
        }
        let factor = if dy > 0.0 { self.config.zoom_out_step } else { self.config.zoom_in_step };
        if self.transform.zoom_at(Vec2::new(x, y), factor) {
            self.transform_animated = false;
            self.refresh_all_overlays();
        }
        InputResult::Handled
    }

    fn window_gesture_active(&self) -> bool {
        self.input.drag_state().is_some_and(|d| d.window_id().is_some())
    }

    /// End a window drag or resize without a drag-library `on_end`.
    ///
    /// Geometry reached so far is flushed to the store and a resized
    /// window's badges are rebuilt.
    pub(crate) fn drop_window_gesture(&mut self) -> bool {
        if !self.window_gesture_active() {
            return false;
        }
        if let Some(DragState::ResizeWindow { window_id, .. }) = self.input.end_drag() {
            self.refresh_overlays(window_id);
        }
        self.persist_geometry();
        true
    }

    /// Active window gesture for `target`, if any
    fn window_gesture(&self, target: WindowId) -> Option<&DragState> {
        self.input
            .drag_state()
            .filter(|state| state.window_id() == Some(target))
    }
}

impl DragCallbacks for ScoutWorkspace {
    fn on_start(&mut self, target: WindowId, gesture: Gesture) -> InputResult {
        if self.registry.is_locked() {
            return InputResult::Unhandled;
        }
        let Some(window) = self.registry.get(target).filter(|w| w.visible) else {
            return InputResult::Unhandled;
        };
        let (start_pos, start_size) = (window.position, window.size);

        self.end_pan();
        self.drop_window_gesture();
        self.focus_window(target);
        self.input.begin_window_gesture(target, gesture, start_pos, start_size);
        InputResult::Handled
    }

    fn on_move(&mut self, target: WindowId, delta: Vec2) -> InputResult {
        if self.registry.is_locked() || self.window_gesture(target).is_none() {
            return InputResult::Unhandled;
        }

        let state = match self.input.accumulate(delta) {
            Some(state) => state.clone(),
            None => return InputResult::Unhandled,
        };

        match state {
            DragState::MoveWindow { window_id } => {
                let Some(position) = self.registry.get(window_id).map(|w| w.position) else {
                    return InputResult::Unhandled;
                };
                self.registry
                    .move_window(window_id, position + delta / self.transform.scale);
                self.registry.record_geometry(window_id);
                InputResult::Handled
            }
            DragState::ResizeWindow { window_id, handle, start_pos, start_size, accumulated } => {
                let travel = if self.config.resize_scale_compensation {
                    accumulated / self.transform.scale
                } else {
                    accumulated
                };
                let (pos, size) = calculate_resize(
                    handle,
                    start_pos,
                    start_size,
                    travel,
                    self.config.min_window_size,
                );
                self.registry.set_rect(window_id, pos, size);
                self.registry.record_geometry(window_id);
                self.resize_charts(&[window_id]);
                // badge positions are stale until the chart settles
                self.clear_overlays(window_id);
                InputResult::Handled
            }
            DragState::PanCanvas { .. } => InputResult::Unhandled,
        }
    }

    fn on_end(&mut self, target: WindowId, now_ms: f64) -> InputResult {
        if self.window_gesture(target).is_none() {
            return InputResult::Unhandled;
        }
        let Some(state) = self.input.end_drag() else {
            return InputResult::Unhandled;
        };

        if state.is_resize() {
            self.settle.schedule(
                SettleTask::RefreshOverlays(target),
                now_ms + self.config.resize_settle_ms,
            );
        }
        self.persist_geometry();
        InputResult::Handled
    }
}
