//! Input routing module
//!
//! Provides the drag/resize state machine and the callback seam a drag
//! library drives.

mod router;
mod drag;
mod result;

pub use router::InputRouter;
pub use drag::DragState;
pub use result::InputResult;

use crate::math::{Size, Vec2};
use crate::window::{ResizeHandle, WindowId};

/// Gesture a drag library reports for a window
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gesture {
    /// Dragging the window by its header
    Move,
    /// Dragging an edge or corner
    Resize(ResizeHandle),
}

/// Callbacks a drag/resize library invokes on a graph window
///
/// The library only reports deltas; the implementor owns all position state.
pub trait DragCallbacks {
    /// Pointer went down on `target`
    fn on_start(&mut self, target: WindowId, gesture: Gesture) -> InputResult;

    /// Pointer moved by `delta` screen pixels since the last event
    fn on_move(&mut self, target: WindowId, delta: Vec2) -> InputResult;

    /// Pointer released
    fn on_end(&mut self, target: WindowId, now_ms: f64) -> InputResult;
}

/// Geometry after a resize from `handle` with total pointer travel `delta`.
///
/// The size is clamped to `min_size` first; a left or top handle then places
/// the window so its right or bottom edge stays where it started.
pub fn calculate_resize(
    handle: ResizeHandle,
    start_pos: Vec2,
    start_size: Size,
    delta: Vec2,
    min_size: Size,
) -> (Vec2, Size) {
    let grow_x = match (handle.moves_left(), handle.moves_right()) {
        (true, _) => -delta.x,
        (_, true) => delta.x,
        _ => 0.0,
    };
    let grow_y = match (handle.moves_top(), handle.moves_bottom()) {
        (true, _) => -delta.y,
        (_, true) => delta.y,
        _ => 0.0,
    };
    let size = Size::new(start_size.width + grow_x, start_size.height + grow_y).at_least(min_size);

    let mut pos = start_pos;
    if handle.moves_left() {
        pos.x += start_size.width - size.width;
    }
    if handle.moves_top() {
        pos.y += start_size.height - size.height;
    }
    (pos, size)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIN: Size = Size::new(200.0, 150.0);

    #[test]
    fn test_resize_south() {
        let (pos, size) = calculate_resize(
            ResizeHandle::S,
            Vec2::new(100.0, 100.0),
            Size::new(400.0, 300.0),
            Vec2::new(0.0, 50.0),
            MIN,
        );
        assert!((pos.x - 100.0).abs() < 0.001);
        assert!((pos.y - 100.0).abs() < 0.001);
        assert!((size.width - 400.0).abs() < 0.001);
        assert!((size.height - 350.0).abs() < 0.001);
    }

    #[test]
    fn test_resize_north() {
        let (pos, size) = calculate_resize(
            ResizeHandle::N,
            Vec2::new(100.0, 100.0),
            Size::new(400.0, 300.0),
            Vec2::new(0.0, -50.0),
            MIN,
        );
        assert!((pos.y - 50.0).abs() < 0.001);
        assert!((size.height - 350.0).abs() < 0.001);
    }

    #[test]
    fn test_resize_west_clamped_keeps_right_edge() {
        let (pos, size) = calculate_resize(
            ResizeHandle::W,
            Vec2::new(100.0, 100.0),
            Size::new(400.0, 300.0),
            Vec2::new(350.0, 0.0),
            MIN,
        );
        assert!((size.width - 200.0).abs() < 0.001);
        assert!((pos.x + size.width - 500.0).abs() < 0.001);
    }

    #[test]
    fn test_resize_southeast_clamped() {
        let (pos, size) = calculate_resize(
            ResizeHandle::SE,
            Vec2::new(0.0, 0.0),
            Size::new(900.0, 300.0),
            Vec2::new(-1000.0, 40.0),
            MIN,
        );
        assert_eq!(pos, Vec2::ZERO);
        assert!((size.width - 200.0).abs() < 0.001);
        assert!((size.height - 340.0).abs() < 0.001);
    }

    #[test]
    fn test_resize_northwest() {
        let (pos, size) = calculate_resize(
            ResizeHandle::NW,
            Vec2::new(50.0, 50.0),
            Size::new(900.0, 300.0),
            Vec2::new(-20.0, 10.0),
            MIN,
        );
        assert!((pos.x - 30.0).abs() < 0.001);
        assert!((pos.y - 60.0).abs() < 0.001);
        assert!((size.width - 920.0).abs() < 0.001);
        assert!((size.height - 290.0).abs() < 0.001);
    }
}
