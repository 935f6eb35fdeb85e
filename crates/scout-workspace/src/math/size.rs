//! Width/height pair for windows and the viewport

use serde::{Deserialize, Serialize};
use super::Vec2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Per-axis maximum with `min`
    #[inline]
    pub fn at_least(self, min: Size) -> Self {
        Self::new(self.width.max(min.width), self.height.max(min.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_half_extent() {
        let half = Size::new(1920.0, 1080.0).as_vec2() * 0.5;
        assert!((half.x - 960.0).abs() < 0.001);
        assert!((half.y - 540.0).abs() < 0.001);
    }

    #[test]
    fn test_at_least_clamps_each_axis() {
        let s = Size::new(50.0, 500.0).at_least(Size::new(200.0, 150.0));
        assert!((s.width - 200.0).abs() < 0.001);
        assert!((s.height - 500.0).abs() < 0.001);
    }
}
