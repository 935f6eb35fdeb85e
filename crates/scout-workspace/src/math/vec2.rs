//! Point/offset type shared by screen and workspace coordinates

use std::ops::{Add, AddAssign, Div, Mul, Sub};

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2::new(0.0, 0.0);

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }
}

macro_rules! componentwise {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait for Vec2 {
            type Output = Vec2;
            #[inline]
            fn $method(self, rhs: Vec2) -> Vec2 {
                Vec2::new(self.x $op rhs.x, self.y $op rhs.y)
            }
        }
    };
}

macro_rules! scalar {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait<f32> for Vec2 {
            type Output = Vec2;
            #[inline]
            fn $method(self, k: f32) -> Vec2 {
                Vec2::new(self.x $op k, self.y $op k)
            }
        }
    };
}

componentwise!(Add, add, +);
componentwise!(Sub, sub, -);
scalar!(Mul, mul, *);
scalar!(Div, div, /);

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec2) {
        *self = *self + rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_workspace_mapping() {
        let offset = Vec2::new(150.0, 300.0);
        let scale = 2.0;
        let workspace = Vec2::new(10.0, -20.0);

        let screen = offset + workspace * scale;
        assert!((screen.x - 170.0).abs() < 0.001);
        assert!((screen.y - 260.0).abs() < 0.001);

        let back = (screen - offset) / scale;
        assert_eq!(back, workspace);
    }

    #[test]
    fn test_drag_deltas_accumulate() {
        let mut travel = Vec2::ZERO;
        for delta in [Vec2::new(4.0, -1.0), Vec2::new(-2.5, 6.0)] {
            travel += delta;
        }
        assert!((travel.x - 1.5).abs() < 0.001);
        assert!((travel.y - 5.0).abs() < 0.001);
    }
}
