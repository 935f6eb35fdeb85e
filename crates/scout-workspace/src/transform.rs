//! Canvas pan/zoom transform
//!
//! Maps workspace coordinates onto the screen with
//! `screen = offset + workspace * scale`.

use serde::{Deserialize, Serialize};

use crate::math::{Rect, Size, Vec2};

/// Pan/zoom state of the workspace canvas
///
/// Invariant: `min_scale <= scale <= max_scale` after every operation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceTransform {
    /// Current zoom (1.0 = 100%)
    pub scale: f32,
    /// Screen position of the workspace origin
    pub offset: Vec2,
    /// True while the pan button is held
    pub is_panning: bool,
    /// Cursor minus offset at the start of a pan
    pub pan_start: Vec2,
    pub min_scale: f32,
    pub max_scale: f32,
}

impl Default for WorkspaceTransform {
    fn default() -> Self {
        Self::new(0.3, 3.0)
    }
}

/// CSS projection of the transform for the host renderer
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CanvasStyle {
    /// `translate(Xpx, Ypx) scale(S)`
    pub transform: String,
    /// Background grid position (follows the offset)
    pub background_position: Vec2,
    /// Background grid cell size (`grid_size * scale`)
    pub background_size: f32,
}

impl WorkspaceTransform {
    /// Create an identity transform with the given scale bounds.
    /// Bounds given in the wrong order are swapped; a NaN bound becomes 1.
    pub fn new(min_scale: f32, max_scale: f32) -> Self {
        let finite_or_one = |v: f32| if v.is_nan() { 1.0 } else { v };
        let (min_scale, max_scale) = (finite_or_one(min_scale), finite_or_one(max_scale));
        let (min_scale, max_scale) = if min_scale <= max_scale {
            (min_scale, max_scale)
        } else {
            (max_scale, min_scale)
        };
        Self {
            scale: 1.0_f32.clamp(min_scale, max_scale),
            offset: Vec2::ZERO,
            is_panning: false,
            pan_start: Vec2::ZERO,
            min_scale,
            max_scale,
        }
    }

    /// Translate the canvas by a screen-space delta
    #[inline]
    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.offset.x += dx;
        self.offset.y += dy;
    }

    /// Zoom about a screen-space cursor
    ///
    /// The workspace point under the cursor stays under the cursor. Returns
    /// false (and changes nothing) when the clamped scale is unchanged.
    pub fn zoom_at(&mut self, cursor: Vec2, factor: f32) -> bool {
        if !factor.is_finite() || factor <= 0.0 {
            return false;
        }
        let new_scale = (self.scale * factor).clamp(self.min_scale, self.max_scale);
        if new_scale == self.scale {
            return false;
        }
        let ratio = new_scale / self.scale;
        self.offset = cursor - (cursor - self.offset) * ratio;
        self.scale = new_scale;
        true
    }

    /// Back to scale 1 at the origin
    pub fn reset(&mut self) {
        self.scale = 1.0_f32.clamp(self.min_scale, self.max_scale);
        self.offset = Vec2::ZERO;
    }

    /// Fit every rect into the viewport, never zooming in past 1
    ///
    /// An empty set resets the transform.
    pub fn fit_to_windows(&mut self, rects: &[Rect], viewport: Size, padding: f32) {
        let Some(bounds) = Rect::bounding(rects) else {
            self.reset();
            return;
        };
        let sx = axis_scale(viewport.width - 2.0 * padding, bounds.width);
        let sy = axis_scale(viewport.height - 2.0 * padding, bounds.height);
        self.center_on(bounds, sx.min(sy).min(1.0), viewport);
    }

    /// Frame one rect so it fills `fill_ratio` of the viewport
    pub fn frame_rect(&mut self, rect: Rect, viewport: Size, fill_ratio: f32) {
        let sx = axis_scale(viewport.width * fill_ratio, rect.width);
        let sy = axis_scale(viewport.height * fill_ratio, rect.height);
        self.center_on(rect, sx.min(sy).min(self.max_scale), viewport);
    }

    fn center_on(&mut self, bounds: Rect, scale: f32, viewport: Size) {
        let scale = if scale.is_finite() { scale } else { 1.0 };
        self.scale = scale.clamp(self.min_scale, self.max_scale);
        self.offset = viewport.as_vec2() * 0.5 - bounds.center() * self.scale;
    }

    /// Convert a workspace point to screen coordinates
    #[inline]
    pub fn workspace_to_screen(&self, p: Vec2) -> Vec2 {
        self.offset + p * self.scale
    }

    /// Convert a screen point to workspace coordinates
    #[inline]
    pub fn screen_to_workspace(&self, p: Vec2) -> Vec2 {
        (p - self.offset) / self.scale
    }

    /// Start panning with the cursor at `cursor`
    pub fn begin_pan(&mut self, cursor: Vec2) {
        self.is_panning = true;
        self.pan_start = cursor - self.offset;
    }

    /// Follow the cursor during a pan (no-op when not panning)
    pub fn pan_to(&mut self, cursor: Vec2) -> bool {
        if !self.is_panning {
            return false;
        }
        self.offset = cursor - self.pan_start;
        true
    }

    /// Stop panning
    pub fn end_pan(&mut self) -> bool {
        std::mem::replace(&mut self.is_panning, false)
    }

    /// CSS projection for the canvas element and its grid background
    pub fn canvas_style(&self, grid_size: f32) -> CanvasStyle {
        CanvasStyle {
            transform: format!(
                "translate({}px, {}px) scale({})",
                self.offset.x, self.offset.y, self.scale
            ),
            background_position: self.offset,
            background_size: grid_size * self.scale,
        }
    }
}

/// Scale that fits `extent` into `available`; degenerate extents never constrain
fn axis_scale(available: f32, extent: f32) -> f32 {
    if extent > 0.0 {
        available / extent
    } else {
        f32::INFINITY
    }
}
