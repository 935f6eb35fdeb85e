//! Packed grid layout
//!
//! Arranges windows row-major in a near-square grid. Each row is as tall as its
//! tallest window and each window advances x by its own width, so mixed sizes
//! pack without overlapping. The whole grid is centered on the workspace origin.

use crate::math::{Size, Vec2};

/// Rows and columns of a packed grid
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridShape {
    pub cols: usize,
    pub rows: usize,
}

impl GridShape {
    /// `cols = ceil(sqrt(n))`, `rows = ceil(n / cols)`
    pub fn for_count(n: usize) -> Self {
        if n == 0 {
            return Self { cols: 0, rows: 0 };
        }
        let cols = (n as f64).sqrt().ceil() as usize;
        let rows = n.div_ceil(cols);
        Self { cols, rows }
    }
}

/// Top-left positions for `sizes`, in the same order
pub fn pack_grid(sizes: &[Size], gap: f32) -> Vec<Vec2> {
    let shape = GridShape::for_count(sizes.len());
    if shape.cols == 0 {
        return Vec::new();
    }

    let rows: Vec<&[Size]> = sizes.chunks(shape.cols).collect();
    let row_width = |row: &[Size]| -> f32 {
        row.iter().map(|s| s.width).sum::<f32>() + gap * row.len().saturating_sub(1) as f32
    };
    let row_height = |row: &[Size]| -> f32 { row.iter().map(|s| s.height).fold(0.0, f32::max) };

    let total_width = rows.iter().map(|r| row_width(r)).fold(0.0, f32::max);
    let total_height =
        rows.iter().map(|r| row_height(r)).sum::<f32>() + gap * rows.len().saturating_sub(1) as f32;

    let origin = Vec2::new(-total_width / 2.0, -total_height / 2.0);
    let mut positions = Vec::with_capacity(sizes.len());
    let mut y = origin.y;
    for row in &rows {
        let mut x = origin.x;
        for size in row.iter() {
            positions.push(Vec2::new(x, y));
            x += size.width + gap;
        }
        y += row_height(row) + gap;
    }
    positions
}
