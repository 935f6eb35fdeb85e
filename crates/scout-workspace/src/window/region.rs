//! Resize handles on a graph window's edges

use serde::{Deserialize, Serialize};

/// Edge or corner grabbed by a resize gesture
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeHandle {
    /// North (top) edge
    N,
    /// South (bottom) edge
    S,
    /// East (right) edge
    E,
    /// West (left) edge
    W,
    NE,
    NW,
    SE,
    SW,
}

impl ResizeHandle {
    /// Parse an edge set such as `"se"`, `"bottom right"` or `"w"`
    pub fn from_edges(edges: &str) -> Option<Self> {
        let edges = edges.to_ascii_lowercase();
        let mut north = false;
        let mut south = false;
        let mut east = false;
        let mut west = false;

        if edges.contains("top") || edges.contains("bottom") || edges.contains("left") || edges.contains("right") {
            north = edges.contains("top");
            south = edges.contains("bottom");
            west = edges.contains("left");
            east = edges.contains("right");
        } else {
            for c in edges.chars() {
                match c {
                    'n' => north = true,
                    's' => south = true,
                    'e' => east = true,
                    'w' => west = true,
                    ' ' | '-' => {}
                    _ => return None,
                }
            }
        }

        match (north, south, east, west) {
            (true, false, false, false) => Some(ResizeHandle::N),
            (false, true, false, false) => Some(ResizeHandle::S),
            (false, false, true, false) => Some(ResizeHandle::E),
            (false, false, false, true) => Some(ResizeHandle::W),
            (true, false, true, false) => Some(ResizeHandle::NE),
            (true, false, false, true) => Some(ResizeHandle::NW),
            (false, true, true, false) => Some(ResizeHandle::SE),
            (false, true, false, true) => Some(ResizeHandle::SW),
            _ => None,
        }
    }

    /// Handle moves the left edge
    #[inline]
    pub fn moves_left(&self) -> bool {
        matches!(self, ResizeHandle::W | ResizeHandle::NW | ResizeHandle::SW)
    }

    /// Handle moves the top edge
    #[inline]
    pub fn moves_top(&self) -> bool {
        matches!(self, ResizeHandle::N | ResizeHandle::NE | ResizeHandle::NW)
    }

    /// Handle moves the right edge
    #[inline]
    pub fn moves_right(&self) -> bool {
        matches!(self, ResizeHandle::E | ResizeHandle::NE | ResizeHandle::SE)
    }

    /// Handle moves the bottom edge
    #[inline]
    pub fn moves_bottom(&self) -> bool {
        matches!(self, ResizeHandle::S | ResizeHandle::SE | ResizeHandle::SW)
    }
}
