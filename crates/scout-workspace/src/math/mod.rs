//! Core geometry types for the graph workspace
//!
//! These types provide basic 2D math for positioning and sizing graph
//! windows in workspace space and mapping them onto the screen.

mod vec2;
mod rect;
mod size;

pub use vec2::Vec2;
pub use rect::Rect;
pub use size::Size;
