//! Floating graph workspace for the scouting dashboard
//!
//! This crate provides the state behind the dashboard's chart area:
//! - Pan/zoom canvas transform
//! - Graph windows (open, close, minimize, focus, drag, resize)
//! - Auto-layout and view fitting
//! - Stacked-point badges and popups over line charts
//! - Taskbar mirror of the open windows
//! - Team selection and persisted window geometry
//!
//! ## Architecture
//!
//! - [`math`]: Geometry types (`Vec2`, `Size`, `Rect`)
//! - [`transform`]: Canvas pan/zoom
//! - [`window`]: Graph windows and the window registry
//! - [`input`]: Drag/resize state machine and drag-library callbacks
//! - [`layout`]: Grid packing for auto-layout
//! - [`overlay`]: Stacked-point detection, badges and popups
//! - [`chart`]: Chart data model and the chart handle seam
//! - [`api`]: Backend payloads and raw-data helpers
//! - [`persistence`]: Key-value store seam and saved workspace state
//!
//! ## Example
//!
//! ```rust
//! use scout_workspace::testing::MemoryStore;
//! use scout_workspace::{ScoutWorkspace, WorkspaceConfig};
//!
//! let mut workspace = ScoutWorkspace::new(WorkspaceConfig::default(), Box::new(MemoryStore::new()));
//! workspace.init(1920.0, 1080.0);
//! workspace.set_team(0, Some(254), 0.0);
//!
//! let id = workspace.open_graph("auto_coral", 0.0).unwrap().id();
//! assert_eq!(workspace.registry().get(id).unwrap().title, "Auto Coral");
//! assert_eq!(workspace.take_render_requests().len(), 1);
//! ```
//!
//! ## Design Principles
//!
//! 1. **Pure Rust Core**: All workspace state is plain Rust, testable without a browser
//! 2. **Time Abstraction**: Deferred steps take `now_ms`, so tests drive time explicitly
//! 3. **Host Seams**: Charts and storage sit behind traits the host implements

pub mod api;
pub mod chart;
pub mod config;
pub mod error;
pub mod input;
pub mod layout;
pub mod math;
pub mod overlay;
pub mod persistence;
pub mod selection;
pub mod taskbar;
pub mod testing;
pub mod transform;
pub mod window;

mod engine;

// WASM exports (only available with "wasm" feature)
#[cfg(feature = "wasm")]
mod wasm;
#[cfg(feature = "wasm")]
pub use wasm::*;

// Re-export core types for convenience
pub use math::{Rect, Size, Vec2};
pub use config::WorkspaceConfig;
pub use error::WorkspaceError;
pub use transform::{CanvasStyle, WorkspaceTransform};
pub use window::{GraphWindow, RenderState, ResizeHandle, WindowId, WindowRegistry};
pub use input::{DragCallbacks, DragState, Gesture, InputResult, InputRouter};
pub use chart::{ChartDataset, ChartHandle, ChartKind, ChartPoint, ChartSpec, UpdateMode};
pub use overlay::{ChartSource, Popup, PopupContent, StackBadge};
pub use persistence::{KeyValueStore, StoreError, WorkspaceSnapshot};
pub use selection::TeamSelection;
pub use taskbar::{Taskbar, TaskbarEntry};

pub use engine::{
    BadgeView, CanvasView, GraphOpen, RenderRequest, RenderTicket, ScoutWorkspace, SettleTask,
};
