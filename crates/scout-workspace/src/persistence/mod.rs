//! Persistence module for workspace state
//!
//! Provides the durable key-value store seam, per-window geometry records,
//! and the snapshot of selected teams and window positions.

mod geometry;
mod snapshot;
mod store;

pub use geometry::{GeometryMap, GeometryRecord};
pub use snapshot::{WorkspaceSnapshot, GRAPH_POSITIONS_KEY, SELECTED_TEAMS_KEY};
pub use store::{KeyValueStore, StoreError};
