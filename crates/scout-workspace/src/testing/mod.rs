//! In-memory implementations for testing.
//!
//! Provides a store and a chart that work without a browser.

mod memory_store;
mod recording_chart;

pub use memory_store::MemoryStore;
pub use recording_chart::{ChartCalls, RecordingChart};
