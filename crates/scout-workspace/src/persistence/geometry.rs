//! Persisted window geometry

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::math::{Rect, Size, Vec2};
use crate::window::WindowId;

/// Stored position and size of one window
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeometryRecord {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl GeometryRecord {
    /// Record from a workspace rectangle
    pub fn from_rect(rect: Rect) -> Self {
        Self {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    fn is_valid(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width >= 0.0
            && self.height >= 0.0
    }
}

/// Window id to geometry map, serialized as `{"graph-N": {x, y, width, height}}`
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct GeometryMap(BTreeMap<WindowId, GeometryRecord>);

impl GeometryMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: WindowId) -> Option<GeometryRecord> {
        self.0.get(&id).copied()
    }

    /// Store a record. Returns whether the map changed.
    pub fn insert(&mut self, id: WindowId, record: GeometryRecord) -> bool {
        self.0.insert(id, record) != Some(record)
    }

    /// Delete a record. Returns whether one existed.
    pub fn remove(&mut self, id: WindowId) -> bool {
        self.0.remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Largest stored id, used to seed the id counter after a reload
    pub fn max_id(&self) -> Option<WindowId> {
        self.0.keys().next_back().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (WindowId, GeometryRecord)> + '_ {
        self.0.iter().map(|(id, rec)| (*id, *rec))
    }

    /// Serialize to the stored JSON form
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse the stored JSON form entry by entry
    ///
    /// A corrupt document yields an empty map; a corrupt entry is skipped.
    /// Either case is logged.
    pub fn from_json_lossy(json: &str) -> Self {
        let entries = match serde_json::from_str::<Value>(json) {
            Ok(Value::Object(entries)) => entries,
            Ok(_) => {
                log::warn!("stored window geometry is not an object, ignoring it");
                return Self::new();
            }
            Err(e) => {
                log::warn!("stored window geometry is corrupt, ignoring it: {}", e);
                return Self::new();
            }
        };

        let mut map = Self::new();
        for (key, value) in entries {
            let Ok(id) = key.parse::<WindowId>() else {
                log::warn!("skipping geometry with invalid window id '{}'", key);
                continue;
            };
            match serde_json::from_value::<GeometryRecord>(value) {
                Ok(record) if record.is_valid() => {
                    map.0.insert(id, record);
                }
                Ok(_) => log::warn!("skipping non-finite geometry for {}", id),
                Err(e) => log::warn!("skipping corrupt geometry for {}: {}", id, e),
            }
        }
        map
    }
}
