//! Snapshot of the persisted workspace state

use serde_json::Value;

use super::{GeometryMap, KeyValueStore, StoreError};

/// Store key holding the selected team numbers (JSON array)
pub const SELECTED_TEAMS_KEY: &str = "selectedTeams";
/// Store key holding window geometry (JSON object keyed by window id)
pub const GRAPH_POSITIONS_KEY: &str = "graphPositions";

/// Everything the workspace restores on startup
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorkspaceSnapshot {
    /// Selected teams in selector order
    pub teams: Vec<u32>,
    pub geometry: GeometryMap,
}

impl WorkspaceSnapshot {
    /// Read both keys, falling back to defaults for missing or corrupt values
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let teams = match store.get(SELECTED_TEAMS_KEY) {
            Ok(Some(json)) => parse_teams(&json),
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!("failed to read selected teams: {}", e);
                Vec::new()
            }
        };
        let geometry = match store.get(GRAPH_POSITIONS_KEY) {
            Ok(Some(json)) => GeometryMap::from_json_lossy(&json),
            Ok(None) => GeometryMap::new(),
            Err(e) => {
                log::warn!("failed to read window geometry: {}", e);
                GeometryMap::new()
            }
        };
        log::debug!(
            "restored {} team(s) and {} window geometry record(s)",
            teams.len(),
            geometry.len()
        );
        Self { teams, geometry }
    }

    /// Persist the team selection. Returns whether a write happened.
    pub fn save_teams(store: &dyn KeyValueStore, teams: &[u32]) -> Result<bool, StoreError> {
        let json = serde_json::to_string(teams).map_err(|e| StoreError::Backend(e.to_string()))?;
        store.set_if_changed(SELECTED_TEAMS_KEY, &json)
    }

    /// Persist window geometry. Returns whether a write happened.
    pub fn save_geometry(store: &dyn KeyValueStore, geometry: &GeometryMap) -> Result<bool, StoreError> {
        let json = geometry.to_json().map_err(|e| StoreError::Backend(e.to_string()))?;
        store.set_if_changed(GRAPH_POSITIONS_KEY, &json)
    }
}

/// Accepts numbers and numeric strings; anything else is skipped
fn parse_teams(json: &str) -> Vec<u32> {
    let values = match serde_json::from_str::<Value>(json) {
        Ok(Value::Array(values)) => values,
        Ok(_) => {
            log::warn!("stored team selection is not an array, ignoring it");
            return Vec::new();
        }
        Err(e) => {
            log::warn!("stored team selection is corrupt, ignoring it: {}", e);
            return Vec::new();
        }
    };

    values
        .iter()
        .filter_map(|value| {
            let team = match value {
                Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
                Value::String(s) => s.trim().parse::<u32>().ok(),
                _ => None,
            };
            if team.is_none() {
                log::warn!("skipping invalid stored team {}", value);
            }
            team
        })
        .collect()
}
