//! Scouting data endpoints and payloads
//!
//! The server is a black box; this module names its endpoints, types its JSON
//! payloads, and carries the small pure helpers the dashboard needs on top of
//! them (raw-data filtering and grouping, upload result parsing).

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::chart::ChartPoint;

/// Errors from endpoint payloads
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("network error: {0}")]
    Network(String),
}

/// Endpoint listing every known team number
pub const TEAMS_ENDPOINT: &str = "/teams";
/// Endpoint returning every raw scouting record
pub const RAW_DATA_ENDPOINT: &str = "/api/raw_data";
/// Endpoint accepting scouting file uploads
pub const UPLOAD_ENDPOINT: &str = "/upload-scouting";

/// Per-match total score for one team
pub fn team_performance_path(team: u32) -> String {
    format!("/api/team_performance/{}", team)
}

/// Per-match values of one category for one team
pub fn category_performance_path(team: u32, category: &str) -> String {
    format!("/api/category_performance/{}/{}", team, category)
}

/// One match of `/api/team_performance/:team`
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TeamPerformancePoint {
    #[serde(rename = "match")]
    pub match_number: f64,
    pub score: f64,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub scouter: Option<String>,
}

impl TeamPerformancePoint {
    pub fn into_chart_point(self, team: u32) -> ChartPoint {
        ChartPoint {
            x: self.match_number,
            y: self.score,
            team,
            scouter: self.scouter.unwrap_or_default(),
            notes: self.notes.unwrap_or_default(),
        }
    }
}

/// One match of `/api/category_performance/:team/:category`
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CategoryPoint {
    #[serde(rename = "match")]
    pub match_number: f64,
    pub value: f64,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub scouter: Option<String>,
}

impl CategoryPoint {
    pub fn into_chart_point(self, team: u32) -> ChartPoint {
        ChartPoint {
            x: self.match_number,
            y: self.value,
            team,
            scouter: self.scouter.unwrap_or_default(),
            notes: self.notes.unwrap_or_default(),
        }
    }
}

/// Climb end-state counts returned for the `climb` category
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ClimbHistogram {
    #[serde(rename = "Parked", default)]
    pub parked: u32,
    #[serde(rename = "Shallow", default)]
    pub shallow: u32,
    #[serde(rename = "Deep", default)]
    pub deep: u32,
    #[serde(rename = "None", default)]
    pub none: u32,
}

impl ClimbHistogram {
    /// Counts in display order (Parked, Shallow, Deep, None)
    pub fn counts(&self) -> [u32; 4] {
        [self.parked, self.shallow, self.deep, self.none]
    }
}

/// Parse the team list, keeping only valid team numbers
pub fn parse_teams(json: &str) -> Result<Vec<u32>, ApiError> {
    let values: Vec<Value> = serde_json::from_str(json)?;
    Ok(values
        .iter()
        .filter_map(|v| match v {
            Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
        .collect())
}

// ============================================================================
// Raw data
// ============================================================================

/// One flat scouting record from `/api/raw_data`
pub type RawRecord = Map<String, Value>;

/// Group label for records whose grouping column is empty
pub const UNKNOWN_GROUP: &str = "Unknown";

/// Short table header for a raw-data column (unknown columns keep their name)
pub fn column_label(column: &str) -> &str {
    match column {
        "autoncoral1" => "AC1",
        "autoncoral2" => "AC2",
        "autoncoral3" => "AC3",
        "autoncoral4" => "AC4",
        "telecoral1" => "TC1",
        "telecoral2" => "TC2",
        "telecoral3" => "TC3",
        "telecoral4" => "TC4",
        "autonalgaenet" => "AN",
        "autonalgaepro" => "AP",
        "telealgaenet" => "TN",
        "telealgaepro" => "TP",
        "scoutername" => "Scouter",
        "matchnum" => "Match",
        "teamnum" => "Team",
        other => other,
    }
}

/// Table text of a cell value; null, false, zero and empty strings are blank
fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => match n.as_f64() {
            Some(f) if f == 0.0 => String::new(),
            Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            _ => n.to_string(),
        },
        Some(other) => other.to_string(),
    }
}

/// Case-insensitive substring filter over one column, or every column when
/// `column` is `None`. A blank query keeps every record.
pub fn filter_records<'a>(records: &'a [RawRecord], query: &str, column: Option<&str>) -> Vec<&'a RawRecord> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return records.iter().collect();
    }
    records
        .iter()
        .filter(|record| match column {
            Some(col) => cell_text(record.get(col)).to_lowercase().contains(&query),
            None => record
                .values()
                .any(|v| cell_text(Some(v)).to_lowercase().contains(&query)),
        })
        .collect()
}

/// Group records by a column's text, groups ordered by key
pub fn group_records<'a>(records: &[&'a RawRecord], column: &str) -> BTreeMap<String, Vec<&'a RawRecord>> {
    let mut groups: BTreeMap<String, Vec<&'a RawRecord>> = BTreeMap::new();
    for record in records {
        let mut key = cell_text(record.get(column));
        if key.is_empty() {
            key = UNKNOWN_GROUP.to_string();
        }
        groups.entry(key).or_default().push(record);
    }
    groups
}

// ============================================================================
// Upload
// ============================================================================

/// Result of a scouting file upload
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UploadOutcome {
    Success(String),
    Failure(String),
}

#[derive(Deserialize)]
struct UploadBody {
    message: Option<String>,
    error: Option<String>,
}

impl UploadOutcome {
    /// Interpret the upload response from its status and body
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed: Option<UploadBody> = serde_json::from_str(body).ok();
        let ok = (200..300).contains(&status);
        match (ok, parsed) {
            (true, Some(UploadBody { message: Some(m), .. })) => UploadOutcome::Success(m),
            (true, _) => UploadOutcome::Success("Upload complete".to_string()),
            (false, Some(UploadBody { error: Some(e), .. })) => UploadOutcome::Failure(e),
            (false, _) => UploadOutcome::Failure(format!("Upload failed with status {}", status)),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, UploadOutcome::Success(_))
    }

    /// Status text shown to the user
    pub fn message(&self) -> &str {
        match self {
            UploadOutcome::Success(m) | UploadOutcome::Failure(m) => m,
        }
    }
}
