use serde::Serialize;
use std::path::PathBuf;

/// Occupancy of one table: live records against the fixed capacity, plus the
/// backing file it flushes to. Read-only; rendering belongs to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct TableStats {
    pub used: usize,
    pub capacity: usize,
    pub percent_full: f32,
    pub file: PathBuf,
}

impl TableStats {
    pub fn new(used: usize, capacity: usize, file: PathBuf) -> Self {
        let percent_full = if capacity > 0 {
            (used as f32 * 100.0) / capacity as f32
        } else {
            0.0
        };
        TableStats {
            used,
            capacity,
            percent_full,
            file,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StoreStats {
    pub classes: TableStats,
    pub students: TableStats,
}

impl StoreStats {
    /// JSON view for the external UI layer.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
