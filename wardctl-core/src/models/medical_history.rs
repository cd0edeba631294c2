//! Append-only medical history

use chrono::{NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};

use crate::error::{Result, WardError};

/// Text layout of every timestamp column.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render a timestamp for storage (whole seconds).
pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.trunc_subsecs(0).format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a stored timestamp. ISO-8601 with a `T` separator and fractional
/// seconds is accepted as well.
pub fn parse_timestamp(column: &'static str, raw: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
        .map_err(|_| WardError::decode(column, raw))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicalHistoryEntry {
    pub id: i64,
    pub patient_id: i64,
    pub entry: String,
    pub date_added: NaiveDateTime,
}
