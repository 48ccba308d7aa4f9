//! Shift-row time-range validation.
//!
//! A shift table is a repeating group of rows with a start time, an end time,
//! and a next-day marker. A row is acceptable when either time is still
//! blank, when the next-day flag is set (the shift crosses midnight), or when
//! start ≤ end within the same day. Times are HH:MM strings; the date
//! component never participates in the comparison.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// One row of the repeating shift table. Field values are kept as the raw
/// host strings; an unset next-day flag is the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftRow {
    pub start_time: String,
    pub end_time: String,
    pub next_day: String,
}

impl ShiftRow {
    pub fn new(
        start_time: impl Into<String>,
        end_time: impl Into<String>,
        next_day: impl Into<String>,
    ) -> Self {
        Self {
            start_time: start_time.into(),
            end_time: end_time.into(),
            next_day: next_day.into(),
        }
    }

    pub fn next_day_set(&self) -> bool {
        !self.next_day.is_empty()
    }
}

/// Snapshot of the whole table. Rows have no identity beyond their index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftTable {
    pub rows: Vec<ShiftRow>,
}

impl ShiftTable {
    pub fn new(rows: Vec<ShiftRow>) -> Self {
        Self { rows }
    }
}

/// Just-changed field values, applied on top of a row snapshot.
///
/// The host's current-record snapshot can lag behind the field that fired a
/// change event, so the handler passes the fresh value through here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPatch {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub next_day: Option<String>,
}

impl FieldPatch {
    pub fn start_time(value: impl Into<String>) -> Self {
        Self {
            start_time: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn end_time(value: impl Into<String>) -> Self {
        Self {
            end_time: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn next_day(value: impl Into<String>) -> Self {
        Self {
            next_day: Some(value.into()),
            ..Self::default()
        }
    }
}

/// Parse an HH:MM string into a time of day. Seconds are not accepted.
pub fn parse_hhmm(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M").ok()
}

/// Validate one row, with `patch` taking precedence over the snapshot.
///
/// Blank start or end skips validation entirely. A non-blank value that does
/// not parse as HH:MM makes the row invalid: a malformed time should block
/// submission rather than slip through as "valid".
pub fn validate_row(row: &ShiftRow, patch: &FieldPatch) -> bool {
    let start = patch.start_time.as_deref().unwrap_or(&row.start_time);
    let end = patch.end_time.as_deref().unwrap_or(&row.end_time);
    let next_day = patch.next_day.as_deref().unwrap_or(&row.next_day);

    if start.is_empty() || end.is_empty() {
        return true;
    }

    let (Some(start), Some(end)) = (parse_hhmm(start), parse_hhmm(end)) else {
        return false;
    };

    // Overnight shift: any ordering is fine.
    if !next_day.is_empty() {
        return true;
    }

    start <= end
}

/// Validate every row; `false` if any row fails. Used to gate submission.
pub fn validate_table(table: &ShiftTable) -> bool {
    table
        .rows
        .iter()
        .all(|row| validate_row(row, &FieldPatch::default()))
}
