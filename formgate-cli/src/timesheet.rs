//! CSV timesheet loader for offline validation.
//!
//! Columns: `start_time,end_time,next_day` (Japanese platform headers are
//! accepted as aliases). `next_day` may be omitted entirely.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use formgate_core::{ShiftRow, ShiftTable};

#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(alias = "開始時刻")]
    start_time: String,
    #[serde(alias = "終了時刻")]
    end_time: String,
    #[serde(default, alias = "翌日フラグ")]
    next_day: String,
}

/// Load a timesheet CSV into a shift-table snapshot.
pub fn load_timesheet(path: impl AsRef<Path>) -> Result<ShiftTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path.as_ref())
        .with_context(|| format!("opening {}", path.as_ref().display()))?;

    let mut rows = Vec::new();
    for result in rdr.deserialize::<RawRow>() {
        let raw = result.with_context(|| format!("reading {}", path.as_ref().display()))?;
        rows.push(ShiftRow::new(raw.start_time, raw.end_time, raw.next_day));
    }

    Ok(ShiftTable::new(rows))
}
