//! Narrow host abstraction and the event-side validation controller.
//!
//! The hosted form platform owns the record, the event dispatch, and the
//! per-field error UI. Everything we need from it fits behind [`FormHost`],
//! so the controller can be driven by a test double.

use crate::shift::{FieldPatch, ShiftTable, validate_row, validate_table};

/// Message attached to both time fields of an invalid row.
pub const TIME_RANGE_ERROR: &str = "開始時刻は終了時刻より前に設定してください";

/// What the form platform exposes to the customization.
pub trait FormHost {
    /// Snapshot of the current shift table.
    fn record(&self) -> ShiftTable;

    /// Set (`Some`) or clear (`None`) the error annotation on one field of
    /// one row of a table.
    fn set_field_error(&mut self, table: &str, field: &str, row: usize, message: Option<&str>);
}

/// Field codes of the shift table, as configured on the platform side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCodes {
    pub table: String,
    pub start_time: String,
    pub end_time: String,
    pub next_day: String,
}

impl Default for FieldCodes {
    fn default() -> Self {
        Self {
            table: "テーブル".to_string(),
            start_time: "開始時刻".to_string(),
            end_time: "終了時刻".to_string(),
            next_day: "翌日フラグ".to_string(),
        }
    }
}

/// Drives row validation off host events and writes the error annotations.
pub struct ShiftValidator<H: FormHost> {
    host: H,
    codes: FieldCodes,
}

impl<H: FormHost> ShiftValidator<H> {
    pub fn new(host: H, codes: FieldCodes) -> Self {
        Self { host, codes }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Handle a change event on one of the three row fields.
    ///
    /// `new_value` is the just-edited value; the host snapshot may still
    /// carry the old one, so it is applied as an override. Returns the row's
    /// validity after annotating (or clearing) both time fields.
    pub fn handle_field_change(&mut self, field: &str, row_index: usize, new_value: &str) -> bool {
        let table = self.host.record();
        let Some(row) = table.rows.get(row_index) else {
            // Row no longer exists (deleted mid-edit); nothing to validate.
            return true;
        };

        let patch = if field == self.codes.start_time {
            FieldPatch::start_time(new_value)
        } else if field == self.codes.end_time {
            FieldPatch::end_time(new_value)
        } else if field == self.codes.next_day {
            FieldPatch::next_day(new_value)
        } else {
            FieldPatch::default()
        };

        let valid = validate_row(row, &patch);
        self.annotate_row(row_index, valid);
        valid
    }

    /// Handle the submit event: validate every row and annotate the failures.
    ///
    /// `false` means at least one row is invalid and the caller must cancel
    /// the submission.
    pub fn handle_submit(&mut self) -> bool {
        let table = self.host.record();
        let mut all_valid = true;

        for (i, row) in table.rows.iter().enumerate() {
            let valid = validate_row(row, &FieldPatch::default());
            self.annotate_row(i, valid);
            if !valid {
                all_valid = false;
            }
        }

        debug_assert_eq!(all_valid, validate_table(&table));
        all_valid
    }

    fn annotate_row(&mut self, row_index: usize, valid: bool) {
        let message = if valid { None } else { Some(TIME_RANGE_ERROR) };
        let (table, start, end) = (
            self.codes.table.clone(),
            self.codes.start_time.clone(),
            self.codes.end_time.clone(),
        );
        self.host.set_field_error(&table, &start, row_index, message);
        self.host.set_field_error(&table, &end, row_index, message);
    }
}
