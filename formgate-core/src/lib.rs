//! formgate-core: pure types and logic for the form customizations.
//!
//! No I/O lives here. The shift-time validator and the monthly summary
//! aggregation are plain functions over snapshots, so they can be exercised
//! without a form host, a network, or a DOM.

pub mod form;
pub mod month;
pub mod shift;
pub mod summary;

pub use form::{FieldCodes, FormHost, ShiftValidator, TIME_RANGE_ERROR};
pub use month::{is_month_token, normalize_month, parse_month, require_month_token};
pub use shift::{FieldPatch, ShiftRow, ShiftTable, parse_hhmm, validate_row, validate_table};
pub use summary::{MonthBucket, UsageRecord, aggregate_by_month, filter_records, monthly_summary};
