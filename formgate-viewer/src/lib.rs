//! formgate-viewer: fetches the two report datasets, extracts them out of
//! the duck-typed API payloads, and renders the monthly summary as HTML.
//!
//! The pure stages (payload extraction, aggregation via formgate-core,
//! rendering) never touch the network, so the whole pipeline short of the
//! two GETs is unit-testable.

pub mod fetch;
pub mod payload;
pub mod render;
pub mod report;

pub use fetch::{ReportEndpoints, fetch_json, fetch_report_inputs};
pub use payload::{month_tokens, record_array, usage_records};
pub use render::{TABLE_HEADERS, format_yen, render_error, render_loading, render_page, render_table, stylesheet};
pub use report::{ReportConfig, ReportOutcome, build_report, build_report_from_payloads};
