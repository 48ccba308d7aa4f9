//! Report orchestration: fetch pair → extract → filter → aggregate → render.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use formgate_core::{MonthBucket, aggregate_by_month, filter_records};

use crate::fetch::{ReportEndpoints, fetch_report_inputs};
use crate::payload::{month_tokens, usage_records};
use crate::render::render_table;

/// Everything the pipeline needs to know about the remote datasets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub endpoints: ReportEndpoints,
    /// Month field of the whitelist dataset.
    pub month_field: String,
    /// Month field of the usage dataset.
    pub usage_month_field: String,
    /// Amount field of the usage dataset.
    pub amount_field: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            endpoints: ReportEndpoints {
                valid_months_url: "https://viewer.example.com/public/api/records/valid-months/1"
                    .to_string(),
                usage_url: "https://viewer.example.com/public/api/records/usage-report/1"
                    .to_string(),
            },
            month_field: "年月".to_string(),
            usage_month_field: "利用年月".to_string(),
            amount_field: "合計".to_string(),
        }
    }
}

/// Rendered fragment plus the pipeline counts for the status line.
#[derive(Debug, Clone)]
pub struct ReportOutcome {
    pub html: String,
    pub buckets: Vec<MonthBucket>,
    pub month_count: usize,
    pub record_count: usize,
    pub filtered_count: usize,
}

/// Run the full pipeline against the remote endpoints.
pub async fn build_report(client: &reqwest::Client, config: &ReportConfig) -> Result<ReportOutcome> {
    let (months_payload, usage_payload) = fetch_report_inputs(client, &config.endpoints).await?;
    build_report_from_payloads(&months_payload, &usage_payload, config)
}

/// The network-free tail of the pipeline.
///
/// Fails fast on malformed records and on an empty dataset on either side;
/// an empty *filtered* set is not an error and renders the no-data
/// placeholder instead.
pub fn build_report_from_payloads(
    months_payload: &Value,
    usage_payload: &Value,
    config: &ReportConfig,
) -> Result<ReportOutcome> {
    let valid_months = month_tokens(months_payload, &config.month_field)?;
    let records = usage_records(usage_payload, &config.usage_month_field, &config.amount_field)?;

    if valid_months.is_empty() {
        bail!("有効な年月データが取得できませんでした");
    }
    if records.is_empty() {
        bail!("明細データが取得できませんでした");
    }

    let filtered = filter_records(&records, &valid_months);
    let buckets = aggregate_by_month(&filtered);
    let html = render_table(&buckets);

    Ok(ReportOutcome {
        html,
        month_count: valid_months.len(),
        record_count: records.len(),
        filtered_count: filtered.len(),
        buckets,
    })
}
