//! The concurrent GET pair feeding the report.
//!
//! All-or-nothing: aggregation only starts once both endpoints have
//! answered, and the first failure propagates immediately. No retries, no
//! explicit timeout beyond the client's defaults.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The two public API endpoints the report joins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportEndpoints {
    /// Valid-months whitelist dataset.
    pub valid_months_url: String,
    /// Usage detail dataset.
    pub usage_url: String,
}

/// GET one endpoint and parse the body as JSON.
pub async fn fetch_json(client: &reqwest::Client, url: &str) -> Result<Value> {
    let resp = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("GET {url}"))?;

    let status = resp.status();
    if !status.is_success() {
        bail!("HTTPエラー: {status} ({url})");
    }

    resp.json()
        .await
        .with_context(|| format!("JSONの解析に失敗しました ({url})"))
}

/// Fetch both datasets concurrently.
pub async fn fetch_report_inputs(
    client: &reqwest::Client,
    endpoints: &ReportEndpoints,
) -> Result<(Value, Value)> {
    tokio::try_join!(
        fetch_json(client, &endpoints.valid_months_url),
        fetch_json(client, &endpoints.usage_url),
    )
}
