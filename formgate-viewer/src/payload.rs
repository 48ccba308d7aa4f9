//! Extraction from the duck-typed API payloads.
//!
//! Either endpoint may answer with a bare JSON array, or with an object
//! wrapping the array under `records` (hosted-platform shape) or `data`.
//! Individual record fields are either plain scalars or platform-shaped
//! `{"value": ...}` objects. Required fields that are missing abort the
//! whole run; a present-but-non-numeric amount coerces to zero.

use anyhow::{Context, Result, bail};
use serde_json::Value;

use formgate_core::{UsageRecord, normalize_month, require_month_token};

/// Unwrap the record array out of any of the accepted envelope shapes.
pub fn record_array(payload: &Value) -> Result<&Vec<Value>> {
    if let Some(rows) = payload.as_array() {
        return Ok(rows);
    }
    for key in ["records", "data"] {
        if let Some(rows) = payload.get(key).and_then(Value::as_array) {
            return Ok(rows);
        }
    }
    bail!("レスポンスの形式が不正です: 配列でも records/data ラッパーでもありません")
}

/// Look up a field, unwrapping a platform-shaped `{"value": ...}` if present.
/// A JSON null counts as absent.
fn field_value<'a>(record: &'a Value, field: &str) -> Option<&'a Value> {
    let v = record.get(field)?;
    let v = match v.get("value") {
        Some(inner) => inner,
        None => v,
    };
    (!v.is_null()).then_some(v)
}

/// Extract the valid-month whitelist.
///
/// Entries may be plain strings, `{"yearMonth": ...}` / `{"year_month": ...}`
/// objects, or platform records keyed by `field`. Every token is normalized
/// to `YYYY-MM`; a missing or malformed entry is a hard error.
pub fn month_tokens(payload: &Value, field: &str) -> Result<Vec<String>> {
    let rows = record_array(payload)?;

    rows.iter()
        .map(|row| {
            if let Some(s) = row.as_str() {
                return require_month_token(s);
            }
            let token = field_value(row, field)
                .or_else(|| field_value(row, "yearMonth"))
                .or_else(|| field_value(row, "year_month"))
                .and_then(Value::as_str)
                .with_context(|| format!("必須項目が見つかりません: {field}"))?;
            require_month_token(token)
        })
        .collect()
}

/// Extract the usage detail records.
///
/// The month field must be a non-empty string; the amount field must be
/// present and non-blank, but tolerates non-numeric content (coerced to 0,
/// matching "unparsable amount is not worth aborting over" semantics).
pub fn usage_records(payload: &Value, month_field: &str, amount_field: &str) -> Result<Vec<UsageRecord>> {
    let rows = record_array(payload)?;

    rows.iter()
        .map(|row| {
            let month = field_value(row, month_field)
                .and_then(Value::as_str)
                .filter(|s| !s.trim().is_empty())
                .with_context(|| format!("必須項目が見つかりません: {month_field}"))?;

            let amount = field_value(row, amount_field)
                .with_context(|| format!("必須項目が見つかりません: {amount_field}"))?;
            let total = match amount {
                Value::Number(n) => n.as_f64().unwrap_or(0.0),
                // A blank string is a missing value, same as the month
                // field; only a non-empty non-numeric amount coerces to 0.
                Value::String(s) if s.trim().is_empty() => {
                    bail!("必須項目が見つかりません: {amount_field}")
                }
                Value::String(s) => s.trim().parse().unwrap_or(0.0),
                _ => 0.0,
            };

            Ok(UsageRecord::new(normalize_month(month), total))
        })
        .collect()
}
