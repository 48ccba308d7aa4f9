//! Filter usage records against the valid-month whitelist and aggregate
//! them into per-month buckets.

use std::collections::HashMap;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::month::{normalize_month, parse_month};

/// One usage transaction, already extracted from the remote payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageRecord {
    /// Month the usage belongs to, `YYYY-MM` or `YYYY/MM`.
    pub year_month: String,
    pub total: f64,
}

impl UsageRecord {
    pub fn new(year_month: impl Into<String>, total: f64) -> Self {
        Self {
            year_month: year_month.into(),
            total,
        }
    }
}

/// Count and total for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthBucket {
    pub year_month: String,
    pub count: usize,
    pub total_amount: f64,
}

/// Keep only records whose month is on the whitelist. Both sides are
/// normalized before the membership test.
pub fn filter_records(records: &[UsageRecord], valid_months: &[String]) -> Vec<UsageRecord> {
    let valid: HashSet<String> = valid_months.iter().map(|m| normalize_month(m)).collect();

    records
        .iter()
        .filter(|r| valid.contains(&normalize_month(&r.year_month)))
        .cloned()
        .collect()
}

/// Group records by normalized month in one pass and sort the buckets
/// chronologically.
pub fn aggregate_by_month(records: &[UsageRecord]) -> Vec<MonthBucket> {
    let mut buckets: HashMap<String, MonthBucket> = HashMap::new();

    for record in records {
        let month = normalize_month(&record.year_month);
        let bucket = buckets.entry(month.clone()).or_insert(MonthBucket {
            year_month: month,
            count: 0,
            total_amount: 0.0,
        });
        bucket.count += 1;
        bucket.total_amount += record.total;
    }

    let mut out: Vec<MonthBucket> = buckets.into_values().collect();
    // Key-based so the comparison stays a total order even when a token
    // passes the shape check but is no real month (e.g. "2024-99"): those
    // sort after the parseable months, ordered by raw token.
    out.sort_by_key(|b| {
        let parsed = parse_month(&b.year_month);
        (parsed.is_none(), parsed, b.year_month.clone())
    });
    out
}

/// Whole pipeline: filter against the whitelist, then aggregate.
pub fn monthly_summary(records: &[UsageRecord], valid_months: &[String]) -> Vec<MonthBucket> {
    aggregate_by_month(&filter_records(records, valid_months))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn months(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_filter_drops_unlisted_months() {
        let records = vec![
            UsageRecord::new("2024-01", 100.0),
            UsageRecord::new("2024-02", 200.0),
        ];
        let kept = filter_records(&records, &months(&["2024-01"]));
        assert_eq!(kept, vec![UsageRecord::new("2024-01", 100.0)]);
    }

    #[test]
    fn test_filter_normalizes_both_sides() {
        let records = vec![UsageRecord::new("2024/03", 50.0)];
        let kept = filter_records(&records, &months(&["2024-03"]));
        assert_eq!(kept.len(), 1);

        let kept = filter_records(&records, &months(&["2024/03"]));
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn test_aggregate_counts_and_sums() {
        let records = vec![
            UsageRecord::new("2024-01", 1000.0),
            UsageRecord::new("2024-01", 500.0),
            UsageRecord::new("2024-02", 200.0),
        ];
        let buckets = aggregate_by_month(&records);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].year_month, "2024-01");
        assert_eq!(buckets[0].count, 2);
        assert_eq!(buckets[0].total_amount, 1500.0);
        assert_eq!(buckets[1].year_month, "2024-02");
        assert_eq!(buckets[1].count, 1);
        assert_eq!(buckets[1].total_amount, 200.0);
    }

    #[test]
    fn test_aggregate_sorts_chronologically() {
        let records = vec![
            UsageRecord::new("2024-12", 1.0),
            UsageRecord::new("2023-02", 1.0),
            UsageRecord::new("2024-01", 1.0),
        ];
        let buckets = aggregate_by_month(&records);
        let order: Vec<&str> = buckets.iter().map(|b| b.year_month.as_str()).collect();
        assert_eq!(order, vec!["2023-02", "2024-01", "2024-12"]);
    }

    #[test]
    fn test_shape_valid_but_unreal_months_sort_after_parseable() {
        // "YYYY-99" survives the shape check but parses to no calendar
        // month; interleave plenty of both so the sort actually has to keep
        // them apart.
        let mut records = Vec::new();
        for year in 1975..2025 {
            records.push(UsageRecord::new(format!("{year}-06"), 1.0));
            records.push(UsageRecord::new(format!("{year}-99"), 1.0));
        }
        let buckets = aggregate_by_month(&records);
        assert_eq!(buckets.len(), 100);

        // Every parseable month is in chronological order...
        let dates: Vec<_> = buckets
            .iter()
            .filter_map(|b| parse_month(&b.year_month))
            .collect();
        assert_eq!(dates.len(), 50);
        assert!(dates.windows(2).all(|w| w[0] < w[1]));

        // ...and the unparseable tokens all trail them, ordered by token.
        let tail: Vec<&str> = buckets[50..].iter().map(|b| b.year_month.as_str()).collect();
        assert!(tail.iter().all(|m| parse_month(m).is_none()));
        let mut sorted_tail = tail.clone();
        sorted_tail.sort();
        assert_eq!(tail, sorted_tail);
    }

    #[test]
    fn test_aggregate_is_order_independent() {
        let mut records = vec![
            UsageRecord::new("2024-01", 10.0),
            UsageRecord::new("2024-02", 20.0),
            UsageRecord::new("2024-01", 30.0),
            UsageRecord::new("2024-03", 40.0),
        ];
        let forward = aggregate_by_month(&records);
        records.reverse();
        let backward = aggregate_by_month(&records);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_aggregate_merges_separator_variants() {
        let records = vec![
            UsageRecord::new("2024/01", 100.0),
            UsageRecord::new("2024-01", 200.0),
        ];
        let buckets = aggregate_by_month(&records);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].count, 2);
        assert_eq!(buckets[0].total_amount, 300.0);
    }

    #[test]
    fn test_monthly_summary_end_to_end() {
        let records = vec![
            UsageRecord::new("2024/01", 1200.0),
            UsageRecord::new("2024-01", 800.0),
            UsageRecord::new("2024-02", 999.0),
            UsageRecord::new("2025-01", 5.0),
        ];
        let buckets = monthly_summary(&records, &months(&["2024-01", "2024-02"]));
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].total_amount, 2000.0);
        assert_eq!(buckets[1].count, 1);
    }

    #[test]
    fn test_empty_inputs_yield_empty_buckets() {
        assert!(monthly_summary(&[], &months(&["2024-01"])).is_empty());
        assert!(monthly_summary(&[UsageRecord::new("2024-01", 1.0)], &[]).is_empty());
    }
}
