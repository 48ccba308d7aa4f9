//! Year-month token handling.
//!
//! The two remote datasets join on a calendar-month string. One side emits
//! `YYYY/MM`, the other `YYYY-MM`; everything is normalized to the dashed
//! form before membership tests and grouping.

use anyhow::Result;
use chrono::NaiveDate;
use regex::Regex;

/// Normalize a month token to `YYYY-MM`.
pub fn normalize_month(s: &str) -> String {
    s.trim().replace('/', "-")
}

/// Shape check for a normalized token.
pub fn is_month_token(s: &str) -> bool {
    match Regex::new(r"^\d{4}-\d{2}$") {
        Ok(re) => re.is_match(s),
        Err(_) => false,
    }
}

/// Parse a normalized token into the first day of that month, the sort key
/// for chronological ordering.
pub fn parse_month(s: &str) -> Option<NaiveDate> {
    let (year, month) = s.split_once('-')?;
    let year: i32 = year.trim().parse().ok()?;
    let month: u32 = month.trim().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Normalize and shape-check in one step, for inputs that must be tokens.
pub fn require_month_token(s: &str) -> Result<String> {
    let token = normalize_month(s);
    if !is_month_token(&token) {
        anyhow::bail!("年月の形式が不正です: {s}");
    }
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_month() {
        assert_eq!(normalize_month("2024/01"), "2024-01");
        assert_eq!(normalize_month(" 2024-12 "), "2024-12");
    }

    #[test]
    fn test_is_month_token() {
        assert!(is_month_token("2024-01"));
        assert!(is_month_token("2024-13")); // shape only; range is chrono's job
        assert!(!is_month_token("2024/01"));
        assert!(!is_month_token("2024-1"));
        assert!(!is_month_token("24-01"));
        assert!(!is_month_token(""));
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(
            parse_month("2024-03"),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
        assert_eq!(parse_month("2024-13"), None);
        assert_eq!(parse_month("garbage"), None);
    }

    #[test]
    fn test_require_month_token() {
        assert_eq!(require_month_token("2024/07").unwrap(), "2024-07");
        assert!(require_month_token("July 2024").is_err());
    }
}
