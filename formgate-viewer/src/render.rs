//! HTML sink for the monthly summary.
//!
//! Pure string building: buckets in, markup out. The stylesheet is scoped
//! to the container element and injected once, either by the host page or
//! by [`render_page`] when the CLI writes a standalone file.

use formgate_core::MonthBucket;

/// Header row of the summary table: month, count, total amount.
pub const TABLE_HEADERS: [&str; 3] = ["年月", "件数", "合計金額"];

/// Shown in place of the table when no bucket survived the filter.
pub const NO_DATA_MESSAGE: &str = "表示するデータがありません";

const STYLE_TEMPLATE: &str = "
#__ID__ table {
    border-collapse: collapse;
    width: 100%;
    margin: 10px 0;
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
}
#__ID__ th, #__ID__ td {
    border: 1px solid #ddd;
    padding: 8px 12px;
    text-align: left;
}
#__ID__ th {
    background-color: #f5f5f5;
    font-weight: bold;
}
#__ID__ tr:nth-child(even) {
    background-color: #f9f9f9;
}
#__ID__ .amount {
    text-align: right;
}
#__ID__ .count {
    text-align: center;
}
#__ID__ .loading {
    text-align: center;
    padding: 20px;
    color: #666;
}
#__ID__ .error {
    text-align: center;
    padding: 20px;
    color: #d32f2f;
    background-color: #ffebee;
    border-radius: 4px;
}
";

/// The one-time stylesheet payload, scoped to the container element id.
pub fn stylesheet(element_id: &str) -> String {
    STYLE_TEMPLATE.replace("__ID__", element_id)
}

/// Format an amount with thousands separators. Whole amounts drop the
/// fraction (yen is an integral currency in practice); non-finite input
/// degrades to "0".
pub fn format_yen(amount: f64) -> String {
    if !amount.is_finite() {
        return "0".to_string();
    }

    let negative = amount < 0.0;
    let abs = amount.abs();
    let rendered = if abs.fract() == 0.0 {
        format!("{abs:.0}")
    } else {
        format!("{abs:.2}")
    };
    let (int_part, frac_part) = match rendered.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (rendered, None),
    };

    let mut grouped = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let mut out: String = grouped.chars().rev().collect();

    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(&frac);
    }
    if negative {
        out.insert(0, '-');
    }
    out
}

/// Render the summary table, or the no-data placeholder when the bucket
/// list is empty.
pub fn render_table(buckets: &[MonthBucket]) -> String {
    if buckets.is_empty() {
        return format!("<div class=\"error\">{NO_DATA_MESSAGE}</div>");
    }

    let mut html = String::from("<table>\n<thead>\n<tr>");
    for header in TABLE_HEADERS {
        html.push_str(&format!("<th>{header}</th>"));
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");

    for bucket in buckets {
        html.push_str(&format!(
            "<tr><td>{}</td><td class=\"count\">{}</td><td class=\"amount\">¥{}</td></tr>\n",
            bucket.year_month,
            bucket.count,
            format_yen(bucket.total_amount),
        ));
    }

    html.push_str("</tbody>\n</table>\n");
    html
}

/// Loading block shown while the fetch pair is in flight.
pub fn render_loading() -> String {
    "<div class=\"loading\">データを読み込み中...</div>".to_string()
}

/// Inline error block for any fatal failure in the pipeline.
pub fn render_error(message: &str) -> String {
    format!("<div class=\"error\">エラー: {message}</div>")
}

/// Wrap a fragment into a standalone HTML document with the scoped
/// stylesheet and the container div, for writing to a file.
pub fn render_page(element_id: &str, fragment: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"ja\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>月別集計</title>\n<style>{}</style>\n</head>\n<body>\n\
         <div id=\"{element_id}\">\n{fragment}</div>\n</body>\n</html>\n",
        stylesheet(element_id),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_yen() {
        assert_eq!(format_yen(0.0), "0");
        assert_eq!(format_yen(1234.0), "1,234");
        assert_eq!(format_yen(1000000.0), "1,000,000");
        assert_eq!(format_yen(-500.0), "-500");
        assert_eq!(format_yen(1234.5), "1,234.50");
        assert_eq!(format_yen(f64::NAN), "0");
    }

    #[test]
    fn test_render_table_rows() {
        let buckets = vec![
            MonthBucket {
                year_month: "2024-01".to_string(),
                count: 3,
                total_amount: 4500.0,
            },
            MonthBucket {
                year_month: "2024-02".to_string(),
                count: 1,
                total_amount: 1200000.0,
            },
        ];
        let html = render_table(&buckets);
        assert!(html.contains("<th>年月</th><th>件数</th><th>合計金額</th>"));
        assert!(html.contains("<td>2024-01</td><td class=\"count\">3</td><td class=\"amount\">¥4,500</td>"));
        assert!(html.contains("¥1,200,000"));
    }

    #[test]
    fn test_render_empty_buckets_is_placeholder() {
        let html = render_table(&[]);
        assert!(html.contains(NO_DATA_MESSAGE));
        assert!(!html.contains("<table>"));
    }

    #[test]
    fn test_stylesheet_is_scoped() {
        let css = stylesheet("totaltable");
        assert!(css.contains("#totaltable table"));
        assert!(!css.contains("__ID__"));
    }

    #[test]
    fn test_render_error_and_loading() {
        assert_eq!(
            render_error("取得に失敗しました"),
            "<div class=\"error\">エラー: 取得に失敗しました</div>"
        );
        assert!(render_loading().contains("loading"));
    }

    #[test]
    fn test_render_page_embeds_fragment() {
        let page = render_page("totaltable", "<p>x</p>");
        assert!(page.contains("<div id=\"totaltable\">"));
        assert!(page.contains("<p>x</p>"));
        assert!(page.contains("#totaltable th"));
    }
}
