//! Display formatting for aggregated values
//!
//! Converts aggregator outputs into presentation strings. Indeterminate
//! values (`None`) always render as the fixed placeholder, which is
//! distinguishable from a real zero by construction.

mod dashboard;

pub use dashboard::{
    dashboard_view_model, CardTheme, ComparisonRowView, DashboardViewModel, StatCard,
};

/// Placeholder rendered for indeterminate values
pub const PLACEHOLDER: &str = "—";

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let len = digits.len();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format an amount with thousands separators
///
/// Decimal places (two) appear only when the value has a fractional part
/// after rounding to cents; whole amounts render without them.
pub fn format_amount(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    let sign = if rounded < 0.0 { "-" } else { "" };
    let abs = rounded.abs();
    let int_part = group_thousands(&format!("{}", abs.trunc() as i64));
    let cents = ((abs - abs.trunc()) * 100.0).round() as i64;
    if cents == 0 {
        format!("{}{}", sign, int_part)
    } else {
        format!("{}{}.{:02}", sign, int_part, cents)
    }
}

/// Format an optional amount; indeterminate renders as the placeholder
pub fn format_opt_amount(value: Option<f64>) -> String {
    match value {
        Some(v) => format_amount(v),
        None => PLACEHOLDER.to_string(),
    }
}

/// Format an amount with the reporting currency appended
pub fn format_money(value: f64, currency: Option<&str>) -> String {
    match currency {
        Some(code) => format!("{} {}", format_amount(value), code),
        None => format_amount(value),
    }
}

/// Format a percentage; indeterminate renders as the placeholder
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(p) => format!("{:.1}%", p),
        None => PLACEHOLDER.to_string(),
    }
}

/// Directional trend text: glyph, absolute magnitude, comparison baseline
///
/// Indeterminate trends render as the empty string; no directional claim
/// is made about them.
pub fn trend_text(trend_pct: Option<f64>) -> String {
    match trend_pct {
        Some(p) if p >= 0.0 => format!("▲ {:.1}% vs opening", p),
        Some(p) => format!("▼ {:.1}% vs opening", p.abs()),
        None => String::new(),
    }
}

/// Whether a trend points down (negative); indeterminate is not down
pub fn trend_down(trend_pct: Option<f64>) -> bool {
    matches!(trend_pct, Some(p) if p < 0.0)
}

/// Format a record count
pub fn format_count(count: usize) -> String {
    group_thousands(&count.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thousands_grouping() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(857.0), "857");
        assert_eq!(format_amount(1_500.0), "1,500");
        assert_eq!(format_amount(12_345_678.0), "12,345,678");
    }

    #[test]
    fn test_decimals_kept_only_when_present() {
        assert_eq!(format_amount(32.85), "32.85");
        assert_eq!(format_amount(32.5), "32.50");
        assert_eq!(format_amount(1_234.567), "1,234.57");
        assert_eq!(format_amount(100.0), "100");
    }

    #[test]
    fn test_negative_amounts() {
        assert_eq!(format_amount(-1_500.0), "-1,500");
        assert_eq!(format_amount(-0.25), "-0.25");
    }

    #[test]
    fn test_placeholder_never_matches_zero() {
        assert_eq!(format_opt_amount(None), PLACEHOLDER);
        assert_eq!(format_opt_amount(Some(0.0)), "0");
        assert_ne!(format_opt_amount(None), format_opt_amount(Some(0.0)));
        assert_eq!(format_percent(None), PLACEHOLDER);
        assert_ne!(format_percent(None), format_percent(Some(0.0)));
    }

    #[test]
    fn test_percent() {
        assert_eq!(format_percent(Some(40.0)), "40.0%");
        assert_eq!(format_percent(Some(-3.2)), "-3.2%");
    }

    #[test]
    fn test_money_with_currency() {
        assert_eq!(format_money(1_500.0, Some("EUR")), "1,500 EUR");
        assert_eq!(format_money(1_500.0, None), "1,500");
    }

    #[test]
    fn test_trend_text_direction() {
        assert_eq!(trend_text(Some(12.5)), "▲ 12.5% vs opening");
        assert_eq!(trend_text(Some(0.0)), "▲ 0.0% vs opening");
        assert_eq!(trend_text(Some(-3.2)), "▼ 3.2% vs opening");
        assert_eq!(trend_text(None), "");
    }

    #[test]
    fn test_trend_down_flag() {
        assert!(trend_down(Some(-0.1)));
        assert!(!trend_down(Some(0.0)));
        assert!(!trend_down(None));
    }
}
