use crate::error::{FinancialReportError, Result};
use chrono::Month;

pub fn month_name(month: u32) -> Result<&'static str> {
    let m = Month::try_from(month as u8)
        .map_err(|_| FinancialReportError::InvalidMonth(month))?;
    Ok(m.name())
}

/// Parses a month cell: accepts an ordinal ("3") or an English name/abbreviation
/// of at least three letters ("Mar", "march").
pub fn parse_month(cell: &str) -> Option<u32> {
    let trimmed = cell.trim();

    if let Ok(ordinal) = trimmed.parse::<u32>() {
        return (1..=12).contains(&ordinal).then_some(ordinal);
    }

    let lower = trimmed.to_lowercase();
    if lower.len() < 3 {
        return None;
    }

    (1..=12u32).find(|m| {
        Month::try_from(*m as u8)
            .map(|month| month.name().to_lowercase().starts_with(&lower))
            .unwrap_or(false)
    })
}

/// Parses a numeric cell, tolerating "$", thousands separators, and whitespace.
pub fn parse_amount(cell: &str) -> Option<f64> {
    let cleaned: String = cell
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | ' '))
        .collect();

    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

pub fn format_currency(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if negative { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, frac)
}

/// Renders a ratio as a percentage, or "n/a" when undefined.
pub fn format_pct(ratio: Option<f64>) -> String {
    match ratio {
        Some(r) => format!("{:.1}%", r * 100.0),
        None => "n/a".to_string(),
    }
}

pub fn format_opt_currency(value: Option<f64>) -> String {
    match value {
        Some(v) => format_currency(v),
        None => "n/a".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_name() {
        assert_eq!(month_name(1).unwrap(), "January");
        assert_eq!(month_name(12).unwrap(), "December");
        assert!(month_name(0).is_err());
        assert!(month_name(13).is_err());
    }

    #[test]
    fn test_parse_month_ordinal_and_name() {
        assert_eq!(parse_month("3"), Some(3));
        assert_eq!(parse_month("Mar"), Some(3));
        assert_eq!(parse_month("march"), Some(3));
        assert_eq!(parse_month("SEPT"), Some(9));
        assert_eq!(parse_month("13"), None);
        assert_eq!(parse_month("xx"), None);
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("$12,345.67"), Some(12345.67));
        assert_eq!(parse_amount(" 1 200 "), Some(1200.0));
        assert_eq!(parse_amount("0"), Some(0.0));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("abc"), None);
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(12345.678), "$12,345.68");
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(-950.5), "-$950.50");
        assert_eq!(format_currency(1_000_000.0), "$1,000,000.00");
    }

    #[test]
    fn test_format_pct() {
        assert_eq!(format_pct(Some(0.4215)), "42.2%");
        assert_eq!(format_pct(Some(-0.031)), "-3.1%");
        assert_eq!(format_pct(None), "n/a");
    }
}
