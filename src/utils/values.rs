// src/utils/values.rs
//! String-to-value converters shared by every extractor.
//!
//! All parsers are total: malformed or absent input yields `None`, never an
//! error or a panic.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

// "30 June 2024", "1 Jul 2023", "30 June, 2024"
static MONTH_NAME_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})\s+([A-Za-z]+)\.?,?\s+(\d{4})$")
        .expect("Failed to compile MONTH_NAME_DATE_RE")
});

// "30/06/2024" (day first)
static SLASH_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})$").expect("Failed to compile SLASH_DATE_RE")
});

// "2024-06-30", "2024-06-30T00:00:00Z", "2024-06-30 12:00"
static ISO_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4})-(\d{2})-(\d{2})(?:[T\s].*)?$").expect("Failed to compile ISO_DATE_RE")
});

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Maps a full or abbreviated English month name to its 1-based number.
fn month_number(name: &str) -> Option<u32> {
    let lower = name.to_lowercase();
    if lower.len() < 3 {
        return None;
    }
    // "sept" is a common abbreviation that would otherwise fail the full-name check
    if lower == "sept" {
        return Some(9);
    }
    MONTHS
        .iter()
        .position(|m| lower.starts_with(m))
        .filter(|&idx| {
            let full = [
                "january", "february", "march", "april", "may", "june", "july", "august",
                "september", "october", "november", "december",
            ][idx];
            lower.len() == 3 || full == lower
        })
        .map(|idx| idx as u32 + 1)
}

fn parse_i32(s: &str) -> Option<i32> {
    s.parse().ok()
}

fn parse_u32(s: &str) -> Option<u32> {
    s.parse().ok()
}

/// Parses "D Month YYYY", "DD/MM/YYYY" or ISO-like strings into a calendar date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(caps) = MONTH_NAME_DATE_RE.captures(trimmed) {
        let day = parse_u32(&caps[1])?;
        let month = month_number(&caps[2])?;
        let year = parse_i32(&caps[3])?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if let Some(caps) = SLASH_DATE_RE.captures(trimmed) {
        let day = parse_u32(&caps[1])?;
        let month = parse_u32(&caps[2])?;
        let year = parse_i32(&caps[3])?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if let Some(caps) = ISO_DATE_RE.captures(trimmed) {
        let year = parse_i32(&caps[1])?;
        let month = parse_u32(&caps[2])?;
        let day = parse_u32(&caps[3])?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    tracing::trace!("Unparseable date string: '{}'", trimmed);
    None
}

/// Parses a currency amount such as "$1,234.56" or "(1,234.56)".
///
/// Parenthesized amounts are negative. Returns `None` for empty strings,
/// lone dashes and anything that does not yield a finite number.
pub fn parse_currency(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let (negative, body) = match trimmed.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
        Some(inner) => (true, inner),
        None => (false, trimmed),
    };

    let cleaned: String = body
        .chars()
        .filter(|c| !matches!(c, '$' | ',') && !c.is_whitespace())
        .collect();
    if !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    let value: f64 = cleaned.parse().ok().filter(|v: &f64| v.is_finite())?;
    Some(if negative { -value } else { value })
}

/// Parses a percentage such as "12.34%" into `12.34`.
pub fn parse_percentage(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let body = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
    if !body.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    let cleaned = body.replace(',', "");
    cleaned.parse().ok().filter(|v: &f64| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_currency() {
        assert_eq!(parse_currency("(1,234.56)"), Some(-1234.56));
        assert_eq!(parse_currency("$1,234.56"), Some(1234.56));
        assert_eq!(parse_currency("-$12.00"), Some(-12.0));
        assert_eq!(parse_currency(" 600,000.00 "), Some(600000.0));
        assert_eq!(parse_currency(""), None);
        assert_eq!(parse_currency("-"), None);
        assert_eq!(parse_currency("$"), None);
        assert_eq!(parse_currency("abc"), None);
    }

    #[test]
    fn test_parse_percentage() {
        assert_eq!(parse_percentage("12.34%"), Some(12.34));
        assert_eq!(parse_percentage("-3.5%"), Some(-3.5));
        assert_eq!(parse_percentage("40"), Some(40.0));
        assert_eq!(parse_percentage("-"), None);
        assert_eq!(parse_percentage("%"), None);
        assert_eq!(parse_percentage(""), None);
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 6, 30);
        assert_eq!(parse_date("30 June 2024"), expected);
        assert_eq!(parse_date("30 Jun 2024"), expected);
        assert_eq!(parse_date("30 June, 2024"), expected);
        assert_eq!(parse_date("30/06/2024"), expected);
        assert_eq!(parse_date("2024-06-30"), expected);
        assert_eq!(parse_date("2024-06-30T10:00:00Z"), expected);
        assert_eq!(parse_date("1 Sept 2023"), NaiveDate::from_ymd_opt(2023, 9, 1));
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("31/02/2024"), None);
        assert_eq!(parse_date("30 Junk 2024"), None);
        assert_eq!(parse_date("yesterday"), None);
    }
}
