//! Primitive field parsers shared by every schedule extractor.

use crate::domain::model::{OwnerCode, ValueRange};
use crate::utils::error::{ExtractError, Result};
use chrono::NaiveDate;
use regex::Regex;

/// Normalize a filing date into a calendar date.
///
/// Accepts `MM/DD/YYYY`, `MM-DD-YYYY`, their two-digit-year variants
/// (years < 50 are 20xx, the rest 19xx), and long-form month names
/// ("May 15, 2025"). Returns `DateParseError` when nothing matches; callers
/// treat that as an absent optional, never as control flow.
pub fn normalize_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ExtractError::DateParseError {
            input: input.to_string(),
        });
    }

    let numeric = Regex::new(r"^(\d{1,2})[/-](\d{1,2})[/-](\d{2,4})$").unwrap();
    if let Some(caps) = numeric.captures(trimmed) {
        let month: u32 = caps[1].parse().unwrap_or(0);
        let day: u32 = caps[2].parse().unwrap_or(0);
        let year = expand_year(caps[3].parse().unwrap_or(0), caps[3].len());
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            return Ok(date);
        }
    }

    let long_form = Regex::new(r"^([A-Za-z]+)\.?\s+(\d{1,2})(?:st|nd|rd|th)?,?\s+(\d{2,4})$")
        .unwrap();
    if let Some(caps) = long_form.captures(trimmed) {
        if let Some(month) = month_from_name(&caps[1]) {
            let day: u32 = caps[2].parse().unwrap_or(0);
            let year = expand_year(caps[3].parse().unwrap_or(0), caps[3].len());
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                return Ok(date);
            }
        }
    }

    Err(ExtractError::DateParseError {
        input: input.to_string(),
    })
}

fn expand_year(raw: i32, digits: usize) -> i32 {
    if digits <= 2 {
        if raw < 50 {
            2000 + raw
        } else {
            1900 + raw
        }
    } else {
        raw
    }
}

fn month_from_name(name: &str) -> Option<u32> {
    let lower = name.to_lowercase();
    let month = match lower.as_str() {
        "january" | "jan" => 1,
        "february" | "feb" => 2,
        "march" | "mar" => 3,
        "april" | "apr" => 4,
        "may" => 5,
        "june" | "jun" => 6,
        "july" | "jul" => 7,
        "august" | "aug" => 8,
        "september" | "sept" | "sep" => 9,
        "october" | "oct" => 10,
        "november" | "nov" => 11,
        "december" | "dec" => 12,
        _ => return None,
    };
    Some(month)
}

/// Parse a disclosure dollar bracket.
///
/// `$A - $B` (hyphen, en dash, or em dash), `Over $A`, and the
/// none/below-threshold spellings all normalize; anything else yields the
/// unparsed `(None, None)` range rather than an error.
pub fn parse_value_range(input: &str) -> ValueRange {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return ValueRange::unparsed();
    }

    let lower = trimmed.to_lowercase();
    if lower == "none"
        || lower == "n/a"
        || lower == "na"
        || lower.starts_with("less than $1,001")
        || lower.starts_with("none (or less than")
    {
        return ValueRange::none_disclosed();
    }

    let over = Regex::new(r"(?i)^over\s+\$?([\d,]+)").unwrap();
    if let Some(caps) = over.captures(trimmed) {
        if let Some(amount) = parse_dollars(&caps[1]) {
            return ValueRange::over(amount);
        }
    }

    let bracket = Regex::new(r"\$?([\d,]+)\s*[-\u{2013}\u{2014}]\s*\$?([\d,]+)").unwrap();
    if let Some(caps) = bracket.captures(trimmed) {
        if let (Some(low), Some(high)) = (parse_dollars(&caps[1]), parse_dollars(&caps[2])) {
            if low <= high {
                return ValueRange::bracket(low, high);
            }
        }
    }

    ValueRange::unparsed()
}

/// Strip `$` and thousands separators; reject anything non-numeric.
pub fn parse_dollars(input: &str) -> Option<u64> {
    let cleaned: String = input
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

/// Scan for a standalone SP / DC / JT token. Defaults to the filer (`Self`)
/// when no marker is present, never to null.
pub fn parse_owner_code(input: &str) -> OwnerCode {
    let re = Regex::new(r"(?i)\b(SP|DC|JT)\b").unwrap();
    match re.captures(input) {
        Some(caps) => match caps[1].to_uppercase().as_str() {
            "SP" => OwnerCode::Spouse,
            "DC" => OwnerCode::DependentChild,
            "JT" => OwnerCode::Joint,
            _ => OwnerCode::Self_,
        },
        None => OwnerCode::Self_,
    }
}

/// Look for a selection marker near each candidate label and return the
/// first option that has one within `radius` characters of an occurrence.
///
/// Markers: checked-box glyphs, `[X]` / `(X)`, or a bare standalone X.
pub fn detect_checkbox(text: &str, options: &[&str], radius: usize) -> Option<String> {
    let marker = Regex::new(r"[\u{2611}\u{2612}\u{25A0}\u{2713}\u{2714}]|\[\s*[xX]\s*\]|\(\s*[xX]\s*\)|\b[xX]\b")
        .unwrap();

    for option in options {
        // Case-insensitive search over the original text; lowercasing a copy
        // can change byte lengths and shift the window.
        let label = Regex::new(&format!("(?i){}", regex::escape(option))).unwrap();
        for found in label.find_iter(text) {
            let window_start = floor_char_boundary(text, found.start().saturating_sub(radius));
            let window_end = ceil_char_boundary(text, (found.end() + radius).min(text.len()));
            if marker.is_match(&text[window_start..window_end]) {
                return Some((*option).to_string());
            }
        }
    }
    None
}

fn floor_char_boundary(s: &str, mut idx: usize) -> usize {
    while idx > 0 && !s.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

fn ceil_char_boundary(s: &str, mut idx: usize) -> usize {
    while idx < s.len() && !s.is_char_boundary(idx) {
        idx += 1;
    }
    idx
}

/// Collect the non-empty lines following a start marker until the end
/// marker, a blank line, or the line cap.
pub fn capture_multiline(
    lines: &[&str],
    start_marker: &str,
    end_marker: Option<&str>,
    max_lines: usize,
) -> Vec<String> {
    let lower_start = start_marker.to_lowercase();
    let start = match lines
        .iter()
        .position(|l| l.to_lowercase().contains(&lower_start))
    {
        Some(i) => i + 1,
        None => return Vec::new(),
    };

    let mut captured = Vec::new();
    for line in lines.iter().skip(start) {
        if captured.len() >= max_lines {
            break;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            break;
        }
        if let Some(end) = end_marker {
            if trimmed.to_lowercase().contains(&end.to_lowercase()) {
                break;
            }
        }
        captured.push(trimmed.to_string());
    }
    captured
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_slash_format() {
        assert_eq!(
            normalize_date("05/15/2025").unwrap(),
            NaiveDate::from_ymd_opt(2025, 5, 15).unwrap()
        );
    }

    #[test]
    fn date_dash_and_two_digit_years() {
        assert_eq!(
            normalize_date("12-31-24").unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
        );
        assert_eq!(
            normalize_date("01/01/99").unwrap(),
            NaiveDate::from_ymd_opt(1999, 1, 1).unwrap()
        );
    }

    #[test]
    fn date_long_form_month() {
        assert_eq!(
            normalize_date("May 15, 2025").unwrap(),
            NaiveDate::from_ymd_opt(2025, 5, 15).unwrap()
        );
        assert_eq!(
            normalize_date("Sept 3 2021").unwrap(),
            NaiveDate::from_ymd_opt(2021, 9, 3).unwrap()
        );
    }

    #[test]
    fn date_rejects_garbage() {
        assert!(normalize_date("tomorrow").is_err());
        assert!(normalize_date("13/45/2020").is_err());
        assert!(normalize_date("").is_err());
    }

    #[test]
    fn value_range_bracket() {
        assert_eq!(
            parse_value_range("$1,001 - $15,000"),
            ValueRange::bracket(1001, 15000)
        );
        assert_eq!(
            parse_value_range("$1,001-$15,000"),
            ValueRange::bracket(1001, 15000)
        );
        assert_eq!(
            parse_value_range("$15,001 \u{2013} $50,000"),
            ValueRange::bracket(15001, 50000)
        );
    }

    #[test]
    fn value_range_over() {
        let v = parse_value_range("Over $50,000,000");
        assert_eq!(v.low, Some(50_000_001));
        assert_eq!(v.high, None);
    }

    #[test]
    fn value_range_none() {
        assert_eq!(parse_value_range("None"), ValueRange::none_disclosed());
        assert_eq!(parse_value_range("N/A"), ValueRange::none_disclosed());
        assert_eq!(
            parse_value_range("less than $1,001"),
            ValueRange::none_disclosed()
        );
    }

    #[test]
    fn value_range_unparsable() {
        assert_eq!(parse_value_range("call for pricing"), ValueRange::unparsed());
    }

    #[test]
    fn owner_code_detection() {
        assert_eq!(parse_owner_code("SP Acme Corp"), OwnerCode::Spouse);
        assert_eq!(parse_owner_code("Acme Corp"), OwnerCode::Self_);
        assert_eq!(parse_owner_code("jt savings account"), OwnerCode::Joint);
        assert_eq!(parse_owner_code("DC trust"), OwnerCode::DependentChild);
        // Substrings never match: "SPDR" is not a spouse marker.
        assert_eq!(parse_owner_code("SPDR S&P 500"), OwnerCode::Self_);
    }

    #[test]
    fn checkbox_bracketed_x() {
        let text = "Transaction type: [X] Purchase  [ ] Sale";
        assert_eq!(
            detect_checkbox(text, &["Purchase", "Sale"], 10),
            Some("Purchase".to_string())
        );
    }

    #[test]
    fn checkbox_glyph() {
        let text = "\u{2612} I certify the above is true";
        assert_eq!(
            detect_checkbox(text, &["certify"], 20),
            Some("certify".to_string())
        );
    }

    #[test]
    fn checkbox_window_survives_non_ascii_prefix() {
        // "İ" grows by a byte when lowercased; the search window must not
        // shift off the marker.
        let text = "İ İ İ İ İ İ İ İ [X] certify";
        assert_eq!(
            detect_checkbox(text, &["certify"], 5),
            Some("certify".to_string())
        );
    }

    #[test]
    fn checkbox_absent() {
        let text = "Purchase or Sale, neither marked";
        assert_eq!(detect_checkbox(text, &["Purchase", "Sale"], 5), None);
    }

    #[test]
    fn multiline_capture_stops_at_blank() {
        let lines = vec![
            "Comments:",
            "first wrapped line",
            "second wrapped line",
            "",
            "unrelated",
        ];
        let captured = capture_multiline(&lines, "Comments", None, 10);
        assert_eq!(captured, vec!["first wrapped line", "second wrapped line"]);
    }

    #[test]
    fn multiline_capture_honors_cap_and_end_marker() {
        let lines = vec!["Start:", "a", "b", "End:", "c"];
        assert_eq!(capture_multiline(&lines, "Start", Some("End"), 10).len(), 2);
        assert_eq!(capture_multiline(&lines, "Start", None, 1), vec!["a"]);
    }
}
