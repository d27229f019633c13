//! Filer header block: name, status, district, year, reporting period.

use crate::core::classifier::infer_filing_type;
use crate::domain::model::FilingHeader;
use crate::parse::fields::normalize_date;
use regex::Regex;

/// Extract the header from the preamble lines of the document (everything
/// before the first schedule heading).
pub fn from_lines(lines: &[&str]) -> FilingHeader {
    let mut header = FilingHeader::default();
    let text = lines.join("\n");

    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some((key, value)) = split_key_value(trimmed) {
            apply_field(&mut header, &key, &value);
        }
    }

    if header.filing_year.is_none() {
        header.filing_year = year_from_title(&text);
    }
    if header.filing_type.is_none() {
        header.filing_type = infer_filing_type(&text).map(|ft| ft.code().to_string());
    }
    header
}

/// Block-mode variant: key/value pairs recovered from form fields.
pub fn from_key_values(pairs: &[(String, String)], full_text: &str) -> FilingHeader {
    let mut header = FilingHeader::default();
    for (key, value) in pairs {
        apply_field(&mut header, key, value);
    }
    if header.filing_year.is_none() {
        header.filing_year = year_from_title(full_text);
    }
    if header.filing_type.is_none() {
        header.filing_type = infer_filing_type(full_text).map(|ft| ft.code().to_string());
    }
    header
}

fn split_key_value(line: &str) -> Option<(String, String)> {
    let (key, value) = line.split_once(':')?;
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    Some((key.trim().to_lowercase(), value.to_string()))
}

fn apply_field(header: &mut FilingHeader, key: &str, value: &str) {
    let value = value.trim();
    if value.is_empty() {
        return;
    }
    match key {
        k if k.contains("name") && !k.contains("charity") => {
            header.filer_name.get_or_insert_with(|| value.to_string());
        }
        k if k.contains("status") => {
            header.status.get_or_insert_with(|| value.to_string());
        }
        k if k.contains("state") || k.contains("district") => {
            header.state_district.get_or_insert_with(|| value.to_string());
        }
        k if k.contains("year") => {
            if let Ok(year) = value.parse::<u16>() {
                header.filing_year.get_or_insert(year);
            }
        }
        k if k.contains("period") => {
            let (start, end) = parse_period(value);
            if header.period_start.is_none() {
                header.period_start = start;
                header.period_end = end;
            }
        }
        k if k.contains("filing type") || k == "type" => {
            let code = value.chars().next().map(|c| c.to_ascii_uppercase());
            if let Some(code) = code.filter(char::is_ascii_uppercase) {
                header.filing_type.get_or_insert_with(|| code.to_string());
            }
        }
        _ => {}
    }
}

/// "01/01/2025 to 12/31/2025" or "01/01/2025 - 12/31/2025".
fn parse_period(value: &str) -> (Option<chrono::NaiveDate>, Option<chrono::NaiveDate>) {
    let re = Regex::new(
        r"(\d{1,2}/\d{1,2}/\d{2,4})\s*(?:to|through|[-\u{2013}])\s*(\d{1,2}/\d{1,2}/\d{2,4})",
    )
    .unwrap();
    if let Some(caps) = re.captures(value) {
        return (normalize_date(&caps[1]).ok(), normalize_date(&caps[2]).ok());
    }
    (normalize_date(value).ok(), None)
}

/// "... Report 2025" or "Calendar Year 2025" in the title block.
fn year_from_title(text: &str) -> Option<u16> {
    let re = Regex::new(r"(?i)(?:calendar\s+year|report(?:\s+for)?)\s+(20\d{2})\b").unwrap();
    re.captures(text)
        .and_then(|caps| caps[1].parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn labelled_fields() {
        let lines = vec![
            "Financial Disclosure Report",
            "Name: Hon. Arthur King",
            "Status: Member",
            "State/District: AV03",
            "Filing Year: 2025",
            "Period: 01/01/2025 to 12/31/2025",
            "Filing Type: A",
        ];
        let header = from_lines(&lines);
        assert_eq!(header.filer_name.as_deref(), Some("Hon. Arthur King"));
        assert_eq!(header.status.as_deref(), Some("Member"));
        assert_eq!(header.state_district.as_deref(), Some("AV03"));
        assert_eq!(header.filing_year, Some(2025));
        assert_eq!(header.period_start, NaiveDate::from_ymd_opt(2025, 1, 1));
        assert_eq!(header.period_end, NaiveDate::from_ymd_opt(2025, 12, 31));
        assert_eq!(header.filing_type.as_deref(), Some("A"));
    }

    #[test]
    fn year_inferred_from_title() {
        let lines = vec!["Annual Report for Calendar Year 2024", "Name: B. Filer"];
        let header = from_lines(&lines);
        assert_eq!(header.filing_year, Some(2024));
    }

    #[test]
    fn filing_type_inferred_from_title_keywords() {
        let lines = vec!["Periodic Transaction Report", "Name: B. Filer"];
        let header = from_lines(&lines);
        assert_eq!(header.filing_type.as_deref(), Some("P"));
    }

    #[test]
    fn key_value_pairs() {
        let pairs = vec![
            ("Name".to_string(), "Hon. Arthur King".to_string()),
            ("Status".to_string(), "Member".to_string()),
        ];
        let header = from_key_values(
            &pairs
                .into_iter()
                .map(|(k, v)| (k.to_lowercase(), v))
                .collect::<Vec<_>>(),
            "Annual Report 2025",
        );
        assert_eq!(header.filer_name.as_deref(), Some("Hon. Arthur King"));
        assert_eq!(header.filing_year, Some(2025));
    }
}
