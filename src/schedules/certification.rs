//! Certification block: signed/unsigned state, signer, signature date.

use crate::domain::model::Certification;
use crate::parse::fields::{detect_checkbox, normalize_date};
use regex::Regex;

/// Extract certification state from the certification section lines.
///
/// A filing counts as certified when the section carries an "I certify"
/// statement or a checked attestation box. The signer and date come from the
/// digital-signature line, e.g. "Digitally Signed: Hon. Arthur King , 05/15/2025".
pub fn from_lines(lines: &[&str]) -> Certification {
    let text = lines.join("\n");
    let lower = text.to_lowercase();

    let is_certified = lower.contains("i certify")
        || lower.contains("i hereby certify")
        || detect_checkbox(&text, &["certify"], 120).is_some();

    let (signer, signature_date) = parse_signature(&text);

    Certification {
        is_certified: is_certified || signer.is_some(),
        signer,
        signature_date,
    }
}

fn parse_signature(text: &str) -> (Option<String>, Option<chrono::NaiveDate>) {
    let signed = Regex::new(
        r"(?i)(?:digitally\s+signed(?:\s+by)?|signed(?:\s+by)?|signature)\s*[:\-]\s*([^,\n]+?)\s*(?:,\s*(\d{1,2}/\d{1,2}/\d{2,4}))?\s*$",
    )
    .unwrap();

    for line in text.lines() {
        if let Some(caps) = signed.captures(line.trim()) {
            let signer = caps[1].trim().to_string();
            if signer.is_empty() {
                continue;
            }
            let date = caps
                .get(2)
                .and_then(|m| normalize_date(m.as_str()).ok())
                .or_else(|| date_near_signature(text));
            return (Some(signer), date);
        }
    }
    (None, date_near_signature(text))
}

/// A "Date: 05/15/2025" line in the certification block.
fn date_near_signature(text: &str) -> Option<chrono::NaiveDate> {
    let re = Regex::new(r"(?im)^\s*date\s*[:\-]\s*(\d{1,2}/\d{1,2}/\d{2,4})\s*$").unwrap();
    re.captures(text)
        .and_then(|caps| normalize_date(&caps[1]).ok())
}
