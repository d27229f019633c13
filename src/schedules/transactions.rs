//! Periodic-transaction-report extractor.
//!
//! PTR text frequently wraps one logical transaction across several lines and
//! smashes adjacent tokens together with no separating whitespace
//! ("05/10/202505/12/2025$1,001 - $15,000"). Entries are therefore matched by
//! a single ordered pattern scan over the whole un-wrapped section, after a
//! normalization pass reinserts separators at date/date, date/amount, and
//! code/date boundaries.

use crate::domain::model::{ScheduleList, Transaction, TransactionKind, ValueRange};
use crate::normalize::assets::clean_asset_name;
use crate::parse::fields::{normalize_date, parse_owner_code, parse_value_range};
use crate::parse::tables::{
    is_blank_row, is_none_disclosed_row, map_columns, mapped_cell, Table,
};
use regex::Regex;

/// Extraction counters surfaced in pipeline quality metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PtrDiagnostics {
    /// Candidate rows that looked like transactions but failed the full
    /// pattern. Dropped, never emitted as partial records.
    pub partial_rows: usize,
}

const COLUMNS: &[(&str, &[&str])] = &[
    ("owner", &["owner"]),
    ("asset", &["asset", "security"]),
    ("kind", &["transaction type", "type"]),
    ("date", &["transaction date", "date"]),
    ("notification", &["notification"]),
    ("amount", &["amount", "value"]),
];

pub fn from_table(table: &Table) -> (ScheduleList<Transaction>, PtrDiagnostics) {
    let mapping = map_columns(&table.header, COLUMNS);
    let mut entries = Vec::new();
    let mut diagnostics = PtrDiagnostics::default();
    let mut disclosed_none = false;

    for row in &table.rows {
        if is_blank_row(row) {
            continue;
        }
        if is_none_disclosed_row(row) {
            disclosed_none = true;
            continue;
        }

        let asset = mapped_cell(row, &mapping, "asset");
        let kind = mapped_cell(row, &mapping, "kind").and_then(parse_kind);
        let date = mapped_cell(row, &mapping, "date").and_then(|c| normalize_date(c).ok());
        let notification =
            mapped_cell(row, &mapping, "notification").and_then(|c| normalize_date(c).ok());
        let amount = mapped_cell(row, &mapping, "amount").map(parse_value_range);

        let (Some(asset), Some(kind), Some(date), Some(amount)) = (asset, kind, date, amount)
        else {
            diagnostics.partial_rows += 1;
            continue;
        };
        if !amount.is_parsed() {
            diagnostics.partial_rows += 1;
            continue;
        }

        let cleaned = clean_asset_name(asset);
        let owner_code = mapped_cell(row, &mapping, "owner")
            .map(parse_owner_code)
            .or(cleaned.owner)
            .unwrap_or_default();

        entries.push(Transaction {
            owner_code,
            asset_name: cleaned.name,
            ticker: None,
            asset_type_code: None,
            kind,
            transaction_date: date,
            notification_date: notification.unwrap_or(date),
            amount_range: amount,
            capital_gain_over_200: None,
        });
    }

    (finish(entries, disclosed_none), diagnostics)
}

/// Reinsert the separators government-generated text drops.
pub fn desmash(text: &str) -> String {
    let mut out = text.to_string();
    let passes: [(&str, &str); 5] = [
        // date glued to a following date
        (r"(\d{1,2}/\d{1,2}/\d{2,4})(?P<next>\d{1,2}/)", "$1 $next"),
        // date glued to an amount, two-digit years included
        (r"(\d{1,2}/\d{1,2}/\d{2,4})(?P<next>\$)", "$1 $next"),
        // closing bracket glued to the next token
        (r"(\])(?P<next>\S)", "$1 $next"),
        // type code glued to a date
        (r"\b(?P<code>[PSE])(?P<next>\d{1,2}/)", "$code $next"),
        // "(partial)" glued to a date
        (r"(?P<paren>\(partial\))(?P<next>\d{1,2}/)", "$paren $next"),
    ];
    for (pattern, replacement) in passes {
        let re = Regex::new(pattern).unwrap();
        out = re.replace_all(&out, replacement).to_string();
    }
    out
}

/// One logical transaction: optional owner marker, wrapped asset name,
/// optional bracketed type code, type, two dates, amount bracket.
fn entry_pattern() -> Regex {
    Regex::new(
        r#"(?x)
        (?:\b(SP|DC|JT)\b[\s:]+)?                               # owner
        ([^\n$]+?)                                              # asset name
        \s*
        (?:\[([A-Z0-9]{1,3})\]\s*)?                             # type code
        # "\b" after "S (partial)" would sit on the ")" and never match;
        # so the boundary applies only to the single-letter alternative.
        \b(S\s*\(partial\)|[PSE]\b)                             # kind
        \s+
        (\d{1,2}/\d{1,2}/\d{2,4})                               # transaction date
        \s+
        (\d{1,2}/\d{1,2}/\d{2,4})                               # notification date
        \s+
        (\$[\d,]+\s*[-\u{2013}\u{2014}]\s*\$[\d,]+|(?i:over)\s+\$[\d,]+|None)  # amount
        (?:\s+(?i:gains?\s*>?\s*\$200\??\s*)?(?:\b(yes|no)\b))? # capital gain flag
        "#,
    )
    .unwrap()
}

/// Section-level scan: lines are un-wrapped into one buffer, de-smashed, and
/// matched with a single ordered pattern pass.
pub fn from_text_section(lines: &[&str]) -> (ScheduleList<Transaction>, PtrDiagnostics) {
    let mut diagnostics = PtrDiagnostics::default();
    let mut disclosed_none = false;

    let body: Vec<&str> = lines
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty() && !is_header_line(l))
        .collect();
    if body
        .iter()
        .any(|l| is_none_disclosed_row(&[l.to_string()]))
    {
        disclosed_none = true;
    }

    let unwrapped = desmash(&body.join(" "));

    let date_pair = Regex::new(r"\d{1,2}/\d{1,2}/\d{2,4}\s+\d{1,2}/\d{1,2}/\d{2,4}").unwrap();
    let candidates = date_pair.find_iter(&unwrapped).count();

    let mut entries = Vec::new();
    for caps in entry_pattern().captures_iter(&unwrapped) {
        let owner_code = caps
            .get(1)
            .map(|m| parse_owner_code(m.as_str()))
            .unwrap_or_default();
        let cleaned = clean_asset_name(caps.get(2).map(|m| m.as_str()).unwrap_or(""));
        let asset_type_code = caps.get(3).map(|m| m.as_str().to_string());
        let Some(kind) = parse_kind(caps.get(4).map(|m| m.as_str()).unwrap_or("")) else {
            continue;
        };
        let (Ok(transaction_date), Ok(notification_date)) =
            (normalize_date(&caps[5]), normalize_date(&caps[6]))
        else {
            continue;
        };
        let amount_range = parse_value_range(&caps[7]);

        if cleaned.name.is_empty() || !amount_range.is_parsed() {
            continue;
        }

        entries.push(Transaction {
            owner_code,
            asset_name: cleaned.name,
            ticker: None,
            asset_type_code,
            kind,
            transaction_date,
            notification_date,
            amount_range,
            capital_gain_over_200: caps
                .get(8)
                .map(|m| m.as_str().eq_ignore_ascii_case("yes")),
        });
    }

    diagnostics.partial_rows = candidates.saturating_sub(entries.len());
    if diagnostics.partial_rows > 0 {
        tracing::warn!(
            dropped = diagnostics.partial_rows,
            "transaction rows failed the full pattern and were dropped"
        );
    }

    (finish(entries, disclosed_none), diagnostics)
}

fn parse_kind(cell: &str) -> Option<TransactionKind> {
    let lower = cell.trim().to_lowercase();
    match lower.as_str() {
        "p" | "purchase" => Some(TransactionKind::Purchase),
        "s" | "sale" | "sold" => Some(TransactionKind::Sale),
        "e" | "exchange" => Some(TransactionKind::Exchange),
        _ if lower.starts_with("s (partial") || lower.starts_with("s(partial") => {
            Some(TransactionKind::PartialSale)
        }
        _ if lower.contains("partial") => Some(TransactionKind::PartialSale),
        _ => None,
    }
}

fn is_header_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    lower.contains("transaction") && (lower.contains("date") || lower.contains("type"))
        || lower.contains("notification date")
}

fn finish(entries: Vec<Transaction>, disclosed_none: bool) -> ScheduleList<Transaction> {
    if entries.is_empty() {
        if disclosed_none {
            ScheduleList::DisclosedNone
        } else {
            ScheduleList::NotFound
        }
    } else {
        ScheduleList::Entries(entries)
    }
}
