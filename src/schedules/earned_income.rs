//! Schedule C: earned income.

use crate::domain::model::{EarnedIncome, ScheduleList};
use crate::parse::fields::parse_dollars;
use crate::parse::tables::{
    is_blank_row, is_none_disclosed_row, map_columns, mapped_cell, split_text_row, Table,
};

const COLUMNS: &[(&str, &[&str])] = &[
    ("source", &["source"]),
    ("income_type", &["type"]),
    ("amount", &["amount", "income"]),
];

pub fn from_table(table: &Table) -> ScheduleList<EarnedIncome> {
    let mapping = map_columns(&table.header, COLUMNS);
    let mut entries = Vec::new();
    let mut disclosed_none = false;

    for row in &table.rows {
        if is_blank_row(row) {
            continue;
        }
        if is_none_disclosed_row(row) {
            disclosed_none = true;
            continue;
        }
        // Required subset: source and type.
        let (Some(source), Some(income_type)) = (
            mapped_cell(row, &mapping, "source"),
            mapped_cell(row, &mapping, "income_type"),
        ) else {
            continue;
        };
        entries.push(EarnedIncome {
            source: source.to_string(),
            income_type: income_type.to_string(),
            amount: mapped_cell(row, &mapping, "amount").and_then(parse_amount),
        });
    }

    finish(entries, disclosed_none)
}

pub fn from_text_section(lines: &[&str]) -> ScheduleList<EarnedIncome> {
    let mut entries = Vec::new();
    let mut disclosed_none = false;

    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() || is_header_line(trimmed) {
            continue;
        }
        let cells = split_text_row(trimmed);
        if cells.is_empty() {
            continue;
        }
        if is_none_disclosed_row(&cells) {
            disclosed_none = true;
            continue;
        }
        if cells.len() < 2 {
            continue;
        }

        let amount_idx = cells
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, c)| c.starts_with('$'))
            .map(|(i, _)| i);
        let income_type = cells
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(i, _)| Some(*i) != amount_idx)
            .map(|(_, c)| c.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        if income_type.is_empty() {
            continue;
        }

        entries.push(EarnedIncome {
            source: cells[0].clone(),
            income_type,
            amount: amount_idx.and_then(|i| parse_amount(&cells[i])),
        });
    }

    finish(entries, disclosed_none)
}

/// Earned income is an exact figure; "N/A" and blanks are simply absent.
fn parse_amount(cell: &str) -> Option<u64> {
    let trimmed = cell.trim();
    if trimmed.eq_ignore_ascii_case("n/a") || trimmed.eq_ignore_ascii_case("none") {
        return None;
    }
    parse_dollars(trimmed)
}

fn is_header_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    lower.contains("source") && (lower.contains("type") || lower.contains("amount"))
}

fn finish(entries: Vec<EarnedIncome>, disclosed_none: bool) -> ScheduleList<EarnedIncome> {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_extraction() {
        let table = Table::new(
            vec!["Source".into(), "Type".into(), "Amount".into()],
            vec![
                vec![
                    "Camelot University".into(),
                    "Salary".into(),
                    "$24,000".into(),
                ],
                vec!["Spouse employer".into(), "Salary".into(), "N/A".into()],
            ],
        );
        let list = from_table(&table);
        assert_eq!(list.len(), 2);
        assert_eq!(list.entries()[0].amount, Some(24_000));
        assert_eq!(list.entries()[1].amount, None);
    }

    #[test]
    fn text_extraction() {
        let lines = vec![
            "Source   Type   Amount",
            "Camelot University   Salary   $24,000",
        ];
        let list = from_text_section(&lines);
        assert_eq!(list.len(), 1);
        assert_eq!(list.entries()[0].income_type, "Salary");
        assert_eq!(list.entries()[0].amount, Some(24_000));
    }
}
