//! Schedule D: liabilities.

use crate::domain::model::{Liability, ScheduleList, ValueRange};
use crate::normalize::assets::strip_ownership_prefix;
use crate::parse::fields::{parse_owner_code, parse_value_range};
use crate::parse::tables::{
    is_blank_row, is_none_disclosed_row, map_columns, mapped_cell, split_text_row, Table,
};
use regex::Regex;

const COLUMNS: &[(&str, &[&str])] = &[
    ("owner", &["owner"]),
    ("creditor", &["creditor"]),
    ("date", &["date incurred", "date"]),
    ("liability_type", &["type of liability", "type"]),
    ("amount", &["amount", "value", "liability"]),
];

pub fn from_table(table: &Table) -> ScheduleList<Liability> {
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

        let creditor = mapped_cell(row, &mapping, "creditor");
        let liability_type = mapped_cell(row, &mapping, "liability_type");
        // Required subset: creditor and type.
        let (Some(creditor), Some(liability_type)) = (creditor, liability_type) else {
            continue;
        };

        let cleaned = strip_ownership_prefix(creditor);
        let owner_code = mapped_cell(row, &mapping, "owner")
            .map(parse_owner_code)
            .or(cleaned.owner);

        entries.push(Liability {
            owner_code,
            creditor: cleaned.name,
            date_incurred: mapped_cell(row, &mapping, "date").map(str::to_string),
            liability_type: liability_type.to_string(),
            amount_range: mapped_cell(row, &mapping, "amount")
                .map(parse_value_range)
                .unwrap_or_else(ValueRange::unparsed),
        });
    }

    finish(entries, disclosed_none)
}

pub fn from_text_section(lines: &[&str]) -> ScheduleList<Liability> {
    let mut entries = Vec::new();
    let mut disclosed_none = false;
    let month_year = Regex::new(r"^\d{1,2}/\d{2,4}$").unwrap();

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

        // Columns by content: amount is the first bracket cell, the date is a
        // MM/YYYY cell, the creditor leads, the type is whatever remains.
        let amount_idx = cells
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, c)| parse_value_range(c).is_parsed())
            .map(|(i, _)| i);
        let date_idx = cells
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, c)| month_year.is_match(c))
            .map(|(i, _)| i);

        let cleaned = strip_ownership_prefix(&cells[0]);
        let liability_type = cells
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(i, _)| Some(*i) != amount_idx && Some(*i) != date_idx)
            .map(|(_, c)| c.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        if cleaned.name.is_empty() || liability_type.is_empty() {
            continue;
        }

        entries.push(Liability {
            owner_code: cleaned.owner,
            creditor: cleaned.name,
            date_incurred: date_idx.map(|i| cells[i].clone()),
            liability_type,
            amount_range: amount_idx
                .map(|i| parse_value_range(&cells[i]))
                .unwrap_or_else(ValueRange::unparsed),
        });
    }

    finish(entries, disclosed_none)
}

fn is_header_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    lower.contains("creditor")
        && (lower.contains("liability") || lower.contains("amount") || lower.contains("type"))
}

fn finish(entries: Vec<Liability>, disclosed_none: bool) -> ScheduleList<Liability> {
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
