//! Schedule F: agreements and arrangements.

use crate::domain::model::{Agreement, ScheduleList};
use crate::parse::fields::normalize_date;
use crate::parse::tables::{
    is_blank_row, is_none_disclosed_row, map_columns, mapped_cell, split_text_row, Table,
};

const COLUMNS: &[(&str, &[&str])] = &[
    ("date", &["date"]),
    ("parties", &["parties"]),
    ("agreement_type", &["type"]),
    ("status", &["status"]),
    ("terms", &["terms", "description"]),
];

pub fn from_table(table: &Table) -> ScheduleList<Agreement> {
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
        // Required subset: parties and type.
        let (Some(parties), Some(agreement_type)) = (
            mapped_cell(row, &mapping, "parties"),
            mapped_cell(row, &mapping, "agreement_type"),
        ) else {
            continue;
        };
        entries.push(Agreement {
            date: mapped_cell(row, &mapping, "date").and_then(|c| normalize_date(c).ok()),
            parties: parties.to_string(),
            agreement_type: agreement_type.to_string(),
            status: mapped_cell(row, &mapping, "status").map(str::to_string),
            terms: mapped_cell(row, &mapping, "terms").map(str::to_string),
        });
    }

    finish(entries, disclosed_none)
}

/// Text rows follow the printed column order: date, parties, type, status,
/// terms. The date may be absent.
pub fn from_text_section(lines: &[&str]) -> ScheduleList<Agreement> {
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

        let mut rest = cells.as_slice();
        let date = normalize_date(&rest[0]).ok();
        if date.is_some() {
            rest = &rest[1..];
        }
        if rest.len() < 2 {
            continue;
        }
        entries.push(Agreement {
            date,
            parties: rest[0].clone(),
            agreement_type: rest[1].clone(),
            status: rest.get(2).cloned(),
            terms: if rest.len() > 3 {
                Some(rest[3..].join(" "))
            } else {
                None
            },
        });
    }

    finish(entries, disclosed_none)
}

fn is_header_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    lower.contains("parties") || (lower.contains("agreement") && lower.contains("date"))
}

fn finish(entries: Vec<Agreement>, disclosed_none: bool) -> ScheduleList<Agreement> {
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
