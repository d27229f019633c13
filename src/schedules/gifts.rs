//! Schedule G: gifts.

use crate::domain::model::{Gift, ScheduleList, ValueRange};
use crate::parse::fields::{normalize_date, parse_dollars, parse_value_range};
use crate::parse::tables::{
    is_blank_row, is_none_disclosed_row, map_columns, mapped_cell, split_text_row, Table,
};

const COLUMNS: &[(&str, &[&str])] = &[
    ("source", &["source", "donor"]),
    ("description", &["description", "gift"]),
    ("value", &["value", "amount"]),
    ("date", &["date"]),
];

pub fn from_table(table: &Table) -> ScheduleList<Gift> {
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
        let Some(source) = mapped_cell(row, &mapping, "source") else {
            continue;
        };
        let description = mapped_cell(row, &mapping, "description");
        let value_range = mapped_cell(row, &mapping, "value")
            .map(parse_gift_value)
            .unwrap_or_else(ValueRange::unparsed);
        // Required subset: a source plus either a description or a value.
        if description.is_none() && !value_range.is_parsed() {
            continue;
        }
        entries.push(Gift {
            source: source.to_string(),
            description: description.unwrap_or_default().to_string(),
            value_range,
            date_received: mapped_cell(row, &mapping, "date").and_then(|c| normalize_date(c).ok()),
        });
    }

    finish(entries, disclosed_none)
}

pub fn from_text_section(lines: &[&str]) -> ScheduleList<Gift> {
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

        let mut value_range = ValueRange::unparsed();
        let mut date_received = None;
        let mut description_cells = Vec::new();
        for cell in &cells[1..] {
            let range = parse_gift_value(cell);
            if range.is_parsed() && !value_range.is_parsed() {
                value_range = range;
            } else if let Ok(date) = normalize_date(cell) {
                date_received.get_or_insert(date);
            } else {
                description_cells.push(cell.as_str());
            }
        }
        let description = description_cells.join(" ");
        if description.is_empty() && !value_range.is_parsed() {
            continue;
        }

        entries.push(Gift {
            source: cells[0].clone(),
            description,
            value_range,
            date_received,
        });
    }

    finish(entries, disclosed_none)
}

/// Gifts are often reported as an exact dollar figure rather than a bracket;
/// an exact value becomes a degenerate (v, v) range.
fn parse_gift_value(cell: &str) -> ValueRange {
    let range = parse_value_range(cell);
    if range.is_parsed() {
        return range;
    }
    if cell.trim().starts_with('$') {
        if let Some(v) = parse_dollars(cell) {
            return ValueRange::bracket(v, v);
        }
    }
    range
}

fn is_header_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    lower.contains("source") && (lower.contains("value") || lower.contains("description"))
}

fn finish(entries: Vec<Gift>, disclosed_none: bool) -> ScheduleList<Gift> {
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
