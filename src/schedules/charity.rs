//! Schedule I: payments made to charity in lieu of honoraria.

use crate::domain::model::{CharityContribution, ScheduleList};
use crate::parse::fields::{normalize_date, parse_dollars};
use crate::parse::tables::{
    is_blank_row, is_none_disclosed_row, map_columns, mapped_cell, split_text_row, Table,
};

const COLUMNS: &[(&str, &[&str])] = &[
    ("source", &["source"]),
    ("activity", &["activity", "description"]),
    ("date", &["date"]),
    ("amount", &["amount", "value"]),
    ("charity", &["charity"]),
];

pub fn from_table(table: &Table) -> ScheduleList<CharityContribution> {
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
        // Required subset: source and receiving charity.
        let (Some(source), Some(charity_name)) = (
            mapped_cell(row, &mapping, "source"),
            mapped_cell(row, &mapping, "charity"),
        ) else {
            continue;
        };
        entries.push(CharityContribution {
            source: source.to_string(),
            activity: mapped_cell(row, &mapping, "activity")
                .unwrap_or_default()
                .to_string(),
            date: mapped_cell(row, &mapping, "date").and_then(|c| normalize_date(c).ok()),
            amount: mapped_cell(row, &mapping, "amount").and_then(parse_dollars),
            charity_name: charity_name.to_string(),
        });
    }

    finish(entries, disclosed_none)
}

/// Text rows follow the printed column order: source, activity, date,
/// amount, charity.
pub fn from_text_section(lines: &[&str]) -> ScheduleList<CharityContribution> {
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
        if cells.len() < 3 {
            continue;
        }

        let date_idx = cells
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, c)| normalize_date(c).is_ok())
            .map(|(i, _)| i);
        let amount_idx = cells
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, c)| c.starts_with('$'))
            .map(|(i, _)| i);
        // Charity name is the trailing non-date, non-amount cell.
        let charity_idx = (1..cells.len())
            .rev()
            .find(|i| Some(*i) != date_idx && Some(*i) != amount_idx);
        let Some(charity_idx) = charity_idx else {
            continue;
        };

        let activity = (1..cells.len())
            .filter(|i| {
                Some(*i) != date_idx && Some(*i) != amount_idx && *i != charity_idx
            })
            .map(|i| cells[i].as_str())
            .collect::<Vec<_>>()
            .join(" ");

        entries.push(CharityContribution {
            source: cells[0].clone(),
            activity,
            date: date_idx.and_then(|i| normalize_date(&cells[i]).ok()),
            amount: amount_idx.and_then(|i| parse_dollars(&cells[i])),
            charity_name: cells[charity_idx].clone(),
        });
    }

    finish(entries, disclosed_none)
}

fn is_header_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    lower.contains("charity") && (lower.contains("source") || lower.contains("amount"))
}

fn finish(
    entries: Vec<CharityContribution>,
    disclosed_none: bool,
) -> ScheduleList<CharityContribution> {
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
    use chrono::NaiveDate;

    #[test]
    fn table_extraction() {
        let table = Table::new(
            vec![
                "Source".into(),
                "Activity".into(),
                "Date".into(),
                "Amount".into(),
                "Charity".into(),
            ],
            vec![vec![
                "Avalon Speakers Bureau".into(),
                "Lecture".into(),
                "02/10/2025".into(),
                "$2,000".into(),
                "Round Table Shelter".into(),
            ]],
        );
        let list = from_table(&table);
        assert_eq!(list.len(), 1);
        let entry = &list.entries()[0];
        assert_eq!(entry.amount, Some(2_000));
        assert_eq!(entry.date, NaiveDate::from_ymd_opt(2025, 2, 10));
        assert_eq!(entry.charity_name, "Round Table Shelter");
    }

    #[test]
    fn text_extraction() {
        let lines = vec![
            "Source   Activity   Date   Amount   Charity",
            "Avalon Speakers Bureau   Lecture   02/10/2025   $2,000   Round Table Shelter",
        ];
        let list = from_text_section(&lines);
        assert_eq!(list.len(), 1);
        assert_eq!(list.entries()[0].charity_name, "Round Table Shelter");
        assert_eq!(list.entries()[0].activity, "Lecture");
    }
}
