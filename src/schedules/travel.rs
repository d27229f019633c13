//! Schedule H: travel payments and reimbursements.

use crate::domain::model::{ScheduleList, Travel};
use crate::parse::fields::normalize_date;
use crate::parse::tables::{
    is_blank_row, is_none_disclosed_row, map_columns, mapped_cell, split_text_row, Table,
};
use chrono::NaiveDate;
use regex::Regex;

const COLUMNS: &[(&str, &[&str])] = &[
    ("source", &["source"]),
    ("dates", &["date"]),
    ("itinerary", &["itinerary", "destination"]),
    ("purpose", &["purpose", "description"]),
];

pub fn from_table(table: &Table) -> ScheduleList<Travel> {
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
        // Required subset: source, a start date, and an itinerary.
        let (Some(source), Some(dates), Some(itinerary)) = (
            mapped_cell(row, &mapping, "source"),
            mapped_cell(row, &mapping, "dates"),
            mapped_cell(row, &mapping, "itinerary"),
        ) else {
            continue;
        };
        let Some((date_from, date_to)) = parse_date_span(dates) else {
            continue;
        };
        entries.push(Travel {
            source: source.to_string(),
            date_from,
            date_to,
            itinerary: itinerary.to_string(),
            purpose: mapped_cell(row, &mapping, "purpose").map(str::to_string),
        });
    }

    finish(entries, disclosed_none)
}

pub fn from_text_section(lines: &[&str]) -> ScheduleList<Travel> {
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

        // Columns by content: the date-span cell anchors the row.
        let span_idx = cells
            .iter()
            .enumerate()
            .find(|(_, c)| parse_date_span(c).is_some())
            .map(|(i, _)| i);
        let Some(span_idx) = span_idx else {
            continue;
        };
        if span_idx == 0 || cells.len() <= span_idx + 1 {
            continue;
        }
        let Some((date_from, date_to)) = parse_date_span(&cells[span_idx]) else {
            continue;
        };

        entries.push(Travel {
            source: cells[..span_idx].join(" "),
            date_from,
            date_to,
            itinerary: cells[span_idx + 1].clone(),
            purpose: if cells.len() > span_idx + 2 {
                Some(cells[span_idx + 2..].join(" "))
            } else {
                None
            },
        });
    }

    finish(entries, disclosed_none)
}

/// "06/01/2025 - 06/03/2025" or a single date.
fn parse_date_span(cell: &str) -> Option<(NaiveDate, Option<NaiveDate>)> {
    let span = Regex::new(
        r"^(\d{1,2}/\d{1,2}/\d{2,4})\s*[-\u{2013}\u{2014}]\s*(\d{1,2}/\d{1,2}/\d{2,4})$",
    )
    .unwrap();
    let trimmed = cell.trim();
    if let Some(caps) = span.captures(trimmed) {
        let from = normalize_date(&caps[1]).ok()?;
        let to = normalize_date(&caps[2]).ok();
        return Some((from, to));
    }
    normalize_date(trimmed).ok().map(|d| (d, None))
}

fn is_header_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    lower.contains("itinerary") || (lower.contains("source") && lower.contains("date"))
}

fn finish(entries: Vec<Travel>, disclosed_none: bool) -> ScheduleList<Travel> {
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
    fn table_extraction_with_span() {
        let table = Table::new(
            vec![
                "Source".into(),
                "Dates".into(),
                "Itinerary".into(),
                "Purpose".into(),
            ],
            vec![vec![
                "Avalon Policy Institute".into(),
                "06/01/2025 - 06/03/2025".into(),
                "Washington DC - Avalon - Washington DC".into(),
                "Keynote address".into(),
            ]],
        );
        let list = from_table(&table);
        assert_eq!(list.len(), 1);
        let entry = &list.entries()[0];
        assert_eq!(entry.date_from, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        assert_eq!(entry.date_to, NaiveDate::from_ymd_opt(2025, 6, 3));
        assert_eq!(entry.purpose.as_deref(), Some("Keynote address"));
    }

    #[test]
    fn single_date_has_no_end() {
        assert_eq!(
            parse_date_span("06/01/2025"),
            Some((NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(), None))
        );
    }

    #[test]
    fn text_extraction_anchors_on_dates() {
        let lines = vec![
            "Source   Dates   Itinerary   Purpose",
            "Avalon Policy Institute   06/01/2025 - 06/03/2025   DC-Avalon-DC   Conference",
        ];
        let list = from_text_section(&lines);
        assert_eq!(list.len(), 1);
        assert_eq!(list.entries()[0].itinerary, "DC-Avalon-DC");
    }

    #[test]
    fn rows_without_itinerary_are_dropped() {
        let table = Table::new(
            vec!["Source".into(), "Dates".into(), "Itinerary".into()],
            vec![vec![
                "Avalon Policy Institute".into(),
                "06/01/2025".into(),
                "".into(),
            ]],
        );
        assert_eq!(from_table(&table), ScheduleList::NotFound);
    }
}
