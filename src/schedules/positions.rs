//! Schedule E: outside positions.

use crate::domain::model::{Position, ScheduleList};
use crate::parse::tables::{
    is_blank_row, is_none_disclosed_row, map_columns, mapped_cell, split_text_row, Table,
};

const COLUMNS: &[(&str, &[&str])] = &[
    ("title", &["position", "title"]),
    ("organization", &["organization", "entity", "name of"]),
];

pub fn from_table(table: &Table) -> ScheduleList<Position> {
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
        let (Some(title), Some(organization)) = (
            mapped_cell(row, &mapping, "title"),
            mapped_cell(row, &mapping, "organization"),
        ) else {
            continue;
        };
        entries.push(Position {
            title: title.to_string(),
            organization: organization.to_string(),
        });
    }

    finish(entries, disclosed_none)
}

pub fn from_text_section(lines: &[&str]) -> ScheduleList<Position> {
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
        entries.push(Position {
            title: cells[0].clone(),
            organization: cells[1..].join(" "),
        });
    }

    finish(entries, disclosed_none)
}

fn is_header_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    lower.contains("position") && (lower.contains("organization") || lower.contains("entity"))
}

fn finish(entries: Vec<Position>, disclosed_none: bool) -> ScheduleList<Position> {
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
            vec!["Position".into(), "Name of Organization".into()],
            vec![
                vec!["Board Member".into(), "Camelot Foundation".into()],
                vec!["".into(), "".into()],
            ],
        );
        let list = from_table(&table);
        assert_eq!(list.len(), 1);
        assert_eq!(list.entries()[0].title, "Board Member");
        assert_eq!(list.entries()[0].organization, "Camelot Foundation");
    }

    #[test]
    fn text_extraction() {
        let lines = vec![
            "Position   Name of Organization",
            "Board Member   Camelot Foundation",
            "Trustee   Round Table Trust",
        ];
        let list = from_text_section(&lines);
        assert_eq!(list.len(), 2);
        assert_eq!(list.entries()[1].organization, "Round Table Trust");
    }

    #[test]
    fn single_cell_rows_are_skipped() {
        let list = from_text_section(&["Board Member"]);
        assert_eq!(list, ScheduleList::NotFound);
    }
}
