//! Generic table-row handling: building tables out of analysis blocks or
//! layout-preserving text, and mapping wording-variant headers to fields.

use crate::domain::model::{Block, BlockKind};
use regex::Regex;
use std::collections::HashMap;

/// A parsed table: a header row plus data rows, all plain cells.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub page: u32,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            page: 1,
            header,
            rows,
        }
    }
}

/// Reassemble tables from Cell blocks. Row 0 is treated as the header row,
/// matching how forms-analysis services emit column captions.
pub fn tables_from_blocks(blocks: &[Block]) -> Vec<Table> {
    let by_id: HashMap<&str, &Block> = blocks.iter().map(|b| (b.id.as_str(), b)).collect();
    let mut tables = Vec::new();

    for table_block in blocks.iter().filter(|b| b.kind == BlockKind::Table) {
        let mut grid: HashMap<(u32, u32), &str> = HashMap::new();
        let mut max_row = 0;
        let mut max_col = 0;

        for child_id in &table_block.relationships {
            let Some(cell) = by_id.get(child_id.as_str()) else {
                continue;
            };
            if cell.kind != BlockKind::Cell {
                continue;
            }
            let (Some(row), Some(col)) = (cell.row_index, cell.column_index) else {
                continue;
            };
            max_row = max_row.max(row);
            max_col = max_col.max(col);
            grid.insert((row, col), cell.text.as_str());
        }

        if grid.is_empty() {
            continue;
        }

        let mut all_rows: Vec<Vec<String>> = Vec::with_capacity(max_row as usize + 1);
        for row in 0..=max_row {
            let cells: Vec<String> = (0..=max_col)
                .map(|col| grid.get(&(row, col)).unwrap_or(&"").trim().to_string())
                .collect();
            all_rows.push(cells);
        }

        let header = all_rows.remove(0);
        tables.push(Table {
            page: table_block.page,
            header,
            rows: all_rows,
        });
    }

    tables
}

/// Split a layout-preserving text line into cells on runs of two or more
/// spaces, the column gutter left by plain-text extraction.
pub fn split_text_row(line: &str) -> Vec<String> {
    let gutter = Regex::new(r" {2,}|\t").unwrap();
    gutter
        .split(line.trim())
        .map(|cell| cell.trim().to_string())
        .filter(|cell| !cell.is_empty())
        .collect()
}

/// Map target fields to column indices. Each field lists the keywords that
/// identify its column; the first header cell containing any keyword wins,
/// so the mapping tolerates wording variation ("Amount of Liability" vs
/// "Liability Amount").
pub fn map_columns(
    header: &[String],
    fields: &[(&'static str, &[&str])],
) -> HashMap<&'static str, usize> {
    let lower: Vec<String> = header.iter().map(|h| h.to_lowercase()).collect();
    let mut mapping = HashMap::new();
    let mut claimed: Vec<usize> = Vec::new();

    for (field, keywords) in fields {
        for (idx, cell) in lower.iter().enumerate() {
            if claimed.contains(&idx) {
                continue;
            }
            if keywords.iter().any(|kw| cell.contains(kw)) {
                mapping.insert(*field, idx);
                claimed.push(idx);
                break;
            }
        }
    }
    mapping
}

/// A row of only empty cells carries no entry.
pub fn is_blank_row(cells: &[String]) -> bool {
    cells.iter().all(|c| c.trim().is_empty())
}

/// An explicit "none disclosed" marker row. Tracked separately from a blank
/// row: the filer affirmatively reported nothing for the schedule.
pub fn is_none_disclosed_row(cells: &[String]) -> bool {
    let non_empty: Vec<&str> = cells
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .collect();
    if non_empty.len() != 1 {
        return false;
    }
    let lower = non_empty[0].to_lowercase();
    lower == "none"
        || lower == "none disclosed"
        || lower == "no transactions"
        || lower.starts_with("none (")
}

/// Fetch a mapped cell from a row, empty cells normalized to None.
pub fn mapped_cell<'a>(
    row: &'a [String],
    mapping: &HashMap<&'static str, usize>,
    field: &str,
) -> Option<&'a str> {
    let idx = *mapping.get(field)?;
    let cell = row.get(idx)?.trim();
    if cell.is_empty() {
        None
    } else {
        Some(cell)
    }
}
