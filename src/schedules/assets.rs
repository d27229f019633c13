//! Schedule A: assets and unearned income.

use crate::domain::model::{Asset, AssetType, ScheduleList, ValueRange};
use crate::normalize::assets::clean_asset_name;
use crate::parse::fields::{parse_owner_code, parse_value_range};
use crate::parse::tables::{
    is_blank_row, is_none_disclosed_row, map_columns, mapped_cell, split_text_row, Table,
};

const COLUMNS: &[(&str, &[&str])] = &[
    ("asset", &["asset", "name of asset"]),
    ("owner", &["owner"]),
    ("value", &["value"]),
    ("income_types", &["income type", "type(s)", "type of income"]),
    ("income", &["income", "amount"]),
];

/// Extract assets from a parsed table, mapping columns by header keywords.
pub fn from_table(table: &Table) -> ScheduleList<Asset> {
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

        let Some(raw_name) = mapped_cell(row, &mapping, "asset") else {
            continue;
        };
        let value_range = mapped_cell(row, &mapping, "value")
            .map(parse_value_range)
            .unwrap_or_else(ValueRange::unparsed);

        let cleaned = clean_asset_name(raw_name);
        let owner_code = match mapped_cell(row, &mapping, "owner") {
            Some(cell) => Some(parse_owner_code(cell)),
            None => cleaned.owner,
        };

        let income_types = mapped_cell(row, &mapping, "income_types")
            .map(split_income_types)
            .unwrap_or_default();
        let income_range = mapped_cell(row, &mapping, "income")
            .filter(|cell| !cell.eq_ignore_ascii_case("none"))
            .map(parse_value_range)
            .filter(ValueRange::is_parsed);

        push_if_valid(
            &mut entries,
            cleaned.name,
            owner_code,
            value_range,
            income_types,
            income_range,
        );
    }

    finish(entries, disclosed_none)
}

/// Extract assets from a run of layout-preserving text lines. Columns are
/// found by content rather than position: the first dollar-bracket cell is
/// the asset value, later brackets are income.
pub fn from_text_section(lines: &[&str]) -> ScheduleList<Asset> {
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

        // Locate the value column by content.
        let value_idx = cells
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, cell)| parse_value_range(cell).is_parsed())
            .map(|(i, _)| i);
        let Some(value_idx) = value_idx else {
            continue;
        };

        let value_range = parse_value_range(&cells[value_idx]);
        let cleaned = clean_asset_name(&cells[0]);
        let owner_code = Some(parse_owner_code(&cells[..value_idx].join(" ")));

        let mut income_types = Vec::new();
        let mut income_range = None;
        for cell in &cells[value_idx + 1..] {
            if cell.eq_ignore_ascii_case("none") {
                continue;
            }
            let range = parse_value_range(cell);
            if range.is_parsed() {
                if income_range.is_none() {
                    income_range = Some(range);
                }
            } else {
                income_types.extend(split_income_types(cell));
            }
        }

        push_if_valid(
            &mut entries,
            cleaned.name,
            owner_code,
            value_range,
            income_types,
            income_range,
        );
    }

    finish(entries, disclosed_none)
}

fn push_if_valid(
    entries: &mut Vec<Asset>,
    name: String,
    owner_code: Option<crate::domain::model::OwnerCode>,
    value_range: ValueRange,
    income_types: Vec<String>,
    income_range: Option<ValueRange>,
) {
    // Required subset: a name and a parsed value bracket.
    if name.is_empty() || !value_range.is_parsed() {
        return;
    }
    entries.push(Asset {
        name,
        owner_code,
        asset_type: AssetType::Other,
        ticker: None,
        ticker_confidence: None,
        value_range,
        income_types,
        income_range,
    });
}

fn finish(entries: Vec<Asset>, disclosed_none: bool) -> ScheduleList<Asset> {
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

fn split_income_types(cell: &str) -> Vec<String> {
    cell.split(',')
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty() && !part.eq_ignore_ascii_case("none"))
        .collect()
}

fn is_header_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    lower.contains("asset") && (lower.contains("value") || lower.contains("owner"))
}
