//! Known company-name table used as the last-resort ticker source when no
//! explicit ticker pattern matches an asset name.

use crate::utils::error::Result;
use std::collections::HashSet;

const COMPANY_TABLE_CSV: &str = include_str!("../../data/company_tickers.csv");

/// Corporate-form suffixes that carry no identity signal.
const NAME_SUFFIXES: &[&str] = &[
    "incorporated",
    "corporation",
    "company",
    "holdings",
    "group",
    "inc",
    "corp",
    "plc",
    "ltd",
    "llc",
    "co",
];

#[derive(Debug, Clone)]
struct CompanyEntry {
    normalized: String,
    bigrams: HashSet<[u8; 2]>,
    ticker: String,
}

/// In-memory company/ticker lookup, loaded once per [`ExtractionContext`]
/// (crate::core::context::ExtractionContext) and reused across documents.
#[derive(Debug, Clone)]
pub struct CompanyTable {
    entries: Vec<CompanyEntry>,
}

impl CompanyTable {
    /// Parse the embedded reference CSV.
    pub fn load() -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(COMPANY_TABLE_CSV.as_bytes());

        let mut entries = Vec::new();
        for row in reader.records() {
            let row = row?;
            let (Some(name), Some(ticker)) = (row.get(0), row.get(1)) else {
                continue;
            };
            let normalized = normalize_company_name(name);
            if normalized.is_empty() {
                continue;
            }
            entries.push(CompanyEntry {
                bigrams: bigrams(&normalized),
                normalized,
                ticker: ticker.trim().to_string(),
            });
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best fuzzy match for an asset name, or None below `threshold`.
    /// The similarity score is reported so the caller can attach it as the
    /// ticker-match confidence.
    pub fn best_match(&self, asset_name: &str, threshold: f64) -> Option<(String, f64)> {
        let normalized = normalize_company_name(asset_name);
        if normalized.len() < 3 {
            return None;
        }
        let query = bigrams(&normalized);

        let mut best: Option<(&CompanyEntry, f64)> = None;
        for entry in &self.entries {
            let score = dice_coefficient(&query, &entry.bigrams);
            match best {
                Some((_, current)) if score <= current => {}
                _ => best = Some((entry, score)),
            }
        }

        best.and_then(|(entry, score)| {
            if score >= threshold {
                Some((entry.ticker.clone(), score))
            } else {
                None
            }
        })
    }
}

/// Lowercase, strip punctuation, drop corporate-form suffix words.
pub fn normalize_company_name(name: &str) -> String {
    let lowered: String = name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    lowered
        .split_whitespace()
        .filter(|word| !NAME_SUFFIXES.contains(word))
        .collect::<Vec<_>>()
        .join(" ")
}

fn bigrams(s: &str) -> HashSet<[u8; 2]> {
    let bytes: Vec<u8> = s.bytes().filter(|b| *b != b' ').collect();
    bytes.windows(2).map(|w| [w[0], w[1]]).collect()
}

/// Sørensen–Dice over character bigrams. The pack carries no
/// string-similarity crate, so the 2|A∩B|/(|A|+|B|) form is computed here.
fn dice_coefficient(a: &HashSet<[u8; 2]>, b: &HashSet<[u8; 2]>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let shared = a.intersection(b).count();
    (2.0 * shared as f64) / (a.len() + b.len()) as f64
}
