//! Confidence and completeness scoring over an extracted record.

use crate::config::ScoringConfig;
use crate::domain::model::{ConfidenceReport, FilingRecord, ScheduleList};
use regex::Regex;
use std::collections::HashMap;

/// Entries scored per schedule before sampling stops; large schedules get a
/// representative sample rather than a full pass.
const ENTRY_SAMPLE_CAP: usize = 25;

/// Score a record extracted from a `page_count`-page document. Thresholds
/// never block output; they only set the advisory flags.
pub fn score(record: &FilingRecord, page_count: u32, config: &ScoringConfig) -> ConfidenceReport {
    let mut field_scores = HashMap::new();
    let mut missing_required = Vec::new();

    score_header(record, &mut field_scores, &mut missing_required);
    score_assets(record, &mut field_scores, &mut missing_required);
    score_certification(record, &mut field_scores, &mut missing_required);

    let overall = if field_scores.is_empty() {
        0.0
    } else {
        field_scores.values().sum::<f64>() / field_scores.len() as f64
    };

    let completeness_pct = config.header_weight * header_completeness(record)
        + config.assets_weight * assets_completeness(record)
        + config.certification_weight * certification_completeness(record);

    let suspicious_patterns = detect_suspicious(record, page_count);

    let needs_better_ocr = overall < config.review_confidence_floor
        || completeness_pct < config.review_completeness_floor
        || !missing_required.is_empty();
    let needs_manual_review = needs_better_ocr || !suspicious_patterns.is_empty();

    ConfidenceReport {
        field_scores,
        overall,
        completeness_pct,
        missing_required,
        suspicious_patterns,
        needs_better_ocr,
        needs_manual_review,
    }
}

fn score_header(
    record: &FilingRecord,
    scores: &mut HashMap<String, f64>,
    missing: &mut Vec<String>,
) {
    let header = &record.header;
    match &header.filer_name {
        // A two-token name is far more plausible than a lone token.
        Some(name) if name.split_whitespace().count() >= 2 => {
            scores.insert("header.filer_name".into(), 0.95);
        }
        Some(_) => {
            scores.insert("header.filer_name".into(), 0.60);
        }
        None => {
            scores.insert("header.filer_name".into(), 0.0);
            missing.push("header.filer_name".into());
        }
    }

    if let Some(district) = &header.state_district {
        let shaped = Regex::new(r"^[A-Z]{2}\d{0,2}$").unwrap();
        let score = if shaped.is_match(district) { 1.0 } else { 0.5 };
        scores.insert("header.state_district".into(), score);
    }
    if header.filing_year.is_some() {
        scores.insert("header.filing_year".into(), 1.0);
    }
    if header.status.is_some() {
        scores.insert("header.status".into(), 0.8);
    }
    if header.filing_type.is_some() {
        scores.insert("header.filing_type".into(), 0.9);
    }
}

fn score_assets(
    record: &FilingRecord,
    scores: &mut HashMap<String, f64>,
    missing: &mut Vec<String>,
) {
    match &record.schedules.assets {
        ScheduleList::NotFound => {
            scores.insert("schedules.assets".into(), 0.0);
            missing.push("schedules.assets".into());
        }
        ScheduleList::DisclosedNone => {
            scores.insert("schedules.assets".into(), 1.0);
        }
        ScheduleList::Entries(entries) => {
            // Entry scores fold into one schedule-level term so a populated
            // schedule never drags `overall` below its own NotFound floor.
            let mut total = 0.0;
            let mut sampled = 0usize;
            for asset in entries.iter().take(ENTRY_SAMPLE_CAP) {
                let mut score: f64 = 0.4;
                if asset.name.split_whitespace().count() >= 2 {
                    score += 0.2;
                }
                if asset.value_range.is_parsed() {
                    score += 0.3;
                }
                if asset.ticker.is_some() {
                    score += 0.1;
                }
                total += score.min(1.0);
                sampled += 1;
            }
            let aggregate = if sampled == 0 {
                0.0
            } else {
                total / sampled as f64
            };
            scores.insert("schedules.assets".into(), aggregate);
        }
    }
}

fn score_certification(
    record: &FilingRecord,
    scores: &mut HashMap<String, f64>,
    missing: &mut Vec<String>,
) {
    match &record.certification {
        None => {
            scores.insert("certification".into(), 0.0);
            missing.push("certification".into());
        }
        Some(cert) => {
            let mut score = 0.0;
            if cert.is_certified {
                score += 0.4;
            }
            if cert.signer.is_some() {
                score += 0.3;
            }
            if cert.signature_date.is_some() {
                score += 0.3;
            }
            scores.insert("certification".into(), score);
        }
    }
}

fn header_completeness(record: &FilingRecord) -> f64 {
    let header = &record.header;
    let present = [
        header.filer_name.is_some(),
        header.status.is_some(),
        header.state_district.is_some(),
        header.filing_year.is_some(),
        header.filing_type.is_some(),
    ];
    present.iter().filter(|p| **p).count() as f64 / present.len() as f64
}

fn assets_completeness(record: &FilingRecord) -> f64 {
    match &record.schedules.assets {
        ScheduleList::NotFound => 0.0,
        ScheduleList::DisclosedNone => 1.0,
        ScheduleList::Entries(entries) => {
            if entries.is_empty() {
                return 0.0;
            }
            entries
                .iter()
                .filter(|a| a.value_range.is_parsed())
                .count() as f64
                / entries.len() as f64
        }
    }
}

fn certification_completeness(record: &FilingRecord) -> f64 {
    match &record.certification {
        None => 0.0,
        Some(cert) => {
            let parts = [
                cert.is_certified,
                cert.signer.is_some(),
                cert.signature_date.is_some(),
            ];
            parts.iter().filter(|p| **p).count() as f64 / parts.len() as f64
        }
    }
}

/// Signals of a systematic mis-parse rather than a sparse filing.
fn detect_suspicious(record: &FilingRecord, page_count: u32) -> Vec<String> {
    let mut patterns = Vec::new();

    let schedules = &record.schedules;
    let total_entries = schedules.assets.len()
        + schedules.transactions.len()
        + schedules.earned_income.len()
        + schedules.liabilities.len()
        + schedules.positions.len()
        + schedules.agreements.len()
        + schedules.gifts.len()
        + schedules.travel.len()
        + schedules.charity.len();
    if total_entries == 0 && page_count > 1 {
        patterns.push("zero entries extracted from a multi-page document".to_string());
    }

    let asset_entries = schedules.assets.entries();
    if asset_entries.len() > 1 {
        let first = asset_entries[0].value_range;
        if first.is_parsed() && asset_entries.iter().all(|a| a.value_range == first) {
            patterns.push("all asset entries share one value range".to_string());
        }
    }

    patterns
}
