//! Concrete extraction strategies and the shared text-to-record builder.

pub mod analysis_blocks;
pub mod ocr_text;
pub mod plain_text;

pub use analysis_blocks::AnalysisBlocksStrategy;
pub use ocr_text::OcrTextStrategy;
pub use plain_text::PlainTextStrategy;

use crate::core::classifier;
use crate::core::context::ExtractionContext;
use crate::domain::model::FilingRecord;
use crate::normalize::assets::enrich_record;
use crate::schedules::{self, ScheduleId};

/// Per-attempt diagnostics surfaced in `quality_metrics`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractDiagnostics {
    pub unclassified_sections: usize,
    pub ptr_partial_rows: usize,
}

/// Build a typed record from section-structured text. Shared by the plain-text
/// and OCR-text strategies; the blocks strategy reuses it for everything its
/// tables do not cover.
pub fn build_record_from_text(text: &str, context: &ExtractionContext) -> (FilingRecord, ExtractDiagnostics) {
    let mut record = FilingRecord::default();
    let mut diagnostics = ExtractDiagnostics::default();
    let sections = schedules::split_sections(text);

    for section in &sections {
        let lines: Vec<&str> = section.lines.iter().map(String::as_str).collect();
        if section.heading.is_empty() {
            record.header = schedules::header::from_lines(&lines);
            continue;
        }
        if section.heading.to_lowercase().contains("certification") {
            record.certification = Some(schedules::certification::from_lines(&lines));
            continue;
        }
        match section_schedule_id(section) {
            Some(id) => apply_text_section(&mut record, &mut diagnostics, id, &lines),
            None => {
                tracing::debug!(heading = %section.heading, "unclassified section dropped");
                diagnostics.unclassified_sections += 1;
            }
        }
    }

    enrich_record(
        &mut record,
        context.companies(),
        context.config().normalize.fuzzy_threshold,
    );
    (record, diagnostics)
}

/// Route a section to a schedule: an explicit "Schedule X" letter wins, then
/// keyword classification of the heading, then of the column-header line.
fn section_schedule_id(section: &schedules::Section) -> Option<ScheduleId> {
    let letter_re = regex::Regex::new(r"(?i)schedule\s+([a-i])\b").unwrap();
    if let Some(caps) = letter_re.captures(&section.heading) {
        if let Some(id) = caps[1]
            .chars()
            .next()
            .and_then(ScheduleId::from_letter)
        {
            return Some(id);
        }
    }
    classifier::classify_text(&section.heading).or_else(|| {
        section
            .lines
            .iter()
            .find(|l| !l.trim().is_empty())
            .and_then(|l| classifier::classify_text(l))
    })
}

pub(crate) fn apply_text_section(
    record: &mut FilingRecord,
    diagnostics: &mut ExtractDiagnostics,
    id: ScheduleId,
    lines: &[&str],
) {
    let schedules = &mut record.schedules;
    match id {
        ScheduleId::Assets => schedules.assets = crate::schedules::assets::from_text_section(lines),
        ScheduleId::Transactions => {
            let (list, ptr) = crate::schedules::transactions::from_text_section(lines);
            schedules.transactions = list;
            diagnostics.ptr_partial_rows += ptr.partial_rows;
        }
        ScheduleId::EarnedIncome => {
            schedules.earned_income = crate::schedules::earned_income::from_text_section(lines)
        }
        ScheduleId::Liabilities => {
            schedules.liabilities = crate::schedules::liabilities::from_text_section(lines)
        }
        ScheduleId::Positions => {
            schedules.positions = crate::schedules::positions::from_text_section(lines)
        }
        ScheduleId::Agreements => {
            schedules.agreements = crate::schedules::agreements::from_text_section(lines)
        }
        ScheduleId::Gifts => schedules.gifts = crate::schedules::gifts::from_text_section(lines),
        ScheduleId::Travel => schedules.travel = crate::schedules::travel::from_text_section(lines),
        ScheduleId::Charity => {
            schedules.charity = crate::schedules::charity::from_text_section(lines)
        }
    }
}

/// Confidence heuristic for a text extraction: penalize replacement
/// characters (OCR damage) and documents where no section classified.
pub(crate) fn text_confidence(text: &str, diagnostics: &ExtractDiagnostics, record: &FilingRecord) -> f64 {
    let total = text.chars().count().max(1);
    let damaged = text.chars().filter(|c| *c == '\u{fffd}').count();
    let mut confidence = 0.95 * (1.0 - damaged as f64 / total as f64);

    let schedules = &record.schedules;
    let any_schedule = schedules.assets.was_found()
        || schedules.transactions.was_found()
        || schedules.earned_income.was_found()
        || schedules.liabilities.was_found()
        || schedules.positions.was_found()
        || schedules.agreements.was_found()
        || schedules.gifts.was_found()
        || schedules.travel.was_found()
        || schedules.charity.was_found();
    if !any_schedule {
        confidence -= 0.30;
    }
    if diagnostics.unclassified_sections > 0 {
        confidence -= 0.05 * diagnostics.unclassified_sections.min(4) as f64;
    }
    confidence.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExtractionConfig;
    use crate::domain::model::ScheduleList;

    fn context() -> ExtractionContext {
        ExtractionContext::open(ExtractionConfig::default()).unwrap()
    }

    #[test]
    fn sections_route_to_their_extractors() {
        let text = "\
Name: Hon. Arthur King
Status: Member

SCHEDULE A: ASSETS AND UNEARNED INCOME
Asset   Owner   Value of Asset   Income Type(s)   Income
Pendragon Holdings LLC   JT   $50,001 - $100,000   Rent   $2,501 - $5,000

SCHEDULE D: LIABILITIES
Creditor   Date Incurred   Type   Amount of Liability
Iron Bank of Braavos   05/2019   Mortgage on Camelot estate   $250,001 - $500,000

CERTIFICATION
I certify that the statements I have made on this form are true.
Digitally Signed: Hon. Arthur King , 05/15/2025
";
        let (record, diagnostics) = build_record_from_text(text, &context());
        assert_eq!(record.header.filer_name.as_deref(), Some("Hon. Arthur King"));
        assert_eq!(record.schedules.assets.len(), 1);
        assert_eq!(record.schedules.liabilities.len(), 1);
        assert!(record.certification.as_ref().unwrap().is_certified);
        assert_eq!(diagnostics.unclassified_sections, 0);
    }

    #[test]
    fn unclassified_sections_are_counted_not_fatal() {
        let text = "\
Name: A. Filer

UNRELATED APPENDIX MATERIAL
row of something   else entirely
";
        let (record, diagnostics) = build_record_from_text(text, &context());
        assert_eq!(record.schedules.assets, ScheduleList::NotFound);
        assert_eq!(diagnostics.unclassified_sections, 1);
    }

    #[test]
    fn confidence_drops_without_schedules() {
        let ctx = context();
        let with_sections = "SCHEDULE A: ASSETS AND UNEARNED INCOME\nAcme Fund   $1,001 - $15,000\n";
        let without = "just some unrelated text with no structure at all";
        let (r1, d1) = build_record_from_text(with_sections, &ctx);
        let (r2, d2) = build_record_from_text(without, &ctx);
        assert!(text_confidence(with_sections, &d1, &r1) > text_confidence(without, &d2, &r2));
    }
}
