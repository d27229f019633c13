use crate::core::classifier;
use crate::core::context::ExtractionContext;
use crate::core::strategies::{build_record_from_text, ExtractDiagnostics};
use crate::domain::model::{
    Block, BlockKind, ExtractionMethod, ExtractionResult, FilingRecord, RawDocument,
    SelectionStatus,
};
use crate::domain::ports::{DocumentAnalyzer, ExtractionStrategy, StrategyOutcome};
use crate::normalize::assets::enrich_record;
use crate::parse::tables::{tables_from_blocks, Table};
use crate::schedules::{self, ScheduleId};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Last-line strategy: structured layout blocks from a cloud forms backend.
/// Tables are routed by their header row; line text covers the filer header,
/// certification, and any schedule no table was recovered for.
pub struct AnalysisBlocksStrategy {
    analyzer: Arc<dyn DocumentAnalyzer>,
}

impl AnalysisBlocksStrategy {
    pub fn new(analyzer: Arc<dyn DocumentAnalyzer>) -> Self {
        Self { analyzer }
    }
}

#[async_trait]
impl ExtractionStrategy for AnalysisBlocksStrategy {
    fn name(&self) -> &'static str {
        "analysis_blocks"
    }

    fn method(&self) -> ExtractionMethod {
        ExtractionMethod::CloudForms
    }

    fn can_handle(&self, document: &RawDocument) -> bool {
        !document.is_empty()
    }

    async fn extract(
        &self,
        document: &RawDocument,
        context: &ExtractionContext,
    ) -> Result<StrategyOutcome> {
        // A document already supplied as blocks needs no analyzer round trip.
        let owned_blocks;
        let blocks: &[Block] = match document {
            RawDocument::Blocks(blocks) => blocks,
            RawDocument::Text(_) => {
                owned_blocks = self.analyzer.analyze_blocks(document).await?;
                &owned_blocks
            }
        };

        let line_text = blocks
            .iter()
            .filter(|b| b.kind == BlockKind::Line)
            .map(|b| b.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        let (mut record, mut diagnostics) = build_record_from_text(&line_text, context);

        // Key/value form fields beat header lines scraped from text.
        let pairs = key_value_pairs(blocks);
        if !pairs.is_empty() {
            record.header = schedules::header::from_key_values(&pairs, &line_text);
        }

        for table in tables_from_blocks(blocks) {
            match classifier::classify_header(&table.header) {
                Some(id) => apply_table(&mut record, &mut diagnostics, id, &table),
                None => {
                    tracing::debug!(header = ?table.header, "unclassified table dropped");
                    diagnostics.unclassified_sections += 1;
                }
            }
        }

        apply_selection_marks(&mut record, blocks, &line_text);

        enrich_record(
            &mut record,
            context.companies(),
            context.config().normalize.fuzzy_threshold,
        );

        let confidence = blocks_confidence(&record, &diagnostics);
        let word_count = blocks
            .iter()
            .filter(|b| b.kind == BlockKind::Word)
            .count()
            .max(line_text.split_whitespace().count());

        let mut result = ExtractionResult::new(line_text, confidence, self.method(), self.name())
            .with_pages(document.page_count());
        result.word_count = word_count;
        result.quality_metrics.insert(
            "unclassified_tables".to_string(),
            serde_json::json!(diagnostics.unclassified_sections),
        );
        result.quality_metrics.insert(
            "ptr_partial_rows".to_string(),
            serde_json::json!(diagnostics.ptr_partial_rows),
        );

        Ok(StrategyOutcome { result, record })
    }
}

fn apply_table(
    record: &mut FilingRecord,
    diagnostics: &mut ExtractDiagnostics,
    id: ScheduleId,
    table: &Table,
) {
    let schedules = &mut record.schedules;
    match id {
        ScheduleId::Assets => schedules.assets = crate::schedules::assets::from_table(table),
        ScheduleId::Transactions => {
            let (list, ptr) = crate::schedules::transactions::from_table(table);
            schedules.transactions = list;
            diagnostics.ptr_partial_rows += ptr.partial_rows;
        }
        ScheduleId::EarnedIncome => {
            schedules.earned_income = crate::schedules::earned_income::from_table(table)
        }
        ScheduleId::Liabilities => {
            schedules.liabilities = crate::schedules::liabilities::from_table(table)
        }
        ScheduleId::Positions => {
            schedules.positions = crate::schedules::positions::from_table(table)
        }
        ScheduleId::Agreements => {
            schedules.agreements = crate::schedules::agreements::from_table(table)
        }
        ScheduleId::Gifts => schedules.gifts = crate::schedules::gifts::from_table(table),
        ScheduleId::Travel => schedules.travel = crate::schedules::travel::from_table(table),
        ScheduleId::Charity => schedules.charity = crate::schedules::charity::from_table(table),
    }
}

/// KEY blocks reference their VALUE block through relationships.
fn key_value_pairs(blocks: &[Block]) -> Vec<(String, String)> {
    use crate::domain::model::KeyValueRole;

    let mut pairs = Vec::new();
    for key_block in blocks {
        if key_block.kind != BlockKind::KeyValue
            || key_block.entity_role != Some(KeyValueRole::Key)
        {
            continue;
        }
        let value = key_block
            .relationships
            .iter()
            .filter_map(|id| blocks.iter().find(|b| &b.id == id))
            .filter(|b| b.entity_role == Some(KeyValueRole::Value))
            .map(|b| b.text.trim())
            .collect::<Vec<_>>()
            .join(" ");
        if !value.is_empty() {
            pairs.push((key_block.text.trim().to_lowercase(), value));
        }
    }
    pairs
}

/// A selected checkbox near certification language certifies the filing even
/// when the attestation text itself carries no inline marker.
fn apply_selection_marks(record: &mut FilingRecord, blocks: &[Block], line_text: &str) {
    let any_selected = blocks
        .iter()
        .any(|b| b.kind == BlockKind::Selectable && b.selection == Some(SelectionStatus::Selected));
    if !any_selected || !line_text.to_lowercase().contains("certif") {
        return;
    }
    match &mut record.certification {
        Some(cert) => cert.is_certified = true,
        None => {
            record.certification = Some(crate::domain::model::Certification {
                is_certified: true,
                signer: None,
                signature_date: None,
            })
        }
    }
}

fn blocks_confidence(record: &FilingRecord, diagnostics: &ExtractDiagnostics) -> f64 {
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

    let mut confidence: f64 = 0.9;
    if !any_schedule {
        confidence -= 0.3;
    }
    confidence -= 0.05 * diagnostics.unclassified_sections.min(4) as f64;
    confidence.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExtractionConfig;
    use crate::domain::model::{KeyValueRole, ValueRange};

    fn key_value(id: &str, key: &str, value_id: &str, value: &str) -> Vec<Block> {
        let mut key_block = Block::line(id, 1, key);
        key_block.kind = BlockKind::KeyValue;
        key_block.entity_role = Some(KeyValueRole::Key);
        key_block.relationships = vec![value_id.to_string()];
        let mut value_block = Block::line(value_id, 1, value);
        value_block.kind = BlockKind::KeyValue;
        value_block.entity_role = Some(KeyValueRole::Value);
        vec![key_block, value_block]
    }

    fn asset_table(table_id: &str) -> Vec<Block> {
        let cells = [
            (0u32, 0u32, "Asset"),
            (0, 1, "Owner"),
            (0, 2, "Value of Asset"),
            (1, 0, "Round Table Growth Fund"),
            (1, 1, "SP"),
            (1, 2, "$15,001 - $50,000"),
        ];
        let mut blocks = Vec::new();
        let mut table = Block::line(table_id, 1, "");
        table.kind = BlockKind::Table;
        for (i, (row, col, text)) in cells.iter().enumerate() {
            let id = format!("{}-c{}", table_id, i);
            table.relationships.push(id.clone());
            blocks.push(Block::cell(id, 1, *row, *col, *text));
        }
        blocks.insert(0, table);
        blocks
    }

    #[tokio::test]
    async fn tables_and_key_values_build_the_record() {
        let context = ExtractionContext::open(ExtractionConfig::default()).unwrap();
        let mut blocks = Vec::new();
        blocks.extend(key_value("kv1", "Name", "kv1v", "Hon. Arthur King"));
        blocks.extend(asset_table("t1"));
        blocks.push(Block::line("l1", 2, "I certify the statements are true."));
        let mut checkbox = Block::line("s1", 2, "");
        checkbox.kind = BlockKind::Selectable;
        checkbox.selection = Some(SelectionStatus::Selected);
        blocks.push(checkbox);

        let strategy = AnalysisBlocksStrategy::new(Arc::new(crate::domain::ports::NoopAnalyzer));
        let doc = RawDocument::Blocks(blocks);
        let outcome = strategy.extract(&doc, &context).await.unwrap();

        assert_eq!(
            outcome.record.header.filer_name.as_deref(),
            Some("Hon. Arthur King")
        );
        let assets = outcome.record.schedules.assets.entries();
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].value_range, ValueRange::bracket(15_001, 50_000));
        assert!(outcome.record.certification.as_ref().unwrap().is_certified);
    }

    #[tokio::test]
    async fn unclassified_tables_are_counted() {
        let context = ExtractionContext::open(ExtractionConfig::default()).unwrap();
        let mut table = Block::line("t1", 1, "");
        table.kind = BlockKind::Table;
        table.relationships = vec!["c0".into(), "c1".into()];
        let blocks = vec![
            table,
            Block::cell("c0", 1, 0, 0, "Mystery"),
            Block::cell("c1", 1, 0, 1, "Column"),
        ];
        let strategy = AnalysisBlocksStrategy::new(Arc::new(crate::domain::ports::NoopAnalyzer));
        let outcome = strategy
            .extract(&RawDocument::Blocks(blocks), &context)
            .await
            .unwrap();
        assert_eq!(
            outcome.result.quality_metrics["unclassified_tables"],
            serde_json::json!(1)
        );
    }
}
