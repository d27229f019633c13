use anyhow::Result;
use disclosure_etl::domain::model::{
    Block, BlockKind, ExtractionMethod, RawDocument, SelectionStatus, ValueRange,
};
use disclosure_etl::{
    ExtractionConfig, ExtractionContext, ExtractionPipeline, NoopAnalyzer,
};
use std::sync::Arc;

fn pipeline(config: ExtractionConfig) -> Result<ExtractionPipeline> {
    let context = ExtractionContext::open(config)?;
    Ok(ExtractionPipeline::with_default_strategies(
        context,
        Arc::new(NoopAnalyzer),
    ))
}

fn liability_table_blocks() -> Vec<Block> {
    let mut table = Block::line("t1", 1, "");
    table.kind = BlockKind::Table;
    let cells = [
        (0u32, 0u32, "Creditor"),
        (0, 1, "Type"),
        (0, 2, "Amount of Liability"),
        (1, 0, "Iron Bank"),
        (1, 1, "Mortgage"),
        (1, 2, "$250,001 - $500,000"),
    ];
    let mut blocks = Vec::new();
    for (i, (row, col, text)) in cells.iter().enumerate() {
        let id = format!("c{}", i);
        table.relationships.push(id.clone());
        blocks.push(Block::cell(id, 1, *row, *col, *text));
    }
    blocks.insert(0, table);
    blocks.push(Block::line(
        "l1",
        1,
        "I certify that the statements I have made on this form are true.",
    ));
    blocks.push(Block::line("l2", 1, "Digitally Signed: Hon. Arthur King , 05/15/2025"));
    let mut checkbox = Block::line("s1", 1, "");
    checkbox.kind = BlockKind::Selectable;
    checkbox.selection = Some(SelectionStatus::Selected);
    blocks.push(checkbox);
    blocks
}

#[tokio::test]
async fn block_documents_fall_through_to_the_blocks_strategy() -> Result<()> {
    // Plain text declines blocks; the OCR-text strategy fails against the
    // no-op analyzer; the blocks strategy handles the document directly.
    let p = pipeline(ExtractionConfig::default())?;
    let output = p.run(&RawDocument::Blocks(liability_table_blocks())).await;

    assert_eq!(output.result.method, ExtractionMethod::CloudForms);
    assert_eq!(output.result.strategy_name, "analysis_blocks");
    let liabilities = output.record.schedules.liabilities.entries();
    assert_eq!(liabilities.len(), 1);
    assert_eq!(liabilities[0].creditor, "Iron Bank");
    assert_eq!(
        liabilities[0].amount_range,
        ValueRange::bracket(250_001, 500_000)
    );
    assert!(output.record.certification.as_ref().unwrap().is_certified);
    Ok(())
}

#[tokio::test]
async fn ptr_partial_rows_surface_in_quality_metrics() -> Result<()> {
    let text = "\
SCHEDULE B: TRANSACTIONS
Owner   Asset   Type   Transaction Date   Notification Date   Amount
SP Apple Inc. (AAPL) [ST] P 05/10/2025 05/12/2025 $1,001 - $15,000
Broken Asset [ST] P 05/01/2025 05/02/2025 garbled
";
    let p = pipeline(ExtractionConfig::default())?;
    let output = p.run(&RawDocument::from_text(text)).await;

    assert_eq!(output.record.schedules.transactions.len(), 1);
    assert_eq!(
        output.result.quality_metrics["ptr_partial_rows"],
        serde_json::json!(1)
    );
    Ok(())
}

#[tokio::test]
async fn unclassified_tables_are_counted_in_metrics() -> Result<()> {
    let text = "\
SCHEDULE A: ASSETS AND UNEARNED INCOME
Acme Corp (ACME)   $1,001 - $15,000

MISCELLANEOUS APPENDIX
unrelated   content   here
";
    let p = pipeline(ExtractionConfig::default())?;
    let output = p.run(&RawDocument::from_text(text)).await;

    assert_eq!(output.record.schedules.assets.len(), 1);
    assert_eq!(
        output.result.quality_metrics["unclassified_tables"],
        serde_json::json!(1)
    );
    Ok(())
}

#[tokio::test]
async fn strict_gate_returns_best_effort_with_warning() -> Result<()> {
    let mut config = ExtractionConfig::default();
    // Unreachable threshold forces exhaustion.
    config.quality.min_confidence = 0.999;
    let p = pipeline(config)?;
    let output = p
        .run(&RawDocument::from_text(
            "SCHEDULE A: ASSETS AND UNEARNED INCOME\nAcme Corp (ACME)   $1,001 - $15,000\n",
        ))
        .await;

    // Output still carries the parsed record.
    assert_eq!(output.record.schedules.assets.len(), 1);
    assert!(output
        .result
        .warnings
        .iter()
        .any(|w| w.contains("below configured threshold")));
    Ok(())
}

#[tokio::test]
async fn empty_document_is_unsupported_not_an_error() -> Result<()> {
    let p = pipeline(ExtractionConfig::default())?;
    let output = p.run(&RawDocument::from_text("   ")).await;

    assert_eq!(output.result.strategy_name, "unsupported");
    assert!(output
        .result
        .warnings
        .iter()
        .any(|w| w.contains("no strategy")));
    Ok(())
}
