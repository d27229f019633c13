use anyhow::Result;
use chrono::NaiveDate;
use disclosure_etl::domain::model::{ExtractionMethod, OwnerCode, RawDocument};
use disclosure_etl::{
    ExtractionConfig, ExtractionContext, ExtractionPipeline, NoopAnalyzer, PipelineOutput,
};
use std::sync::Arc;

const ARTHUR_KING_FILING: &str = "\
Financial Disclosure Report
Name: Hon. Arthur King
Status: Member
State/District: AV03
Filing Year: 2025
Filing Type: A

SCHEDULE A: ASSETS AND UNEARNED INCOME
Asset   Owner   Value of Asset   Income Type(s)   Income
SP Camelot Growth Fund [MF]   SP   $15,001 - $50,000   Dividends   $201 - $1,000
Round Table Holdings LLC   $50,001 - $100,000   None
JT Rental Property, Avalon   JT   $100,001 - $250,000   Rent   $5,001 - $15,000

SCHEDULE D: LIABILITIES
Creditor   Date Incurred   Type   Amount of Liability
Iron Bank   05/2019   Mortgage on Camelot estate   $250,001 - $500,000

SCHEDULE E: POSITIONS
Position   Name of Organization
Board Member   Round Table Foundation

CERTIFICATION
I certify that the statements I have made on this form are true, complete and correct.
Digitally Signed: Hon. Arthur King , 05/15/2025
";

async fn run_filing(text: &str) -> Result<PipelineOutput> {
    let context = ExtractionContext::open(ExtractionConfig::default())?;
    let pipeline = ExtractionPipeline::with_default_strategies(context, Arc::new(NoopAnalyzer));
    Ok(pipeline.run(&RawDocument::from_text(text)).await)
}

#[tokio::test]
async fn arthur_king_filing_extracts_fully() -> Result<()> {
    let output = run_filing(ARTHUR_KING_FILING).await?;

    assert_eq!(output.result.method, ExtractionMethod::PlainText);
    assert!(output.result.warnings.is_empty(), "{:?}", output.result.warnings);

    let header = &output.record.header;
    assert_eq!(header.filer_name.as_deref(), Some("Hon. Arthur King"));
    assert_eq!(header.status.as_deref(), Some("Member"));
    assert_eq!(header.state_district.as_deref(), Some("AV03"));
    assert_eq!(header.filing_year, Some(2025));
    assert_eq!(header.filing_type.as_deref(), Some("A"));

    let assets = output.record.schedules.assets.entries();
    assert_eq!(assets.len(), 3);
    assert_eq!(assets[0].owner_code, Some(OwnerCode::Spouse));
    assert_eq!(assets[0].income_types, vec!["Dividends"]);
    assert_eq!(assets[1].owner_code, Some(OwnerCode::Self_));
    assert!(assets[1].income_types.is_empty());
    assert_eq!(assets[2].owner_code, Some(OwnerCode::Joint));
    assert_eq!(assets[2].income_types, vec!["Rent"]);

    let liabilities = output.record.schedules.liabilities.entries();
    assert_eq!(liabilities.len(), 1);
    assert_eq!(liabilities[0].creditor, "Iron Bank");

    let positions = output.record.schedules.positions.entries();
    assert_eq!(positions.len(), 1);
    assert_eq!(positions[0].title, "Board Member");
    assert_eq!(positions[0].organization, "Round Table Foundation");

    let certification = output.record.certification.as_ref().expect("certification");
    assert!(certification.is_certified);
    assert_eq!(certification.signer.as_deref(), Some("Hon. Arthur King"));
    assert_eq!(
        certification.signature_date,
        NaiveDate::from_ymd_opt(2025, 5, 15)
    );

    assert!(output.report.missing_required.is_empty());
    assert!(!output.report.needs_better_ocr);
    Ok(())
}

#[tokio::test]
async fn identical_input_yields_identical_record() -> Result<()> {
    let first = run_filing(ARTHUR_KING_FILING).await?;
    let second = run_filing(ARTHUR_KING_FILING).await?;

    let a = serde_json::to_string(&first.record)?;
    let b = serde_json::to_string(&second.record)?;
    assert_eq!(a, b);
    assert_eq!(first.report, second.report);
    Ok(())
}

#[tokio::test]
async fn sparse_filing_is_flagged_not_rejected() -> Result<()> {
    let output = run_filing("some pages of unstructured text\u{c}with no recognizable schedules, but long enough to pass the character floor").await?;

    // Always returns a record; review flags carry the bad news.
    assert!(output.record.schedules.assets.is_empty());
    assert!(output.report.needs_better_ocr);
    assert!(output
        .report
        .missing_required
        .contains(&"certification".to_string()));
    assert!(output
        .result
        .recommendations
        .iter()
        .any(|r| r.contains("OCR")));
    Ok(())
}
