use crate::core::context::ExtractionContext;
use crate::core::strategies::{build_record_from_text, text_confidence};
use crate::domain::model::{ExtractionMethod, ExtractionResult, RawDocument};
use crate::domain::ports::{DocumentAnalyzer, ExtractionStrategy, StrategyOutcome};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Second-line strategy: ask the document-analysis backend for full text,
/// then parse it the same way as native text. OCR output is discounted
/// slightly since smashed tokens and damaged glyphs are common.
pub struct OcrTextStrategy {
    analyzer: Arc<dyn DocumentAnalyzer>,
}

const OCR_DISCOUNT: f64 = 0.9;

impl OcrTextStrategy {
    pub fn new(analyzer: Arc<dyn DocumentAnalyzer>) -> Self {
        Self { analyzer }
    }
}

#[async_trait]
impl ExtractionStrategy for OcrTextStrategy {
    fn name(&self) -> &'static str {
        "ocr_text"
    }

    fn method(&self) -> ExtractionMethod {
        ExtractionMethod::OcrText
    }

    fn can_handle(&self, document: &RawDocument) -> bool {
        !document.is_empty()
    }

    async fn extract(
        &self,
        document: &RawDocument,
        context: &ExtractionContext,
    ) -> Result<StrategyOutcome> {
        let text = self.analyzer.analyze_text(document).await?;
        let (record, diagnostics) = build_record_from_text(&text, context);
        let confidence = text_confidence(&text, &diagnostics, &record) * OCR_DISCOUNT;

        let mut result = ExtractionResult::new(text, confidence, self.method(), self.name())
            .with_pages(document.page_count());
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExtractionConfig;
    use crate::domain::model::Block;
    use crate::domain::ports::NoopAnalyzer;
    use crate::utils::error::ExtractError;

    struct FixedTextAnalyzer(String);

    #[async_trait]
    impl DocumentAnalyzer for FixedTextAnalyzer {
        async fn analyze_text(&self, _document: &RawDocument) -> Result<String> {
            Ok(self.0.clone())
        }

        async fn analyze_blocks(&self, _document: &RawDocument) -> Result<Vec<Block>> {
            Err(ExtractError::AnalyzerError {
                message: "text-only analyzer".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn parses_analyzer_text() {
        let context = ExtractionContext::open(ExtractionConfig::default()).unwrap();
        let analyzer = Arc::new(FixedTextAnalyzer(
            "SCHEDULE E: POSITIONS\nPosition   Name of Organization\nBoard Member   Round Table Foundation\n"
                .to_string(),
        ));
        let strategy = OcrTextStrategy::new(analyzer);
        let doc = RawDocument::from_text("scanned image placeholder");
        let outcome = strategy.extract(&doc, &context).await.unwrap();
        assert_eq!(outcome.record.schedules.positions.len(), 1);
        assert_eq!(outcome.result.method, ExtractionMethod::OcrText);
    }

    #[tokio::test]
    async fn analyzer_failure_propagates_to_pipeline() {
        let context = ExtractionContext::open(ExtractionConfig::default()).unwrap();
        let strategy = OcrTextStrategy::new(Arc::new(NoopAnalyzer));
        let doc = RawDocument::from_text("anything");
        assert!(strategy.extract(&doc, &context).await.is_err());
    }
}
