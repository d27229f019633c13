use crate::core::context::ExtractionContext;
use crate::core::strategies::{build_record_from_text, text_confidence};
use crate::domain::model::{ExtractionMethod, ExtractionResult, RawDocument};
use crate::domain::ports::{ExtractionStrategy, StrategyOutcome};
use crate::utils::error::{ExtractError, Result};
use async_trait::async_trait;

/// First-line strategy: the document already carries extracted text, so no
/// analyzer call is spent.
#[derive(Debug, Clone, Default)]
pub struct PlainTextStrategy;

#[async_trait]
impl ExtractionStrategy for PlainTextStrategy {
    fn name(&self) -> &'static str {
        "plain_text"
    }

    fn method(&self) -> ExtractionMethod {
        ExtractionMethod::PlainText
    }

    fn can_handle(&self, document: &RawDocument) -> bool {
        matches!(document, RawDocument::Text(t) if !t.trim().is_empty())
    }

    async fn extract(
        &self,
        document: &RawDocument,
        context: &ExtractionContext,
    ) -> Result<StrategyOutcome> {
        let RawDocument::Text(text) = document else {
            return Err(ExtractError::StrategyError {
                strategy: self.name().to_string(),
                message: "document carries no extracted text".to_string(),
            });
        };

        let (record, diagnostics) = build_record_from_text(text, context);
        let confidence = text_confidence(text, &diagnostics, &record);

        let mut result = ExtractionResult::new(text.clone(), confidence, self.method(), self.name())
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
