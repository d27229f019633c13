use crate::core::context::ExtractionContext;
use crate::domain::model::{Block, ExtractionMethod, ExtractionResult, FilingRecord, RawDocument};
use crate::utils::error::{ExtractError, Result};
use async_trait::async_trait;

/// External OCR / forms-analysis capability. Implementations may be a direct
/// synchronous text call or a submit-then-poll job API; both fit behind the
/// async signatures. The core never depends on a vendor type.
#[async_trait]
pub trait DocumentAnalyzer: Send + Sync {
    /// Full-document text, OCR-derived where the source is an image.
    async fn analyze_text(&self, document: &RawDocument) -> Result<String>;

    /// Structured layout blocks (lines, key/values, tables, checkboxes).
    async fn analyze_blocks(&self, document: &RawDocument) -> Result<Vec<Block>>;
}

/// Stub for environments without an OCR backend. Strategies that need the
/// analyzer decline the document instead of failing the pipeline.
#[derive(Debug, Clone, Default)]
pub struct NoopAnalyzer;

#[async_trait]
impl DocumentAnalyzer for NoopAnalyzer {
    async fn analyze_text(&self, _document: &RawDocument) -> Result<String> {
        Err(ExtractError::AnalyzerError {
            message: "no document-analysis backend configured".to_string(),
        })
    }

    async fn analyze_blocks(&self, _document: &RawDocument) -> Result<Vec<Block>> {
        Err(ExtractError::AnalyzerError {
            message: "no document-analysis backend configured".to_string(),
        })
    }
}

/// What one strategy attempt produced: the raw-quality result the gate
/// evaluates plus the typed record parsed from it.
#[derive(Debug, Clone)]
pub struct StrategyOutcome {
    pub result: ExtractionResult,
    pub record: FilingRecord,
}

/// One extraction approach. The pipeline walks an ordered list of these and
/// never depends on a concrete implementation.
#[async_trait]
pub trait ExtractionStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn method(&self) -> ExtractionMethod;

    /// Cheap pre-check; a declined document advances the pipeline without
    /// spending an analyzer call.
    fn can_handle(&self, document: &RawDocument) -> bool;

    async fn extract(
        &self,
        document: &RawDocument,
        context: &ExtractionContext,
    ) -> Result<StrategyOutcome>;
}
