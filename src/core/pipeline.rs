//! Ordered-strategy extraction pipeline with a quality gate and fallback.

use crate::core::context::ExtractionContext;
use crate::core::scoring;
use crate::core::strategies::{AnalysisBlocksStrategy, OcrTextStrategy, PlainTextStrategy};
use crate::domain::model::{
    ConfidenceReport, ExtractionMethod, ExtractionResult, FilingRecord, RawDocument,
};
use crate::domain::ports::{DocumentAnalyzer, ExtractionStrategy, StrategyOutcome};
use crate::utils::error::ExtractError;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Everything one document run produces: the raw-quality result of the
/// winning (or best-effort) attempt, the typed record, and its score.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub result: ExtractionResult,
    pub record: FilingRecord,
    pub report: ConfidenceReport,
}

/// Walks an ordered strategy list: skip strategies that decline the document,
/// accept the first result that clears the quality gate, otherwise fall back.
/// Never errors for "found nothing usable"; exhaustion returns the
/// highest-confidence attempt with a warning.
pub struct ExtractionPipeline {
    context: ExtractionContext,
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl ExtractionPipeline {
    pub fn new(context: ExtractionContext, strategies: Vec<Box<dyn ExtractionStrategy>>) -> Self {
        Self {
            context,
            strategies,
        }
    }

    /// Default order: native text, then analyzer OCR text, then analyzer
    /// layout blocks. Later strategies cost analyzer calls, so they only run
    /// as fallbacks.
    pub fn with_default_strategies(
        context: ExtractionContext,
        analyzer: Arc<dyn DocumentAnalyzer>,
    ) -> Self {
        Self::new(
            context,
            vec![
                Box::new(PlainTextStrategy),
                Box::new(OcrTextStrategy::new(analyzer.clone())),
                Box::new(AnalysisBlocksStrategy::new(analyzer)),
            ],
        )
    }

    pub fn context(&self) -> &ExtractionContext {
        &self.context
    }

    pub async fn run(&self, document: &RawDocument) -> PipelineOutput {
        let quality = &self.context.config().quality;
        let timeout = Duration::from_secs(quality.strategy_timeout_seconds);

        let mut best: Option<StrategyOutcome> = None;
        let mut attempted = false;

        for strategy in &self.strategies {
            if !strategy.can_handle(document) {
                tracing::debug!(strategy = strategy.name(), "strategy declined document");
                continue;
            }
            attempted = true;

            let started = Instant::now();
            let attempt = tokio::time::timeout(timeout, strategy.extract(document, &self.context))
                .await
                .map_err(|_| ExtractError::StrategyTimeout {
                    strategy: strategy.name().to_string(),
                    seconds: quality.strategy_timeout_seconds,
                })
                .and_then(|inner| inner);
            let duration_ms = started.elapsed().as_millis() as u64;

            let mut outcome = match attempt {
                Ok(outcome) => outcome,
                Err(error) => {
                    tracing::warn!(
                        strategy = strategy.name(),
                        %error,
                        "strategy attempt failed"
                    );
                    StrategyOutcome {
                        result: ExtractionResult::failed(strategy.method(), strategy.name(), error)
                            .with_pages(document.page_count()),
                        record: FilingRecord::default(),
                    }
                }
            };
            outcome.result.duration_ms = duration_ms;

            if self.gate_accepts(&outcome.result) {
                tracing::info!(
                    strategy = strategy.name(),
                    confidence = outcome.result.confidence,
                    characters = outcome.result.character_count,
                    "extraction accepted"
                );
                return self.finish(outcome);
            }

            tracing::debug!(
                strategy = strategy.name(),
                confidence = outcome.result.confidence,
                "quality gate rejected attempt"
            );
            let better = best
                .as_ref()
                .map(|b| outcome.result.confidence > b.result.confidence)
                .unwrap_or(true);
            if better {
                best = Some(outcome);
            }
            if !quality.fallback_enabled {
                break;
            }
        }

        if !attempted {
            let mut result = ExtractionResult::new(
                "",
                0.0,
                ExtractionMethod::PlainText,
                "unsupported",
            );
            result
                .warnings
                .push("no strategy can handle this document".to_string());
            return self.finish(StrategyOutcome {
                result,
                record: FilingRecord::default(),
            });
        }

        // Exhausted: hand back the best attempt, flagged.
        let mut outcome = best.unwrap_or_else(|| StrategyOutcome {
            result: ExtractionResult::new("", 0.0, ExtractionMethod::PlainText, "unsupported"),
            record: FilingRecord::default(),
        });
        tracing::warn!(
            strategy = %outcome.result.strategy_name,
            confidence = outcome.result.confidence,
            "all strategies exhausted, returning best effort"
        );
        outcome
            .result
            .warnings
            .push("quality below configured threshold".to_string());
        self.finish(outcome)
    }

    fn gate_accepts(&self, result: &ExtractionResult) -> bool {
        let quality = &self.context.config().quality;
        !result.quality_metrics.contains_key("error")
            && result.character_count >= quality.min_characters
            && result.confidence >= quality.min_confidence
    }

    fn finish(&self, outcome: StrategyOutcome) -> PipelineOutput {
        let StrategyOutcome { mut result, record } = outcome;
        let report = scoring::score(&record, result.page_count, &self.context.config().scoring);
        if report.needs_better_ocr {
            result
                .recommendations
                .push("route to higher-fidelity OCR".to_string());
        }
        if report.needs_manual_review {
            result.recommendations.push("needs manual review".to_string());
        }
        PipelineOutput {
            result,
            record,
            report,
        }
    }
}
