pub mod config;
pub mod core;
pub mod domain;
pub mod normalize;
pub mod parse;
pub mod schedules;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::ExtractionConfig;
pub use core::{ExtractionContext, ExtractionPipeline, PipelineOutput};
pub use domain::model::{ConfidenceReport, FilingRecord, RawDocument};
pub use domain::ports::{DocumentAnalyzer, ExtractionStrategy, NoopAnalyzer};
pub use utils::error::{ExtractError, Result};
