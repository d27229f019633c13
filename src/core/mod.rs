pub mod classifier;
pub mod context;
pub mod pipeline;
pub mod scoring;
pub mod strategies;

pub use context::ExtractionContext;
pub use pipeline::{ExtractionPipeline, PipelineOutput};
