use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Reference table error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Strategy '{strategy}' failed: {message}")]
    StrategyError { strategy: String, message: String },

    #[error("Strategy '{strategy}' timed out after {seconds}s")]
    StrategyTimeout { strategy: String, seconds: u64 },

    #[error("Document analyzer error: {message}")]
    AnalyzerError { message: String },

    #[error("Unparsable date: {input}")]
    DateParseError { input: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

pub type Result<T> = std::result::Result<T, ExtractError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Advisory only, output was still produced.
    Low,
    /// A strategy attempt failed but the pipeline can fall back.
    Medium,
    /// Extraction could not produce usable output.
    High,
    /// Programming-contract violation (malformed configuration).
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Configuration,
    Strategy,
    Parsing,
    Validation,
}

impl ExtractError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ExtractError::DateParseError { .. } => ErrorSeverity::Low,
            ExtractError::StrategyError { .. }
            | ExtractError::StrategyTimeout { .. }
            | ExtractError::AnalyzerError { .. } => ErrorSeverity::Medium,
            ExtractError::IoError(_)
            | ExtractError::SerializationError(_)
            | ExtractError::CsvError(_)
            | ExtractError::ProcessingError { .. }
            | ExtractError::ValidationError { .. } => ErrorSeverity::High,
            ExtractError::ConfigError { .. } | ExtractError::InvalidConfigValueError { .. } => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ExtractError::IoError(_) => ErrorCategory::Io,
            ExtractError::ConfigError { .. } | ExtractError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            ExtractError::StrategyError { .. }
            | ExtractError::StrategyTimeout { .. }
            | ExtractError::AnalyzerError { .. } => ErrorCategory::Strategy,
            ExtractError::DateParseError { .. } | ExtractError::SerializationError(_) => {
                ErrorCategory::Parsing
            }
            ExtractError::CsvError(_)
            | ExtractError::ProcessingError { .. }
            | ExtractError::ValidationError { .. } => ErrorCategory::Validation,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ExtractError::IoError(_) => {
                "Check that the input file exists and is readable".to_string()
            }
            ExtractError::ConfigError { .. } | ExtractError::InvalidConfigValueError { .. } => {
                "Fix the pipeline configuration file and re-run".to_string()
            }
            ExtractError::StrategyError { .. } | ExtractError::StrategyTimeout { .. } => {
                "Enable fallback strategies or route the document to higher-fidelity OCR"
                    .to_string()
            }
            ExtractError::AnalyzerError { .. } => {
                "Verify the document-analysis backend is configured and reachable".to_string()
            }
            ExtractError::DateParseError { .. } => {
                "The date field will be left empty; review the source document".to_string()
            }
            _ => "Re-run with --verbose for details".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ExtractError::ConfigError { message } => format!("Configuration problem: {}", message),
            ExtractError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration field '{}' is invalid: {}", field, reason)
            }
            ExtractError::StrategyTimeout { strategy, seconds } => format!(
                "Extraction strategy '{}' did not finish within {}s",
                strategy, seconds
            ),
            other => other.to_string(),
        }
    }
}
