use crate::utils::error::{ExtractError, Result};
use crate::utils::validation::{
    self, validate_unit_interval, validate_weight_sum, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Pipeline configuration, loadable from a TOML file. Every section and field
/// has a default so an empty file (or no file) yields a working config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub quality: QualityConfig,
    pub scoring: ScoringConfig,
    pub normalize: NormalizeConfig,
}

/// Quality gate and fallback behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    /// Minimum extracted characters for a strategy result to be accepted.
    pub min_characters: usize,
    /// Minimum strategy confidence for acceptance.
    pub min_confidence: f64,
    /// Whether a rejected result advances to the next strategy.
    pub fallback_enabled: bool,
    /// Per-strategy wall-clock limit.
    pub strategy_timeout_seconds: u64,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            min_characters: 50,
            min_confidence: 0.5,
            fallback_enabled: true,
            strategy_timeout_seconds: 120,
        }
    }
}

/// Completeness weights and review thresholds for the scorer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub header_weight: f64,
    pub assets_weight: f64,
    pub certification_weight: f64,
    /// Review flag trips below this overall confidence.
    pub review_confidence_floor: f64,
    /// Review flag trips below this completeness.
    pub review_completeness_floor: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            header_weight: 0.30,
            assets_weight: 0.50,
            certification_weight: 0.20,
            review_confidence_floor: 0.70,
            review_completeness_floor: 0.60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    /// Minimum bigram similarity for a fuzzy company-name ticker match.
    pub fuzzy_threshold: f64,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            fuzzy_threshold: 0.84,
        }
    }
}

impl ExtractionConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ExtractError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);
        let config: Self =
            toml::from_str(&processed).map_err(|e| ExtractError::ConfigError {
                message: format!("TOML parsing error: {}", e),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Replace `${VAR_NAME}` placeholders with environment values; unset
    /// variables are left as-is so validation reports them in context.
    fn substitute_env_vars(content: &str) -> String {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").unwrap();
        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }
}

impl Validate for ExtractionConfig {
    fn validate(&self) -> Result<()> {
        validate_unit_interval("quality.min_confidence", self.quality.min_confidence)?;
        validation::validate_positive_number(
            "quality.strategy_timeout_seconds",
            self.quality.strategy_timeout_seconds as usize,
            1,
        )?;
        validate_weight_sum(
            "scoring weights",
            &[
                self.scoring.header_weight,
                self.scoring.assets_weight,
                self.scoring.certification_weight,
            ],
        )?;
        validate_unit_interval(
            "scoring.review_confidence_floor",
            self.scoring.review_confidence_floor,
        )?;
        validate_unit_interval(
            "scoring.review_completeness_floor",
            self.scoring.review_completeness_floor,
        )?;
        validate_unit_interval("normalize.fuzzy_threshold", self.normalize.fuzzy_threshold)?;
        Ok(())
    }
}
