use crate::config::ExtractionConfig;
use crate::normalize::companies::CompanyTable;
use crate::utils::error::Result;
use crate::utils::validation::Validate;

/// Shared read-only state for one pipeline run: validated configuration plus
/// the embedded company-ticker table. Built once with [`ExtractionContext::open`]
/// and passed by reference to every strategy; nothing here is process-global.
#[derive(Debug, Clone)]
pub struct ExtractionContext {
    config: ExtractionConfig,
    companies: CompanyTable,
}

impl ExtractionContext {
    pub fn open(config: ExtractionConfig) -> Result<Self> {
        config.validate()?;
        let companies = CompanyTable::load()?;
        tracing::debug!(companies = companies.len(), "extraction context ready");
        Ok(Self { config, companies })
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    pub fn companies(&self) -> &CompanyTable {
        &self.companies
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_with_defaults() {
        let context = ExtractionContext::open(ExtractionConfig::default()).unwrap();
        assert!(!context.companies().is_empty());
        assert_eq!(context.config().quality.min_characters, 50);
    }

    #[test]
    fn open_rejects_invalid_config() {
        let mut config = ExtractionConfig::default();
        config.quality.min_confidence = 2.0;
        assert!(ExtractionContext::open(config).is_err());
    }
}
