use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, Validate};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "disclosure-etl")]
#[command(about = "Extract structured filing records from financial disclosure text")]
pub struct CliConfig {
    /// UTF-8 filing text to extract from.
    #[arg(long)]
    pub input: PathBuf,

    /// Optional TOML pipeline configuration.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write JSON here instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pub pretty: bool,

    /// Enable verbose output.
    #[arg(long)]
    pub verbose: bool,

    /// Emit logs as JSON lines instead of the compact console format.
    #[arg(long)]
    pub log_json: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("input", &self.input.to_string_lossy())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_invocation() {
        let config = CliConfig::parse_from(["disclosure-etl", "--input", "filing.txt"]);
        assert_eq!(config.input, PathBuf::from("filing.txt"));
        assert!(!config.pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_all_flags() {
        let config = CliConfig::parse_from([
            "disclosure-etl",
            "--input",
            "filing.txt",
            "--config",
            "pipeline.toml",
            "--pretty",
            "--verbose",
        ]);
        assert!(config.pretty);
        assert!(config.verbose);
        assert_eq!(config.config, Some(PathBuf::from("pipeline.toml")));
    }
}
