use clap::Parser;
use disclosure_etl::utils::{error::ErrorSeverity, logger, validation::Validate};
use disclosure_etl::{
    CliConfig, ExtractError, ExtractionConfig, ExtractionContext, ExtractionPipeline, NoopAnalyzer,
    RawDocument,
};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();
    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting disclosure-etl");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = cli.validate() {
        fail(e);
    }

    match run(&cli).await {
        Ok(()) => {
            tracing::info!("extraction finished");
        }
        Err(e) => {
            tracing::error!(
                "extraction failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            fail(e);
        }
    }
}

async fn run(cli: &CliConfig) -> disclosure_etl::Result<()> {
    let config = match &cli.config {
        Some(path) => ExtractionConfig::from_file(path)?,
        None => ExtractionConfig::default(),
    };

    let context = ExtractionContext::open(config)?;
    let pipeline = ExtractionPipeline::with_default_strategies(context, Arc::new(NoopAnalyzer));

    let text = std::fs::read_to_string(&cli.input).map_err(ExtractError::IoError)?;
    let document = RawDocument::from_text(text);

    let output = pipeline.run(&document).await;
    let payload = serde_json::json!({
        "record": output.record,
        "report": output.report,
        "extraction": output.result,
    });

    let serialized = if cli.pretty {
        serde_json::to_string_pretty(&payload)?
    } else {
        serde_json::to_string(&payload)?
    };

    match &cli.output {
        Some(path) => std::fs::write(path, serialized).map_err(ExtractError::IoError)?,
        None => println!("{}", serialized),
    }

    Ok(())
}

fn fail(e: ExtractError) -> ! {
    tracing::error!("recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("{}", e.user_friendly_message());
    eprintln!("Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
