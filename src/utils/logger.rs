use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_DIRECTIVES: &str = "disclosure_etl=info";
const VERBOSE_DIRECTIVES: &str = "disclosure_etl=debug,info";

/// `RUST_LOG` wins when set; otherwise fall back to the built-in directives.
fn env_filter(fallback: &'static str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Compact console logging for interactive runs.
pub fn init_cli_logger(verbose: bool) {
    let directives = if verbose {
        VERBOSE_DIRECTIVES
    } else {
        DEFAULT_DIRECTIVES
    };

    tracing_subscriber::registry()
        .with(env_filter(directives))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

/// JSON-lines logging for runs whose output feeds a log collector.
pub fn init_json_logger() {
    tracing_subscriber::registry()
        .with(env_filter(DEFAULT_DIRECTIVES))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(),
        )
        .init();
}
