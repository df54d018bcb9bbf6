//! Structured logging for the command line tool.
//!
//! Logs go to stderr so stdout stays free for the written paths or the JSON
//! report. At `debug` and `trace` every source file's span reports its
//! timing when it closes.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

use crate::config::{CliConfig, LogLevel};

fn filter_from_config(config: &CliConfig) -> EnvFilter {
    EnvFilter::new(config.log_level.as_filter_str())
}

fn span_events(level: LogLevel) -> FmtSpan {
    match level {
        LogLevel::Trace | LogLevel::Debug => FmtSpan::CLOSE,
        LogLevel::Info | LogLevel::Warn | LogLevel::Error => FmtSpan::NONE,
    }
}

/// Initialise the logging subsystem based on configuration.
///
/// Log level precedence (highest to lowest):
///
/// 1. `--log-level` (parsed into `config.log_level`)
/// 2. `GHERKIN_SPLIT_LOG_LEVEL` (parsed into `config.log_level`)
/// 3. Default configuration value
///
/// If a global subscriber is already set, the call has no effect.
pub fn init_logging(config: &CliConfig) {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter_from_config(config))
        .with_writer(std::io::stderr)
        .with_span_events(span_events(config.log_level))
        .with_target(false)
        .finish();

    // The first subscriber wins.
    let _ = tracing::subscriber::set_global_default(subscriber);
}
