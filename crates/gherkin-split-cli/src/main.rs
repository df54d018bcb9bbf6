//! Split Gherkin feature files into independent single-scenario files.
//!
//! Exit codes: 0 on success, 1 when the run fails, 2 when the configuration
//! (environment, flags, output directory, or language) is invalid.

use clap::Parser;
use gherkin_split::{ErrorKind, SplitError};
use tracing::info;

use gherkin_split_cli::cli::{Args, run};
use gherkin_split_cli::config::CliConfig;
use gherkin_split_cli::error::CliError;
use gherkin_split_cli::logging::init_logging;

fn main() {
    let args = Args::parse();

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            init_logging(&CliConfig::default());
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(2);
        }
    };
    init_logging(&config);

    info!(version = env!("CARGO_PKG_VERSION"), "starting gherkin-split");

    if let Err(e) = run(&args) {
        let invalid_options = e
            .downcast_ref::<SplitError>()
            .is_some_and(|err| err.kind() == ErrorKind::Configuration);
        let message = format!("{e:#}");
        tracing::error!(error = %message, "split failed");
        std::process::exit(if invalid_options { 2 } else { 1 });
    }
}

fn build_config(args: &Args) -> Result<CliConfig, CliError> {
    let config = CliConfig::from_env()?;
    Ok(config.apply_overrides(args.log_level))
}
