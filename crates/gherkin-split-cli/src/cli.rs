//! Argument parsing and report output for the `gherkin-split` binary.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use eyre::{Context, Result};
use gherkin_split::{CompileOptions, CompileReport, compile};

use crate::config::LogLevel;

/// Split Gherkin feature files into one file per scenario.
#[derive(Parser, Debug)]
#[command(name = "gherkin-split", version, about)]
pub struct Args {
    /// Glob patterns selecting the source feature files.
    #[arg(value_name = "PATTERN", required = true)]
    pub patterns: Vec<String>,

    /// Existing directory receiving the generated files.
    #[arg(short = 'o', long = "out-dir", value_name = "DIR")]
    pub out_dir: PathBuf,

    /// Tag expression selecting the scenarios to write.
    #[arg(short = 't', long = "tags", value_name = "EXPR", default_value = "")]
    pub tags: String,

    /// Gherkin dialect of the sources.
    #[arg(short = 'l', long = "lang", value_name = "LANG", default_value = gherkin_split::compile::DEFAULT_LANGUAGE)]
    pub lang: String,

    /// Keep scenario outlines whole instead of writing one file per example row.
    #[arg(long)]
    pub no_expand_outlines: bool,

    /// Print the compile report as JSON on stdout.
    #[arg(long)]
    pub json: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<LogLevel>,
}

impl Args {
    /// Compile options described by the arguments.
    #[must_use]
    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions::new(self.patterns.iter().cloned(), self.out_dir.clone())
            .with_tag_expression(self.tags.clone())
            .with_language(self.lang.clone())
            .with_expand_scenario_outlines(!self.no_expand_outlines)
    }
}

/// Run a compile and print its report to stdout.
///
/// # Errors
///
/// Returns an error if the compile fails or the report cannot be written.
pub fn run(args: &Args) -> Result<CompileReport> {
    let report = compile(&args.compile_options()).wrap_err("failed to split feature files")?;
    let mut stdout = io::stdout();
    if args.json {
        write_report_json(&mut stdout, &report)?;
    } else {
        write_report_text(&mut stdout, &report)?;
    }
    stdout.flush().wrap_err("failed to flush report to stdout")?;
    Ok(report)
}

fn write_report_json(writer: &mut dyn Write, report: &CompileReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, report).wrap_err("failed to serialise report")?;
    writeln!(writer).wrap_err("failed to terminate JSON report")
}

fn write_report_text(writer: &mut dyn Write, report: &CompileReport) -> Result<()> {
    for path in report.written_paths() {
        writeln!(writer, "{}", path.display())
            .wrap_err_with(|| format!("failed to write path {}", path.display()))?;
    }
    Ok(())
}
