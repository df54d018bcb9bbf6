//! The end-to-end compile run: discover, parse, split, filter, write.
//!
//! Files are processed one at a time in discovery order. The first failure
//! aborts the run; files written before it are left in place.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span};

use crate::discovery::discover_files;
use crate::error::SplitError;
use crate::filter::TagFilter;
use crate::output::{StampClock, write_feature};
use crate::parse::{Dialect, parse_specification};
use crate::serialize::render_feature;
use crate::split::split_feature;

/// Language used when none is configured.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Options for a compile run.
///
/// Deserialises from JSON with every field except `source_patterns` and
/// `output_directory` optional:
///
/// ```
/// # fn main() -> Result<(), serde_json::Error> {
/// let options: gherkin_split::CompileOptions = serde_json::from_str(
///     r#"{ "source_patterns": ["features/*.feature"], "output_directory": "out" }"#,
/// )?;
/// assert_eq!(options.language, "en");
/// assert!(options.expand_scenario_outlines);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    /// Glob patterns naming the source feature files.
    pub source_patterns: Vec<String>,
    /// Existing directory receiving the generated files.
    pub output_directory: PathBuf,
    /// Tag expression; empty keeps every scenario.
    pub tag_expression: String,
    /// Gherkin dialect of the sources.
    pub language: String,
    /// Split outlines into one file per example row.
    pub expand_scenario_outlines: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            source_patterns: Vec::new(),
            output_directory: PathBuf::new(),
            tag_expression: String::new(),
            language: DEFAULT_LANGUAGE.to_string(),
            expand_scenario_outlines: true,
        }
    }
}

impl CompileOptions {
    /// Options with the required fields set and defaults elsewhere.
    #[must_use]
    pub fn new<I, S>(source_patterns: I, output_directory: impl Into<PathBuf>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            source_patterns: source_patterns.into_iter().map(Into::into).collect(),
            output_directory: output_directory.into(),
            ..Self::default()
        }
    }

    /// Set the tag expression.
    #[must_use]
    pub fn with_tag_expression(mut self, expression: impl Into<String>) -> Self {
        self.tag_expression = expression.into();
        self
    }

    /// Set the Gherkin dialect.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Choose whether outlines are split per example row.
    #[must_use]
    pub fn with_expand_scenario_outlines(mut self, expand: bool) -> Self {
        self.expand_scenario_outlines = expand;
        self
    }

    fn validate(&self) -> Result<(), SplitError> {
        if self.source_patterns.is_empty() {
            return Err(SplitError::Configuration(
                "no source patterns given".to_string(),
            ));
        }
        if self.output_directory.as_os_str().is_empty() {
            return Err(SplitError::Configuration(
                "no output directory given".to_string(),
            ));
        }
        if !self.output_directory.is_dir() {
            return Err(SplitError::Configuration(format!(
                "output directory {} does not exist or is not a directory",
                self.output_directory.display()
            )));
        }
        Ok(())
    }
}

/// Files written for one source feature file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SourceReport {
    /// Path of the source file as discovered.
    pub source: PathBuf,
    /// Generated files, in write order.
    pub written: Vec<PathBuf>,
}

/// Summary of a successful compile run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CompileReport {
    /// One entry per source file, in discovery order.
    pub sources: Vec<SourceReport>,
    /// Number of source files parsed.
    pub features_parsed: usize,
    /// Standalone features produced before filtering.
    pub scenarios_generated: usize,
    /// Standalone features kept by the filter and written.
    pub scenarios_written: usize,
}

impl CompileReport {
    /// Every written path across all sources, in write order.
    pub fn written_paths(&self) -> impl Iterator<Item = &Path> {
        self.sources
            .iter()
            .flat_map(|source| source.written.iter().map(PathBuf::as_path))
    }
}

/// Split every source feature matched by `options` into standalone
/// single-scenario files.
///
/// Options, dialect, and tag expression are all checked before any source
/// file is read.
///
/// # Errors
///
/// Returns the first [`SplitError`] met; see [`crate::ErrorKind`] for the
/// categories.
pub fn compile(options: &CompileOptions) -> Result<CompileReport, SplitError> {
    options.validate()?;
    let dialect = Dialect::new(options.language.as_str())?;
    let filter = TagFilter::compile(&options.tag_expression)?;
    let files = discover_files(&options.source_patterns)?;
    info!(
        files = files.len(),
        language = dialect.as_str(),
        filter = %filter,
        "compiling feature files"
    );

    let mut clock = StampClock::new();
    let mut report = CompileReport::default();
    for path in files {
        let _span = info_span!("feature_file", path = %path.display()).entered();
        let source = compile_file(&path, options, &dialect, &filter, &mut clock, &mut report)?;
        report.sources.push(source);
    }

    info!(
        features = report.features_parsed,
        generated = report.scenarios_generated,
        written = report.scenarios_written,
        "compile finished"
    );
    Ok(report)
}

fn compile_file(
    path: &Path,
    options: &CompileOptions,
    dialect: &Dialect,
    filter: &TagFilter,
    clock: &mut StampClock,
    report: &mut CompileReport,
) -> Result<SourceReport, SplitError> {
    let text = fs::read_to_string(path).map_err(|source| SplitError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let feature = parse_specification(&text, dialect).map_err(|source| SplitError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    report.features_parsed += 1;

    let generated = split_feature(&feature, options.expand_scenario_outlines);
    report.scenarios_generated += generated.len();
    let kept = filter.apply(generated);

    let mut written = Vec::with_capacity(kept.len());
    for split in &kept {
        let target = write_feature(
            &options.output_directory,
            &split.name,
            &render_feature(split),
            clock,
        )?;
        debug!(path = %target.display(), "wrote split feature");
        report.scenarios_written += 1;
        written.push(target);
    }

    Ok(SourceReport {
        source: path.to_path_buf(),
        written,
    })
}
