//! Error types for the splitting pipeline and its collaborators.
//!
//! Every failure aborts the whole compile run. Variants carry the path or
//! pattern involved so callers can report the failure without extra context.

use std::path::PathBuf;

use gherkin_split_tags::TagExprError;
use thiserror::Error;

/// Errors raised while discovering, parsing, filtering, or writing features.
#[derive(Debug, Error)]
pub enum SplitError {
    /// A required option is missing or an option value is unusable.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// The requested Gherkin dialect is not known to the parser.
    #[error("unsupported language '{language}': {reason}")]
    UnsupportedLanguage {
        /// Language tag as supplied by the caller.
        language: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// A source pattern is not a valid glob.
    #[error("invalid source pattern '{pattern}': {source}")]
    Pattern {
        /// Offending pattern.
        pattern: String,
        /// Underlying glob error.
        #[source]
        source: glob::PatternError,
    },

    /// A path matched by a source pattern could not be inspected.
    #[error("failed to expand source pattern '{pattern}': {source}")]
    Discovery {
        /// Pattern being expanded.
        pattern: String,
        /// Underlying glob error.
        #[source]
        source: glob::GlobError,
    },

    /// A discovered feature file could not be read.
    #[error("failed to read feature file {}: {source}", path.display())]
    Read {
        /// Path of the unreadable file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A feature file is not valid Gherkin.
    #[error("failed to parse feature file {}: {source}", path.display())]
    Parse {
        /// Path of the malformed file.
        path: PathBuf,
        /// Parser diagnostic.
        #[source]
        source: gherkin::ParseError,
    },

    /// The tag expression could not be compiled.
    #[error(transparent)]
    TagExpression(#[from] TagExprError),

    /// A generated feature file could not be written.
    #[error("failed to write feature file {}: {source}", path.display())]
    Write {
        /// Target path of the failed write.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Coarse error category, convenient for exit codes and assertions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or unusable options, including unknown languages.
    Configuration,
    /// Source pattern expansion failed.
    Discovery,
    /// A feature file could not be read.
    Read,
    /// A feature file could not be parsed.
    Parse,
    /// The tag expression is malformed.
    TagExpression,
    /// An output file could not be written.
    Write,
}

impl SplitError {
    /// Category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration(_) | Self::UnsupportedLanguage { .. } => ErrorKind::Configuration,
            Self::Pattern { .. } | Self::Discovery { .. } => ErrorKind::Discovery,
            Self::Read { .. } => ErrorKind::Read,
            Self::Parse { .. } => ErrorKind::Parse,
            Self::TagExpression(_) => ErrorKind::TagExpression,
            Self::Write { .. } => ErrorKind::Write,
        }
    }
}
