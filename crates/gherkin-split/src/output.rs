//! Output file naming and writing.
//!
//! Generated files are named `<escaped-name>.<millis>.feature` and written
//! flat into the output directory.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::error::SplitError;

/// Extension of every generated file.
pub const FEATURE_EXTENSION: &str = "feature";

/// Replace path separators and whitespace in a feature name with `_`.
#[must_use]
pub fn escape_file_stem(name: &str) -> String {
    name.chars()
        .map(|c| if c == '/' || c == '\\' || c.is_whitespace() { '_' } else { c })
        .collect()
}

/// File name for a generated feature.
#[must_use]
pub fn output_file_name(feature_name: &str, stamp: i64) -> String {
    format!(
        "{}.{stamp}.{FEATURE_EXTENSION}",
        escape_file_stem(feature_name)
    )
}

/// Millisecond timestamps that strictly increase within one run.
///
/// Reads the wall clock and, when it has not advanced past the previous
/// stamp, returns the previous stamp plus one.
#[derive(Debug, Default)]
pub struct StampClock {
    last: Option<i64>,
}

impl StampClock {
    /// Create a clock with no stamps issued.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Next stamp, in milliseconds since the Unix epoch.
    pub fn next_stamp(&mut self) -> i64 {
        self.advance(Utc::now().timestamp_millis())
    }

    fn advance(&mut self, now: i64) -> i64 {
        let stamp = match self.last {
            Some(last) if now <= last => last.saturating_add(1),
            _ => now,
        };
        self.last = Some(stamp);
        stamp
    }
}

/// Write `text` into `directory` under a freshly stamped name.
///
/// # Errors
///
/// Returns [`SplitError::Write`] when the file cannot be written.
pub fn write_feature(
    directory: &Path,
    feature_name: &str,
    text: &str,
    clock: &mut StampClock,
) -> Result<PathBuf, SplitError> {
    let path = directory.join(output_file_name(feature_name, clock.next_stamp()));
    fs::write(&path, text).map_err(|source| SplitError::Write {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}
