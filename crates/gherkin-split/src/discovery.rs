//! Source file discovery from glob patterns.

use std::collections::HashSet;
use std::path::PathBuf;

use glob::glob;
use tracing::{debug, warn};

use crate::error::SplitError;

/// Expand every pattern and return the matching files.
///
/// Paths keep the order in which they were first matched; a path matched by
/// several patterns appears once. Directories are skipped and patterns that
/// match nothing contribute nothing.
///
/// # Errors
///
/// Returns [`SplitError::Pattern`] for an invalid pattern and
/// [`SplitError::Discovery`] when a matched path cannot be inspected.
pub fn discover_files<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<PathBuf>, SplitError> {
    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for pattern in patterns {
        let pattern = pattern.as_ref();
        let entries = glob(pattern).map_err(|source| SplitError::Pattern {
            pattern: pattern.to_string(),
            source,
        })?;

        let mut matched = 0_usize;
        for entry in entries {
            let path = entry.map_err(|source| SplitError::Discovery {
                pattern: pattern.to_string(),
                source,
            })?;
            if path.is_dir() {
                debug!(path = %path.display(), "skipping directory match");
                continue;
            }
            matched += 1;
            if seen.insert(path.clone()) {
                files.push(path);
            }
        }

        if matched == 0 {
            warn!(pattern, "source pattern matched no files");
        }
    }

    Ok(files)
}
