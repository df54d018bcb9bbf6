//! Split Gherkin feature files into independent single-scenario files.
//!
//! Every scenario of a source feature becomes its own feature file that
//! keeps the feature's name, tags, and background. Scenario outlines are
//! split further, one file per example row, unless expansion is switched off.
//! Feature tags are appended to each scenario's own tags, and a tag
//! expression can restrict which scenarios are written.
//!
//! # Example
//!
//! ```no_run
//! use gherkin_split::{CompileOptions, compile};
//!
//! let options = CompileOptions::new(["features/**/*.feature"], "target/split")
//!     .with_tag_expression("@smoke and not @wip");
//! let report = compile(&options)?;
//! for path in report.written_paths() {
//!     println!("{}", path.display());
//! }
//! # Ok::<(), gherkin_split::SplitError>(())
//! ```
//!
//! The stages are also exposed individually: [`parse_specification`] builds
//! the [`model`] tree, [`split_feature`] produces standalone features,
//! [`TagFilter`] selects among them, and [`render_feature`] prints one.

pub mod assemble;
pub mod compile;
pub mod discovery;
pub mod error;
pub mod expand;
pub mod filter;
pub mod model;
pub mod output;
pub mod parse;
pub mod serialize;
pub mod split;
pub mod template;

pub use assemble::assemble_feature;
pub use compile::{CompileOptions, CompileReport, SourceReport, compile};
pub use discovery::discover_files;
pub use error::{ErrorKind, SplitError};
pub use expand::expand_children;
pub use filter::TagFilter;
pub use parse::{Dialect, parse_specification};
pub use serialize::render_feature;
pub use split::split_feature;
pub use template::extract_template;
