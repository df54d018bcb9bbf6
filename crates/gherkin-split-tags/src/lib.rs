//! Tag-expression parsing and evaluation for gherkin-split.
//!
//! Expressions combine tags (`@tag`) with `not`, `and`, `or` and parentheses,
//! for example `@fast and (not @wip or @nightly)`. An expression is compiled
//! once with [`TagExpression::parse`] and can then be evaluated any number of
//! times against the tag set of a scenario:
//!
//! ```
//! use gherkin_split_tags::TagExpression;
//!
//! let expr = TagExpression::parse("@smoke and not @wip")?;
//! assert!(expr.evaluate(["@smoke"]));
//! assert!(!expr.evaluate(["@smoke", "@wip"]));
//! assert!(!expr.evaluate(std::iter::empty::<&str>()));
//! # Ok::<(), gherkin_split_tags::TagExprError>(())
//! ```
//!
//! Every tag operand must carry its leading `@`, as tags in feature files do.
//! A bare word that is not an operator, such as `smoke`, is rejected rather
//! than read as a tag literal.
//!
//! ```
//! use gherkin_split_tags::TagExpression;
//!
//! let err = TagExpression::parse("@fast and smoke").err();
//! assert_eq!(err.map(|err| err.offset()), Some(10));
//! ```
//!
//! A compiled expression is immutable, so it can be shared freely between
//! threads.

mod ast;
mod lexer;
mod parser;

pub use ast::{TagExprError, TagExpression};
