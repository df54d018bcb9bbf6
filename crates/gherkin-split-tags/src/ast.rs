//! Abstract syntax tree and evaluation for tag expressions.
//!
//! Precedence follows Gherkin conventions: `not` binds tighter than `and`,
//! which in turn binds tighter than `or`. Operators associate to the left, so
//! `@a or @b and @c` is parsed as `@a or (@b and @c)` while chaining `and`
//! operations without parentheses still groups them left-to-right.
//!
//! Evaluation consumes the available tag set (retaining the leading `@`) and
//! short-circuits. The empty tag set is an ordinary input: a bare tag is false
//! against it and `not @tag` is true.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::parser::Parser;

/// Parsed representation of a tag expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagExpression {
    root: Expr,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) enum Expr {
    Tag(String),
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
}

/// Syntax error raised while compiling a tag expression.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("invalid tag expression at byte {offset}: {reason}")]
pub struct TagExprError {
    offset: usize,
    reason: String,
}

impl TagExprError {
    pub(super) fn new(offset: usize, reason: impl Into<String>) -> Self {
        Self {
            offset,
            reason: reason.into(),
        }
    }

    /// Zero-based byte offset of the offending token.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Human-readable description of the problem.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl TagExpression {
    /// Compile `input` into an expression.
    ///
    /// # Errors
    ///
    /// Returns [`TagExprError`] when the input is empty or not a well-formed
    /// expression.
    pub fn parse(input: &str) -> Result<Self, TagExprError> {
        let mut parser = Parser::new(input)?;
        let root = parser.parse_expression()?;
        parser.expect_end()?;
        Ok(Self { root })
    }

    /// Evaluate the expression against a set of tag names.
    ///
    /// Tag names include their leading `@`. Duplicates are irrelevant.
    pub fn evaluate<'a, I>(&self, tags: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        let set: HashSet<&'a str> = tags.into_iter().collect();
        self.root.eval(&set)
    }
}

impl FromStr for TagExpression {
    type Err = TagExprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TagExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)
    }
}

impl Expr {
    pub(super) fn eval(&self, tags: &HashSet<&str>) -> bool {
        match self {
            Self::Tag(tag) => tags.contains(tag.as_str()),
            Self::Not(inner) => !inner.eval(tags),
            Self::And(lhs, rhs) => lhs.eval(tags) && rhs.eval(tags),
            Self::Or(lhs, rhs) => lhs.eval(tags) || rhs.eval(tags),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tag(tag) => {
                for ch in tag.chars() {
                    if ch.is_whitespace() || matches!(ch, '(' | ')' | '\\') {
                        f.write_str("\\")?;
                    }
                    write!(f, "{ch}")?;
                }
                Ok(())
            }
            Self::Not(inner) => write!(f, "not ( {inner} )"),
            Self::And(lhs, rhs) => write!(f, "( {lhs} and {rhs} )"),
            Self::Or(lhs, rhs) => write!(f, "( {lhs} or {rhs} )"),
        }
    }
}
