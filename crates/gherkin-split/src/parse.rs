//! Feature text parsing via the `gherkin` crate.
//!
//! The `gherkin` tree is mapped onto the owned [`crate::model`] types. The
//! mapping is lossy on purpose: descriptions, comments, spans, and example
//! block names are dropped because nothing downstream renders them.

use gherkin::GherkinEnv;

use crate::error::SplitError;
use crate::model::{
    Background, Child, DataTable, DocString, ExampleBlock, Feature, Row, Scenario,
    ScenarioOutline, Step, StepArgument, Tag,
};

/// Language tag accepted by the Gherkin parser, for example `en` or `uk`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dialect(String);

impl Dialect {
    /// Validate `language` against the parser's keyword tables.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::UnsupportedLanguage`] when the parser has no
    /// keywords for the language.
    pub fn new(language: impl Into<String>) -> Result<Self, SplitError> {
        let language = language.into();
        if let Err(err) = GherkinEnv::new(&language) {
            return Err(SplitError::UnsupportedLanguage {
                reason: err.to_string(),
                language,
            });
        }
        Ok(Self(language))
    }

    /// The language tag.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn env(&self) -> GherkinEnv {
        // The tag was checked in `new`.
        GherkinEnv::new(&self.0).unwrap_or_default()
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Self("en".to_string())
    }
}

/// Parse feature text written in `dialect`.
///
/// # Errors
///
/// Returns the parser's diagnostic when the text is not valid Gherkin.
pub fn parse_specification(text: &str, dialect: &Dialect) -> Result<Feature, gherkin::ParseError> {
    let mut source = text.to_string();
    normalise_trailing_newline(&mut source);
    let parsed = gherkin::Feature::parse(&source, dialect.env())?;
    Ok(convert_feature(&source, &parsed))
}

fn normalise_trailing_newline(text: &mut String) {
    if !text.ends_with('\n') {
        text.push('\n');
    }
}

fn convert_feature(source: &str, feature: &gherkin::Feature) -> Feature {
    let mut children = Vec::new();
    if let Some(background) = feature.background.as_ref() {
        children.push(Child::Background(Background {
            keyword: background.keyword.clone(),
            name: background.name.clone(),
            steps: convert_steps(source, &background.steps),
        }));
    }
    children.extend(
        feature
            .scenarios
            .iter()
            .map(|scenario| convert_scenario(source, scenario, &[], &[])),
    );
    for rule in &feature.rules {
        let rule_steps = rule
            .background
            .as_ref()
            .map(|background| convert_steps(source, &background.steps))
            .unwrap_or_default();
        let rule_tags = convert_tags(&rule.tags);
        children.extend(
            rule.scenarios
                .iter()
                .map(|scenario| convert_scenario(source, scenario, &rule_tags, &rule_steps)),
        );
    }

    Feature {
        name: feature.name.clone(),
        tags: convert_tags(&feature.tags),
        children,
    }
}

/// Map a scenario, appending inherited rule tags and prepending inherited
/// rule background steps.
fn convert_scenario(
    source: &str,
    scenario: &gherkin::Scenario,
    inherited_tags: &[Tag],
    inherited_steps: &[Step],
) -> Child {
    let mut tags = convert_tags(&scenario.tags);
    tags.extend_from_slice(inherited_tags);
    let mut steps = inherited_steps.to_vec();
    steps.extend(convert_steps(source, &scenario.steps));

    if scenario.examples.is_empty() {
        return Child::Scenario(Scenario {
            keyword: scenario.keyword.clone(),
            name: scenario.name.clone(),
            tags,
            steps,
        });
    }
    Child::Outline(ScenarioOutline {
        keyword: scenario.keyword.clone(),
        name: scenario.name.clone(),
        tags,
        steps,
        examples: scenario.examples.iter().map(convert_examples).collect(),
    })
}

fn convert_examples(examples: &gherkin::Examples) -> ExampleBlock {
    let Some(table) = examples.table.as_ref() else {
        return ExampleBlock::default();
    };
    let mut rows = table.rows.iter().map(|cells| cells.iter().cloned().collect::<Row>());
    let table_header = rows.next().unwrap_or_default();
    ExampleBlock {
        table_header,
        table_body: rows.collect(),
    }
}

fn convert_steps(source: &str, steps: &[gherkin::Step]) -> Vec<Step> {
    steps
        .iter()
        .map(|step| {
            let argument = match (step.table.as_ref(), step.docstring.as_ref()) {
                (Some(table), _) => Some(StepArgument::DataTable(DataTable {
                    rows: table
                        .rows
                        .iter()
                        .map(|cells| cells.iter().cloned().collect())
                        .collect(),
                })),
                (None, Some(content)) => Some(StepArgument::DocString(DocString {
                    content: docstring_content(content),
                })),
                (None, None) => None,
            };
            Step {
                keyword: step_keyword(source, step),
                text: step.value.clone(),
                argument,
            }
        })
        .collect()
}

fn convert_tags(tags: &[String]) -> Vec<Tag> {
    tags.iter()
        .map(|tag| {
            if tag.starts_with('@') {
                Tag::new(tag.clone())
            } else {
                Tag::new(format!("@{tag}"))
            }
        })
        .collect()
}

/// Recover the step keyword together with the separator that follows it in
/// the source, so `keyword + text` reproduces the step line.
///
/// Most dialects separate keyword and text with a space; some (such as
/// Japanese) do not. When the source cannot be consulted a single space is
/// assumed.
fn step_keyword(source: &str, step: &gherkin::Step) -> String {
    let keyword = step.keyword.trim_end();
    let separated = source
        .get(step.span.start..)
        .map(str::trim_start)
        .and_then(|rest| rest.strip_prefix(keyword))
        .and_then(|rest| rest.chars().next())
        .is_none_or(char::is_whitespace);
    if separated {
        format!("{keyword} ")
    } else {
        keyword.to_string()
    }
}

/// Remove the single line break the parser keeps next to each delimiter.
///
/// The parser already strips the shared indentation, so everything between
/// those two breaks is content, trailing blank lines included.
fn docstring_content(raw: &str) -> String {
    let body = raw
        .strip_prefix("\r\n")
        .or_else(|| raw.strip_prefix('\n'))
        .unwrap_or(raw);
    body.strip_suffix("\r\n")
        .or_else(|| body.strip_suffix('\n'))
        .unwrap_or(body)
        .to_string()
}
