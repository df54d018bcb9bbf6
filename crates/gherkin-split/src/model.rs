//! Owned feature tree produced by the parser and consumed by the
//! pipeline stages.
//!
//! Node kinds are plain enums: [`Child`] covers everything that can appear
//! under a feature, [`ScenarioNode`] narrows that to the two kinds that become
//! standalone features, and [`StepArgument`] covers data tables and doc
//! strings. Every type owns its data, so cloning a tree yields a fully
//! independent copy.

use serde::Serialize;

/// Literal type marker rendered on the feature header line.
pub const FEATURE_TYPE: &str = "Feature";

/// A parsed feature: tags, name, and ordered children.
///
/// At most one child is a [`Child::Background`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Feature {
    /// Feature title as written after the keyword.
    pub name: String,
    /// Feature-level tags in source order.
    pub tags: Vec<Tag>,
    /// Background, scenarios, and outlines in source order.
    pub children: Vec<Child>,
}

impl Feature {
    /// Create a feature with no tags and no children.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Append feature-level tags.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Tag::new));
        self
    }

    /// Append a child node.
    #[must_use]
    pub fn with_child(mut self, child: impl Into<Child>) -> Self {
        self.children.push(child.into());
        self
    }

    /// The feature's background, if it has one.
    #[must_use]
    pub fn background(&self) -> Option<&Background> {
        self.children.iter().find_map(|child| match child {
            Child::Background(background) => Some(background),
            Child::Scenario(_) | Child::Outline(_) => None,
        })
    }

    /// Scenario and outline children in source order.
    pub fn scenario_nodes(&self) -> impl Iterator<Item = ScenarioNode> + '_ {
        self.children.iter().filter_map(Child::to_scenario_node)
    }
}

/// A tag such as `@smoke`; the leading `@` is part of the name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Tag {
    /// Tag name including its leading marker.
    pub name: String,
}

impl Tag {
    /// Create a tag from its full name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Anything that can appear directly beneath a feature.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum Child {
    /// Steps shared by every scenario of the feature.
    Background(Background),
    /// A concrete scenario.
    Scenario(Scenario),
    /// A parametrised scenario with example rows.
    #[serde(rename = "ScenarioOutline")]
    Outline(ScenarioOutline),
}

impl Child {
    /// Copy this child as a [`ScenarioNode`], or `None` for a background.
    #[must_use]
    pub fn to_scenario_node(&self) -> Option<ScenarioNode> {
        match self {
            Self::Background(_) => None,
            Self::Scenario(scenario) => Some(ScenarioNode::Scenario(scenario.clone())),
            Self::Outline(outline) => Some(ScenarioNode::Outline(outline.clone())),
        }
    }

    /// Tags of a scenario or outline child, or `None` for a background.
    #[must_use]
    pub fn scenario_tags(&self) -> Option<&[Tag]> {
        match self {
            Self::Background(_) => None,
            Self::Scenario(scenario) => Some(&scenario.tags),
            Self::Outline(outline) => Some(&outline.tags),
        }
    }
}

impl From<Background> for Child {
    fn from(background: Background) -> Self {
        Self::Background(background)
    }
}

impl From<Scenario> for Child {
    fn from(scenario: Scenario) -> Self {
        Self::Scenario(scenario)
    }
}

impl From<ScenarioOutline> for Child {
    fn from(outline: ScenarioOutline) -> Self {
        Self::Outline(outline)
    }
}

impl From<ScenarioNode> for Child {
    fn from(node: ScenarioNode) -> Self {
        match node {
            ScenarioNode::Scenario(scenario) => Self::Scenario(scenario),
            ScenarioNode::Outline(outline) => Self::Outline(outline),
        }
    }
}

/// A child that becomes the single scenario of a standalone feature.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum ScenarioNode {
    /// A concrete scenario.
    Scenario(Scenario),
    /// A scenario outline, possibly narrowed to one example row.
    #[serde(rename = "ScenarioOutline")]
    Outline(ScenarioOutline),
}

impl ScenarioNode {
    /// Scenario title.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Scenario(scenario) => &scenario.name,
            Self::Outline(outline) => &outline.name,
        }
    }

    /// Tags attached to the node, in order.
    #[must_use]
    pub fn tags(&self) -> &[Tag] {
        match self {
            Self::Scenario(scenario) => &scenario.tags,
            Self::Outline(outline) => &outline.tags,
        }
    }

    /// Replace the node's tags.
    #[must_use]
    pub fn with_replaced_tags(mut self, tags: Vec<Tag>) -> Self {
        match &mut self {
            Self::Scenario(scenario) => scenario.tags = tags,
            Self::Outline(outline) => outline.tags = tags,
        }
        self
    }
}

impl From<Scenario> for ScenarioNode {
    fn from(scenario: Scenario) -> Self {
        Self::Scenario(scenario)
    }
}

impl From<ScenarioOutline> for ScenarioNode {
    fn from(outline: ScenarioOutline) -> Self {
        Self::Outline(outline)
    }
}

/// A `Background:` section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Background {
    /// Localised section keyword, without the colon.
    pub keyword: String,
    /// Optional title; empty when absent.
    pub name: String,
    /// Steps in source order.
    pub steps: Vec<Step>,
}

impl Background {
    /// Create an untitled background with the given keyword.
    #[must_use]
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            name: String::new(),
            steps: Vec::new(),
        }
    }

    /// Append a step.
    #[must_use]
    pub fn with_step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }
}

/// A `Scenario:` section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Scenario {
    /// Localised section keyword, without the colon.
    pub keyword: String,
    /// Scenario title.
    pub name: String,
    /// Scenario tags in source order.
    pub tags: Vec<Tag>,
    /// Steps in source order.
    pub steps: Vec<Step>,
}

impl Scenario {
    /// Create a scenario with no tags and no steps.
    #[must_use]
    pub fn new(keyword: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            name: name.into(),
            tags: Vec::new(),
            steps: Vec::new(),
        }
    }

    /// Append tags.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Tag::new));
        self
    }

    /// Append a step.
    #[must_use]
    pub fn with_step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }
}

/// A `Scenario Outline:` section.
///
/// Only the first entry of `examples` is consulted when splitting and
/// rendering; further blocks are carried along unread.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScenarioOutline {
    /// Localised section keyword, without the colon.
    pub keyword: String,
    /// Outline title.
    pub name: String,
    /// Outline tags in source order.
    pub tags: Vec<Tag>,
    /// Step templates in source order.
    pub steps: Vec<Step>,
    /// Example blocks in source order.
    pub examples: Vec<ExampleBlock>,
}

impl ScenarioOutline {
    /// Create an outline with no tags, steps, or examples.
    #[must_use]
    pub fn new(keyword: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            name: name.into(),
            tags: Vec::new(),
            steps: Vec::new(),
            examples: Vec::new(),
        }
    }

    /// Append tags.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Tag::new));
        self
    }

    /// Append a step.
    #[must_use]
    pub fn with_step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Append an example block.
    #[must_use]
    pub fn with_examples(mut self, block: ExampleBlock) -> Self {
        self.examples.push(block);
        self
    }
}

/// One `Examples:` table: a header row and body rows.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ExampleBlock {
    /// Column names.
    pub table_header: Row,
    /// One row per concrete scenario.
    pub table_body: Vec<Row>,
}

impl ExampleBlock {
    /// Create a block from a header and body rows.
    #[must_use]
    pub fn new(table_header: Row, table_body: Vec<Row>) -> Self {
        Self {
            table_header,
            table_body,
        }
    }
}

/// A single step line, with an optional argument.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Step {
    /// Step keyword including any trailing separator, e.g. `"Given "`.
    pub keyword: String,
    /// Step text following the keyword.
    pub text: String,
    /// Attached data table or doc string.
    pub argument: Option<StepArgument>,
}

impl Step {
    /// Create a step without an argument.
    #[must_use]
    pub fn new(keyword: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            text: text.into(),
            argument: None,
        }
    }

    /// Attach an argument, replacing any existing one.
    #[must_use]
    pub fn with_argument(mut self, argument: StepArgument) -> Self {
        self.argument = Some(argument);
        self
    }
}

/// Argument attached to a step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum StepArgument {
    /// Pipe-delimited table.
    DataTable(DataTable),
    /// Delimited free text.
    DocString(DocString),
}

/// Rows of a step data table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DataTable {
    /// Rows in source order.
    pub rows: Vec<Row>,
}

/// Content of a step doc string.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DocString {
    /// Text between the delimiters; may span several lines.
    pub content: String,
}

/// A table row.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Row {
    /// Cells in column order.
    pub cells: Vec<Cell>,
}

impl<S: Into<String>> FromIterator<S> for Row {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            cells: iter
                .into_iter()
                .map(|value| Cell {
                    value: value.into(),
                })
                .collect(),
        }
    }
}

/// A table cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Cell {
    /// Cell text with surrounding padding removed.
    pub value: String,
}
