//! Canonical text rendering of assembled features.
//!
//! The output is purely structural: every line is built from model fields and
//! terminated by `\n`, with no indentation and no re-validation of keywords.
//! Re-parsing the text with the dialect it was written in reproduces the
//! feature's name, tags, steps, and first example block.

use crate::model::{
    Background, Child, Feature, FEATURE_TYPE, Row, Scenario, ScenarioOutline, Step, StepArgument,
    Tag,
};

const DOC_STRING_DELIMITER: &str = "\"\"\"";
const EXAMPLES_HEADER: &str = "Examples:";

/// Render `feature` as Gherkin text.
#[must_use]
pub fn render_feature(feature: &Feature) -> String {
    let mut out = String::new();
    push_tags(&mut out, &feature.tags);
    push_line(&mut out, &format!("{FEATURE_TYPE}: {}", feature.name));
    for child in &feature.children {
        match child {
            Child::Background(background) => push_background(&mut out, background),
            Child::Scenario(scenario) => push_scenario(&mut out, scenario),
            Child::Outline(outline) => push_outline(&mut out, outline),
        }
    }
    out
}

fn push_background(out: &mut String, background: &Background) {
    push_heading(out, &background.keyword, &background.name);
    push_steps(out, &background.steps);
}

fn push_scenario(out: &mut String, scenario: &Scenario) {
    push_tags(out, &scenario.tags);
    push_heading(out, &scenario.keyword, &scenario.name);
    push_steps(out, &scenario.steps);
}

/// Only the first example block is rendered; an outline without any block
/// renders no `Examples:` section.
fn push_outline(out: &mut String, outline: &ScenarioOutline) {
    push_tags(out, &outline.tags);
    push_heading(out, &outline.keyword, &outline.name);
    push_steps(out, &outline.steps);
    if let Some(block) = outline.examples.first() {
        push_line(out, EXAMPLES_HEADER);
        push_line(out, &render_row(&block.table_header));
        for row in &block.table_body {
            push_line(out, &render_row(row));
        }
    }
}

fn push_tags(out: &mut String, tags: &[Tag]) {
    for tag in tags {
        push_line(out, &tag.name);
    }
}

fn push_heading(out: &mut String, keyword: &str, name: &str) {
    push_line(out, &format!("{keyword}: {name}"));
}

fn push_steps(out: &mut String, steps: &[Step]) {
    for step in steps {
        out.push_str(&step.keyword);
        push_line(out, &step.text);
        match &step.argument {
            Some(StepArgument::DataTable(table)) => {
                for row in &table.rows {
                    push_line(out, &render_row(row));
                }
            }
            Some(StepArgument::DocString(doc)) => {
                push_line(out, DOC_STRING_DELIMITER);
                push_line(out, &doc.content);
                push_line(out, DOC_STRING_DELIMITER);
            }
            None => {}
        }
    }
}

/// `|a|b|`: a leading pipe, then every cell followed by a pipe.
fn render_row(row: &Row) -> String {
    let mut rendered = String::from("|");
    for cell in &row.cells {
        rendered.push_str(&cell.value);
        rendered.push('|');
    }
    rendered
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}
