//! Scenario outline expansion.
//!
//! Children are visited in source order. Scenarios pass through; outlines
//! either pass through whole or fan out into one copy per row of their first
//! example block, in row order. Further example blocks are never read.

use tracing::debug;

use crate::model::{Child, ScenarioNode, ScenarioOutline};

/// Flatten `children` into standalone scenario nodes.
///
/// Backgrounds are skipped. With `expand` set, an outline with N rows in its
/// first example block yields N nodes, each carrying exactly one body row; an
/// outline with no rows (or no example block) yields nothing.
#[must_use]
pub fn expand_children(children: &[Child], expand: bool) -> Vec<ScenarioNode> {
    let mut nodes = Vec::with_capacity(children.len());
    for child in children {
        match child {
            Child::Background(_) => {}
            Child::Scenario(scenario) => nodes.push(ScenarioNode::Scenario(scenario.clone())),
            Child::Outline(outline) if expand => nodes.extend(expand_outline(outline)),
            Child::Outline(outline) => nodes.push(ScenarioNode::Outline(outline.clone())),
        }
    }
    nodes
}

/// One copy of `outline` per body row of its first example block.
fn expand_outline(outline: &ScenarioOutline) -> impl Iterator<Item = ScenarioNode> + '_ {
    let rows = outline
        .examples
        .first()
        .map(|block| block.table_body.as_slice())
        .unwrap_or_default();
    if rows.is_empty() {
        debug!(outline = %outline.name, "scenario outline has no example rows");
    }
    rows.iter().map(move |row| {
        let mut variant = outline.clone();
        if let Some(block) = variant.examples.first_mut() {
            block.table_body = vec![row.clone()];
        }
        ScenarioNode::Outline(variant)
    })
}
