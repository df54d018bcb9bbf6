//! Assembly of standalone single-scenario features.

use crate::model::{Child, Feature, ScenarioNode, Tag};

/// Build a standalone feature from `template` and one scenario `node`.
///
/// The node's tags become its own tags followed by the template's feature
/// tags, both in source order; duplicates are kept. Neither input is
/// modified, so one template can be reused for every node of a feature.
#[must_use]
pub fn assemble_feature(template: &Feature, node: &ScenarioNode) -> Feature {
    let merged = merge_tags(node.tags(), &template.tags);
    let mut feature = template.clone();
    feature
        .children
        .push(Child::from(node.clone().with_replaced_tags(merged)));
    feature
}

fn merge_tags(own: &[Tag], inherited: &[Tag]) -> Vec<Tag> {
    own.iter().chain(inherited).cloned().collect()
}
