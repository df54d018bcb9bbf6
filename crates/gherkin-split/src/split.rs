//! Per-feature splitting: template, expansion, and assembly combined.

use crate::assemble::assemble_feature;
use crate::expand::expand_children;
use crate::model::Feature;
use crate::template::extract_template;

/// Split one parsed feature into standalone single-scenario features.
///
/// Order follows the feature's children, then example rows within an
/// expanded outline. The input is not modified.
#[must_use]
pub fn split_feature(feature: &Feature, expand_outlines: bool) -> Vec<Feature> {
    let template = extract_template(feature);
    expand_children(&feature.children, expand_outlines)
        .iter()
        .map(|node| assemble_feature(&template, node))
        .collect()
}
