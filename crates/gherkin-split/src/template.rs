//! Skeleton extraction: the parts of a feature every split output shares.

use crate::model::{Child, Feature};

/// Copy `feature` keeping its name, tags, and background only.
///
/// A feature without a background yields a skeleton with no children.
#[must_use]
pub fn extract_template(feature: &Feature) -> Feature {
    Feature {
        name: feature.name.clone(),
        tags: feature.tags.clone(),
        children: feature
            .children
            .iter()
            .filter(|child| matches!(child, Child::Background(_)))
            .cloned()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Background, Scenario, Step};

    #[test]
    fn keeps_background_and_drops_scenarios() {
        let background = Background::new("Background").with_step(Step::new("Given ", "setup"));
        let feature = Feature::new("demo")
            .with_tags(["@featureTag"])
            .with_child(background.clone())
            .with_child(Scenario::new("Scenario", "one"));

        let template = extract_template(&feature);

        assert_eq!(template.name, "demo");
        assert_eq!(template.tags, feature.tags);
        assert_eq!(template.children, [Child::Background(background)]);
        assert_eq!(feature.children.len(), 2, "input must be left untouched");
    }

    #[test]
    fn feature_without_background_yields_empty_children() {
        let feature = Feature::new("bare").with_child(Scenario::new("Scenario", "one"));
        let template = extract_template(&feature);
        assert!(template.children.is_empty());
        assert_eq!(template.name, "bare");
    }
}
