//! Tag filtering of assembled features.

use std::fmt;

use gherkin_split_tags::{TagExprError, TagExpression};

use crate::model::{Child, Feature};

/// A compiled tag filter.
///
/// Built once per run and shared by reference; it holds no mutable state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum TagFilter {
    /// Keep every feature. Produced by an empty expression.
    #[default]
    MatchAll,
    /// Keep features whose scenario tags satisfy the expression.
    Expression(TagExpression),
}

impl TagFilter {
    /// Compile `expression`; an empty or blank string matches everything
    /// without consulting the expression parser.
    ///
    /// # Errors
    ///
    /// Returns [`TagExprError`] for malformed expressions.
    pub fn compile(expression: &str) -> Result<Self, TagExprError> {
        if expression.trim().is_empty() {
            return Ok(Self::MatchAll);
        }
        TagExpression::parse(expression).map(Self::Expression)
    }

    /// Whether `feature` should be kept.
    ///
    /// The expression is evaluated against the tag names of the feature's
    /// scenario or outline children (the merged tags of an assembled
    /// feature). A feature without such a child never matches an
    /// expression.
    #[must_use]
    pub fn matches(&self, feature: &Feature) -> bool {
        match self {
            Self::MatchAll => true,
            Self::Expression(expr) => feature
                .children
                .iter()
                .filter_map(Child::scenario_tags)
                .any(|tags| expr.evaluate(tags.iter().map(|tag| tag.name.as_str()))),
        }
    }

    /// Keep the features that match, preserving order.
    #[must_use]
    pub fn apply(&self, features: Vec<Feature>) -> Vec<Feature> {
        features
            .into_iter()
            .filter(|feature| self.matches(feature))
            .collect()
    }
}

impl fmt::Display for TagFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MatchAll => f.write_str("<all>"),
            Self::Expression(expr) => write!(f, "{expr}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::model::{Background, ExampleBlock, Row, Scenario, ScenarioOutline};

    fn single(tags: &[&str]) -> Feature {
        Feature::new("f").with_child(Scenario::new("Scenario", "s").with_tags(tags.iter().copied()))
    }

    fn compile(expression: &str) -> TagFilter {
        TagFilter::compile(expression)
            .unwrap_or_else(|err| panic!("compile `{expression}`: {err}"))
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_expression_matches_everything(#[case] expression: &str) {
        let filter = compile(expression);
        assert_eq!(filter, TagFilter::MatchAll);
        let features = vec![single(&[]), single(&["@a"]), Feature::new("empty")];
        assert_eq!(filter.apply(features).len(), 3);
    }

    #[test]
    fn keeps_matching_features_in_order() {
        let features = vec![
            single(&["@scenarioTag1", "@featureTag"]),
            single(&["@scenarioTag2", "@featureTag"]),
            single(&["@scenarioTag1"]),
        ];
        let kept = compile("@scenarioTag1").apply(features.clone());
        assert_eq!(
            kept,
            [
                features.first().cloned().unwrap_or_default(),
                features.get(2).cloned().unwrap_or_default(),
            ]
        );
    }

    #[test]
    fn feature_tags_merged_into_the_scenario_take_part() {
        let filter = compile("@featureTag and not @scenarioTag2");
        assert!(filter.matches(&single(&["@scenarioTag1", "@featureTag"])));
        assert!(!filter.matches(&single(&["@scenarioTag2", "@featureTag"])));
    }

    #[rstest]
    #[case("@a", false)]
    #[case("not @a", true)]
    #[case("@a or not @b", true)]
    #[case("@a and not @b", false)]
    fn taggless_scenarios_evaluate_against_the_empty_set(
        #[case] expression: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(compile(expression).matches(&single(&[])), expected);
    }

    #[test]
    fn reads_outline_tags_and_ignores_the_background() {
        let feature = Feature::new("f")
            .with_child(Background::new("Background"))
            .with_child(
                ScenarioOutline::new("Scenario Outline", "o")
                    .with_tags(["@outline"])
                    .with_examples(ExampleBlock::new(
                        Row::from_iter(["h"]),
                        vec![Row::from_iter(["v"])],
                    )),
            );
        assert!(compile("@outline").matches(&feature));
        assert!(!compile("@other").matches(&feature));
    }

    #[test]
    fn features_without_scenarios_never_match_an_expression() {
        assert!(!compile("not @a").matches(&Feature::new("empty")));
    }

    #[test]
    fn malformed_expressions_are_rejected() {
        assert!(TagFilter::compile("@a and").is_err());
    }

    #[test]
    fn display_names_the_filter() {
        assert_eq!(TagFilter::MatchAll.to_string(), "<all>");
        assert_eq!(compile("@a").to_string(), "@a");
    }
}
