//! Behavioural tests for splitting fixture feature files on disk.

use std::fs;
use std::path::{Path, PathBuf};

use gherkin_split::model::{Child, ExampleBlock, Feature, Step, Tag};
use gherkin_split::{
    CompileOptions, CompileReport, Dialect, ErrorKind, compile, parse_specification,
    render_feature, split_feature,
};
use rstest::{fixture, rstest};
use tempfile::TempDir;

const SCENARIO_1: &str = concat!(
    "@featureTag\n",
    "Feature: Scenario\n",
    "Background: \n",
    "Given Prerequisites\n",
    "@scenarioTag1\n",
    "@featureTag\n",
    "Scenario: Simple scenario 1\n",
    "Then Test\n",
);

const SCENARIO_2: &str = concat!(
    "@featureTag\n",
    "Feature: Scenario\n",
    "Background: \n",
    "Given Prerequisites\n",
    "@scenarioTag2\n",
    "@featureTag\n",
    "Scenario: Simple scenario 2\n",
    "Then Test\n",
);

/// Source and output directories for one test.
struct Workspace {
    sources: TempDir,
    output: TempDir,
}

impl Workspace {
    fn pattern(&self, tail: &str) -> String {
        format!("{}/{tail}", self.sources.path().display())
    }

    fn options(&self, fixtures: &[&str]) -> CompileOptions {
        for name in fixtures {
            self.add_fixture(name);
        }
        CompileOptions::new([self.pattern("*.feature")], self.output.path())
    }

    #[expect(clippy::expect_used, reason = "behavioural tests use explicit panics")]
    fn add_fixture(&self, name: &str) {
        let source = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(name);
        fs::copy(&source, self.sources.path().join(name)).expect("copy fixture");
    }

    #[expect(clippy::expect_used, reason = "behavioural tests use explicit panics")]
    fn output_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = fs::read_dir(self.output.path())
            .expect("read output directory")
            .map(|entry| entry.expect("directory entry").path())
            .collect();
        files.sort();
        files
    }
}

#[fixture]
fn workspace() -> Workspace {
    let tempdir = || TempDir::new().unwrap_or_else(|err| panic!("temp dir: {err}"));
    Workspace {
        sources: tempdir(),
        output: tempdir(),
    }
}

#[expect(clippy::expect_used, reason = "behavioural tests use explicit panics")]
fn run(options: &CompileOptions) -> (CompileReport, Vec<String>) {
    let report = compile(options).expect("compile succeeds");
    let texts = report
        .written_paths()
        .map(|path| fs::read_to_string(path).expect("read generated file"))
        .collect();
    (report, texts)
}

fn outline_text(tag: &str, name: &str, rows: &[&str]) -> String {
    let mut text = format!(
        "@featureTag\nFeature: ScenarioOutline\nBackground: \nGiven Prerequisites\n\
         {tag}\n@featureTag\nScenario Outline: {name}\nThen Test \"<example>\"\n\
         Examples:\n|example|\n"
    );
    for row in rows {
        text.push_str(&format!("|{row}|\n"));
    }
    text
}

#[rstest]
fn splits_each_scenario_into_its_own_file(workspace: Workspace) {
    let (report, texts) = run(&workspace.options(&["scenario.feature"]));

    assert_eq!(texts, [SCENARIO_1, SCENARIO_2]);
    assert_eq!(report.features_parsed, 1);
    assert_eq!(report.scenarios_generated, 2);
    assert_eq!(report.scenarios_written, 2);
    assert_eq!(workspace.output_files().len(), 2);
}

#[rstest]
fn written_files_are_named_after_the_feature(workspace: Workspace) {
    let (report, _) = run(&workspace.options(&["scenario.feature"]));

    let mut stamps = Vec::new();
    for path in report.written_paths() {
        assert_eq!(path.parent(), Some(workspace.output.path()));
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default();
        let parts: Vec<&str> = name.split('.').collect();
        let [stem, stamp, extension] = parts.as_slice() else {
            panic!("unexpected file name {name}");
        };
        assert_eq!(*stem, "Scenario");
        assert_eq!(*extension, "feature");
        assert!(stamp.chars().all(|c| c.is_ascii_digit()), "{name}");
        stamps.push(stamp.parse::<i64>().unwrap_or_default());
    }
    assert!(stamps.windows(2).all(|pair| matches!(pair, [a, b] if a < b)));
}

#[rstest]
fn expands_outlines_per_example_row(workspace: Workspace) {
    let (report, texts) = run(&workspace.options(&["scenario_outline.feature"]));

    assert_eq!(
        texts,
        [
            outline_text("@scenarioOutlineTag1", "Outline Scenario 1", &["example1"]),
            outline_text("@scenarioOutlineTag1", "Outline Scenario 1", &["example2"]),
            outline_text("@scenarioOutlineTag2", "Outline Scenario 2", &["example1"]),
            outline_text("@scenarioOutlineTag2", "Outline Scenario 2", &["example2"]),
        ]
    );
    assert_eq!(report.scenarios_written, 4);
}

#[rstest]
fn keeps_outlines_whole_when_expansion_is_off(workspace: Workspace) {
    let options = workspace
        .options(&["scenario_outline.feature"])
        .with_expand_scenario_outlines(false);
    let (_, texts) = run(&options);

    assert_eq!(
        texts,
        [
            outline_text("@scenarioOutlineTag1", "Outline Scenario 1", &["example1", "example2"]),
            outline_text("@scenarioOutlineTag2", "Outline Scenario 2", &["example1", "example2"]),
        ]
    );
}

#[rstest]
fn filters_scenarios_by_tag_expression(workspace: Workspace) {
    let options = workspace
        .options(&["scenario.feature"])
        .with_tag_expression("@scenarioTag1");
    let (report, texts) = run(&options);

    assert_eq!(texts, [SCENARIO_1]);
    assert_eq!(report.scenarios_generated, 2);
    assert_eq!(report.scenarios_written, 1);
}

#[rstest]
fn filters_expanded_outlines_by_tag_expression(workspace: Workspace) {
    let options = workspace
        .options(&["scenario_outline.feature"])
        .with_tag_expression("@scenarioOutlineTag1");
    let (_, texts) = run(&options);

    assert_eq!(
        texts,
        [
            outline_text("@scenarioOutlineTag1", "Outline Scenario 1", &["example1"]),
            outline_text("@scenarioOutlineTag1", "Outline Scenario 1", &["example2"]),
        ]
    );
}

#[rstest]
fn feature_tags_take_part_in_filtering(workspace: Workspace) {
    let options = workspace
        .options(&["scenario.feature"])
        .with_tag_expression("@featureTag and not @scenarioTag1");
    let (_, texts) = run(&options);
    assert_eq!(texts, [SCENARIO_2]);
}

#[rstest]
fn renders_data_tables(workspace: Workspace) {
    let options = workspace
        .options(&["scenario_data_tables.feature"])
        .with_tag_expression("@scenarioDataTableTag1 or @scenarioDataTableTag2");
    let (_, texts) = run(&options);

    let expected = |tag: &str, index: u8| {
        format!(
            "@featureTag\nFeature: Scenario Datatables\nBackground: \nGiven Prerequisites\n\
             {tag}\n@featureTag\nScenario: Scenario data table {index}\nThen TestDataTable\n\
             |data1|data2|\n"
        )
    };
    assert_eq!(
        texts,
        [
            expected("@scenarioDataTableTag1", 1),
            expected("@scenarioDataTableTag2", 2),
        ]
    );
}

#[rstest]
fn renders_doc_strings(workspace: Workspace) {
    let options = workspace
        .options(&["scenario_multiline_text.feature"])
        .with_tag_expression("@scenarioMultilineTag1 or @scenarioMultilineTag2");
    let (_, texts) = run(&options);

    let expected = |tag: &str, index: u8| {
        format!(
            "@featureTag\nFeature: Scenario Multiline\nBackground: \nGiven Prerequisites\n\
             {tag}\n@featureTag\nScenario: Scenario multiline {index}\nThen TestMultiline\n\
             \"\"\"\nMultiline\nText\n\"\"\"\n"
        )
    };
    assert_eq!(
        texts,
        [
            expected("@scenarioMultilineTag1", 1),
            expected("@scenarioMultilineTag2", 2),
        ]
    );
}

#[rstest]
fn splits_features_written_in_other_languages(workspace: Workspace) {
    let options = workspace
        .options(&["other_lang_scenario.feature"])
        .with_language("uk");
    let (_, texts) = run(&options);

    assert_eq!(
        texts,
        [concat!(
            "@featureTag\n",
            "Feature: Функція Користувача\n",
            "Передумова: \n",
            "Нехай Prerequisites\n",
            "@scenarioTag\n",
            "@featureTag\n",
            "Сценарій: Simple scenario\n",
            "Тоді Test\n",
        )]
    );
}

#[rstest]
fn escapes_special_characters_in_file_names(workspace: Workspace) {
    let (report, _) = run(&workspace.options(&["scenario_special_chars.feature"]));

    let names: Vec<String> = report
        .written_paths()
        .filter_map(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .collect();
    let [name] = names.as_slice() else {
        panic!("expected one generated file, got {names:?}");
    };
    assert!(
        name.starts_with("Scenario_with_special_____chars_123."),
        "unexpected file name {name}"
    );
}

#[rstest]
fn processes_sources_in_discovery_order_once(workspace: Workspace) {
    workspace.add_fixture("scenario.feature");
    workspace.add_fixture("scenario_outline.feature");
    let options = CompileOptions::new(
        [
            workspace.pattern("scenario_outline.feature"),
            workspace.pattern("*.feature"),
        ],
        workspace.output.path(),
    );
    let (report, _) = run(&options);

    let sources: Vec<&Path> = report.sources.iter().map(|s| s.source.as_path()).collect();
    assert_eq!(
        sources,
        [
            workspace.sources.path().join("scenario_outline.feature").as_path(),
            workspace.sources.path().join("scenario.feature").as_path(),
        ]
    );
    assert_eq!(report.scenarios_written, 6);
}

/// The parts of a child that survive a render and re-parse.
#[derive(Debug, PartialEq)]
struct ChildShape {
    tags: Vec<Tag>,
    steps: Vec<Step>,
    first_examples: Option<ExampleBlock>,
}

fn child_shapes(feature: &Feature) -> Vec<ChildShape> {
    feature
        .children
        .iter()
        .map(|child| match child {
            Child::Background(background) => ChildShape {
                tags: Vec::new(),
                steps: background.steps.clone(),
                first_examples: None,
            },
            Child::Scenario(scenario) => ChildShape {
                tags: scenario.tags.clone(),
                steps: scenario.steps.clone(),
                first_examples: None,
            },
            Child::Outline(outline) => ChildShape {
                tags: outline.tags.clone(),
                steps: outline.steps.clone(),
                first_examples: outline.examples.first().cloned(),
            },
        })
        .collect()
}

/// The header is always written as `Feature:`; dialects without that keyword
/// need their own header word before the text parses again.
#[expect(clippy::expect_used, reason = "behavioural tests use explicit panics")]
#[rstest]
#[case("scenario.feature", "en", "Feature")]
#[case("scenario_outline.feature", "en", "Feature")]
#[case("scenario_data_tables.feature", "en", "Feature")]
#[case("scenario_multiline_text.feature", "en", "Feature")]
#[case("scenario_special_chars.feature", "en", "Feature")]
#[case("other_lang_scenario.feature", "uk", "Функціонал")]
fn generated_features_parse_back_to_the_same_tree(
    #[case] fixture: &str,
    #[case] language: &str,
    #[case] header_keyword: &str,
) {
    let dialect = Dialect::new(language).expect("known dialect");
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(fixture);
    let text = fs::read_to_string(path).expect("read fixture");
    let source = parse_specification(&text, &dialect).expect("fixture parses");

    let features = split_feature(&source, true);
    assert!(!features.is_empty());
    for expected in &features {
        let rendered = render_feature(expected).replacen(
            "Feature:",
            &format!("{header_keyword}:"),
            1,
        );
        let reparsed = parse_specification(&rendered, &dialect).expect("generated text parses");

        assert_eq!(reparsed.name, expected.name);
        assert_eq!(reparsed.tags, expected.tags);
        assert_eq!(child_shapes(&reparsed), child_shapes(expected));
    }
}

fn failure_kind(options: &CompileOptions) -> ErrorKind {
    match compile(options) {
        Ok(report) => panic!("expected compile to fail, wrote {report:?}"),
        Err(err) => err.kind(),
    }
}

#[rstest]
fn rejects_unknown_languages(workspace: Workspace) {
    let options = workspace
        .options(&["scenario.feature"])
        .with_language("not-a-language");
    assert_eq!(failure_kind(&options), ErrorKind::Configuration);
    assert!(workspace.output_files().is_empty());
}

#[rstest]
fn rejects_missing_output_directory(workspace: Workspace) {
    let options = CompileOptions {
        output_directory: workspace.output.path().join("absent"),
        ..workspace.options(&["scenario.feature"])
    };
    assert_eq!(failure_kind(&options), ErrorKind::Configuration);
}

#[rstest]
fn rejects_invalid_source_patterns(workspace: Workspace) {
    let options = CompileOptions::new([workspace.pattern("[.feature")], workspace.output.path());
    assert_eq!(failure_kind(&options), ErrorKind::Discovery);
}

#[rstest]
fn rejects_malformed_tag_expressions(workspace: Workspace) {
    let options = workspace
        .options(&["scenario.feature"])
        .with_tag_expression("@a and");
    assert_eq!(failure_kind(&options), ErrorKind::TagExpression);
    assert!(workspace.output_files().is_empty());
}

#[expect(clippy::expect_used, reason = "behavioural tests use explicit panics")]
#[rstest]
fn rejects_files_that_are_not_utf8(workspace: Workspace) {
    fs::write(workspace.sources.path().join("binary.feature"), [0xff_u8, 0xfe, 0x00])
        .expect("write binary file");
    let options = workspace.options(&[]);
    assert_eq!(failure_kind(&options), ErrorKind::Read);
}

#[expect(clippy::expect_used, reason = "behavioural tests use explicit panics")]
#[rstest]
fn aborts_on_malformed_sources_keeping_earlier_output(workspace: Workspace) {
    workspace.add_fixture("scenario.feature");
    workspace.add_fixture("malformed.feature.txt");
    fs::rename(
        workspace.sources.path().join("malformed.feature.txt"),
        workspace.sources.path().join("z_malformed.feature"),
    )
    .expect("rename malformed fixture");
    let options = CompileOptions::new(
        [
            workspace.pattern("scenario.feature"),
            workspace.pattern("z_malformed.feature"),
        ],
        workspace.output.path(),
    );

    let Err(err) = compile(&options) else {
        panic!("expected malformed source to fail the run");
    };
    assert_eq!(err.kind(), ErrorKind::Parse);
    assert!(err.to_string().contains("z_malformed.feature"));
    assert_eq!(workspace.output_files().len(), 2);
}

#[cfg(unix)]
#[expect(clippy::expect_used, reason = "behavioural tests use explicit panics")]
#[rstest]
fn reports_unwritable_output_directories(workspace: Workspace) {
    use std::os::unix::fs::PermissionsExt;

    let output = workspace.output.path();
    fs::set_permissions(output, fs::Permissions::from_mode(0o500)).expect("make read-only");
    let probe = output.join("probe");
    let writable = fs::write(&probe, "").is_ok();
    let result = if writable {
        // Running with privileges that ignore directory permissions.
        None
    } else {
        Some(failure_kind(&workspace.options(&["scenario.feature"])))
    };
    fs::set_permissions(output, fs::Permissions::from_mode(0o700)).expect("restore permissions");
    if let Some(kind) = result {
        assert_eq!(kind, ErrorKind::Write);
    }
}
