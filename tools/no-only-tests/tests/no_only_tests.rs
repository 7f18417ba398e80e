use std::fs;
use std::path::Path;

use no_only_tests::config::LinterConfig;
use no_only_tests::engine::Linter;
use no_only_tests::options::{RuleOptions, BLOCK_DEFAULTS};
use no_only_tests::parse::SourceLanguage;
use no_only_tests::{build_linter, lint_and_fix, lint_source, run};

fn messages(source: &str, linter: &Linter) -> Vec<String> {
    lint_source(source, SourceLanguage::JavaScript, linter)
        .unwrap()
        .into_iter()
        .map(|r| r.message)
        .collect()
}

fn default_linter() -> Linter {
    build_linter(&RuleOptions::default())
}

fn fix(source: &str, linter: &Linter) -> String {
    lint_and_fix(source, SourceLanguage::JavaScript, linter)
        .unwrap()
        .output
}

#[test]
fn reports_each_default_block_name() {
    let linter = default_linter();
    for name in BLOCK_DEFAULTS {
        let source = format!("{name}.only('case', () => {{}});");
        assert_eq!(
            messages(&source, &linter),
            vec![format!("{name}.only not permitted")],
            "source: {source}"
        );
    }
}

#[test]
fn ignores_unblocked_receivers() {
    let linter = default_linter();
    assert!(messages("foo.only();", &linter).is_empty());
    assert!(messages("describe.skip('x', () => {});", &linter).is_empty());
    assert!(messages("obj.describe.only();", &linter).is_empty());
}

#[test]
fn ignores_bare_only_identifiers() {
    let linter = default_linter();
    let source = "const only = true;\nif (only) { run(only); }\nconst o = { only: 1 };";
    assert!(messages(source, &linter).is_empty());
}

#[test]
fn reports_dotted_block_names() {
    let options = RuleOptions::from_json_str(r#"{"block": ["test.describe"]}"#).unwrap();
    let linter = build_linter(&options);
    assert_eq!(
        messages("test.describe.only('suite', () => {});", &linter),
        vec!["test.describe.only not permitted"]
    );
    assert!(messages("test.only('case', () => {});", &linter).is_empty());
}

#[test]
fn chained_qualifier_is_not_reported_with_defaults() {
    let linter = default_linter();
    assert!(messages("describe.skip.only('x', () => {});", &linter).is_empty());
}

#[test]
fn custom_options_change_what_matches() {
    let options =
        RuleOptions::from_json_str(r#"{"block": ["myDescribe"], "focus": ["solo"]}"#).unwrap();
    let linter = build_linter(&options);
    assert_eq!(
        messages("myDescribe.solo('x', () => {});", &linter),
        vec!["myDescribe.solo not permitted"]
    );
    assert!(messages("describe.only('x', () => {});", &linter).is_empty());
}

#[test]
fn fix_removes_only_the_modifier() {
    let linter = default_linter();
    assert_eq!(fix("describe.only('x', fn)", &linter), "describe('x', fn)");
}

#[test]
fn fix_handles_nested_and_dotted_focus() {
    let options =
        RuleOptions::from_json_str(r#"{"block": ["it", "describe", "test.describe"]}"#).unwrap();
    let linter = build_linter(&options);
    let source = "\
describe.only('outer', () => {
  it.only('inner', () => {});
  test.describe.only('playwright', () => {});
});
";
    let expected = "\
describe('outer', () => {
  it('inner', () => {});
  test.describe('playwright', () => {});
});
";
    let fixed = lint_and_fix(source, SourceLanguage::JavaScript, &linter).unwrap();
    assert_eq!(fixed.output, expected);
    assert_eq!(fixed.fixes_applied, 3);
    assert!(fixed.remaining.is_empty());
}

#[test]
fn computed_identifier_access_is_reported() {
    let linter = default_linter();
    assert_eq!(
        messages("describe[only]('x', f);", &linter),
        vec!["describe.only not permitted"]
    );
    assert!(messages("describe['only']('x', f);", &linter).is_empty());
    assert!(messages("describe[`only`]('x', f);", &linter).is_empty());
}

#[test]
fn jsx_tag_names_are_not_member_access() {
    let linter = default_linter();
    for source in [
        "const el = <describe.only>hi</describe.only>;",
        "const el = <it.only />;",
    ] {
        assert!(messages(source, &linter).is_empty(), "source: {source}");
        assert_eq!(fix(source, &linter), source);
        let reports = lint_source(source, SourceLanguage::Tsx, &linter).unwrap();
        assert!(reports.is_empty(), "source: {source}");
    }
}

#[test]
fn member_access_inside_jsx_expressions_is_still_checked() {
    let linter = default_linter();
    assert_eq!(
        messages("const el = <Suite run={it.only} />;", &linter),
        vec!["it.only not permitted"]
    );
}

#[test]
fn typeof_in_type_position_is_ignored() {
    let linter = default_linter();
    for source in [
        "type T = typeof describe.only;",
        "let handler: typeof it.only;",
    ] {
        let reports = lint_source(source, SourceLanguage::TypeScript, &linter).unwrap();
        assert!(reports.is_empty(), "source: {source}");
    }
    let reports =
        lint_source("const f = typeof it.only;", SourceLanguage::TypeScript, &linter).unwrap();
    assert_eq!(reports.len(), 1);
}

#[test]
fn fix_removes_the_character_before_the_identifier() {
    let linter = default_linter();
    let fixed = lint_and_fix("describe . only('x', fn)", SourceLanguage::JavaScript, &linter).unwrap();
    assert_eq!(fixed.output, "describe .('x', fn)");
    assert_eq!(fixed.fixes_applied, 1);
}

#[test]
fn reports_follow_document_order() {
    let linter = default_linter();
    let source = "it.only('a', f);\ntest.only('b', f);\ncontext.only('c', f);";
    assert_eq!(
        messages(source, &linter),
        vec![
            "it.only not permitted",
            "test.only not permitted",
            "context.only not permitted",
        ]
    );
}

#[test]
fn typescript_sources_are_checked() {
    let linter = default_linter();
    let source = "describe.only('typed', (): void => { const x: number = 1; });";
    let reports = lint_source(source, SourceLanguage::TypeScript, &linter).unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].message, "describe.only not permitted");
}

#[test]
fn rerunning_clean_source_stays_clean() {
    let linter = default_linter();
    let source = "describe('x', () => { it('y', () => { foo.only(); }); });";
    assert!(messages(source, &linter).is_empty());
    assert!(messages(source, &linter).is_empty());
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn run_reports_paths_and_positions() {
    let root = tempfile::tempdir().unwrap();
    write_file(
        &root.path().join("src/math.test.js"),
        "describe('math', () => {\n  it.only('adds', () => {});\n});\n",
    );
    write_file(&root.path().join("src/math.js"), "export const add = (a, b) => a + b;\n");
    write_file(
        &root.path().join("node_modules/lib/index.test.js"),
        "describe.only('vendored', () => {});\n",
    );

    let config = LinterConfig::from_root(root.path());
    let results = run(&config, &[], false, |_, _| {});

    assert_eq!(results.len(), 2);
    let failing: Vec<_> = results.iter().filter(|r| !r.passed()).collect();
    assert_eq!(failing.len(), 1);
    assert_eq!(failing[0].path.replace('\\', "/"), "src/math.test.js");
    let d = &failing[0].diagnostics[0];
    assert_eq!((d.line, d.column), (2, 6));
    assert_eq!(d.message, "it.only not permitted");
    assert!(d.fixable);
}

#[test]
fn run_with_fix_rewrites_files() {
    let root = tempfile::tempdir().unwrap();
    let file = root.path().join("suite.spec.ts");
    write_file(&file, "test.only('x', async () => {});\n");

    let config = LinterConfig::from_root(root.path());
    let results = run(&config, &[], true, |_, _| {});

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].fixes_applied, 1);
    assert!(results[0].passed());
    assert_eq!(fs::read_to_string(&file).unwrap(), "test('x', async () => {});\n");
}

#[test]
fn run_respects_tests_only() {
    let root = tempfile::tempdir().unwrap();
    write_file(&root.path().join("helpers.js"), "it.only('not a test file', f);\n");
    write_file(&root.path().join("a.test.js"), "it('fine', f);\n");

    let mut config = LinterConfig::from_root(root.path());
    config.tests_only = true;
    let results = run(&config, &[], false, |_, _| {});

    assert_eq!(results.len(), 1);
    assert!(results[0].passed());
}

#[test]
fn run_records_missing_targets_as_errors() {
    let root = tempfile::tempdir().unwrap();
    let present = root.path().join("a.test.js");
    write_file(&present, "it('x', f);\n");
    let missing = root.path().join("gone.test.js");

    let config = LinterConfig::from_root(root.path());
    let mut seen = Vec::new();
    let results = run(&config, &[missing, present], false, |result, _| {
        seen.push(result.path.clone());
    });

    assert_eq!(results.len(), 2);
    assert_eq!(seen, vec!["gone.test.js", "a.test.js"]);
    assert_eq!(results[0].error.as_deref(), Some("no such file or directory"));
    assert!(!results[0].passed());
    assert!(results[1].passed());
}
