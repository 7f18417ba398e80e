pub mod config;
pub mod engine;
pub mod fixer;
pub mod options;
pub mod parse;
pub mod reporter;
pub mod rule;
pub mod source;
pub mod tree;
pub mod walker;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use serde::Serialize;

use config::LinterConfig;
use engine::{Fix, Linter, Report};
use options::RuleOptions;
use parse::{ParseError, SourceLanguage};
use rule::NoOnlyTests;
use source::LineIndex;

/// Upper bound on lint-fix-relint rounds for a single file.
pub const MAX_FIX_PASSES: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub line: usize,
    pub column: usize,
    pub end_line: usize,
    pub end_column: usize,
    pub rule: &'static str,
    pub message: String,
    pub fixable: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileResult {
    pub path: String,
    pub diagnostics: Vec<Diagnostic>,
    pub fixes_applied: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileResult {
    pub fn passed(&self) -> bool {
        self.diagnostics.is_empty() && self.error.is_none()
    }
}

pub struct FixedSource {
    pub output: String,
    pub fixes_applied: usize,
    pub remaining: Vec<Report>,
}

pub fn build_linter(options: &RuleOptions) -> Linter {
    Linter::new().with_rule(Box::new(NoOnlyTests::new(options)))
}

pub fn lint_source(
    source: &str,
    language: SourceLanguage,
    linter: &Linter,
) -> Result<Vec<Report>, ParseError> {
    let tree = parse::parse_source(source, language)?;
    Ok(linter.run(&tree))
}

/// Lint, apply every fix, and re-lint until nothing more applies or
/// [`MAX_FIX_PASSES`] is reached.
pub fn lint_and_fix(
    source: &str,
    language: SourceLanguage,
    linter: &Linter,
) -> Result<FixedSource, ParseError> {
    let mut output = source.to_string();
    let mut fixes_applied = 0;

    for _ in 0..MAX_FIX_PASSES {
        let reports = lint_source(&output, language, linter)?;
        let fixes: Vec<Fix> = reports.into_iter().filter_map(|r| r.fix).collect();
        if fixes.is_empty() {
            break;
        }
        let outcome = fixer::apply_fixes(&output, &fixes);
        if outcome.applied == 0 {
            break;
        }
        output = outcome.output;
        fixes_applied += outcome.applied;
    }

    let remaining = lint_source(&output, language, linter)?;
    Ok(FixedSource {
        output,
        fixes_applied,
        remaining,
    })
}

pub fn to_diagnostics(source: &str, reports: &[Report]) -> Vec<Diagnostic> {
    let index = LineIndex::new(source);
    reports
        .iter()
        .map(|report| {
            let (line, column) = index.line_col(report.range.start);
            let (end_line, end_column) = index.line_col(report.range.end);
            Diagnostic {
                line,
                column,
                end_line,
                end_column,
                rule: report.rule,
                message: report.message.clone(),
                fixable: report.fix.is_some(),
            }
        })
        .collect()
}

/// Lint one file, rewriting it in place when `fix` is set and a fix applied.
/// Read and parse failures are recorded on the result rather than returned.
pub fn lint_file(path: &Path, root: &Path, linter: &Linter, fix: bool) -> FileResult {
    let display = path.strip_prefix(root).unwrap_or(path).display().to_string();
    let mut result = FileResult {
        path: display,
        diagnostics: Vec::new(),
        fixes_applied: 0,
        error: None,
    };

    if !path.exists() {
        result.error = Some("no such file or directory".to_string());
        return result;
    }

    let Some(language) = SourceLanguage::from_path(path) else {
        result.error = Some("unsupported file extension".to_string());
        return result;
    };

    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            result.error = Some(format!("failed to read file: {e}"));
            return result;
        }
    };

    if !fix {
        match lint_source(&content, language, linter) {
            Ok(reports) => result.diagnostics = to_diagnostics(&content, &reports),
            Err(e) => result.error = Some(e.to_string()),
        }
        return result;
    }

    match lint_and_fix(&content, language, linter) {
        Ok(fixed) => {
            if fixed.fixes_applied > 0 {
                if let Err(e) = fs::write(path, &fixed.output) {
                    result.error = Some(format!("failed to write fixes: {e}"));
                    return result;
                }
            }
            result.fixes_applied = fixed.fixes_applied;
            result.diagnostics = to_diagnostics(&fixed.output, &fixed.remaining);
        }
        Err(e) => result.error = Some(e.to_string()),
    }
    result
}

/// Files to lint: the given targets, or everything under the root when none
/// are given. Targets that do not exist are kept so they surface as errors.
pub fn collect_targets(config: &LinterConfig, targets: &[PathBuf]) -> Vec<PathBuf> {
    let skip = config::skip_dirs(&[]);
    if targets.is_empty() {
        walker::collect_source_files(&config.root_dir, &skip, config.tests_only)
    } else {
        walker::expand_targets(targets, &skip, config.tests_only)
    }
}

/// Lint every target in order. `on_file` sees each result as soon as it is
/// ready, along with how long the file took.
pub fn run(
    config: &LinterConfig,
    targets: &[PathBuf],
    fix: bool,
    mut on_file: impl FnMut(&FileResult, Duration),
) -> Vec<FileResult> {
    let linter = build_linter(&config.options);
    collect_targets(config, targets)
        .iter()
        .map(|file| {
            let start = Instant::now();
            let result = lint_file(file, &config.root_dir, &linter, fix);
            on_file(&result, start.elapsed());
            result
        })
        .collect()
}
