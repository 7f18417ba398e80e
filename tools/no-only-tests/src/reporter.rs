use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use serde::Serialize;

use crate::engine::RuleMeta;
use crate::FileResult;

pub fn print_header(meta: &RuleMeta) {
    println!(
        "{}",
        "\n=== Focused Test Check ===".if_supports_color(Stdout, |s| s.bold())
    );
    println!(
        "{}\n",
        format!("{}: {} ({})", meta.name, meta.description, meta.url)
            .if_supports_color(Stdout, |s| s.dimmed())
    );
}

/// Clean files print nothing; failing files list one diagnostic per line.
pub fn print_file_result(result: &FileResult) {
    if let Some(error) = &result.error {
        println!(
            "{} {}: {}",
            "\u{26a0}".if_supports_color(Stdout, |s| s.yellow()),
            result.path,
            error.if_supports_color(Stdout, |s| s.yellow()),
        );
    }

    if result.fixes_applied > 0 {
        println!(
            "{} {}: {}",
            "\u{2713}".if_supports_color(Stdout, |s| s.green()),
            result.path,
            format!("fixed {} focus modifier(s)", result.fixes_applied)
                .if_supports_color(Stdout, |s| s.green()),
        );
    }

    if result.diagnostics.is_empty() {
        return;
    }

    println!(
        "{} {}",
        "\u{2717}".if_supports_color(Stdout, |s| s.red()),
        result.path.if_supports_color(Stdout, |s| s.underline()),
    );
    for d in &result.diagnostics {
        println!(
            "  {:>4}:{:<4} {}  {}",
            d.line,
            d.column,
            d.message,
            d.rule.if_supports_color(Stdout, |s| s.dimmed()),
        );
    }
    println!();
}

/// Returns true when no diagnostics or file errors remain.
pub fn print_summary(results: &[FileResult]) -> bool {
    let total_violations: usize = results.iter().map(|r| r.diagnostics.len()).sum();
    let fixable: usize = results
        .iter()
        .flat_map(|r| r.diagnostics.iter())
        .filter(|d| d.fixable)
        .count();
    let fixed: usize = results.iter().map(|r| r.fixes_applied).sum();
    let errored = results.iter().filter(|r| r.error.is_some()).count();

    println!(
        "{}",
        "\n--- Summary ---".if_supports_color(Stdout, |s| s.bold())
    );

    if fixed > 0 {
        println!(
            "{}",
            format!("\nRemoved {} focus modifier(s).", fixed).if_supports_color(Stdout, |s| s.green()),
        );
    }

    if total_violations == 0 && errored == 0 {
        println!(
            "{}",
            format!("\nNo focused tests in {} file(s).\n", results.len())
                .if_supports_color(Stdout, |s| s.green()),
        );
        return true;
    }

    if total_violations > 0 {
        println!(
            "{}",
            format!(
                "\n{} focused test(s) found, {} fixable with --fix.",
                total_violations, fixable,
            )
            .if_supports_color(Stdout, |s| s.red()),
        );
    }
    if errored > 0 {
        println!(
            "{}",
            format!("\n{} file(s) could not be checked.", errored)
                .if_supports_color(Stdout, |s| s.yellow()),
        );
    }
    println!();
    false
}

#[derive(Serialize)]
struct JsonReport<'a> {
    rule: &'a RuleMeta,
    files: &'a [FileResult],
}

/// Write the rule metadata and every file result as one JSON object.
pub fn print_json(meta: &RuleMeta, results: &[FileResult]) -> serde_json::Result<()> {
    println!("{}", render_json(meta, results)?);
    Ok(())
}

pub fn render_json(meta: &RuleMeta, results: &[FileResult]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport {
        rule: meta,
        files: results,
    })
}
