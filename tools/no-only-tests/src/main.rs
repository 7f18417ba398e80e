use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use no_only_tests::config::LinterConfig;
use no_only_tests::reporter;
use no_only_tests::rule::META;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Fail when test files contain focused tests such as `describe.only(...)`.
#[derive(Debug, Parser)]
#[command(name = "no-only-tests", version)]
struct Cli {
    /// Files or directories to lint. Defaults to the whole root directory.
    paths: Vec<PathBuf>,

    /// Repository root. Discovered from the nearest .git directory when omitted.
    #[arg(long)]
    root_dir: Option<PathBuf>,

    /// JSON options file with optional "block" and "focus" arrays.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Test function name to check (repeatable). Replaces the default list.
    #[arg(long = "block", value_name = "NAME")]
    block: Vec<String>,

    /// Focus modifier to disallow (repeatable). Replaces the default list.
    #[arg(long = "focus", value_name = "NAME")]
    focus: Vec<String>,

    /// Remove the focus modifiers in place.
    #[arg(long)]
    fix: bool,

    /// Only lint *.test.*, *.spec.* and __tests__/ files.
    #[arg(long)]
    tests_only: bool,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

fn main() {
    let cli = Cli::parse();

    let mut config = match &cli.root_dir {
        Some(dir) => LinterConfig::from_root(dir),
        None => match LinterConfig::discover() {
            Some(c) => c,
            None => match std::env::current_dir() {
                Ok(dir) => LinterConfig::from_root(&dir),
                Err(e) => {
                    eprintln!("Error: could not determine working directory: {e}");
                    process::exit(2);
                }
            },
        },
    };

    if let Err(e) = config.load_options_file(cli.config.as_deref()) {
        eprintln!("Error: {e}");
        process::exit(2);
    }
    if !cli.block.is_empty() {
        config.options.block = Some(cli.block.clone());
    }
    if !cli.focus.is_empty() {
        config.options.focus = Some(cli.focus.clone());
    }
    if let Err(e) = config.options.validate() {
        eprintln!("Error: {e}");
        process::exit(2);
    }
    config.tests_only = cli.tests_only;

    let debug_timing = std::env::var("NO_ONLY_TESTS_TIMING").is_ok();

    if cli.format == Format::Text {
        reporter::print_header(&META);
    }

    let results = no_only_tests::run(&config, &cli.paths, cli.fix, |result, elapsed| {
        if debug_timing {
            eprintln!("  [{:>6.0?}] {}", elapsed, result.path);
        }
        if cli.format == Format::Text {
            reporter::print_file_result(result);
        }
    });

    let all_passed = match cli.format {
        Format::Text => reporter::print_summary(&results),
        Format::Json => {
            if let Err(e) = reporter::print_json(&META, &results) {
                eprintln!("Error: failed to encode results: {e}");
                process::exit(2);
            }
            results.iter().all(|r| r.passed())
        }
    };

    process::exit(if all_passed { 0 } else { 1 });
}
