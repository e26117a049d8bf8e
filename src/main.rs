//! doccheck — verify that SDK reference docs match the SDK method surface.
//!
//! One synchronous pass: read the SDK interface definitions and the markdown
//! pages, reconcile the two method sets, validate the per-method template
//! and the page-level rules, and exit non-zero if anything failed. Every
//! check runs regardless of earlier failures so a single run surfaces every
//! issue at once.

mod checks;
mod config;
mod docs;
mod report;
mod source;

use clap::Parser;
use config::Plan;
use report::Report;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "doccheck",
    about = "Verify SDK reference docs against the SDK interface definitions"
)]
struct Cli {
    /// Documentation repository root
    #[arg(long, default_value = ".")]
    docs_root: PathBuf,

    /// SDK repository root. Falls back to $SDK_REPO_PATH, then to
    /// ../mtn-drive-sdk next to the docs root.
    #[arg(long)]
    sdk_root: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let sdk_root = resolve_sdk_root(&cli);
    let plan = Plan::react_native_sdk();

    let mut report = Report::new();
    run(&plan, &cli.docs_root, &sdk_root, &mut report);

    if report.is_ok() {
        report.ok("RN docs conformance checks passed.");
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn resolve_sdk_root(cli: &Cli) -> PathBuf {
    cli.sdk_root
        .clone()
        .or_else(|| std::env::var_os("SDK_REPO_PATH").map(PathBuf::from))
        .unwrap_or_else(|| cli.docs_root.join("../mtn-drive-sdk"))
}

fn run(plan: &Plan, docs_root: &Path, sdk_root: &Path, report: &mut Report) {
    checks::pages::check_required_files(plan, docs_root, report);
    checks::pages::check_prerequisites(plan, docs_root, report);

    let expected = source::expected_signatures(plan, sdk_root, report);

    // Missing method pages were reported by the pre-check; they simply
    // contribute no sections here.
    let pages: Vec<(String, String)> = plan
        .method_doc_files
        .iter()
        .filter_map(|file| {
            fs::read_to_string(docs_root.join(file))
                .ok()
                .map(|content| (file.to_string(), content))
        })
        .collect();
    let index = docs::index_sections(pages.iter().map(|(file, content)| (file.as_str(), content.as_str())));

    checks::coverage::check(&expected, &index, report);
    checks::structure::check(plan, &expected, &index, report);
    checks::pages::check_quickstart(plan, docs_root, report);
    checks::pages::check_error_classes(plan, docs_root, report);
    checks::pages::check_hub_links(plan, docs_root, report);
    checks::pages::check_banned_language(plan, docs_root, report);
}
