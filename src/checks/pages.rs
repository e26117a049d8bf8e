//! Whole-page validators: required files, prerequisites and subtitles,
//! quickstart flow, error-class coverage, hub links, banned terminology.

use crate::checks::basename;
use crate::config::Plan;
use crate::report::Report;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

/// Leading front-matter block: `---` fences at the very start of the page.
static RE_FRONT_MATTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\A---.*?---\n?").unwrap());

static RE_H2: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^##\s").unwrap());

/// Read a docs-root-relative page, or `None` when it is unreadable. Absence
/// is reported by the caller that owns the missing-file failure class, not
/// here.
fn read_page(docs_root: &Path, file: &str) -> Option<String> {
    fs::read_to_string(docs_root.join(file)).ok()
}

/// Missing-file pre-check for every page later checks depend on.
pub fn check_required_files(plan: &Plan, docs_root: &Path, report: &mut Report) {
    for file in plan.required_doc_files() {
        if !docs_root.join(file).is_file() {
            report.fail(format!("Missing docs file: {file}"));
        }
    }
}

/// Every configured page must carry `## Prerequisites` and a subtitle
/// sentence before its first level-2 heading.
pub fn check_prerequisites(plan: &Plan, docs_root: &Path, report: &mut Report) {
    let mark = report.mark();
    for file in plan.pages_requiring_prereqs() {
        let Some(content) = read_page(docs_root, file) else {
            report.fail(format!(
                "Missing required page for prerequisites check: {file}"
            ));
            continue;
        };
        if !content.contains("## Prerequisites") {
            report.fail(format!("Missing prerequisites section: {}", basename(file)));
        }
        if !has_subtitle(&content) {
            report.fail(format!(
                "Missing subtitle sentence before first H2: {}",
                basename(file)
            ));
        }
    }
    report.ok_if_clean_since(mark, "Prerequisites and subtitle checks passed.");
}

/// A page has a subtitle when, after stripping front matter, some non-empty
/// text precedes the first level-2 heading.
pub fn has_subtitle(content: &str) -> bool {
    let stripped = RE_FRONT_MATTER.replace(content, "");
    let stripped = stripped.trim();
    match RE_H2.find(stripped) {
        Some(m) if m.start() > 0 => !stripped[..m.start()].trim().is_empty(),
        _ => false,
    }
}

pub fn check_quickstart(plan: &Plan, docs_root: &Path, report: &mut Report) {
    let Some(content) = read_page(docs_root, plan.quickstart_file) else {
        return;
    };
    let mark = report.mark();
    for heading in &plan.required_quickstart_headings {
        if !content.contains(heading) {
            report.fail(format!("Quickstart is missing required heading: {heading}"));
        }
    }
    report.ok_if_clean_since(mark, "Quickstart numbered flow check passed.");
}

pub fn check_error_classes(plan: &Plan, docs_root: &Path, report: &mut Report) {
    let Some(content) = read_page(docs_root, plan.errors_file) else {
        return;
    };
    let mark = report.mark();
    for class in &plan.required_error_classes {
        if !content.contains(class) {
            report.fail(format!("Error playbook is missing SDK error class: {class}"));
        }
    }
    report.ok_if_clean_since(mark, "Error playbook class coverage check passed.");
}

pub fn check_hub_links(plan: &Plan, docs_root: &Path, report: &mut Report) {
    let Some(content) = read_page(docs_root, plan.hub_file) else {
        return;
    };
    let mark = report.mark();
    for link in &plan.required_hub_links {
        if !content.contains(link) {
            report.fail(format!("Methods hub is missing required module link: {link}"));
        }
    }
    report.ok_if_clean_since(mark, "Methods hub link check passed.");
}

/// One failure per (file, pattern) pair, however often the pattern occurs
/// in that file.
pub fn check_banned_language(plan: &Plan, docs_root: &Path, report: &mut Report) {
    let mark = report.mark();
    for file in plan.language_files() {
        // Absent pages are already reported by the prerequisites pass.
        let Some(content) = read_page(docs_root, file) else {
            continue;
        };
        for pattern in &plan.banned_patterns {
            if pattern.is_match(&content) {
                report.fail(format!(
                    "Banned language pattern `{}` found in {}.",
                    pattern.as_str(),
                    basename(file)
                ));
            }
        }
    }
    report.ok_if_clean_since(mark, "Language guardrail checks passed.");
}
