//! Structural template validation of documented method sections.
//!
//! Runs only for methods with exactly one documentation occurrence; zero or
//! multiple occurrences are already reported by the coverage pass, and
//! re-flagging them here would double the noise.

use crate::checks::basename;
use crate::config::Plan;
use crate::docs::SectionIndex;
use crate::report::Report;
use regex::Regex;
use std::sync::LazyLock;

/// Fenced signature example block.
static RE_SIGNATURE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```ts(.*?)```").unwrap());

pub fn check(plan: &Plan, expected: &[String], index: &SectionIndex, report: &mut Report) {
    let mark = report.mark();

    for method in expected {
        let Some(occurrences) = index.get(method) else {
            continue;
        };
        if occurrences.len() != 1 {
            continue;
        }
        let occurrence = &occurrences[0];
        let file = basename(&occurrence.file);
        let body = &occurrence.body;

        for marker in &plan.required_method_sections {
            if !body.contains(marker) {
                report.fail(format!(
                    "Method `{method}` is missing subsection `{marker}` in {file}."
                ));
            }
        }

        let name = bare_method_name(method);
        match RE_SIGNATURE_BLOCK.captures(body) {
            None => {
                report.fail(format!(
                    "Method `{method}` is missing TypeScript signature block."
                ));
            }
            Some(caps) => {
                if !caps[1].contains(name) {
                    report.fail(format!(
                        "Method `{method}` signature block does not include method name `{name}`."
                    ));
                }
            }
        }

        if !body.contains(plan.request_table_header) {
            report.fail(format!(
                "Method `{method}` is missing required request fields table header."
            ));
        }
        if !body.contains(plan.response_table_header) {
            report.fail(format!(
                "Method `{method}` is missing required response fields table header."
            ));
        }
    }

    report.ok_if_clean_since(mark, "Method template checks passed.");
}

/// Last identifier segment of a heading: `sessions.login(token)` → `login`.
fn bare_method_name(method: &str) -> &str {
    let call = method.split('(').next().unwrap_or(method);
    call.rsplit('.').next().unwrap_or(call)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docs::index_sections;

    fn conformant_section(heading: &str, name: &str) -> String {
        format!(
            "#### `{heading}`\n\
             \n\
             #### What this method does\nProse.\n\
             #### When to call it\nProse.\n\
             #### Signature\n```ts\n{name}(args): Promise<void>\n```\n\
             #### Request fields\n\
             | Field | Type | Required | Default | Format/Constraints | Meaning |\n\
             | - | - | - | - | - | - |\n\
             #### Response fields\n\
             | Field | Type | Required/Conditional | Format/Constraints | Meaning |\n\
             | - | - | - | - | - |\n\
             #### Errors and handling\nProse.\n\
             #### Minimal example\nProse.\n"
        )
    }

    fn run(page: &str, expected: &[&str]) -> Report {
        let plan = Plan::react_native_sdk();
        let index = index_sections([("docs/page.md", page)]);
        let expected: Vec<String> = expected.iter().map(|m| m.to_string()).collect();
        let mut report = Report::new();
        check(&plan, &expected, &index, &mut report);
        report
    }

    #[test]
    fn conformant_section_passes() {
        let page = conformant_section("sessions.login(token, options?)", "login");
        let report = run(&page, &["sessions.login(token, options?)"]);
        assert!(report.is_ok(), "{:?}", report.failures());
    }

    #[test]
    fn each_removed_subsection_is_one_failure() {
        let page = conformant_section("sessions.login(token)", "login")
            .replace("#### When to call it\n", "");
        let report = run(&page, &["sessions.login(token)"]);
        assert_eq!(report.failures().len(), 1);
        assert!(report.failures()[0].contains("`sessions.login(token)`"));
        assert!(report.failures()[0].contains("`#### When to call it`"));
        assert!(report.failures()[0].contains("page.md"));
    }

    #[test]
    fn renamed_request_table_column_is_exactly_one_failure() {
        let page =
            conformant_section("drive.list()", "list").replace("| Default |", "| Defaults |");
        let report = run(&page, &["drive.list()"]);
        assert_eq!(report.failures().len(), 1);
        assert!(report.failures()[0].contains("request fields table header"));
    }

    #[test]
    fn signature_block_must_mention_method_name() {
        let page = conformant_section("drive.list()", "enumerate");
        let report = run(&page, &["drive.list()"]);
        assert_eq!(report.failures().len(), 1);
        assert!(report.failures()[0].contains("does not include method name `list`"));
    }

    #[test]
    fn missing_signature_block_is_reported() {
        let page = conformant_section("drive.list()", "list")
            .replace("```ts\nlist(args): Promise<void>\n```\n", "");
        let report = run(&page, &["drive.list()"]);
        assert_eq!(report.failures().len(), 1);
        assert!(report.failures()[0].contains("missing TypeScript signature block"));
    }

    #[test]
    fn duplicated_method_is_skipped_here() {
        let page = conformant_section("drive.list()", "list");
        let plan = Plan::react_native_sdk();
        let index = index_sections([("docs/a.md", page.as_str()), ("docs/b.md", page.as_str())]);
        let mut report = Report::new();
        check(&plan, &["drive.list()".to_string()], &index, &mut report);
        // The duplicate itself belongs to the coverage pass.
        assert!(report.is_ok());
    }

    #[test]
    fn bare_name_strips_prefix_and_params() {
        assert_eq!(bare_method_name("sessions.login(token, options?)"), "login");
        assert_eq!(
            bare_method_name("photoBackupUploadManager.backupAsset(asset)"),
            "backupAsset"
        );
    }
}
