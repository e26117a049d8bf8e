//! Coverage reconciliation: every source method documented exactly once,
//! nothing documented that the source does not declare.

use crate::docs::SectionIndex;
use crate::report::Report;

pub fn check(expected: &[String], index: &SectionIndex, report: &mut Report) {
    // `expected` arrives sorted; BTreeMap keys iterate sorted.
    let missing: Vec<&str> = expected
        .iter()
        .filter(|method| !index.contains_key(*method))
        .map(String::as_str)
        .collect();
    let extra: Vec<&str> = index
        .keys()
        .filter(|heading| !expected.iter().any(|m| m == *heading))
        .map(String::as_str)
        .collect();

    if !missing.is_empty() {
        report.fail(format!(
            "Missing method headings in module docs ({}):\n- {}",
            missing.len(),
            missing.join("\n- ")
        ));
    }
    if !extra.is_empty() {
        report.fail(format!(
            "Extra method headings not found in SDK interfaces ({}):\n- {}",
            extra.len(),
            extra.join("\n- ")
        ));
    }

    for (heading, occurrences) in index {
        if occurrences.len() != 1 {
            report.fail(format!(
                "Method must be documented exactly once: {heading} (found {})",
                occurrences.len()
            ));
        }
    }

    if missing.is_empty() && extra.is_empty() {
        report.ok(format!(
            "Method coverage matches SDK interfaces ({} methods).",
            expected.len()
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docs::index_sections;

    fn expected(methods: &[&str]) -> Vec<String> {
        let mut expected: Vec<String> = methods.iter().map(|m| m.to_string()).collect();
        expected.sort();
        expected
    }

    #[test]
    fn full_match_records_no_failures() {
        let index = index_sections([("docs/a.md", "#### `sessions.login(token)`\nbody\n")]);
        let mut report = Report::new();
        check(&expected(&["sessions.login(token)"]), &index, &mut report);
        assert!(report.is_ok());
    }

    #[test]
    fn undocumented_method_is_missing() {
        let index = index_sections([("docs/a.md", "")]);
        let mut report = Report::new();
        check(&expected(&["sessions.login(token)"]), &index, &mut report);
        assert_eq!(report.failures().len(), 1);
        assert!(report.failures()[0].contains("Missing method headings"));
        assert!(report.failures()[0].contains("sessions.login(token)"));
    }

    #[test]
    fn stale_heading_is_extra() {
        let index = index_sections([("docs/a.md", "#### `sessions.revoke(id)`\nbody\n")]);
        let mut report = Report::new();
        check(&expected(&[]), &index, &mut report);
        assert_eq!(report.failures().len(), 1);
        assert!(report.failures()[0].contains("Extra method headings"));
    }

    #[test]
    fn duplicate_across_files_is_counted() {
        let index = index_sections([
            ("docs/a.md", "#### `drive.list()`\nversion a\n"),
            ("docs/b.md", "#### `drive.list()`\nversion b\n"),
        ]);
        let mut report = Report::new();
        check(&expected(&["drive.list()"]), &index, &mut report);
        assert_eq!(report.failures().len(), 1);
        assert!(report.failures()[0]
            .contains("Method must be documented exactly once: drive.list() (found 2)"));
    }

    #[test]
    fn missing_and_extra_are_distinct_failures() {
        let index = index_sections([("docs/a.md", "#### `drive.rename(id, name)`\nbody\n")]);
        let mut report = Report::new();
        check(&expected(&["drive.list()"]), &index, &mut report);
        assert_eq!(report.failures().len(), 2);
    }
}
