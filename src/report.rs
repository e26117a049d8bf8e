//! Run outcome accumulator.
//!
//! Every check records into a single `Report` threaded through the run by
//! `&mut`. Checks never abort: all categories execute and the accumulated
//! failure count decides the process exit status at the end.

/// Collects one line per violation and one line per passed check category.
/// A single recorded failure makes the whole run unsuccessful.
#[derive(Debug, Default)]
pub struct Report {
    failures: Vec<String>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure. Printed immediately to stderr.
    pub fn fail(&mut self, message: impl Into<String>) {
        let message = message.into();
        eprintln!("✗ {message}");
        self.failures.push(message);
    }

    /// Print a success line to stdout.
    pub fn ok(&mut self, message: impl AsRef<str>) {
        println!("✓ {}", message.as_ref());
    }

    /// Failure count so far. Checks take this as a mark before running a
    /// category, then report category success via [`ok_if_clean_since`].
    ///
    /// [`ok_if_clean_since`]: Report::ok_if_clean_since
    pub fn mark(&self) -> usize {
        self.failures.len()
    }

    /// Print the category success line only if nothing failed since `mark`.
    pub fn ok_if_clean_since(&mut self, mark: usize, message: &str) {
        if self.failures.len() == mark {
            self.ok(message);
        }
    }

    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }

    /// All failure messages recorded so far, in order.
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_is_ok() {
        assert!(Report::new().is_ok());
    }

    #[test]
    fn failure_taints_run() {
        let mut report = Report::new();
        report.ok("fine");
        report.fail("broken");
        assert!(!report.is_ok());
        assert_eq!(report.failures(), ["broken"]);
    }

    #[test]
    fn category_success_suppressed_after_failure() {
        let mut report = Report::new();
        let mark = report.mark();
        report.fail("broken");
        report.ok_if_clean_since(mark, "category passed");
        // Only observable through the failure list; the ok line is print-only,
        // so assert the mark moved.
        assert_eq!(report.mark(), 1);
    }
}
