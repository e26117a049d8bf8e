//! Check categories. Each runs to completion and records into the shared
//! [`Report`](crate::report::Report); no check aborts the run.

pub mod coverage;
pub mod pages;
pub mod structure;

use std::path::Path;

/// File name shown in diagnostics, mirroring how pages are referred to in
/// review threads.
pub fn basename(file: &str) -> &str {
    Path::new(file)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basename_strips_directories() {
        assert_eq!(basename("docs/rn-methods-drive.md"), "rn-methods-drive.md");
        assert_eq!(basename("plain.md"), "plain.md");
    }
}
