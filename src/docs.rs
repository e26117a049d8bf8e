//! Markdown method-section extraction.
//!
//! The checker does not need a markdown parser: method reference pages key
//! every section off a level-3/4 heading whose entire text is one inline
//! code span shaped like `prefix.method(params)`. A heading-shape matcher
//! plus body slicing between consecutive qualifying headings is the whole
//! grammar.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Level-3/4 heading whose entire text is a single inline code span.
static RE_CODE_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#{3,4}[ \t]+`([^`\n]+)`[ \t]*$").unwrap());

/// Method-call shape: `prefix.method(anything)`, letters/digits only for
/// both identifiers.
static RE_METHOD_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9]*\.[A-Za-z0-9]+\([^)]*\)$").unwrap());

static RE_WS_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Trim and collapse internal whitespace runs to single spaces. This is the
/// join key normalization between source signatures and doc headings, and
/// it is idempotent.
pub fn normalize_heading(value: &str) -> String {
    RE_WS_RUN.replace_all(value.trim(), " ").into_owned()
}

/// One method section found in a page.
#[derive(Debug)]
pub struct MethodSection {
    /// Normalized heading text, e.g. `sessions.login(token, options?)`.
    pub heading: String,
    /// Everything between the heading line and the next qualifying heading
    /// (or end of file).
    pub body: String,
}

/// One documented occurrence of a method heading.
#[derive(Debug)]
pub struct Occurrence {
    /// Docs-root-relative path of the page the section came from.
    pub file: String,
    pub body: String,
}

/// heading → every (file, body) occurrence, ordered by heading.
pub type SectionIndex = BTreeMap<String, Vec<Occurrence>>;

/// Extract every method section from one page, in document order.
pub fn parse_method_sections(content: &str) -> Vec<MethodSection> {
    // First pass: qualifying headings with the byte range of their line.
    let matches: Vec<(String, usize, usize)> = RE_CODE_HEADING
        .captures_iter(content)
        .filter_map(|caps| {
            let heading = normalize_heading(&caps[1]);
            if !RE_METHOD_SHAPE.is_match(&heading) {
                return None;
            }
            let whole = caps.get(0).unwrap();
            Some((heading, whole.start(), whole.end()))
        })
        .collect();

    // Second pass: slice bodies between consecutive qualifying headings.
    matches
        .iter()
        .enumerate()
        .map(|(i, (heading, _, end))| {
            let body_end = matches.get(i + 1).map_or(content.len(), |next| next.1);
            MethodSection {
                heading: heading.clone(),
                body: content[*end..body_end].to_string(),
            }
        })
        .collect()
}

/// Merge sections from several pages into one occurrence table so that a
/// heading documented in two files shows up with two occurrences.
pub fn index_sections<'a>(pages: impl IntoIterator<Item = (&'a str, &'a str)>) -> SectionIndex {
    let mut index = SectionIndex::new();
    for (file, content) in pages {
        for section in parse_method_sections(content) {
            index.entry(section.heading).or_default().push(Occurrence {
                file: file.to_string(),
                body: section.body,
            });
        }
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_collapses_and_is_idempotent() {
        let once = normalize_heading("  sessions.login(token,   options?)  ");
        assert_eq!(once, "sessions.login(token, options?)");
        assert_eq!(normalize_heading(&once), once);
    }

    #[test]
    fn finds_h3_and_h4_method_headings() {
        let content = "### `drive.list(folderId?)`\nbody a\n#### `drive.move(id, target)`\nbody b\n";
        let sections = parse_method_sections(content);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].heading, "drive.list(folderId?)");
        assert_eq!(sections[0].body.trim(), "body a");
        assert_eq!(sections[1].body.trim(), "body b");
    }

    #[test]
    fn non_method_headings_are_ignored() {
        let content = "\
## Title\n\
### `not a method`\n\
### Plain heading\n\
#### `storage.usage()`\n\
tail\n";
        let sections = parse_method_sections(content);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].heading, "storage.usage()");
        assert_eq!(sections[0].body.trim(), "tail");
    }

    #[test]
    fn last_section_runs_to_end_of_file() {
        let content = "#### `bin.purge()`\nline one\nline two\n";
        let sections = parse_method_sections(content);
        assert_eq!(sections[0].body, "\nline one\nline two\n");
    }

    #[test]
    fn heading_with_extra_whitespace_normalizes() {
        let content = "#### `sessions.login(token,    options?)`\nx\n";
        let sections = parse_method_sections(content);
        assert_eq!(sections[0].heading, "sessions.login(token, options?)");
    }

    #[test]
    fn duplicate_headings_across_files_share_an_entry() {
        let a = "#### `sessions.login(token)`\nfrom a\n";
        let b = "#### `sessions.login(token)`\nfrom b\n";
        let index = index_sections([("docs/a.md", a), ("docs/b.md", b)]);
        let occurrences = &index["sessions.login(token)"];
        assert_eq!(occurrences.len(), 2);
        assert_eq!(occurrences[0].file, "docs/a.md");
        assert_eq!(occurrences[1].file, "docs/b.md");
    }

    #[test]
    fn inline_code_must_fill_the_whole_heading() {
        let content = "#### see `drive.list()` for details\n";
        assert!(parse_method_sections(content).is_empty());
    }
}
