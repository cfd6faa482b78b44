//! Filter derivation: ledger records to runner-selection parameters.
//!
//! The downstream matcher treats the title expression as a logical OR of
//! loose string matches, with `"; "` (semicolon + space) as the separator.
//! Only the literal `;` is escaped in titles; matching stays intentionally
//! substring-oriented, so a title that is a substring of an unrelated title
//! can over-select. That imprecision is accepted — the retry re-runs a
//! superset of the failed tests, never a subset.

use std::collections::HashSet;

use cyretry_core::FailureRecord;

/// Separator the downstream matcher interprets as OR.
const TITLE_SEPARATOR: &str = "; ";

/// Selection parameters derived from a non-empty ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// OR-joined, escaped title expression for the runner's grep channel.
    pub title_expression: String,

    /// Distinct spec files, in order of first appearance in the ledger.
    pub specs: Vec<String>,

    /// Number of failure records the selection was derived from.
    pub failure_count: usize,
}

impl Selection {
    /// Derive the selection filter from ledger records.
    pub fn derive(records: &[FailureRecord]) -> Self {
        Self {
            title_expression: title_expression(records),
            specs: distinct_specs(records),
            failure_count: records.len(),
        }
    }

    /// The comma-joined spec list, as passed to the runner's
    /// restrict-to-files argument.
    pub fn spec_arg(&self) -> String {
        self.specs.join(",")
    }
}

/// Escape the separator character inside a single title.
fn escape_title(title: &str) -> String {
    title.replace(';', "\\;")
}

/// Join all record titles into the OR expression.
fn title_expression(records: &[FailureRecord]) -> String {
    records
        .iter()
        .map(|r| escape_title(&r.title))
        .collect::<Vec<_>>()
        .join(TITLE_SEPARATOR)
}

/// Distinct spec paths, preserving first-appearance order.
fn distinct_specs(records: &[FailureRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|r| seen.insert(r.spec.as_str()))
        .map(|r| r.spec.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn record(title: &str, spec: &str) -> FailureRecord {
        FailureRecord {
            title: title.to_string(),
            full_title: vec![title.to_string()],
            spec: spec.to_string(),
        }
    }

    /// Reproduce the downstream matcher's split: `"; "` separates terms,
    /// except where the semicolon is escaped.
    fn split_expression(expression: &str) -> Vec<String> {
        let mut terms = Vec::new();
        let mut current = String::new();
        let mut chars = expression.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '\\' && chars.peek() == Some(&';') {
                chars.next();
                current.push(';');
            } else if c == ';' && chars.peek() == Some(&' ') {
                chars.next();
                terms.push(std::mem::take(&mut current));
            } else {
                current.push(c);
            }
        }
        terms.push(current);
        terms
    }

    #[test]
    fn test_single_title_passes_through() {
        let selection = Selection::derive(&[record("Suite Test1", "x.cy.js")]);
        assert_eq!(selection.title_expression, "Suite Test1");
        assert_eq!(selection.failure_count, 1);
    }

    #[test]
    fn test_titles_join_with_semicolon_space() {
        let selection = Selection::derive(&[
            record("Suite Test1", "x.cy.js"),
            record("Suite Test2", "y.cy.js"),
        ]);
        assert_eq!(selection.title_expression, "Suite Test1; Suite Test2");
    }

    #[test]
    fn test_embedded_separator_is_escaped() {
        let selection = Selection::derive(&[
            record("A", "a.cy.js"),
            record("B;C", "b.cy.js"),
            record("D", "d.cy.js"),
        ]);
        assert_eq!(selection.title_expression, "A; B\\;C; D");

        // Round trip through the downstream matcher's split: each original
        // title comes back intact, nothing else appears.
        let terms = split_expression(&selection.title_expression);
        assert_eq!(terms, vec!["A", "B;C", "D"]);
    }

    #[test]
    fn test_spec_set_deduplicates_in_first_appearance_order() {
        let selection = Selection::derive(&[
            record("Suite one", "a.spec.js"),
            record("Suite two", "b.spec.js"),
            record("Suite three", "a.spec.js"),
        ]);
        assert_eq!(selection.specs, vec!["a.spec.js", "b.spec.js"]);
        assert_eq!(selection.spec_arg(), "a.spec.js,b.spec.js");
        assert_eq!(selection.failure_count, 3);
    }

    #[test]
    fn test_duplicate_titles_still_count_separately() {
        let selection = Selection::derive(&[
            record("Suite same", "a.cy.js"),
            record("Suite same", "b.cy.js"),
        ]);
        assert_eq!(selection.failure_count, 2);
        assert_eq!(selection.title_expression, "Suite same; Suite same");
        assert_eq!(selection.specs.len(), 2);
    }

    proptest! {
        /// Any set of backslash-free titles survives the escape/join/split
        /// round trip. Backslashes are excluded because only `;` is escaped;
        /// a title ending in `\` is ambiguous to the downstream matcher.
        #[test]
        fn prop_expression_round_trips(titles in proptest::collection::vec("[ -\\[\\]-~]{1,24}", 1..8)) {
            let records: Vec<FailureRecord> = titles
                .iter()
                .map(|t| record(t, "spec.cy.js"))
                .collect();
            let expression = Selection::derive(&records).title_expression;
            prop_assert_eq!(split_expression(&expression), titles);
        }
    }
}
