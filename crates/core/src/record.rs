//! The persisted ledger entry.
//!
//! A ledger is a JSON array of [`FailureRecord`]s, pretty-printed for human
//! inspection. Field names on the wire match the established convention of
//! the ledger file (`title`, `fullTitle`, `spec`), so a ledger written by
//! any conforming producer round-trips here.

use serde::{Deserialize, Serialize};

/// One failed test case: its identifying title, structured title path, and
/// the spec file it came from.
///
/// Title uniqueness is not enforced. Two specs may each contain a test with
/// the same flattened title; both records are preserved since they carry
/// different `spec` values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureRecord {
    /// Space-joined concatenation of the suite path and the test's own name,
    /// e.g. `"Parent Suite Child Suite Test Name"`. Used for matching.
    pub title: String,

    /// The same suite/name path as an ordered sequence, retained for
    /// consumers that need structured rather than flattened matching.
    #[serde(rename = "fullTitle")]
    pub full_title: Vec<String>,

    /// Path of the spec file containing the test, relative to the project
    /// root.
    pub spec: String,
}

impl FailureRecord {
    /// Build a record from a test's title path and its spec file.
    ///
    /// The flattened `title` is derived by space-joining `title_path`.
    pub fn new(title_path: &[String], spec: impl Into<String>) -> Self {
        Self {
            title: title_path.join(" "),
            full_title: title_path.to_vec(),
            spec: spec.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_title_is_space_joined_path() {
        let record = FailureRecord::new(
            &path(&["Parent Suite", "Child Suite", "Test Name"]),
            "cypress/e2e/parent.cy.js",
        );
        assert_eq!(record.title, "Parent Suite Child Suite Test Name");
        assert_eq!(record.full_title.len(), 3);
    }

    #[test]
    fn test_wire_field_names() {
        let record = FailureRecord::new(&path(&["Suite", "does a thing"]), "a.cy.js");
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("title").is_some());
        assert!(json.get("fullTitle").is_some());
        assert!(json.get("spec").is_some());
        assert!(json.get("full_title").is_none());
    }

    #[test]
    fn test_round_trips_through_json() {
        let record = FailureRecord::new(&path(&["Suite", "case"]), "b.cy.js");
        let text = serde_json::to_string_pretty(&record).unwrap();
        let back: FailureRecord = serde_json::from_str(&text).unwrap();
        assert_eq!(back, record);
    }
}
