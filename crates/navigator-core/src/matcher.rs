//! Resource matching.
//!
//! Selects the reference table for a grade band and returns at most two
//! resource labels whose RIT ranges contain the student's score.

use std::sync::Arc;
use tracing::{debug, warn};

use navigator_abstraction::TableSource;

use crate::range_table::RangeTable;

/// Reference table for kindergarten and grade 1.
pub const TABLE_K_2: &str = "MAP Growth Grades K-2 to Khan Academy.pdf";

/// Reference table for grades 2 to 5.
pub const TABLE_2_5: &str = "MAP Growth Grades 2-5 to Khan Academy.pdf";

/// Reference table for grade 6 and up; also the fallback for unknown grades.
pub const TABLE_6_PLUS: &str = "MAP Growth Grades 6+ to Khan Academy.pdf";

/// At most this many resources are recommended.
pub const MAX_RESOURCES: usize = 2;

/// Resolves the table identifier for a free-form grade.
///
/// Only the first whitespace-delimited token is considered. Unknown and
/// empty grades resolve to [`TABLE_6_PLUS`].
pub fn table_for_grade(grade: &str) -> &'static str {
    match grade.split_whitespace().next().unwrap_or("") {
        "K" | "1" => TABLE_K_2,
        "2" | "3" | "4" | "5" => TABLE_2_5,
        _ => TABLE_6_PLUS,
    }
}

/// Label used in place of resources when a table cannot be loaded.
pub fn missing_table_label(identifier: &str) -> String {
    format!("[Resource list requires PDF: {}]", identifier)
}

/// Up to two resource labels, in first-match order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceSelection(Vec<String>);

impl ResourceSelection {
    /// Builds a selection, keeping only the first two labels.
    pub fn new(labels: impl IntoIterator<Item = String>) -> Self {
        Self(labels.into_iter().take(MAX_RESOURCES).collect())
    }

    /// An empty selection.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Label for the first goal, if any.
    pub fn first(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Label for the second goal, if any.
    pub fn second(&self) -> Option<&str> {
        self.0.get(1).map(String::as_str)
    }

    /// All labels.
    pub fn labels(&self) -> &[String] {
        &self.0
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no resource matched.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Matches scores against the reference tables of a [`TableSource`].
///
/// Tables are loaded on every call; nothing is cached between lookups.
#[derive(Clone)]
pub struct ResourceMatcher {
    source: Arc<dyn TableSource>,
}

impl ResourceMatcher {
    /// Creates a matcher over `source`.
    pub fn new(source: Arc<dyn TableSource>) -> Self {
        Self { source }
    }

    /// Recommends resources for a grade and score.
    ///
    /// * table unavailable: one placeholder label naming the table;
    /// * table loaded: labels of the first two records containing `score`;
    /// * no record matches: an empty selection.
    pub fn select(&self, grade: &str, score: u32) -> ResourceSelection {
        let identifier = table_for_grade(grade);

        let Some(table) = RangeTable::load(self.source.as_ref(), identifier) else {
            warn!(table = %identifier, "Reference table unavailable, using placeholder");
            return ResourceSelection(vec![missing_table_label(identifier)]);
        };

        let selection = ResourceSelection::new(table.matching(score).map(|r| r.label.clone()));

        debug!(
            table = %identifier,
            score,
            matched = selection.len(),
            "Resources selected"
        );

        selection
    }
}

impl std::fmt::Debug for ResourceMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceMatcher").field("source", &"<table source>").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table_source::{InMemoryTableSource, UnavailableTableSource};

    const OVERLAPPING: &str = "0-10 A\n5-15 B\n20-30 C\n";

    fn matcher_with(table_id: &str, text: &str) -> ResourceMatcher {
        ResourceMatcher::new(Arc::new(InMemoryTableSource::new().with_table(table_id, text)))
    }

    #[test]
    fn test_grade_resolution() {
        assert_eq!(table_for_grade("K"), TABLE_K_2);
        assert_eq!(table_for_grade("1"), TABLE_K_2);
        for grade in ["2", "3", "4", "5"] {
            assert_eq!(table_for_grade(grade), TABLE_2_5);
        }
        for grade in ["6", "7", "", "Grade 9", "k", "   "] {
            assert_eq!(table_for_grade(grade), TABLE_6_PLUS, "grade {:?}", grade);
        }
    }

    #[test]
    fn test_grade_resolution_uses_first_token() {
        assert_eq!(table_for_grade("3 (spring)"), TABLE_2_5);
        assert_eq!(table_for_grade(" K fall"), TABLE_K_2);
    }

    #[test]
    fn test_overlapping_ranges_capped_at_two() {
        let matcher = matcher_with(TABLE_2_5, OVERLAPPING);

        assert_eq!(matcher.select("3", 7).labels(), &["A".to_string(), "B".to_string()]);
        assert_eq!(matcher.select("3", 25).labels(), &["C".to_string()]);
        assert!(matcher.select("3", 100).is_empty());
    }

    #[test]
    fn test_three_overlapping_keeps_first_two() {
        let matcher = matcher_with(TABLE_6_PLUS, "200-250 First\n210-240 Second\n220-230 Third\n");

        let selection = matcher.select("8", 225);
        assert_eq!(selection.first(), Some("First"));
        assert_eq!(selection.second(), Some("Second"));
        assert_eq!(selection.len(), 2);
    }

    #[test]
    fn test_unavailable_table_placeholder() {
        let matcher = ResourceMatcher::new(Arc::new(UnavailableTableSource));

        let selection = matcher.select("3", 25);
        assert_eq!(
            selection.labels(),
            &["[Resource list requires PDF: MAP Growth Grades 2-5 to Khan Academy.pdf]".to_string()]
        );
    }

    #[test]
    fn test_empty_table_yields_empty_selection() {
        let matcher = matcher_with(TABLE_K_2, "This document has no ranges.");
        assert!(matcher.select("K", 150).is_empty());
    }

    #[test]
    fn test_other_grade_table_not_consulted() {
        let matcher = matcher_with(TABLE_K_2, OVERLAPPING);
        assert_eq!(matcher.select("4", 7).labels(), &[missing_table_label(TABLE_2_5)]);
    }

    #[test]
    fn test_selection_new_truncates() {
        let selection = ResourceSelection::new(vec!["x".to_string(), "y".to_string(), "z".to_string()]);
        assert_eq!(selection.len(), 2);
        assert!(ResourceSelection::empty().first().is_none());
    }
}
