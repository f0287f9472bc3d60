//! RIT range table parsing.
//!
//! Reference documents list resources as lines like `161-170 Add within 1000`.
//! This module extracts those `(low, high) -> label` records from extracted
//! document text.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use navigator_abstraction::{TableDocument, TableSource};

// An integer, a hyphen with optional surrounding blanks, an integer, then
// blanks and a label running to the end of the line. Blanks never include a
// line break, so a record cannot span two lines.
static RANGE_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+)[ \t]*-[ \t]*(\d+)[ \t]+([^\r\n]+)").expect("Range line regex should be valid")
});

/// One interval record from a reference table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeRecord {
    /// Lower bound, inclusive.
    pub low: u32,
    /// Upper bound, inclusive.
    pub high: u32,
    /// Resource label.
    pub label: String,
}

impl RangeRecord {
    /// Creates a record.
    pub fn new(low: u32, high: u32, label: impl Into<String>) -> Self {
        Self { low, high, label: label.into() }
    }

    /// Returns `true` if `score` lies within `low..=high`.
    pub fn contains(&self, score: u32) -> bool {
        self.low <= score && score <= self.high
    }
}

/// Interval records in the order they appear in the source text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeTable {
    records: Vec<RangeRecord>,
}

impl RangeTable {
    /// Builds a table from records, keeping their order.
    pub fn new(records: Vec<RangeRecord>) -> Self {
        Self { records }
    }

    /// Parses every range line in `text`.
    ///
    /// Lines that do not match are skipped. Records keep first-occurrence
    /// order and duplicates are kept. Bounds too large for a `u32` make the
    /// line count as malformed.
    pub fn parse(text: &str) -> Self {
        let records = RANGE_LINE_REGEX
            .captures_iter(text)
            .filter_map(|caps| {
                let low = caps[1].parse().ok()?;
                let high = caps[2].parse().ok()?;
                let label = caps[3].trim();
                if label.is_empty() {
                    return None;
                }
                Some(RangeRecord::new(low, high, label))
            })
            .collect();

        Self { records }
    }

    /// Loads and parses the table stored under `identifier`.
    ///
    /// Returns `None` when the document is unavailable. A document with no
    /// range lines yields an empty table.
    pub fn load(source: &dyn TableSource, identifier: &str) -> Option<Self> {
        match source.load(identifier) {
            TableDocument::Available(text) => {
                let table = Self::parse(&text);
                debug!(table = %identifier, records = table.len(), "Range table parsed");
                Some(table)
            }
            TableDocument::Unavailable => {
                debug!(table = %identifier, "Range table unavailable");
                None
            }
        }
    }

    /// Records in source order.
    pub fn records(&self) -> &[RangeRecord] {
        &self.records
    }

    /// Iterates over records whose interval contains `score`, in source order.
    pub fn matching(&self, score: u32) -> impl Iterator<Item = &RangeRecord> {
        self.records.iter().filter(move |r| r.contains(score))
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the table has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
