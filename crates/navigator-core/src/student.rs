//! Student assessment data.
//!
//! [`StudentRecord`] is the validated value the matcher and renderer consume.
//! [`StudentEntry`] is the shape of one record in a data file, where every
//! field is optional and malformed values fall back to their defaults.

use serde::{Deserialize, Deserializer, Serialize};

use crate::standard::StandardChoice;

/// Name used when a data file omits it.
pub const DEFAULT_STUDENT_NAME: &str = "Unnamed";

/// Data extracted from a MAP Growth report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Student name.
    pub name: String,
    /// Free-form grade; only its first token selects a reference table.
    pub grade: String,
    /// Overall RIT score.
    pub score: u32,
    /// Goal areas described by the educator.
    pub goal_areas: String,
    /// Instructional areas described by the educator.
    pub instructional_areas: String,
}

impl StudentRecord {
    /// Creates a record with empty goal and instructional areas.
    pub fn new(name: impl Into<String>, grade: impl Into<String>, score: u32) -> Self {
        Self {
            name: name.into(),
            grade: grade.into(),
            score,
            goal_areas: String::new(),
            instructional_areas: String::new(),
        }
    }

    /// Sets the goal areas.
    #[must_use]
    pub fn with_goal_areas(mut self, goal_areas: impl Into<String>) -> Self {
        self.goal_areas = goal_areas.into();
        self
    }

    /// Sets the instructional areas.
    #[must_use]
    pub fn with_instructional_areas(mut self, instructional_areas: impl Into<String>) -> Self {
        self.instructional_areas = instructional_areas.into();
        self
    }

    /// First whitespace-delimited token of the grade, or `""`.
    pub fn grade_token(&self) -> &str {
        self.grade.split_whitespace().next().unwrap_or("")
    }
}

/// One student record as it appears in a data file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentEntry {
    /// Student name.
    #[serde(default = "default_name", deserialize_with = "name_or_default")]
    pub name: String,

    /// Grade level.
    #[serde(default, deserialize_with = "text_or_empty")]
    pub grade: String,

    /// Overall RIT score.
    #[serde(default, deserialize_with = "score_or_zero")]
    pub rit_score: u32,

    /// Goal areas.
    #[serde(default, deserialize_with = "text_or_empty")]
    pub goal_areas: String,

    /// Instructional areas.
    #[serde(default, deserialize_with = "text_or_empty")]
    pub instructional_areas: String,

    /// Standard alignment.
    #[serde(default)]
    pub standard: StandardChoice,
}

impl Default for StudentEntry {
    fn default() -> Self {
        Self {
            name: default_name(),
            grade: String::new(),
            rit_score: 0,
            goal_areas: String::new(),
            instructional_areas: String::new(),
            standard: StandardChoice::default(),
        }
    }
}

impl StudentEntry {
    /// Builds the entry for a record and a standard.
    pub fn from_record(record: &StudentRecord, standard: StandardChoice) -> Self {
        Self {
            name: record.name.clone(),
            grade: record.grade.clone(),
            rit_score: record.score,
            goal_areas: record.goal_areas.clone(),
            instructional_areas: record.instructional_areas.clone(),
            standard,
        }
    }

    /// Returns the student record described by this entry.
    pub fn to_record(&self) -> StudentRecord {
        StudentRecord {
            name: self.name.clone(),
            grade: self.grade.clone(),
            score: self.rit_score,
            goal_areas: self.goal_areas.clone(),
            instructional_areas: self.instructional_areas.clone(),
        }
    }
}

fn default_name() -> String {
    DEFAULT_STUDENT_NAME.to_string()
}

/// Loosely typed JSON scalar.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

impl RawScalar {
    fn into_text(self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text),
            Self::Unsigned(n) => Some(n.to_string()),
            Self::Signed(n) => Some(n.to_string()),
            Self::Float(f) => Some(f.to_string()),
            Self::Other(_) => None,
        }
    }

    fn into_score(self) -> u32 {
        match self {
            Self::Unsigned(n) => u32::try_from(n).unwrap_or(u32::MAX),
            Self::Signed(n) => u32::try_from(n.max(0)).unwrap_or(u32::MAX),
            Self::Float(f) if f.is_finite() && f >= 0.0 => f.trunc().min(f64::from(u32::MAX)) as u32,
            Self::Text(text) => text.trim().parse().unwrap_or(0),
            Self::Float(_) | Self::Other(_) => 0,
        }
    }
}

fn text_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(RawScalar::deserialize(deserializer)?.into_text().unwrap_or_default())
}

fn name_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(RawScalar::deserialize(deserializer)?.into_text().unwrap_or_else(default_name))
}

fn score_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Ok(RawScalar::deserialize(deserializer)?.into_score())
}
