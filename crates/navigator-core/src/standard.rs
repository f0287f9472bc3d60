//! Curriculum standard selection.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The curriculum standard a plan is aligned to.
///
/// The choice only affects display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StandardChoice {
    /// Common Core State Standards (United States).
    #[default]
    CommonCoreUs,
    /// Base Nacional Comum Curricular (Brazil).
    BnccBrazil,
}

/// Error returned when a standard token is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStandard(pub String);

impl fmt::Display for UnknownStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown standard '{}', expected 'CC' or 'BNCC'", self.0)
    }
}

impl std::error::Error for UnknownStandard {}

impl StandardChoice {
    /// Both choices, in menu order.
    pub const ALL: [Self; 2] = [Self::CommonCoreUs, Self::BnccBrazil];

    /// The string shown in the plan header.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::CommonCoreUs => "Common Core (US)",
            Self::BnccBrazil => "BNCC (Brazil)",
        }
    }

    /// The short token typed at the interactive prompt.
    pub const fn token(self) -> &'static str {
        match self {
            Self::CommonCoreUs => "CC",
            Self::BnccBrazil => "BNCC",
        }
    }

    /// Parses the interactive token (`CC` or `BNCC`, any case, surrounding
    /// whitespace ignored).
    pub fn from_token(token: &str) -> Result<Self, UnknownStandard> {
        let normalized = token.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|s| s.token() == normalized)
            .ok_or_else(|| UnknownStandard(token.trim().to_string()))
    }

    /// Resolves a value from a data file: display names and tokens are both
    /// accepted; anything else falls back to the default standard.
    pub fn from_document(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl fmt::Display for StandardChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for StandardChoice {
    type Err = UnknownStandard;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|choice| choice.display_name().eq_ignore_ascii_case(trimmed))
            .map_or_else(|| Self::from_token(trimmed), Ok)
    }
}

impl Serialize for StandardChoice {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.display_name())
    }
}

/// Anything that is not a string (null, numbers, objects) falls back to the default.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawStandard {
    Text(String),
    Other(serde::de::IgnoredAny),
}

impl<'de> Deserialize<'de> for StandardChoice {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawStandard::deserialize(deserializer)? {
            RawStandard::Text(value) => Self::from_document(&value),
            RawStandard::Other(_) => Self::default(),
        })
    }
}
