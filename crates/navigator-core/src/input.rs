//! Student data files.
//!
//! A data file holds either one student object or an array of them.

use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

use crate::error::{CoreError, Result};
use crate::student::StudentEntry;

/// Default data file name, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "student_data.json";

/// Parses a student document.
///
/// # Errors
///
/// Returns [`CoreError::InvalidStudentData`] if `text` is not valid JSON or
/// is neither an object nor an array of objects.
pub fn parse_entries(text: &str) -> Result<Vec<StudentEntry>> {
    // Parse to a value first so malformed JSON reports a precise location.
    let value: Value = serde_json::from_str(text)?;

    match value {
        Value::Array(items) => items.into_iter().map(parse_entry).collect(),
        object @ Value::Object(_) => Ok(vec![parse_entry(object)?]),
        _ => Err(shape_error()),
    }
}

/// Deserializes one record. Only JSON objects are records; serde would
/// otherwise accept a positional array for a struct.
fn parse_entry(value: Value) -> Result<StudentEntry> {
    if !value.is_object() {
        return Err(shape_error());
    }
    Ok(StudentEntry::deserialize(value)?)
}

fn shape_error() -> CoreError {
    CoreError::InvalidStudentData(serde::de::Error::custom(
        "expected a student object or an array of student objects",
    ))
}

/// Reads and parses the student document at `path`.
///
/// # Errors
///
/// * [`CoreError::DataFileNotFound`] if the file does not exist;
/// * [`CoreError::Io`] if it cannot be read;
/// * [`CoreError::InvalidStudentData`] if it cannot be parsed.
pub async fn load_entries(path: impl AsRef<Path>) -> Result<Vec<StudentEntry>> {
    let path = path.as_ref();

    let text = match tokio::fs::read_to_string(path).await {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(CoreError::DataFileNotFound(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };

    let entries = parse_entries(&text)?;
    debug!(path = %path.display(), records = entries.len(), "Loaded student data");
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::standard::StandardChoice;
    use tempfile::TempDir;

    #[test]
    fn test_parse_single_object() {
        let entries = parse_entries(r#"{"name": "Ana", "grade": "3", "rit_score": 25}"#).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Ana");
    }

    #[test]
    fn test_parse_array() {
        let entries = parse_entries(
            r#"[{"name": "Ana", "standard": "BNCC"}, {"name": "Bia", "rit_score": "180"}]"#,
        )
        .unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].standard, StandardChoice::BnccBrazil);
        assert_eq!(entries[1].rit_score, 180);
    }

    #[test]
    fn test_parse_empty_array() {
        assert!(parse_entries("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(matches!(parse_entries("{not json"), Err(CoreError::InvalidStudentData(_))));
    }

    #[test]
    fn test_parse_wrong_shape() {
        assert!(matches!(parse_entries("42"), Err(CoreError::InvalidStudentData(_))));
        assert!(matches!(parse_entries(r#""Ana""#), Err(CoreError::InvalidStudentData(_))));
    }

    #[test]
    fn test_parse_rejects_positional_records() {
        assert!(matches!(parse_entries(r#"["Ana", "3"]"#), Err(CoreError::InvalidStudentData(_))));
        assert!(matches!(
            parse_entries(r#"[["Ana", "3", 25]]"#),
            Err(CoreError::InvalidStudentData(_))
        ));
    }

    #[test]
    fn test_parse_rejects_mixed_array() {
        let err = parse_entries(r#"[{"name": "Ana"}, 7]"#).unwrap_err();
        assert!(err.to_string().contains("expected a student object"));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("student_data.json");

        let err = load_entries(&path).await.unwrap_err();
        assert!(matches!(err, CoreError::DataFileNotFound(ref p) if p == &path));
        assert_eq!(err.to_string(), format!("Data file {} not found.", path.display()));
    }

    #[tokio::test]
    async fn test_load_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("students.json");
        std::fs::write(&path, r#"{"name": "Ana", "grade": "3", "rit_score": 25}"#).unwrap();

        let entries = load_entries(&path).await.unwrap();
        assert_eq!(entries[0].rit_score, 25);
    }
}
