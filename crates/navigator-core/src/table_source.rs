//! Reference document sources.
//!
//! Reference tables are published as documents; the planner only needs their
//! extracted text. Every failure to obtain that text is reported as
//! [`TableDocument::Unavailable`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use navigator_abstraction::{TableDocument, TableSource};

use crate::error::{CoreError, Result};

/// Reads reference tables from a directory.
///
/// For an identifier like `MAP Growth Grades 2-5 to Khan Academy.pdf` the
/// source first looks for an extracted-text sidecar
/// `MAP Growth Grades 2-5 to Khan Academy.txt`, then reads the identifier
/// itself: PDF documents have the text of every page extracted, any other
/// file is read as UTF-8 text.
#[derive(Debug, Clone)]
pub struct DirectoryTableSource {
    root: PathBuf,
}

impl DirectoryTableSource {
    /// Creates a source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory tables are read from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Candidate files for `identifier`, in lookup order.
    fn candidates(&self, identifier: &str) -> Vec<PathBuf> {
        let direct = self.root.join(identifier);
        let sidecar = direct.with_extension("txt");
        if sidecar == direct {
            vec![direct]
        } else {
            vec![sidecar, direct]
        }
    }
}

impl TableSource for DirectoryTableSource {
    fn load(&self, identifier: &str) -> TableDocument {
        for path in self.candidates(identifier) {
            match read_document(&path) {
                Ok(text) => {
                    debug!(path = %path.display(), "Loaded reference text");
                    return TableDocument::Available(text);
                }
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "Reference text not readable");
                }
            }
        }
        TableDocument::Unavailable
    }
}

fn is_pdf(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Reads the text of one document file.
fn read_document(path: &Path) -> Result<String> {
    if is_pdf(path) {
        let bytes = std::fs::read(path)?;
        extract_pdf_text(path, &bytes)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

/// Extracts the text of every page of a PDF, in page order.
fn extract_pdf_text(path: &Path, bytes: &[u8]) -> Result<String> {
    let extraction_error = |reason: String| CoreError::TableExtraction {
        path: path.to_path_buf(),
        reason,
    };

    let document = lopdf::Document::load_mem(bytes).map_err(|e| extraction_error(e.to_string()))?;
    let pages: Vec<u32> = document.get_pages().keys().copied().collect();
    if pages.is_empty() {
        return Err(extraction_error("document has no pages".to_string()));
    }

    let text = document.extract_text(&pages).map_err(|e| extraction_error(e.to_string()))?;
    debug!(path = %path.display(), pages = pages.len(), "Extracted PDF text");
    Ok(text)
}

/// Serves reference text from memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTableSource {
    tables: HashMap<String, String>,
}

impl InMemoryTableSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the text for `identifier`.
    #[must_use]
    pub fn with_table(mut self, identifier: impl Into<String>, text: impl Into<String>) -> Self {
        self.tables.insert(identifier.into(), text.into());
        self
    }
}

impl TableSource for InMemoryTableSource {
    fn load(&self, identifier: &str) -> TableDocument {
        self.tables
            .get(identifier)
            .map_or(TableDocument::Unavailable, |text| TableDocument::Available(text.clone()))
    }
}

/// A source with no tables at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableTableSource;

impl TableSource for UnavailableTableSource {
    fn load(&self, _identifier: &str) -> TableDocument {
        TableDocument::Unavailable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const TABLE_ID: &str = "MAP Growth Grades 2-5 to Khan Academy.pdf";

    #[test]
    fn test_directory_prefers_sidecar() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("MAP Growth Grades 2-5 to Khan Academy.txt"), "150-160 Sidecar").unwrap();
        fs::write(temp.path().join(TABLE_ID), "150-160 Direct").unwrap();

        let source = DirectoryTableSource::new(temp.path());
        assert_eq!(source.load(TABLE_ID), TableDocument::Available("150-160 Sidecar".to_string()));
    }

    /// Writes a one-page PDF with one text object per line.
    fn write_pdf(path: &Path, lines: &[&str]) {
        use lopdf::content::{Content, Operation};
        use lopdf::{Document, Object, Stream, dictionary};

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut operations = Vec::new();
        for (i, line) in lines.iter().enumerate() {
            let y = 800 - 20 * i64::try_from(i).unwrap();
            operations.extend([
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![50.into(), y.into()]),
                Operation::new("Tj", vec![Object::string_literal(*line)]),
                Operation::new("ET", vec![]),
            ]);
        }
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.save(path).unwrap();
    }

    #[test]
    fn test_directory_extracts_pdf_text() {
        let temp = TempDir::new().unwrap();
        write_pdf(
            &temp.path().join(TABLE_ID),
            &["MAP Growth Grades 2-5", "150-160 Place value", "161-170 Add within 1000"],
        );

        let source = DirectoryTableSource::new(temp.path());
        let document = source.load(TABLE_ID);
        let text = document.text().unwrap();
        assert!(text.contains("150-160 Place value"));
        assert!(text.contains("161-170 Add within 1000"));

        let table = crate::range_table::RangeTable::parse(text);
        let labels: Vec<&str> = table.matching(165).map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Add within 1000"]);
    }

    #[test]
    fn test_directory_sidecar_wins_over_pdf() {
        let temp = TempDir::new().unwrap();
        write_pdf(&temp.path().join(TABLE_ID), &["150-160 From PDF"]);
        fs::write(temp.path().join("MAP Growth Grades 2-5 to Khan Academy.txt"), "150-160 Sidecar").unwrap();

        let source = DirectoryTableSource::new(temp.path());
        assert_eq!(source.load(TABLE_ID), TableDocument::Available("150-160 Sidecar".to_string()));
    }

    #[test]
    fn test_directory_plain_text_pdf_is_unavailable() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(TABLE_ID), "150-160 Not a real PDF").unwrap();

        let source = DirectoryTableSource::new(temp.path());
        assert_eq!(source.load(TABLE_ID), TableDocument::Unavailable);
    }

    #[test]
    fn test_extraction_error_names_the_file() {
        let path = PathBuf::from("broken.pdf");
        let err = extract_pdf_text(&path, b"%PDF-1.5 truncated").unwrap_err();
        assert!(matches!(err, CoreError::TableExtraction { ref path, .. } if path == Path::new("broken.pdf")));
        assert!(err.to_string().starts_with("Failed to extract text from broken.pdf: "));
    }

    #[test]
    fn test_directory_missing_file_is_unavailable() {
        let temp = TempDir::new().unwrap();
        let source = DirectoryTableSource::new(temp.path());
        assert_eq!(source.load(TABLE_ID), TableDocument::Unavailable);
    }

    #[test]
    fn test_directory_binary_file_is_unavailable() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(TABLE_ID), [0x25, 0x50, 0x44, 0x46, 0xff, 0xfe, 0x00]).unwrap();

        let source = DirectoryTableSource::new(temp.path());
        assert_eq!(source.load(TABLE_ID), TableDocument::Unavailable);
    }

    #[test]
    fn test_directory_txt_identifier() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("table.txt"), "1-2 One").unwrap();

        let source = DirectoryTableSource::new(temp.path());
        assert_eq!(source.candidates("table.txt").len(), 1);
        assert!(source.load("table.txt").is_available());
    }

    #[test]
    fn test_in_memory_source() {
        let source = InMemoryTableSource::new().with_table("a.pdf", "1-5 Alpha");
        assert_eq!(source.load("a.pdf").text(), Some("1-5 Alpha"));
        assert_eq!(source.load("b.pdf"), TableDocument::Unavailable);
    }

    #[test]
    fn test_unavailable_source() {
        assert_eq!(UnavailableTableSource.load(TABLE_ID), TableDocument::Unavailable);
    }
}
