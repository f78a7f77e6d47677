//! Document loading
//!
//! Turns a file into plain text, dispatching on the (case-insensitive) file
//! extension. PDF and DOCX support sit behind the `pdf` and `docx` cargo
//! features; without them those files fail with
//! [`LoaderError::MissingDependency`].

use crate::error::{ExtractorError, LoaderError};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Supported document kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentKind {
    /// `.txt`, `.md`, `.rtf`
    Text,
    /// `.pdf`
    Pdf,
    /// `.docx`
    Docx,
    /// Any other extension (lowercased, empty when absent)
    Other(String),
}

impl DocumentKind {
    /// Classify a file name by extension
    pub fn from_name(name: &str) -> Self {
        let extension = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "txt" | "md" | "rtf" => DocumentKind::Text,
            "pdf" => DocumentKind::Pdf,
            "docx" => DocumentKind::Docx,
            _ => DocumentKind::Other(extension),
        }
    }
}

/// Load a document from disk as text
pub fn load_text(path: impl AsRef<Path>) -> Result<String, LoaderError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(LoaderError::FileNotFound(path.display().to_string()));
    }

    let bytes = std::fs::read(path)
        .map_err(|e| LoaderError::Read(format!("{}: {}", path.display(), e)))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    debug!("Loading {} ({} bytes)", path.display(), bytes.len());
    load_bytes(&name, &bytes)
}

/// Load in-memory document content, using `name` to pick the format
pub fn load_bytes(name: &str, bytes: &[u8]) -> Result<String, LoaderError> {
    match DocumentKind::from_name(name) {
        DocumentKind::Text => Ok(decode_lossy(bytes)),
        DocumentKind::Pdf => read_pdf(bytes),
        DocumentKind::Docx => read_docx(bytes),
        DocumentKind::Other(extension) => String::from_utf8(bytes.to_vec()).map_err(|_| {
            LoaderError::UnsupportedFormat(if extension.is_empty() {
                name.to_string()
            } else {
                format!(".{}", extension)
            })
        }),
    }
}

/// Load a document on the blocking thread pool
pub async fn read_document(path: PathBuf) -> Result<String, ExtractorError> {
    let text = tokio::task::spawn_blocking(move || load_text(path))
        .await
        .map_err(|e| ExtractorError::Task(e.to_string()))??;
    Ok(text)
}

/// UTF-8 decode, dropping invalid sequences
fn decode_lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .chars()
        .filter(|c| *c != char::REPLACEMENT_CHARACTER)
        .collect()
}

#[cfg(feature = "pdf")]
fn read_pdf(bytes: &[u8]) -> Result<String, LoaderError> {
    // pdf-extract panics on some malformed inputs
    let extracted = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes))
        .map_err(|_| LoaderError::Read("PDF parser failed on malformed input".to_string()))?
        .map_err(|e| LoaderError::Read(format!("PDF extraction failed: {}", e)))?;

    Ok(extracted.split('\u{c}').collect::<Vec<_>>().join("\n"))
}

#[cfg(not(feature = "pdf"))]
fn read_pdf(_bytes: &[u8]) -> Result<String, LoaderError> {
    Err(LoaderError::MissingDependency(
        "PDF support is not enabled (build with the `pdf` feature)".to_string(),
    ))
}

#[cfg(feature = "docx")]
fn read_docx(bytes: &[u8]) -> Result<String, LoaderError> {
    use std::io::{Cursor, Read};

    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| LoaderError::Read(format!("Invalid DOCX archive: {}", e)))?;
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| LoaderError::Read(format!("DOCX has no document body: {}", e)))?
        .read_to_string(&mut xml)
        .map_err(|e| LoaderError::Read(format!("Failed to read DOCX body: {}", e)))?;

    Ok(docx::paragraphs(&xml).join("\n"))
}

#[cfg(not(feature = "docx"))]
fn read_docx(_bytes: &[u8]) -> Result<String, LoaderError> {
    Err(LoaderError::MissingDependency(
        "DOCX support is not enabled (build with the `docx` feature)".to_string(),
    ))
}

#[cfg(feature = "docx")]
mod docx {
    use once_cell::sync::Lazy;
    use regex::Regex;

    static PARAGRAPH: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?s)<w:p(?:\s[^>]*)?/>|<w:p(?:\s[^>]*)?>(.*?)</w:p>")
            .expect("valid paragraph regex")
    });

    static RUN: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?s)<w:t(?:\s[^>]*)?>(.*?)</w:t>|<w:tab\s*/>").expect("valid run regex")
    });

    /// Text of every `w:p` element in document order
    pub(super) fn paragraphs(xml: &str) -> Vec<String> {
        PARAGRAPH
            .captures_iter(xml)
            .map(|p| match p.get(1) {
                Some(body) => RUN
                    .captures_iter(body.as_str())
                    .map(|run| match run.get(1) {
                        Some(t) => unescape(t.as_str()),
                        None => "\t".to_string(),
                    })
                    .collect(),
                None => String::new(),
            })
            .collect()
    }

    fn unescape(s: &str) -> String {
        s.replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&apos;", "'")
            .replace("&amp;", "&")
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_paragraphs_and_runs() {
            let xml = r#"<w:body><w:p w:rsidR="1"><w:pPr><w:jc w:val="center"/></w:pPr><w:r><w:t>MASTER</w:t></w:r><w:r><w:t xml:space="preserve"> AGREEMENT</w:t></w:r></w:p><w:p/><w:p><w:r><w:t>A &amp; B</w:t><w:tab/><w:t>Ltd</w:t></w:r></w:p></w:body>"#;
            assert_eq!(paragraphs(xml), vec!["MASTER AGREEMENT", "", "A & B\tLtd"]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_kind_from_name() {
        assert_eq!(DocumentKind::from_name("contract.TXT"), DocumentKind::Text);
        assert_eq!(DocumentKind::from_name("notes.md"), DocumentKind::Text);
        assert_eq!(DocumentKind::from_name("a.Pdf"), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_name("a.docx"), DocumentKind::Docx);
        assert_eq!(
            DocumentKind::from_name("a.csv"),
            DocumentKind::Other("csv".to_string())
        );
        assert_eq!(DocumentKind::from_name("README"), DocumentKind::Other(String::new()));
    }

    #[test]
    fn test_text_drops_invalid_utf8() {
        let text = load_bytes("c.txt", b"Fee: \xff$100").unwrap();
        assert_eq!(text, "Fee: $100");
    }

    #[test]
    fn test_unknown_extension_decodes_utf8() {
        assert_eq!(load_bytes("c.contract", b"plain words").unwrap(), "plain words");
    }

    #[test]
    fn test_unknown_binary_is_unsupported() {
        let result = load_bytes("image.png", &[0x89, 0x50, 0x4e, 0x47, 0xff, 0xfe]);
        assert!(matches!(result, Err(LoaderError::UnsupportedFormat(ext)) if ext == ".png"));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_text(dir.path().join("absent.txt"));
        assert!(matches!(result, Err(LoaderError::FileNotFound(_))));
    }

    #[test]
    fn test_load_from_disk() {
        let mut file = tempfile::Builder::new().suffix(".md").tempfile().unwrap();
        write!(file, "# Services Agreement\nbetween A and B.").unwrap();
        let text = load_text(file.path()).unwrap();
        assert!(text.starts_with("# Services Agreement"));
    }

    #[cfg(feature = "docx")]
    #[test]
    fn test_garbage_docx_is_read_error() {
        let result = load_bytes("upload.docx", b"not a zip archive");
        assert!(matches!(result, Err(LoaderError::Read(_))));
    }

    #[cfg(not(feature = "pdf"))]
    #[test]
    fn test_pdf_without_feature() {
        let result = load_bytes("a.pdf", b"%PDF-1.4");
        assert!(matches!(result, Err(LoaderError::MissingDependency(_))));
    }

    #[tokio::test]
    async fn test_read_document_off_thread() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(file, "shall pay").unwrap();
        let text = read_document(file.path().to_path_buf()).await.unwrap();
        assert_eq!(text, "shall pay");
    }
}
