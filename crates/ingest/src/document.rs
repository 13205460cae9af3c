//! Document extraction: plain text from an uploaded PDF, text, or
//! markdown file.

use slidesmith_core::{Error, Result};
use std::path::Path;
use unicode_normalization::UnicodeNormalization;

/// The format of an uploaded source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Text,
    Markdown,
}

impl DocumentFormat {
    /// Detect format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "txt" | "text" => Some(Self::Text),
            "md" | "markdown" => Some(Self::Markdown),
            _ => None,
        }
    }

    /// Detect format from file magic bytes. Only PDF has a usable
    /// signature; plain text and markdown fall back to the extension.
    pub fn from_magic(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(b"%PDF-") {
            return Some(Self::Pdf);
        }
        None
    }
}

/// Extract plain text from in-memory document bytes.
pub fn extract_text(bytes: &[u8], format: DocumentFormat) -> Result<String> {
    let text = match format {
        DocumentFormat::Pdf => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| Error::Format(format!("failed to extract PDF text: {}", e)))?,
        DocumentFormat::Text | DocumentFormat::Markdown => {
            let raw = std::str::from_utf8(bytes)
                .map_err(|e| Error::Format(format!("document is not valid UTF-8: {}", e)))?;
            raw.nfc().collect::<String>()
        }
    };

    if text.trim().is_empty() {
        return Err(Error::Validation("document contained no text".to_string()));
    }
    Ok(text)
}

/// Read a file from disk, detect its format, and extract its text.
pub fn extract_file(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;

    let format = DocumentFormat::from_magic(&bytes)
        .or_else(|| {
            path.extension()
                .and_then(|e| e.to_str())
                .and_then(DocumentFormat::from_extension)
        })
        .ok_or_else(|| {
            Error::Validation(format!("unsupported document format: {}", path.display()))
        })?;

    log::debug!("extracting {} as {:?}", path.display(), format);
    extract_text(&bytes, format)
}
