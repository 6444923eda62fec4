//! Error types for the pdftext-ocr library.
//!
//! Three error types reflect three distinct failure scopes:
//!
//! * [`ExtractError`] — **Fatal**: the document cannot be opened at all
//!   (not a PDF, corrupt xref, wrong password) or the extractor could not be
//!   set up. Returned as `Err(ExtractError)` from the `extract*` functions.
//!
//! * [`PageError`] — **Non-fatal**: a single page could not be rendered or
//!   recognised. The page contributes empty text and the failure is logged;
//!   it never reaches the caller.
//!
//! * [`OcrError`] — what an [`crate::pipeline::ocr::OcrEngine`] reports. The
//!   resolver folds it into a [`PageError::OcrFailed`].

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the pdftext-ocr library.
#[derive(Debug, Error)]
pub enum ExtractError {
    // ── Document errors ───────────────────────────────────────────────────
    /// The bytes are not a parseable PDF.
    #[error("Error reading PDF: {detail}")]
    DocumentFormat { detail: String },

    /// PDF requires a password but none was provided.
    #[error("PDF is encrypted and requires a password.\nProvide it with --password <PASSWORD>.")]
    PasswordRequired,

    /// A password was provided but it is wrong.
    #[error("Wrong password for encrypted PDF")]
    WrongPassword,

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not read the input file.
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Setup errors ──────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
Set PDFIUM_LIB_PATH=/path/to/libpdfium, place the library in the working\n\
directory, or install it system-wide.\n"
    )]
    PdfiumBindingFailed(String),
}

impl ExtractError {
    /// Shorthand for a [`ExtractError::DocumentFormat`] with the given detail.
    pub fn format(detail: impl Into<String>) -> Self {
        ExtractError::DocumentFormat {
            detail: detail.into(),
        }
    }
}

/// A non-fatal error for a single page.
///
/// Pages that hit one of these contribute empty text; the rest of the
/// document is unaffected.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum PageError {
    /// Page rasterisation failed.
    #[error("Page {page}: rasterisation failed: {detail}")]
    RenderFailed { page: usize, detail: String },

    /// The OCR engine returned an error.
    #[error("Page {page}: OCR failed: {detail}")]
    OcrFailed { page: usize, detail: String },
}

/// Errors raised by an OCR engine.
#[derive(Debug, Error)]
pub enum OcrError {
    /// The engine program could not be started.
    #[error("Failed to run '{program}' (is it installed?): {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The engine ran but exited unsuccessfully.
    #[error("OCR engine exited with status {status}: {stderr}")]
    Exited { status: i32, stderr: String },

    /// The page image could not be handed to the engine.
    #[error("Failed to encode page image: {0}")]
    Encode(#[from] image::ImageError),

    /// Scratch-file I/O failed.
    #[error("OCR scratch I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Engine-specific failure.
    #[error("{0}")]
    Engine(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_format_display_names_detail() {
        let e = ExtractError::format("xref table missing");
        let msg = e.to_string();
        assert!(msg.contains("Error reading PDF"), "got: {msg}");
        assert!(msg.contains("xref table missing"), "got: {msg}");
    }

    #[test]
    fn page_error_display() {
        let e = PageError::OcrFailed {
            page: 3,
            detail: "engine crashed".into(),
        };
        assert_eq!(e.to_string(), "Page 3: OCR failed: engine crashed");
    }

    #[test]
    fn ocr_exit_display() {
        let e = OcrError::Exited {
            status: 1,
            stderr: "Failed loading language 'xyz'".into(),
        };
        assert!(e.to_string().contains("status 1"));
        assert!(e.to_string().contains("xyz"));
    }

    #[test]
    fn io_error_names_path() {
        let e = ExtractError::Io {
            path: PathBuf::from("/tmp/missing.pdf"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "nope"),
        };
        assert!(e.to_string().contains("/tmp/missing.pdf"));
    }
}
