//! Extraction entry points.
//!
//! [`Extractor`] owns the three things a run needs: the configuration, a
//! [`DocumentLoader`] and an [`OcrEngine`]. Each call builds its own document
//! and images and drops them before returning; nothing is cached between
//! calls.
//!
//! Only document-level failures propagate. A page that cannot be rendered or
//! recognised contributes empty text, and a document that yields almost no
//! text still returns `Ok`, with `low_confidence` set.

use crate::config::ExtractionConfig;
use crate::error::ExtractError;
use crate::output::{ExtractionResult, PageOutcome};
use crate::pipeline::aggregate::aggregate;
use crate::pipeline::load::{pages, Document, DocumentLoader, PdfiumLoader};
use crate::pipeline::ocr::{OcrEngine, TesseractCli};
use crate::pipeline::resolve::resolve;
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Runs the extraction pipeline.
pub struct Extractor {
    config: ExtractionConfig,
    loader: Box<dyn DocumentLoader>,
    ocr: Box<dyn OcrEngine>,
}

impl Extractor {
    pub fn new(
        config: ExtractionConfig,
        loader: Box<dyn DocumentLoader>,
        ocr: Box<dyn OcrEngine>,
    ) -> Self {
        Self {
            config,
            loader,
            ocr,
        }
    }

    /// pdfium for loading and rendering, `tesseract` on `PATH` for OCR.
    ///
    /// # Errors
    /// [`ExtractError::PdfiumBindingFailed`] if no pdfium library can be found.
    pub fn with_defaults(config: ExtractionConfig) -> Result<Self, ExtractError> {
        let loader = PdfiumLoader::bind(config.max_rendered_pixels)?;
        Ok(Self::new(
            config,
            Box::new(loader),
            Box::new(TesseractCli::default()),
        ))
    }

    /// Extract the text of a PDF held in memory.
    ///
    /// # Errors
    /// Only if the bytes cannot be opened as a PDF
    /// ([`ExtractError::DocumentFormat`], or a password error for encrypted
    /// documents). No partial result is returned in that case.
    pub fn extract(&self, bytes: &[u8]) -> Result<ExtractionResult, ExtractError> {
        let document = self.loader.load(bytes, self.config.password.as_deref())?;
        Ok(self.extract_document(document.as_ref()))
    }

    /// Read a PDF file and extract its text.
    pub fn extract_file(&self, path: impl AsRef<Path>) -> Result<ExtractionResult, ExtractError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| ExtractError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Extracting text from {}", path.display());
        self.extract(&bytes)
    }

    /// Resolve and aggregate an already-opened document.
    ///
    /// Infallible: every page yields an outcome.
    pub fn extract_document(&self, document: &dyn Document) -> ExtractionResult {
        let start = Instant::now();
        let total = document.page_count();
        let progress = self.config.progress_callback.as_ref();

        if let Some(cb) = progress {
            cb.on_extraction_start(total);
        }

        let outcomes: Vec<PageOutcome> = pages(document)
            .map(|page| {
                if let Some(cb) = progress {
                    cb.on_page_start(page.number(), total);
                }
                let outcome = resolve(&page, self.ocr.as_ref(), &self.config);
                if let Some(cb) = progress {
                    cb.on_page_resolved(
                        outcome.page_num,
                        total,
                        outcome.provenance,
                        outcome.text.chars().count(),
                    );
                }
                outcome
            })
            .collect();

        let result = aggregate(&outcomes, &self.config);

        info!(
            "Extraction complete: {} pages ({} native, {} OCR, {} empty), {} chars, {}ms",
            result.stats.total_pages,
            result.stats.native_pages,
            result.stats.ocr_pages,
            result.stats.empty_pages,
            result.text.chars().count(),
            start.elapsed().as_millis()
        );

        if let Some(cb) = progress {
            cb.on_extraction_complete(total, result.stats.empty_pages);
        }

        result
    }
}

/// Extract text from PDF bytes with default settings.
///
/// Binds pdfium on every call; build an [`Extractor`] once when extracting
/// many documents.
///
/// # Errors
/// [`ExtractError::PdfiumBindingFailed`] if no pdfium library can be found,
/// otherwise as [`Extractor::extract`].
pub fn extract(bytes: &[u8]) -> Result<ExtractionResult, ExtractError> {
    Extractor::with_defaults(ExtractionConfig::default())?.extract(bytes)
}
