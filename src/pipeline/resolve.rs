//! Per-page text resolution: native text if present, OCR otherwise.
//!
//! The choice is made up front as a [`PageRoute`], before anything is
//! rendered. A page with non-blank native text is never rasterised and never
//! reaches the OCR engine, however poor that text may be.
//!
//! Failures on the OCR route (render error, engine error) do not escape: the
//! page resolves to [`Provenance::OcrEmpty`](crate::output::Provenance::OcrEmpty)
//! and the error is logged.

use crate::config::ExtractionConfig;
use crate::error::PageError;
use crate::output::PageOutcome;
use crate::pipeline::load::Page;
use crate::pipeline::ocr::OcrEngine;
use crate::pipeline::preprocess::preprocess;
use tracing::{debug, warn};

/// How a page's text will be obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRoute<'a> {
    /// Use the embedded text (already stripped).
    Native(&'a str),
    /// Render, binarise and recognise.
    Ocr,
}

/// Decide the route for a page from its native text alone.
pub fn route<'a>(page: &Page<'a>) -> PageRoute<'a> {
    let text = page.native_text().trim();
    if text.is_empty() {
        PageRoute::Ocr
    } else {
        PageRoute::Native(text)
    }
}

/// Resolve one page to its text and provenance.
pub fn resolve(page: &Page<'_>, ocr: &dyn OcrEngine, config: &ExtractionConfig) -> PageOutcome {
    match route(page) {
        PageRoute::Native(text) => {
            debug!("Page {}: native text ({} chars)", page.number(), text.chars().count());
            PageOutcome::native(page.number(), text)
        }
        PageRoute::Ocr => {
            debug!("Page {}: no native text, falling back to OCR", page.number());
            match recognize_page(page, ocr, config) {
                Ok(text) => {
                    let text = text.trim();
                    if text.is_empty() {
                        debug!("Page {}: OCR produced no text", page.number());
                        PageOutcome::empty(page.number())
                    } else {
                        PageOutcome::ocr(page.number(), text)
                    }
                }
                Err(e) => {
                    warn!("{}", e);
                    PageOutcome::empty(page.number())
                }
            }
        }
    }
}

/// Rasterise → binarise → recognise. The images are dropped on return.
fn recognize_page(
    page: &Page<'_>,
    ocr: &dyn OcrEngine,
    config: &ExtractionConfig,
) -> Result<String, PageError> {
    let raster = page.rasterize(config.dpi)?;
    let binarized = preprocess(&raster, config.threshold);
    drop(raster);

    ocr.recognize(&binarized, &config.language)
        .map_err(|e| PageError::OcrFailed {
            page: page.number(),
            detail: e.to_string(),
        })
}
