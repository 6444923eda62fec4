//! # pdftext-ocr
//!
//! Extract plain text from PDF documents, falling back to OCR for pages that
//! have no text layer (scans, image-only exports).
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF bytes
//!  │
//!  ├─ 1. Load        open via pdfium, read every page's text layer
//!  ├─ 2. Resolve     per page: native text, or …
//!  │     ├─ Render      rasterise at 400 DPI (only when native text is blank)
//!  │     ├─ Binarise    grayscale + fixed threshold 150
//!  │     └─ OCR         tesseract, English
//!  └─ 3. Aggregate   join pages with "\n", flag results under 50 chars
//! ```
//!
//! A page whose OCR fails contributes empty text; only an unreadable document
//! is an error.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdftext_ocr::{ExtractionConfig, Extractor};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let extractor = Extractor::with_defaults(ExtractionConfig::default())?;
//!     let result = extractor.extract_file("resume.pdf")?;
//!     if result.low_confidence {
//!         eprintln!("warning: little text could be recovered");
//!     }
//!     println!("{}", result.text);
//!     Ok(())
//! }
//! ```
//!
//! ## Runtime requirements
//!
//! * a pdfium shared library (`PDFIUM_LIB_PATH`, the working directory, or the
//!   system library path)
//! * the `tesseract` executable with English language data, for scanned pages
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdftext` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod extract;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ExtractionConfig, ExtractionConfigBuilder};
pub use error::{ExtractError, OcrError, PageError};
pub use extract::{extract, Extractor};
pub use output::{ExtractionResult, ExtractionStats, PageOutcome, Provenance};
pub use pipeline::load::{Document, DocumentLoader, PdfiumLoader, RasterImage};
pub use pipeline::ocr::{OcrEngine, TesseractCli};
pub use pipeline::preprocess::BinarizedImage;
pub use progress::{ExtractionProgressCallback, NoopProgressCallback, ProgressCallback};
