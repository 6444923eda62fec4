//! Pipeline stages for PDF text extraction.
//!
//! Each submodule implements exactly one step, so each can be tested alone
//! and the OCR engine or the PDF backend can be swapped without touching the
//! others.
//!
//! ## Data Flow
//!
//! ```text
//! load ──▶ resolve ──┬── native text ─────────────────────┐
//!                    └── rasterize ──▶ preprocess ──▶ ocr ┴──▶ aggregate
//! ```
//!
//! 1. [`load`]       — open bytes as a [`load::Document`]; reads every page's
//!    text layer, defers rendering
//! 2. [`resolve`]    — per page, choose native text or OCR; OCR failures are
//!    absorbed here
//! 3. [`preprocess`] — grayscale + fixed-threshold binarisation
//! 4. [`ocr`]        — recognise text in the binarised image
//! 5. [`aggregate`]  — join pages, apply the low-confidence fallback

pub mod aggregate;
pub mod load;
pub mod ocr;
pub mod preprocess;
pub mod resolve;
