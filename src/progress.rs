//! Progress-callback trait for per-page extraction events.
//!
//! Inject an [`Arc<dyn ExtractionProgressCallback>`] via
//! [`crate::config::ExtractionConfigBuilder::progress_callback`] to receive
//! events as the pipeline resolves each page.
//!
//! # Example
//!
//! ```rust
//! use pdftext_ocr::{ExtractionConfig, ExtractionProgressCallback, Provenance};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct OcrCounter {
//!     ocr_pages: AtomicUsize,
//! }
//!
//! impl ExtractionProgressCallback for OcrCounter {
//!     fn on_page_resolved(&self, _page: usize, _total: usize, provenance: Provenance, _chars: usize) {
//!         if provenance == Provenance::Ocr {
//!             self.ocr_pages.fetch_add(1, Ordering::SeqCst);
//!         }
//!     }
//! }
//!
//! let counter = Arc::new(OcrCounter { ocr_pages: AtomicUsize::new(0) });
//! let config = ExtractionConfig::builder()
//!     .progress_callback(counter as Arc<dyn ExtractionProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use crate::output::Provenance;
use std::sync::Arc;

/// Called by the extraction pipeline as it processes each page.
///
/// Pages are processed one at a time in document order, so events arrive in
/// page order. The trait is `Send + Sync` because an `ExtractionConfig` may be
/// shared between threads serving different requests. All methods default to
/// no-ops.
pub trait ExtractionProgressCallback: Send + Sync {
    /// Called once after the document is loaded, before any page is resolved.
    fn on_extraction_start(&self, total_pages: usize) {
        let _ = total_pages;
    }

    /// Called before a page is resolved.
    ///
    /// # Arguments
    /// * `page_num`    — 1-indexed page number
    /// * `total_pages` — total pages in the document
    fn on_page_start(&self, page_num: usize, total_pages: usize) {
        let _ = (page_num, total_pages);
    }

    /// Called once a page has a resolved outcome.
    ///
    /// # Arguments
    /// * `page_num`    — 1-indexed page number
    /// * `total_pages` — total pages
    /// * `provenance`  — where the page text came from
    /// * `chars`       — character count of the resolved text
    fn on_page_resolved(
        &self,
        page_num: usize,
        total_pages: usize,
        provenance: Provenance,
        chars: usize,
    ) {
        let _ = (page_num, total_pages, provenance, chars);
    }

    /// Called once after all pages have been resolved.
    ///
    /// # Arguments
    /// * `total_pages` — total pages in the document
    /// * `empty_pages` — pages that contributed no text
    fn on_extraction_complete(&self, total_pages: usize, empty_pages: usize) {
        let _ = (total_pages, empty_pages);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ExtractionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ExtractionConfig`].
pub type ProgressCallback = Arc<dyn ExtractionProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct TrackingCallback {
        starts: AtomicUsize,
        ocr: AtomicUsize,
        empty_total: AtomicUsize,
    }

    impl ExtractionProgressCallback for TrackingCallback {
        fn on_page_start(&self, _page_num: usize, _total_pages: usize) {
            self.starts.fetch_add(1, Ordering::SeqCst);
        }

        fn on_page_resolved(&self, _page: usize, _total: usize, provenance: Provenance, _chars: usize) {
            if provenance == Provenance::Ocr {
                self.ocr.fetch_add(1, Ordering::SeqCst);
            }
        }

        fn on_extraction_complete(&self, _total_pages: usize, empty_pages: usize) {
            self.empty_total.store(empty_pages, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_extraction_start(2);
        cb.on_page_start(1, 2);
        cb.on_page_resolved(1, 2, Provenance::Native, 10);
        cb.on_extraction_complete(2, 0);
    }

    #[test]
    fn tracking_callback_receives_events() {
        let tracker = TrackingCallback {
            starts: AtomicUsize::new(0),
            ocr: AtomicUsize::new(0),
            empty_total: AtomicUsize::new(0),
        };

        tracker.on_page_start(1, 2);
        tracker.on_page_resolved(1, 2, Provenance::Ocr, 12);
        tracker.on_page_start(2, 2);
        tracker.on_page_resolved(2, 2, Provenance::OcrEmpty, 0);
        tracker.on_extraction_complete(2, 1);

        assert_eq!(tracker.starts.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.ocr.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.empty_total.load(Ordering::SeqCst), 1);
    }
}
