//! Result types produced by the extraction pipeline.

use serde::{Deserialize, Serialize};

/// Where a page's text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// The page's embedded text layer.
    Native,
    /// OCR on the rendered page.
    Ocr,
    /// OCR ran (or failed) and produced nothing usable.
    OcrEmpty,
}

/// The resolved text of a single page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOutcome {
    /// 1-indexed page number.
    pub page_num: usize,
    /// Stripped page text. Always empty for [`Provenance::OcrEmpty`].
    pub text: String,
    pub provenance: Provenance,
}

impl PageOutcome {
    pub fn native(page_num: usize, text: impl Into<String>) -> Self {
        Self {
            page_num,
            text: text.into(),
            provenance: Provenance::Native,
        }
    }

    pub fn ocr(page_num: usize, text: impl Into<String>) -> Self {
        Self {
            page_num,
            text: text.into(),
            provenance: Provenance::Ocr,
        }
    }

    pub fn empty(page_num: usize) -> Self {
        Self {
            page_num,
            text: String::new(),
            provenance: Provenance::OcrEmpty,
        }
    }
}

/// Per-document counters, for logging and JSON output.
///
/// Derived from the page outcomes only, so repeated runs over the same input
/// compare equal. Wall-clock timing is logged, not stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    pub total_pages: usize,
    pub native_pages: usize,
    pub ocr_pages: usize,
    /// Pages that contributed no text (empty OCR output or a recovered failure).
    pub empty_pages: usize,
}

impl ExtractionStats {
    /// Tally provenance counts over a set of outcomes.
    pub fn from_outcomes(outcomes: &[PageOutcome]) -> Self {
        let count = |p: Provenance| outcomes.iter().filter(|o| o.provenance == p).count();
        Self {
            total_pages: outcomes.len(),
            native_pages: count(Provenance::Native),
            ocr_pages: count(Provenance::Ocr),
            empty_pages: count(Provenance::OcrEmpty),
        }
    }
}

/// Final text of a whole document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Page texts joined by `\n`, with the warning sentence appended when
    /// `low_confidence` is set.
    pub text: String,
    /// The recovered text was shorter than the configured minimum.
    pub low_confidence: bool,
    pub stats: ExtractionStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_tally_provenance() {
        let outcomes = vec![
            PageOutcome::native(1, "a"),
            PageOutcome::ocr(2, "b"),
            PageOutcome::empty(3),
            PageOutcome::empty(4),
        ];
        let stats = ExtractionStats::from_outcomes(&outcomes);
        assert_eq!(stats.total_pages, 4);
        assert_eq!(stats.native_pages, 1);
        assert_eq!(stats.ocr_pages, 1);
        assert_eq!(stats.empty_pages, 2);
    }

    #[test]
    fn provenance_serialises_snake_case() {
        let json = serde_json::to_string(&Provenance::OcrEmpty).unwrap();
        assert_eq!(json, "\"ocr_empty\"");
    }
}
