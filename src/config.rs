//! Configuration types for text extraction.
//!
//! Every tunable of the pipeline lives in [`ExtractionConfig`], built via its
//! [`ExtractionConfigBuilder`]. The values that used to be magic numbers
//! (render DPI, binarisation threshold, minimum text length) are plain fields
//! here with documented defaults, so tests and callers can change them.

use crate::error::ExtractError;
use crate::progress::ProgressCallback;
use std::fmt;

/// Default rendering resolution for pages that need OCR.
pub const DEFAULT_DPI: u32 = 400;

/// Default global binarisation threshold on a 0–255 scale.
pub const DEFAULT_THRESHOLD: u8 = 150;

/// Default minimum number of characters before a result counts as trustworthy.
pub const DEFAULT_MIN_TEXT_CHARS: usize = 50;

/// Smallest accepted render dimension cap.
const MIN_RENDERED_PIXELS: u32 = 100;

/// Default OCR language (Tesseract language code for English).
pub const DEFAULT_LANGUAGE: &str = "eng";

/// Sentence appended to results that fall below the minimum length.
pub const DEFAULT_LOW_CONFIDENCE_WARNING: &str =
    "⚠️ Could not extract meaningful text from this PDF (mostly scanned/image).";

/// Configuration for a PDF text extraction.
///
/// Built via [`ExtractionConfig::builder()`] or using
/// [`ExtractionConfig::default()`].
///
/// # Example
/// ```rust
/// use pdftext_ocr::ExtractionConfig;
///
/// let config = ExtractionConfig::builder()
///     .dpi(300)
///     .threshold(140)
///     .build()
///     .unwrap();
/// assert_eq!(config.dpi, 300);
/// ```
#[derive(Clone)]
pub struct ExtractionConfig {
    /// Rendering DPI for pages without native text. Range: 72–1200. Default: 400.
    ///
    /// OCR accuracy on small print improves markedly above 300 DPI; the cost is
    /// render time and memory, paid only for pages that actually need OCR.
    pub dpi: u32,

    /// Maximum rendered image dimension (width or height) in pixels. Default: 10 000.
    ///
    /// Independent of DPI. A 400-DPI render of a poster-sized page would
    /// otherwise allocate hundreds of megabytes.
    pub max_rendered_pixels: u32,

    /// Global binarisation threshold. Default: 150.
    ///
    /// Samples below it become black, all others white. The threshold is
    /// fixed, not computed per page, so it helps faint scans and can hurt
    /// already-clean renders with light-grey text.
    pub threshold: u8,

    /// OCR language code handed to the engine. Default: `"eng"`.
    pub language: String,

    /// Minimum stripped length (in characters) of the combined text. Default: 50.
    ///
    /// Shorter results get [`Self::low_confidence_warning`] appended and the
    /// `low_confidence` flag set.
    pub min_text_chars: usize,

    /// Sentence appended to low-confidence results.
    pub low_confidence_warning: String,

    /// PDF user password for encrypted documents.
    pub password: Option<String>,

    /// Per-page progress events. Default: none.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            max_rendered_pixels: 10_000,
            threshold: DEFAULT_THRESHOLD,
            language: DEFAULT_LANGUAGE.to_string(),
            min_text_chars: DEFAULT_MIN_TEXT_CHARS,
            low_confidence_warning: DEFAULT_LOW_CONFIDENCE_WARNING.to_string(),
            password: None,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ExtractionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionConfig")
            .field("dpi", &self.dpi)
            .field("max_rendered_pixels", &self.max_rendered_pixels)
            .field("threshold", &self.threshold)
            .field("language", &self.language)
            .field("min_text_chars", &self.min_text_chars)
            .field("low_confidence_warning", &self.low_confidence_warning)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn ExtractionProgressCallback>"),
            )
            .finish()
    }
}

impl ExtractionConfig {
    /// Create a new builder for `ExtractionConfig`.
    pub fn builder() -> ExtractionConfigBuilder {
        ExtractionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ExtractionConfig`].
#[derive(Debug)]
pub struct ExtractionConfigBuilder {
    config: ExtractionConfig,
}

impl ExtractionConfigBuilder {
    pub fn dpi(mut self, dpi: u32) -> Self {
        self.config.dpi = dpi;
        self
    }

    /// Clamped to `100..=i32::MAX`, the range pdfium accepts.
    pub fn max_rendered_pixels(mut self, px: u32) -> Self {
        self.config.max_rendered_pixels = px.clamp(MIN_RENDERED_PIXELS, i32::MAX as u32);
        self
    }

    pub fn threshold(mut self, threshold: u8) -> Self {
        self.config.threshold = threshold;
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.config.language = language.into();
        self
    }

    pub fn min_text_chars(mut self, n: usize) -> Self {
        self.config.min_text_chars = n;
        self
    }

    pub fn low_confidence_warning(mut self, warning: impl Into<String>) -> Self {
        self.config.low_confidence_warning = warning.into();
        self
    }

    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        self.config.password = Some(pwd.into());
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ExtractionConfig, ExtractError> {
        let c = &self.config;
        if c.dpi < 72 || c.dpi > 1200 {
            return Err(ExtractError::InvalidConfig(format!(
                "DPI must be 72–1200, got {}",
                c.dpi
            )));
        }
        if c.language.trim().is_empty() {
            return Err(ExtractError::InvalidConfig(
                "OCR language must not be empty".into(),
            ));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_policy() {
        let config = ExtractionConfig::default();
        assert_eq!(config.dpi, 400);
        assert_eq!(config.threshold, 150);
        assert_eq!(config.min_text_chars, 50);
        assert_eq!(config.language, "eng");
        assert!(config.password.is_none());
    }

    #[test]
    fn builder_rejects_out_of_range_dpi() {
        let err = ExtractionConfig::builder().dpi(50).build().unwrap_err();
        assert!(err.to_string().contains("DPI"), "got: {err}");
        assert!(ExtractionConfig::builder().dpi(2400).build().is_err());
    }

    #[test]
    fn builder_rejects_blank_language() {
        assert!(ExtractionConfig::builder().language("  ").build().is_err());
    }

    #[test]
    fn builder_clamps_pixel_cap() {
        let config = ExtractionConfig::builder()
            .max_rendered_pixels(10)
            .build()
            .unwrap();
        assert_eq!(config.max_rendered_pixels, 100);

        let config = ExtractionConfig::builder()
            .max_rendered_pixels(u32::MAX)
            .build()
            .unwrap();
        assert_eq!(config.max_rendered_pixels, i32::MAX as u32);
    }

    #[test]
    fn debug_redacts_password() {
        let config = ExtractionConfig::builder()
            .password("hunter2")
            .build()
            .unwrap();
        let dbg = format!("{config:?}");
        assert!(!dbg.contains("hunter2"));
        assert!(dbg.contains("<redacted>"));
    }
}
