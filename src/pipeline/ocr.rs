//! OCR engines: turn a [`BinarizedImage`] into text.
//!
//! The pipeline depends only on the [`OcrEngine`] trait. The bundled
//! implementation, [`TesseractCli`], drives the `tesseract` command-line
//! program: the page is PNG-encoded to a scratch file and the recognised text
//! is read back from stdout.
//!
//! ## Why PNG?
//! Lossless. JPEG ringing around glyph edges undoes the binarisation step and
//! costs recognition accuracy.

use crate::error::OcrError;
use crate::pipeline::preprocess::BinarizedImage;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, instrument};

/// Recognises text in a page image.
pub trait OcrEngine {
    /// Recognise text in `image` using the given language code (e.g. `"eng"`).
    fn recognize(&self, image: &BinarizedImage, language: &str) -> Result<String, OcrError>;
}

/// Encode a binarised page as PNG bytes.
pub fn encode_png(page: &BinarizedImage) -> Result<Vec<u8>, image::ImageError> {
    let mut buf = Vec::new();
    page.as_gray()
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)?;
    debug!("Encoded page image → {} bytes PNG", buf.len());
    Ok(buf)
}

/// [`OcrEngine`] backed by the `tesseract` executable.
#[derive(Debug, Clone)]
pub struct TesseractCli {
    program: PathBuf,
}

impl Default for TesseractCli {
    /// Looks `tesseract` up on `PATH`.
    fn default() -> Self {
        Self {
            program: PathBuf::from("tesseract"),
        }
    }
}

impl TesseractCli {
    /// Use a specific tesseract binary.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// `tesseract <image> stdout -l <lang> --dpi <dpi>`
    fn command(&self, image_path: &Path, language: &str, dpi: u32) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg(image_path)
            .arg("stdout")
            .arg("-l")
            .arg(language)
            .arg("--dpi")
            .arg(dpi.to_string());
        cmd
    }

    /// Whether the configured binary can be started.
    pub fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }
}

impl OcrEngine for TesseractCli {
    #[instrument(skip_all, fields(width = image.width(), height = image.height(), dpi = image.dpi(), language = %language))]
    fn recognize(&self, image: &BinarizedImage, language: &str) -> Result<String, OcrError> {
        let png = encode_png(image)?;

        let mut scratch = tempfile::Builder::new()
            .prefix("pdftext-page-")
            .suffix(".png")
            .tempfile()?;
        scratch.write_all(&png)?;
        scratch.flush()?;

        let output = self
            .command(scratch.path(), language, image.dpi())
            .output()
            .map_err(|source| OcrError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(OcrError::Exited {
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!(chars = text.chars().count(), "OCR recognition complete");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::load::RasterImage;
    use crate::pipeline::preprocess::preprocess;
    use image::{DynamicImage, GrayImage, Luma};

    fn blank_page() -> BinarizedImage {
        let img = GrayImage::from_pixel(8, 8, Luma([255]));
        preprocess(&RasterImage::new(DynamicImage::ImageLuma8(img), 400), 150)
    }

    #[test]
    fn encode_png_produces_png_signature() {
        let png = encode_png(&blank_page()).expect("encode should succeed");
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
        let decoded = image::load_from_memory(&png).expect("valid png");
        assert_eq!((decoded.width(), decoded.height()), (8, 8));
    }

    #[test]
    fn missing_binary_reports_spawn_error() {
        let engine = TesseractCli::with_program("/nonexistent/tesseract");
        assert!(!engine.is_available());
        let err = engine.recognize(&blank_page(), "eng").unwrap_err();
        assert!(matches!(err, OcrError::Spawn { .. }), "got: {err}");
        assert!(err.to_string().contains("/nonexistent/tesseract"));
    }

    #[test]
    fn default_engine_uses_path_lookup() {
        assert_eq!(TesseractCli::default().program(), Path::new("tesseract"));
    }

    #[test]
    fn command_passes_language_and_render_dpi() {
        let engine = TesseractCli::default();
        let page = blank_page();
        let cmd = engine.command(Path::new("/tmp/page.png"), "eng", page.dpi());

        let args: Vec<String> = cmd
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(args, vec!["/tmp/page.png", "stdout", "-l", "eng", "--dpi", "400"]);
        assert_eq!(cmd.get_program(), "tesseract");
    }
}
