//! Document loading: open PDF bytes as a paginated [`Document`].
//!
//! Native text is read for every page while loading, since pdfium has the
//! page parsed at that point anyway. Rendering is left for
//! [`Document::rasterize`], which the resolver only calls for pages whose
//! text layer is empty.
//!
//! ## Why a trait?
//!
//! The resolver and aggregator only need "how many pages, what text, render
//! page N". Putting that behind [`Document`] lets the pipeline run over an
//! in-memory document in tests without a pdfium library on the machine.

use crate::error::{ExtractError, PageError};
use image::{DynamicImage, GrayImage};
use pdfium_render::prelude::*;
use tracing::{debug, info, warn};

/// PDF files must carry this marker within the first kilobyte.
const PDF_MAGIC: &[u8] = b"%PDF-";
const HEADER_SEARCH_WINDOW: usize = 1024;

/// Points per inch in PDF user space.
const POINTS_PER_INCH: f32 = 72.0;

/// A rendered page at a known resolution.
#[derive(Debug, Clone)]
pub struct RasterImage {
    image: DynamicImage,
    dpi: u32,
}

impl RasterImage {
    pub fn new(image: DynamicImage, dpi: u32) -> Self {
        Self { image, dpi }
    }

    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Single-channel 8-bit luma copy of the image.
    pub fn to_luma8(&self) -> GrayImage {
        self.image.to_luma8()
    }
}

/// An opened, immutable, ordered sequence of pages.
///
/// Indices are 0-based and follow the physical page order of the source.
pub trait Document {
    fn page_count(&self) -> usize;

    /// Embedded text of the page, as extracted (not stripped).
    fn native_text(&self, index: usize) -> &str;

    /// Render the page at `dpi`.
    fn rasterize(&self, index: usize, dpi: u32) -> Result<RasterImage, PageError>;
}

/// A borrowed view of one page of a [`Document`].
#[derive(Clone, Copy)]
pub struct Page<'d> {
    document: &'d dyn Document,
    index: usize,
}

impl<'d> Page<'d> {
    pub fn new(document: &'d dyn Document, index: usize) -> Self {
        Self { document, index }
    }

    /// 1-based page number.
    pub fn number(&self) -> usize {
        self.index + 1
    }

    pub fn native_text(&self) -> &'d str {
        self.document.native_text(self.index)
    }

    pub fn rasterize(&self, dpi: u32) -> Result<RasterImage, PageError> {
        self.document.rasterize(self.index, dpi)
    }
}

/// Iterate the pages of a document in order.
pub fn pages(document: &dyn Document) -> impl Iterator<Item = Page<'_>> {
    (0..document.page_count()).map(move |index| Page::new(document, index))
}

/// Opens raw bytes as a [`Document`].
pub trait DocumentLoader {
    fn load<'a>(
        &'a self,
        bytes: &'a [u8],
        password: Option<&'a str>,
    ) -> Result<Box<dyn Document + 'a>, ExtractError>;
}

/// Reject input that cannot be a PDF before handing it to pdfium.
pub fn check_pdf_header(bytes: &[u8]) -> Result<(), ExtractError> {
    if bytes.is_empty() {
        return Err(ExtractError::format("input is empty"));
    }
    let window = &bytes[..bytes.len().min(HEADER_SEARCH_WINDOW)];
    if !window.windows(PDF_MAGIC.len()).any(|w| w == PDF_MAGIC) {
        let mut magic = [0u8; 4];
        let n = bytes.len().min(4);
        magic[..n].copy_from_slice(&bytes[..n]);
        return Err(ExtractError::format(format!(
            "missing %PDF header (first bytes: {:?})",
            &magic[..n]
        )));
    }
    Ok(())
}

/// Bind to a pdfium library.
///
/// Resolution order: `PDFIUM_LIB_PATH`, the platform library name in the
/// working directory, then the system library search path.
pub fn bind_pdfium() -> Result<Pdfium, ExtractError> {
    let bindings = match std::env::var("PDFIUM_LIB_PATH") {
        Ok(path) if !path.is_empty() => {
            debug!("Binding pdfium from PDFIUM_LIB_PATH={}", path);
            Pdfium::bind_to_library(&path)
        }
        _ => Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library()),
    }
    .map_err(|e| ExtractError::PdfiumBindingFailed(format!("{:?}", e)))?;

    Ok(Pdfium::new(bindings))
}

/// [`DocumentLoader`] backed by pdfium-render.
pub struct PdfiumLoader {
    pdfium: Pdfium,
    max_rendered_pixels: u32,
}

impl PdfiumLoader {
    pub fn new(pdfium: Pdfium, max_rendered_pixels: u32) -> Self {
        Self {
            pdfium,
            max_rendered_pixels,
        }
    }

    /// Bind pdfium via [`bind_pdfium`].
    pub fn bind(max_rendered_pixels: u32) -> Result<Self, ExtractError> {
        Ok(Self::new(bind_pdfium()?, max_rendered_pixels))
    }
}

impl DocumentLoader for PdfiumLoader {
    fn load<'a>(
        &'a self,
        bytes: &'a [u8],
        password: Option<&'a str>,
    ) -> Result<Box<dyn Document + 'a>, ExtractError> {
        check_pdf_header(bytes)?;

        let document = self
            .pdfium
            .load_pdf_from_byte_slice(bytes, password)
            .map_err(|e| classify_load_error(e, password.is_some()))?;

        let texts: Vec<String> = document
            .pages()
            .iter()
            .enumerate()
            .map(|(idx, page)| match page.text() {
                Ok(text) => text.all(),
                Err(e) => {
                    warn!("Page {}: text layer unreadable: {:?}", idx + 1, e);
                    String::new()
                }
            })
            .collect();

        info!("PDF loaded: {} pages", texts.len());

        Ok(Box::new(PdfiumDocument {
            document,
            texts,
            max_rendered_pixels: self.max_rendered_pixels,
        }))
    }
}

fn classify_load_error(e: PdfiumError, has_password: bool) -> ExtractError {
    let err_str = format!("{:?}", e);
    if err_str.contains("Password") || err_str.contains("password") {
        if has_password {
            ExtractError::WrongPassword
        } else {
            ExtractError::PasswordRequired
        }
    } else {
        ExtractError::format(err_str)
    }
}

/// A PDF opened through pdfium, with its text layer already read.
pub struct PdfiumDocument<'a> {
    document: PdfDocument<'a>,
    texts: Vec<String>,
    max_rendered_pixels: u32,
}

impl Document for PdfiumDocument<'_> {
    fn page_count(&self) -> usize {
        self.texts.len()
    }

    fn native_text(&self, index: usize) -> &str {
        self.texts.get(index).map(String::as_str).unwrap_or("")
    }

    fn rasterize(&self, index: usize, dpi: u32) -> Result<RasterImage, PageError> {
        let page = self
            .document
            .pages()
            .get(index as u16)
            .map_err(|e| PageError::RenderFailed {
                page: index + 1,
                detail: format!("{:?}", e),
            })?;

        let max_pixels = i32::try_from(self.max_rendered_pixels).unwrap_or(i32::MAX);
        let render_config = PdfRenderConfig::new()
            .scale_page_by_factor(dpi as f32 / POINTS_PER_INCH)
            .set_maximum_width(max_pixels)
            .set_maximum_height(max_pixels);

        let bitmap = page
            .render_with_config(&render_config)
            .map_err(|e| PageError::RenderFailed {
                page: index + 1,
                detail: format!("{:?}", e),
            })?;

        let image = bitmap.as_image();
        debug!(
            "Rendered page {} at {} DPI → {}x{} px",
            index + 1,
            dpi,
            image.width(),
            image.height()
        );

        Ok(RasterImage::new(image, dpi))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_check_accepts_pdf() {
        assert!(check_pdf_header(b"%PDF-1.7\n%\xe2\xe3\xcf\xd3\n").is_ok());
    }

    #[test]
    fn header_check_tolerates_leading_junk() {
        let mut bytes = vec![b' '; 100];
        bytes.extend_from_slice(b"%PDF-1.4\n");
        assert!(check_pdf_header(&bytes).is_ok());
    }

    #[test]
    fn header_check_rejects_non_pdf() {
        let err = check_pdf_header(b"PK\x03\x04 word document").unwrap_err();
        assert!(matches!(err, ExtractError::DocumentFormat { .. }));
        assert!(err.to_string().contains("missing %PDF header"), "got: {err}");
    }

    #[test]
    fn header_check_rejects_empty() {
        let err = check_pdf_header(b"").unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    struct TwoPages;

    impl Document for TwoPages {
        fn page_count(&self) -> usize {
            2
        }

        fn native_text(&self, index: usize) -> &str {
            ["first", ""][index]
        }

        fn rasterize(&self, index: usize, dpi: u32) -> Result<RasterImage, PageError> {
            Err(PageError::RenderFailed {
                page: index + 1,
                detail: format!("no renderer at {dpi}"),
            })
        }
    }

    #[test]
    fn pages_iterate_in_order_with_one_based_numbers() {
        let doc = TwoPages;
        let numbers: Vec<(usize, &str)> = pages(&doc).map(|p| (p.number(), p.native_text())).collect();
        assert_eq!(numbers, vec![(1, "first"), (2, "")]);
    }

    #[test]
    fn page_rasterize_delegates_to_document() {
        let doc = TwoPages;
        let page = Page::new(&doc, 1);
        let err = page.rasterize(400).unwrap_err();
        assert_eq!(err.to_string(), "Page 2: rasterisation failed: no renderer at 400");
    }
}
