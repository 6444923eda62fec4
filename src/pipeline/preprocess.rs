//! Image preprocessing: grayscale + fixed global binarisation.
//!
//! Faint scans and light-grey renders are where OCR engines lose the most
//! characters. Forcing every sample to pure black or pure white before
//! recognition recovers most of them.
//!
//! The threshold is global and fixed (default 150), not chosen per page. This
//! is a known limitation: on clean renders with light text it can erase
//! strokes that an unprocessed image would have kept.

use crate::pipeline::load::RasterImage;
use image::{DynamicImage, GrayImage, Luma};

const BLACK: u8 = 0;
const WHITE: u8 = 255;

/// A single-channel image whose samples are all either 0 or 255.
///
/// Keeps the resolution of the render it came from; OCR engines use it to
/// size glyphs.
#[derive(Debug, Clone)]
pub struct BinarizedImage {
    image: GrayImage,
    dpi: u32,
}

impl BinarizedImage {
    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn as_gray(&self) -> &GrayImage {
        &self.image
    }

    pub fn into_dynamic(self) -> DynamicImage {
        DynamicImage::ImageLuma8(self.image)
    }
}

/// Convert a rendered page to grayscale and binarise it.
///
/// Samples below `threshold` become 0, all others 255.
pub fn preprocess(raster: &RasterImage, threshold: u8) -> BinarizedImage {
    BinarizedImage {
        image: binarize(raster.to_luma8(), threshold),
        dpi: raster.dpi(),
    }
}

fn binarize(mut gray: GrayImage, threshold: u8) -> GrayImage {
    for Luma([value]) in gray.pixels_mut() {
        *value = if *value < threshold { BLACK } else { WHITE };
    }
    gray
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    fn raster_from_gray_levels(levels: &[u8]) -> RasterImage {
        let mut img = RgbImage::new(levels.len() as u32, 1);
        for (x, &v) in levels.iter().enumerate() {
            img.put_pixel(x as u32, 0, Rgb([v, v, v]));
        }
        RasterImage::new(DynamicImage::ImageRgb8(img), 400)
    }

    #[test]
    fn threshold_boundary_goes_white() {
        let raster = raster_from_gray_levels(&[0, 149, 150, 151, 255]);
        let out = preprocess(&raster, 150);
        let values: Vec<u8> = out.as_gray().pixels().map(|p| p.0[0]).collect();
        assert_eq!(values, vec![0, 0, 255, 255, 255]);
    }

    #[test]
    fn output_is_strictly_two_level() {
        let levels: Vec<u8> = (0..=255).collect();
        let out = preprocess(&raster_from_gray_levels(&levels), 150);
        assert!(out.as_gray().pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
    }

    #[test]
    fn colour_input_is_reduced_to_one_channel() {
        // Pure red has luma ~54: dark enough to become black at 150.
        let img = RgbaImage::from_pixel(4, 3, Rgba([255, 0, 0, 255]));
        let raster = RasterImage::new(DynamicImage::ImageRgba8(img), 300);
        let out = preprocess(&raster, 150);
        assert_eq!((out.width(), out.height()), (4, 3));
        assert_eq!(out.dpi(), 300);
        assert!(out.as_gray().pixels().all(|p| p.0[0] == 0));
        assert!(matches!(out.into_dynamic(), DynamicImage::ImageLuma8(_)));
    }

    #[test]
    fn threshold_is_configurable() {
        let raster = raster_from_gray_levels(&[100, 200]);
        let low: Vec<u8> = preprocess(&raster, 50).as_gray().pixels().map(|p| p.0[0]).collect();
        let high: Vec<u8> = preprocess(&raster, 250).as_gray().pixels().map(|p| p.0[0]).collect();
        assert_eq!(low, vec![255, 255]);
        assert_eq!(high, vec![0, 0]);
    }
}
