//! Image file I/O around the controller memory layout
//!
//! Images are decoded with the `image` crate, converted to 8-bit luma and
//! checked against what the controller can address: one byte each for width
//! and height, and a 64 KiB memory holding the header, the input pixels and
//! the output pixels.

use crate::error::SimError;
use crate::types::{Byte, Dimensions, HEADER_LEN, MEMORY_SIZE};
use anyhow::{Context, Result};
use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, ImageBuffer};
use std::path::Path;

/// Largest pixel count whose input and output both fit in memory
pub const MAX_PIXELS: usize = (MEMORY_SIZE - HEADER_LEN as usize) / 2;

/// Largest width or height the header can carry
pub const MAX_SIDE: u32 = Byte::MAX as u32;

/// Decode an image file into 8-bit grayscale.
///
/// With `fit`, images the controller cannot hold are downscaled, keeping the
/// aspect ratio, until they fit.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded
pub fn load_grayscale(path: &Path, fit: bool) -> Result<GrayImage> {
    let image = image::open(path)
        .with_context(|| format!("Failed to open image: {}", path.display()))?;
    let gray = image.into_luma8();

    if fit {
        Ok(fit_to_memory(gray))
    } else {
        Ok(gray)
    }
}

/// Downscale `image` so that it passes [`check_layout`], if it does not already
#[must_use]
pub fn fit_to_memory(image: GrayImage) -> GrayImage {
    let (width, height) = image.dimensions();
    let Some((new_width, new_height)) = fitted_size(width, height) else {
        return image;
    };
    imageops::resize(&image, new_width, new_height, FilterType::Triangle)
}

/// Target size for an oversized image, `None` when it already fits
fn fitted_size(width: u32, height: u32) -> Option<(u32, u32)> {
    let pixels = u64::from(width) * u64::from(height);
    if width <= MAX_SIDE && height <= MAX_SIDE && pixels <= MAX_PIXELS as u64 {
        return None;
    }
    if width == 0 || height == 0 {
        return None;
    }

    let side_scale = f64::from(MAX_SIDE) / f64::from(width.max(height));
    let area_scale = (MAX_PIXELS as f64 / pixels as f64).sqrt();
    let scale = side_scale.min(area_scale).min(1.0);

    let mut new_width = ((f64::from(width) * scale).round() as u32).clamp(1, MAX_SIDE);
    let mut new_height = ((f64::from(height) * scale).round() as u32).clamp(1, MAX_SIDE);

    // Rounding can leave the product a row or column over
    while u64::from(new_width) * u64::from(new_height) > MAX_PIXELS as u64 {
        if new_width >= new_height {
            new_width -= 1;
        } else {
            new_height -= 1;
        }
    }
    Some((new_width, new_height))
}

/// Check that `image` can be laid out in controller memory.
///
/// # Errors
///
/// Returns [`SimError::HeaderOverflow`] when a side exceeds 255,
/// [`SimError::EmptyImage`] when a side is zero, and
/// [`SimError::ImageTooLarge`] when input and output do not both fit.
pub fn check_layout(image: &GrayImage) -> Result<Dimensions, SimError> {
    let (width, height) = image.dimensions();
    let (Ok(w), Ok(h)) = (Byte::try_from(width), Byte::try_from(height)) else {
        return Err(SimError::HeaderOverflow { width, height });
    };

    let dimensions = Dimensions::new(w, h);
    if dimensions.is_empty() {
        return Err(SimError::EmptyImage(dimensions));
    }
    if !dimensions.fits_memory() {
        return Err(SimError::ImageTooLarge {
            dimensions,
            needed: dimensions.footprint(),
        });
    }
    Ok(dimensions)
}

/// Build a grayscale image from a pixel run
///
/// # Errors
///
/// Returns an error if `pixels` does not match `dimensions`
pub fn to_image(dimensions: Dimensions, pixels: Vec<Byte>) -> Result<GrayImage> {
    ImageBuffer::from_raw(
        u32::from(dimensions.width),
        u32::from(dimensions.height),
        pixels,
    )
    .context("Failed to create grayscale image buffer")
}

/// Write `image` to `path`, format chosen by extension
///
/// # Errors
///
/// Returns an error if encoding or writing fails
pub fn save(image: &GrayImage, path: &Path) -> Result<()> {
    image
        .save(path)
        .with_context(|| format!("Failed to write image: {}", path.display()))
}

/// Default output path: `<stem>.stretched.png` next to the input
#[must_use]
pub fn default_output_path(input: &Path) -> std::path::PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(|| "image".into(), |s| s.to_string_lossy());
    input.with_file_name(format!("{stem}.stretched.png"))
}

/// Side-by-side before/after picture for terminal display
#[must_use]
pub fn side_by_side(before: &GrayImage, after: &GrayImage) -> DynamicImage {
    let gap = 2;
    let width = before.width() + gap + after.width();
    let height = before.height().max(after.height());
    let mut canvas = GrayImage::new(width, height);
    imageops::replace(&mut canvas, before, 0, 0);
    imageops::replace(&mut canvas, after, i64::from(before.width() + gap), 0);
    DynamicImage::ImageLuma8(canvas)
}
