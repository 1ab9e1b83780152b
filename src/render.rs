//! Reference consumer of the packed RGBA buffer
//!
//! Rebuilds each 16-bit stored sample from the `low`/`high` bytes and maps
//! the current display range linearly onto 0..=255.

use anyhow::{Context, Result};
use image::{GrayImage, ImageBuffer};

use crate::frame::{ImageFrame, RgbaCell};
use crate::types::DisplayRange;

/// Render the frame's current window as an 8-bit grayscale image
///
/// # Errors
///
/// Fails if the frame is not loaded.
pub fn render_gray(frame: &ImageFrame, invert: bool) -> Result<GrayImage> {
    let rgba = frame.rgba().context("Cannot render frame")?;
    let range = frame.display_range().context("Cannot render frame")?;

    let gray: Vec<u8> = rgba
        .cells()
        .iter()
        .map(|cell| {
            let value = map_to_gray(cell, range);
            if invert { 255 - value } else { value }
        })
        .collect();

    let dims = rgba.dimensions();
    ImageBuffer::from_raw(dims.width, dims.height, gray)
        .context("Failed to create grayscale image buffer")
}

/// Empty ranges render black; a single-value range becomes a threshold
#[inline]
#[must_use]
pub fn map_to_gray(cell: &RgbaCell, range: DisplayRange) -> u8 {
    if range.is_empty() {
        return 0;
    }

    let value = i64::from(cell.stored_value());
    if range.lower == range.upper {
        return if value <= range.lower { 0 } else { 255 };
    }

    // f64 so that saturated bounds far outside the stored domain cannot overflow
    let normalized = (value as f64 - range.lower as f64) / (range.upper as f64 - range.lower as f64);
    // Saturating cast after clamp: values outside the range pin to black/white
    (normalized.clamp(0.0, 1.0) * 255.0) as u8
}
