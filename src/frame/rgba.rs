//! Two-byte grayscale packed into RGBA cells
//!
//! This is not a color image. Each cell carries one 16-bit stored sample:
//!
//! | byte | field    | content                   |
//! |------|----------|---------------------------|
//! | 0    | `low`    | bits 0-7 of the sample    |
//! | 1    | `high`   | bits 8-15 of the sample   |
//! | 2    | `unused` | always 0                  |
//! | 3    | `alpha`  | always 255 (opaque)       |
//!
//! Consumers rebuild the sample from `low`/`high` before applying a window.

use bytemuck::{Pod, Zeroable};

use crate::error::{FrameError, Result};
use crate::types::Dimensions;

/// One packed pixel. `#[repr(C)]` keeps the byte order above.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct RgbaCell {
    pub low: u8,
    pub high: u8,
    pub unused: u8,
    pub alpha: u8,
}

impl RgbaCell {
    pub const ALPHA_OPAQUE: u8 = 255;

    #[inline(always)]
    #[must_use]
    pub fn from_stored(value: u16) -> Self {
        let [low, high] = value.to_le_bytes();
        Self {
            low,
            high,
            unused: 0,
            alpha: Self::ALPHA_OPAQUE,
        }
    }

    #[inline(always)]
    #[must_use]
    pub fn stored_value(&self) -> u16 {
        u16::from_le_bytes([self.low, self.high])
    }
}

/// Encoded frame, width*height cells in row-major order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaBuffer {
    dimensions: Dimensions,
    cells: Vec<RgbaCell>,
}

impl RgbaBuffer {
    #[inline]
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    #[inline]
    #[must_use]
    pub fn cells(&self) -> &[RgbaCell] {
        &self.cells
    }

    /// Flat byte view, `4 * width * height` long
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.cells)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Pack stored samples into RGBA cells.
///
/// # Errors
///
/// `NotEncodable` when either dimension is zero, `SampleCountMismatch` when
/// the sample count differs from `width * height`.
pub fn encode(stored: &[u16], dimensions: Dimensions) -> Result<RgbaBuffer> {
    check_encodable(dimensions, stored.len())?;

    let cells = stored.iter().map(|&value| RgbaCell::from_stored(value)).collect();

    Ok(RgbaBuffer { dimensions, cells })
}

/// Check that a frame of `sample_count` samples can be encoded at `dimensions`
pub fn check_encodable(dimensions: Dimensions, sample_count: usize) -> Result<()> {
    if !dimensions.is_valid() {
        return Err(FrameError::NotEncodable {
            width: dimensions.width,
            height: dimensions.height,
        });
    }

    let expected = dimensions.pixel_count();
    if sample_count != expected {
        return Err(FrameError::SampleCountMismatch {
            expected,
            actual: sample_count,
        });
    }

    Ok(())
}
