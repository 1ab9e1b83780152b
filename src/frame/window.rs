//! Real-world window to stored-sample display range

use crate::types::{DisplayRange, RescaleParams, WindowParams};

/// Convert a window in real-world units to inclusive bounds in stored units.
///
/// Inverts the rescale: `center' = (center - intercept) / slope`,
/// `half' = (width / slope) / 2`, then floors `center' -/+ half'`.
/// The slope must be non-zero; `ImageFrame::load` rejects zero slopes.
#[must_use]
pub fn compute_display_range(window: WindowParams, rescale: RescaleParams) -> DisplayRange {
    let center = rescale.invert(window.center);
    let half_width = (window.width / rescale.slope) / 2.0;

    DisplayRange::new(
        (center - half_width).floor() as i64,
        (center + half_width).floor() as i64,
    )
}
