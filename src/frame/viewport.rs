//! Interactive viewing parameters
//!
//! The viewer mutates window center/width and zoom through bounded
//! increments. None of these touch the encoded pixels.

use crate::types::{Dimensions, WindowParams};

/// Base extent of the longer image axis, in zoom units
pub const BASE_EXTENT: f64 = 2.0;

pub const MIN_ZOOM: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    window: WindowParams,
    zoom_ratio: f64,
}

impl ViewportState {
    /// Negative widths are clamped to 0 and zooms below 1.0 to 1.0
    #[must_use]
    pub fn new(window: WindowParams, zoom_ratio: f64) -> Self {
        Self {
            window: WindowParams::new(window.center, window.width.max(0.0)),
            zoom_ratio: zoom_ratio.max(MIN_ZOOM),
        }
    }

    #[inline]
    #[must_use]
    pub fn window(&self) -> WindowParams {
        self.window
    }

    #[inline]
    #[must_use]
    pub fn window_center(&self) -> f64 {
        self.window.center
    }

    #[inline]
    #[must_use]
    pub fn window_width(&self) -> f64 {
        self.window.width
    }

    #[inline]
    #[must_use]
    pub fn zoom_ratio(&self) -> f64 {
        self.zoom_ratio
    }

    /// Non-finite deltas are ignored by all three adjustments
    pub fn adjust_window_width(&mut self, delta: f64) {
        if !delta.is_finite() {
            return;
        }
        self.window.width += delta;
        if self.window.width < 0.0 {
            self.window.width = 0.0;
        }
    }

    /// Unbounded; centers outside the data yield an empty display range
    pub fn adjust_window_center(&mut self, delta: f64) {
        if delta.is_finite() {
            self.window.center += delta;
        }
    }

    /// Shrinking stops at native scale, growth is unbounded
    pub fn adjust_zoom(&mut self, delta: f64) {
        if !delta.is_finite() {
            return;
        }
        self.zoom_ratio += delta;
        if delta < 0.0 && self.zoom_ratio < MIN_ZOOM {
            self.zoom_ratio = MIN_ZOOM;
        }
    }

    /// Horizontal scale: the longer axis spans `BASE_EXTENT`, the shorter one
    /// keeps the frame's aspect ratio, both multiplied by the zoom ratio.
    #[must_use]
    pub fn scale_x(&self, dimensions: Dimensions) -> f64 {
        let base = if dimensions.height > dimensions.width {
            BASE_EXTENT * f64::from(dimensions.width) / f64::from(dimensions.height)
        } else {
            BASE_EXTENT
        };
        base * self.zoom_ratio
    }

    #[must_use]
    pub fn scale_y(&self, dimensions: Dimensions) -> f64 {
        let base = if dimensions.width > dimensions.height {
            BASE_EXTENT * f64::from(dimensions.height) / f64::from(dimensions.width)
        } else {
            BASE_EXTENT
        };
        base * self.zoom_ratio
    }
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            window: WindowParams::new(0.0, 0.0),
            zoom_ratio: MIN_ZOOM,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_width_clamps_at_zero() {
        let mut viewport = ViewportState::new(WindowParams::new(40.0, 100.0), 1.0);
        viewport.adjust_window_width(-30.0);
        assert_relative_eq!(viewport.window_width(), 70.0);
        viewport.adjust_window_width(-500.0);
        assert_relative_eq!(viewport.window_width(), 0.0);
        viewport.adjust_window_width(25.0);
        assert_relative_eq!(viewport.window_width(), 25.0);
    }

    #[test]
    fn test_center_is_unbounded() {
        let mut viewport = ViewportState::default();
        viewport.adjust_window_center(-1500.0);
        assert_relative_eq!(viewport.window_center(), -1500.0);
        viewport.adjust_window_center(0.0);
        assert_relative_eq!(viewport.window_center(), -1500.0);
    }

    #[test]
    fn test_zoom_floor_and_growth() {
        let mut viewport = ViewportState::default();
        viewport.adjust_zoom(-0.5);
        assert_relative_eq!(viewport.zoom_ratio(), 1.0);
        viewport.adjust_zoom(2.5);
        assert_relative_eq!(viewport.zoom_ratio(), 3.5);
        viewport.adjust_zoom(-1.0);
        assert_relative_eq!(viewport.zoom_ratio(), 2.5);
        viewport.adjust_zoom(-10.0);
        assert_relative_eq!(viewport.zoom_ratio(), 1.0);
    }

    #[test]
    fn test_bounds_hold_for_delta_sequences() {
        let deltas = [-3.0, 0.25, -0.75, 12.0, -40.0, 0.0, 1e-3, -1e-3, 7.5, -7.4999];
        let mut viewport = ViewportState::new(WindowParams::new(0.0, 10.0), 1.0);

        for (i, &delta) in deltas.iter().cycle().take(200).enumerate() {
            let scaled = delta * (i % 7) as f64;
            viewport.adjust_zoom(scaled);
            viewport.adjust_window_width(scaled * 3.0);
            assert!(viewport.zoom_ratio() >= 1.0);
            assert!(viewport.window_width() >= 0.0);
        }

        for delta in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            viewport.adjust_zoom(delta);
            viewport.adjust_window_width(delta);
            viewport.adjust_window_center(delta);
            assert!(viewport.zoom_ratio() >= 1.0);
            assert!(viewport.window_width() >= 0.0);
            assert!(viewport.window_center().is_finite());
        }
    }

    #[test]
    fn test_new_clamps_inputs() {
        let viewport = ViewportState::new(WindowParams::new(5.0, -20.0), 0.25);
        assert_relative_eq!(viewport.window_width(), 0.0);
        assert_relative_eq!(viewport.zoom_ratio(), 1.0);
    }

    #[test]
    fn test_scale_tall_frame() {
        let mut viewport = ViewportState::default();
        let dims = Dimensions::new(256, 512);
        assert_relative_eq!(viewport.scale_x(dims), 1.0);
        assert_relative_eq!(viewport.scale_y(dims), 2.0);

        viewport.adjust_zoom(1.0);
        assert_relative_eq!(viewport.scale_x(dims), 2.0);
        assert_relative_eq!(viewport.scale_y(dims), 4.0);
    }

    #[test]
    fn test_scale_wide_frame() {
        let viewport = ViewportState::default();
        let dims = Dimensions::new(400, 100);
        assert_relative_eq!(viewport.scale_x(dims), 2.0);
        assert_relative_eq!(viewport.scale_y(dims), 0.5);
    }

    #[test]
    fn test_scale_square_frame() {
        let viewport = ViewportState::new(WindowParams::new(0.0, 0.0), 1.5);
        let dims = Dimensions::new(64, 64);
        assert_relative_eq!(viewport.scale_x(dims), 3.0);
        assert_relative_eq!(viewport.scale_y(dims), 3.0);
    }
}
