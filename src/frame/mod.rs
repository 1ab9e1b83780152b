//! Single-frame pixel pipeline
//!
//! An [`ImageFrame`] starts empty and is loaded exactly once: the decoded
//! samples are normalized into the unsigned stored domain, the rescale
//! intercept absorbs the normalization shift, and the result is packed into
//! an RGBA buffer. After that only the viewport (window and zoom) changes.

mod normalization;
mod rgba;
mod viewport;
mod window;

pub use normalization::{find_min_max, find_min_sample, normalize, Normalized};
pub use rgba::{check_encodable, encode, RgbaBuffer, RgbaCell};
pub use viewport::{ViewportState, BASE_EXTENT, MIN_ZOOM};
pub use window::compute_display_range;

use crate::error::{FrameError, Result};
use crate::types::{Dimensions, DisplayRange, PixelRepresentation, RescaleParams, WindowParams};
use tracing::{debug, trace};

/// Metadata needed to load a frame, with the defaults used when tags are absent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameConfig {
    pub dimensions: Dimensions,
    pub rescale: RescaleParams,
    pub pixel_representation: PixelRepresentation,
    /// Derived from the sample range at load time when `None`
    pub window: Option<WindowParams>,
}

impl FrameConfig {
    #[must_use]
    pub fn new(dimensions: Dimensions) -> Self {
        Self {
            dimensions,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_rescale(mut self, rescale: RescaleParams) -> Self {
        self.rescale = rescale;
        self
    }

    #[must_use]
    pub fn with_pixel_representation(mut self, pixel_representation: PixelRepresentation) -> Self {
        self.pixel_representation = pixel_representation;
        self
    }

    #[must_use]
    pub fn with_window(mut self, window: WindowParams) -> Self {
        self.window = Some(window);
        self
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            dimensions: Dimensions::default(),
            rescale: RescaleParams::default(),
            pixel_representation: PixelRepresentation::Unsigned,
            window: None,
        }
    }
}

/// One grayscale frame and its live viewing state
#[derive(Debug, Clone, Default)]
pub struct ImageFrame {
    dimensions: Dimensions,
    pixel_representation: PixelRepresentation,
    rescale: RescaleParams,
    min_sample_value: i32,
    shift: u32,
    samples: Vec<u16>,
    rgba: Option<RgbaBuffer>,
    loaded_window: WindowParams,
    viewport: ViewportState,
}

impl ImageFrame {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build and load a frame in one step
    ///
    /// # Errors
    ///
    /// See [`ImageFrame::load`].
    pub fn from_samples(config: FrameConfig, samples: Vec<i16>) -> Result<Self> {
        let mut frame = Self::new();
        frame.load(config, samples)?;
        Ok(frame)
    }

    /// Normalize and encode `samples`.
    ///
    /// Every check runs before anything is mutated, so a failed load leaves
    /// the frame unloaded and unchanged.
    ///
    /// # Errors
    ///
    /// `AlreadyLoaded`, `InvalidSlope` for a zero or non-finite slope,
    /// `NotEncodable` for a zero dimension and `SampleCountMismatch` when
    /// the sample count differs from `width * height`.
    pub fn load(&mut self, config: FrameConfig, samples: Vec<i16>) -> Result<()> {
        if self.is_loaded() {
            return Err(FrameError::AlreadyLoaded);
        }
        if !config.rescale.is_valid() {
            return Err(FrameError::InvalidSlope(config.rescale.slope));
        }
        check_encodable(config.dimensions, samples.len())?;

        let normalized = normalize(samples, config.pixel_representation);
        let slope = config.rescale.slope;
        let rescale = RescaleParams::new(
            slope,
            config.rescale.intercept + normalized.intercept_delta(slope),
        );
        debug!(
            min_sample_value = normalized.min_sample_value,
            shift = normalized.shift,
            %rescale,
            "Normalized samples"
        );

        let rgba = encode(&normalized.stored, config.dimensions)?;

        let window = match config.window {
            Some(window) => window,
            None => {
                let window = default_window(&normalized.stored, rescale);
                debug!(%window, "No window in metadata, derived from sample range");
                window
            }
        };

        self.dimensions = config.dimensions;
        self.pixel_representation = config.pixel_representation;
        self.rescale = rescale;
        self.min_sample_value = normalized.min_sample_value;
        self.shift = normalized.shift;
        self.samples = normalized.stored;
        self.rgba = Some(rgba);
        self.loaded_window = window;
        self.viewport = ViewportState::new(window, MIN_ZOOM);

        debug!(dimensions = %self.dimensions, "Frame loaded");
        Ok(())
    }

    #[inline]
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.rgba.is_some()
    }

    #[inline]
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    #[inline]
    #[must_use]
    pub fn pixel_representation(&self) -> PixelRepresentation {
        self.pixel_representation
    }

    /// Rescale describing stored samples, intercept already corrected for the shift
    #[inline]
    #[must_use]
    pub fn rescale(&self) -> RescaleParams {
        self.rescale
    }

    #[inline]
    #[must_use]
    pub fn min_sample_value(&self) -> i32 {
        self.min_sample_value
    }

    #[inline]
    #[must_use]
    pub fn shift(&self) -> u32 {
        self.shift
    }

    /// # Errors
    ///
    /// `NotLoaded` before a successful load.
    pub fn rgba(&self) -> Result<&RgbaBuffer> {
        self.rgba.as_ref().ok_or(FrameError::NotLoaded)
    }

    /// # Errors
    ///
    /// `NotLoaded` before a successful load.
    pub fn stored_samples(&self) -> Result<&[u16]> {
        if self.is_loaded() {
            Ok(&self.samples)
        } else {
            Err(FrameError::NotLoaded)
        }
    }

    /// Visible range in stored units for the current window
    ///
    /// # Errors
    ///
    /// `NotLoaded` before a successful load.
    pub fn display_range(&self) -> Result<DisplayRange> {
        if !self.is_loaded() {
            return Err(FrameError::NotLoaded);
        }
        Ok(compute_display_range(self.viewport.window(), self.rescale))
    }

    #[inline]
    #[must_use]
    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    pub fn adjust_window_width(&mut self, delta: f64) {
        self.viewport.adjust_window_width(delta);
        trace!(width = self.viewport.window_width(), "Window width adjusted");
    }

    pub fn adjust_window_center(&mut self, delta: f64) {
        self.viewport.adjust_window_center(delta);
        trace!(center = self.viewport.window_center(), "Window center adjusted");
    }

    pub fn adjust_zoom(&mut self, delta: f64) {
        self.viewport.adjust_zoom(delta);
        trace!(zoom = self.viewport.zoom_ratio(), "Zoom adjusted");
    }

    /// Back to the window resolved at load time and native zoom
    pub fn reset_viewport(&mut self) {
        self.viewport = ViewportState::new(self.loaded_window, MIN_ZOOM);
    }

    #[inline]
    #[must_use]
    pub fn scale_x(&self) -> f64 {
        self.viewport.scale_x(self.dimensions)
    }

    #[inline]
    #[must_use]
    pub fn scale_y(&self) -> f64 {
        self.viewport.scale_y(self.dimensions)
    }
}

/// Window spanning the whole sample range, in real-world units
fn default_window(stored: &[u16], rescale: RescaleParams) -> WindowParams {
    let Some((min, max)) = find_min_max(stored) else {
        return WindowParams::new(rescale.intercept, 1.0);
    };

    let a = rescale.apply(f64::from(min));
    let b = rescale.apply(f64::from(max));
    let (low, high) = if a <= b { (a, b) } else { (b, a) };

    WindowParams::new((low + high) / 2.0, (high - low).max(1.0))
}
