//! Domain-specific value types shared by the frame pipeline and its adapters

use std::fmt;

/// DICOM transfer syntax (UID, name)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferSyntax {
    pub uid: String,
    pub name: String,
}

impl TransferSyntax {
    #[must_use]
    pub fn new(uid: String, name: String) -> Self {
        Self { uid, name }
    }

    #[inline]
    #[must_use]
    #[allow(deprecated)] // Explicit VR Big Endian is retired but still in use
    pub fn is_big_endian(&self) -> bool {
        self.uid == dicom::dictionary_std::uids::EXPLICIT_VR_BIG_ENDIAN
    }
}

impl fmt::Display for TransferSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{name} ({uid})", name = self.name, uid = self.uid)
    }
}

/// Frame size in pixels. Zero in either axis means "not configured yet".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    #[must_use]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{width}x{height}", width = self.width, height = self.height)
    }
}

/// Whether stored samples are unsigned or two's complement (tag 0028,0103)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelRepresentation {
    #[default]
    Unsigned,
    Signed,
}

impl PixelRepresentation {
    /// Map the raw tag value; anything other than 1 is treated as unsigned
    #[must_use]
    pub fn from_tag_value(value: u16) -> Self {
        if value == 1 { Self::Signed } else { Self::Unsigned }
    }

    #[inline]
    #[must_use]
    pub fn is_signed(&self) -> bool {
        matches!(self, Self::Signed)
    }
}

impl fmt::Display for PixelRepresentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsigned => write!(f, "unsigned"),
            Self::Signed => write!(f, "signed"),
        }
    }
}

/// Rescale parameters for converting stored pixel values to real-world units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RescaleParams {
    pub slope: f64,
    pub intercept: f64,
}

impl RescaleParams {
    #[must_use]
    pub fn new(slope: f64, intercept: f64) -> Self {
        Self { slope, intercept }
    }

    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.slope != 0.0 && self.slope.is_finite()
    }

    #[inline(always)]
    #[must_use]
    // Hot path: called for every pixel when deriving a default window
    pub fn apply(&self, stored: f64) -> f64 {
        stored.mul_add(self.slope, self.intercept)
    }

    /// Map a real-world value back into stored-sample units
    #[inline]
    #[must_use]
    pub fn invert(&self, value: f64) -> f64 {
        (value - self.intercept) / self.slope
    }
}

impl Default for RescaleParams {
    fn default() -> Self {
        Self {
            slope: 1.0,
            intercept: 0.0,
        }
    }
}

impl fmt::Display for RescaleParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "slope={slope}, intercept={intercept}",
            slope = self.slope,
            intercept = self.intercept
        )
    }
}

/// Window center and width, in real-world (rescaled) units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WindowParams {
    pub center: f64,
    pub width: f64,
}

impl WindowParams {
    #[must_use]
    pub fn new(center: f64, width: f64) -> Self {
        Self { center, width }
    }
}

impl fmt::Display for WindowParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "center={center}, width={width}",
            center = self.center,
            width = self.width
        )
    }
}

/// Inclusive visible range in stored-sample units.
///
/// `lower > upper` is a valid result describing an empty range; consumers
/// decide how to show it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayRange {
    pub lower: i64,
    pub upper: i64,
}

impl DisplayRange {
    #[must_use]
    pub fn new(lower: i64, upper: i64) -> Self {
        Self { lower, upper }
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lower > self.upper
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, stored: i64) -> bool {
        self.lower <= stored && stored <= self.upper
    }

    /// True when no part of the range overlaps the 16-bit stored domain
    #[must_use]
    pub fn is_outside_stored_domain(&self) -> bool {
        self.upper < 0 || self.lower > i64::from(u16::MAX)
    }
}

impl fmt::Display for DisplayRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{lower}, {upper}]", lower = self.lower, upper = self.upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_pixel_representation_from_tag() {
        assert_eq!(PixelRepresentation::from_tag_value(0), PixelRepresentation::Unsigned);
        assert_eq!(PixelRepresentation::from_tag_value(1), PixelRepresentation::Signed);
        assert_eq!(PixelRepresentation::from_tag_value(7), PixelRepresentation::Unsigned);
        assert_eq!(PixelRepresentation::default(), PixelRepresentation::Unsigned);
    }

    #[test]
    fn test_rescale_apply_and_invert() {
        let rescale = RescaleParams::new(2.0, -1024.0);
        assert_relative_eq!(rescale.apply(512.0), 0.0);
        assert_relative_eq!(rescale.invert(0.0), 512.0);
        assert_relative_eq!(rescale.invert(rescale.apply(1234.0)), 1234.0);
    }

    #[test]
    fn test_rescale_validity() {
        assert!(RescaleParams::default().is_valid());
        assert!(!RescaleParams::new(0.0, 0.0).is_valid());
        assert!(!RescaleParams::new(f64::NAN, 0.0).is_valid());
        assert!(RescaleParams::new(-1.0, 10.0).is_valid());
    }

    #[test]
    fn test_display_range_emptiness() {
        assert!(!DisplayRange::new(255, 355).is_empty());
        assert!(!DisplayRange::new(10, 10).is_empty());
        assert!(DisplayRange::new(11, 10).is_empty());
        assert!(DisplayRange::new(-300, -10).is_outside_stored_domain());
        assert!(DisplayRange::new(70000, 80000).is_outside_stored_domain());
        assert!(!DisplayRange::new(-10, 10).is_outside_stored_domain());
    }

    #[test]
    fn test_dimensions() {
        assert!(!Dimensions::default().is_valid());
        assert!(!Dimensions::new(0, 10).is_valid());
        assert_eq!(Dimensions::new(3, 4).pixel_count(), 12);
        assert_eq!(Dimensions::new(3, 4).to_string(), "3x4");
    }
}
