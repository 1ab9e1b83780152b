//! Re-basing of signed samples into the unsigned 16-bit stored domain
//!
//! Signed frames can hold negative samples, which the two-byte RGBA packing
//! cannot express. Normalization adds a constant shift so that the smallest
//! sample lands on zero, and reports the matching intercept correction in
//! the same result so the two can never be applied separately.

use crate::types::PixelRepresentation;

/// Samples after normalization, with the shift that produced them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    /// Samples in the stored domain, row-major
    pub stored: Vec<u16>,
    /// True minimum of the source samples; 0 for unsigned or empty frames
    pub min_sample_value: i32,
    /// Constant added to every source sample (0..=32768)
    pub shift: u32,
}

impl Normalized {
    /// Intercept correction that keeps `slope * stored + intercept` equal to
    /// the real-world value of the original sample
    #[inline]
    #[must_use]
    pub fn intercept_delta(&self, slope: f64) -> f64 {
        -slope * f64::from(self.shift)
    }
}

/// Normalize one frame of decoded samples.
///
/// Unsigned frames are reinterpreted bit-for-bit (the transport decodes every
/// frame as `i16`). Signed frames are scanned once for their minimum and, if
/// it is negative, shifted up by its magnitude.
#[must_use]
pub fn normalize(samples: Vec<i16>, representation: PixelRepresentation) -> Normalized {
    if !representation.is_signed() {
        return Normalized {
            stored: samples.into_iter().map(|s| s as u16).collect(),
            min_sample_value: 0,
            shift: 0,
        };
    }

    let min_sample_value = find_min_sample(&samples);
    let shift = if min_sample_value < 0 {
        min_sample_value.unsigned_abs()
    } else {
        0
    };

    // sample + shift always lies in 0..=u16::MAX because sample >= min
    let stored = samples
        .into_iter()
        .map(|s| (i32::from(s) + shift as i32) as u16)
        .collect();

    Normalized {
        stored,
        min_sample_value,
        shift,
    }
}

/// Minimum of the samples, or 0 for an empty frame
#[inline]
#[must_use]
pub fn find_min_sample(samples: &[i16]) -> i32 {
    samples.iter().copied().min().map_or(0, i32::from)
}

#[inline]
#[must_use]
pub fn find_min_max(values: &[u16]) -> Option<(u16, u16)> {
    let first = *values.first()?;
    Some(
        values
            .iter()
            .fold((first, first), |(min, max), &val| (min.min(val), max.max(val))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_unsigned_is_identity() {
        let samples = vec![0_i16, 1, 300, 4095, i16::MAX];
        let normalized = normalize(samples.clone(), PixelRepresentation::Unsigned);

        assert_eq!(normalized.shift, 0);
        assert_eq!(normalized.min_sample_value, 0);
        let expected: Vec<u16> = samples.iter().map(|&s| s as u16).collect();
        assert_eq!(normalized.stored, expected);
        assert_relative_eq!(normalized.intercept_delta(1.0), 0.0);
    }

    #[test]
    fn test_unsigned_reinterprets_high_values() {
        // 0xFFFF arrives as -1 from an i16 transport; unsigned frames keep the bit pattern
        let normalized = normalize(vec![-1, i16::MIN], PixelRepresentation::Unsigned);
        assert_eq!(normalized.stored, vec![u16::MAX, 0x8000]);
        assert_eq!(normalized.shift, 0);
    }

    #[test]
    fn test_signed_negative_minimum_shifts() {
        let normalized = normalize(vec![300, -5], PixelRepresentation::Signed);

        assert_eq!(normalized.min_sample_value, -5);
        assert_eq!(normalized.shift, 5);
        assert_eq!(normalized.stored, vec![305, 0]);
        assert_relative_eq!(normalized.intercept_delta(1.0), -5.0);
    }

    #[test]
    fn test_signed_non_negative_minimum_untouched() {
        let normalized = normalize(vec![12, 7, 900], PixelRepresentation::Signed);

        assert_eq!(normalized.min_sample_value, 7);
        assert_eq!(normalized.shift, 0);
        assert_eq!(normalized.stored, vec![12, 7, 900]);
    }

    #[test]
    fn test_signed_full_range_does_not_wrap() {
        let normalized = normalize(vec![i16::MIN, 0, i16::MAX], PixelRepresentation::Signed);

        assert_eq!(normalized.shift, 32768);
        assert_eq!(normalized.stored, vec![0, 32768, u16::MAX]);
    }

    #[test]
    fn test_signed_every_sample_is_original_plus_shift() {
        let samples: Vec<i16> = (-40..40).map(|v| v * 37).collect();
        let normalized = normalize(samples.clone(), PixelRepresentation::Signed);
        let min = i32::from(*samples.iter().min().unwrap());

        assert_eq!(normalized.min_sample_value, min);
        for (original, stored) in samples.iter().zip(&normalized.stored) {
            assert_eq!(i32::from(*stored), i32::from(*original) - min);
        }
    }

    #[test]
    fn test_empty_signed_frame() {
        let normalized = normalize(Vec::new(), PixelRepresentation::Signed);
        assert_eq!(normalized.min_sample_value, 0);
        assert_eq!(normalized.shift, 0);
        assert!(normalized.stored.is_empty());
    }

    #[test]
    fn test_intercept_delta_scales_with_slope() {
        let normalized = normalize(vec![-100, 50], PixelRepresentation::Signed);
        assert_relative_eq!(normalized.intercept_delta(2.5), -250.0);
    }

    #[test]
    fn test_find_min_max() {
        assert_eq!(find_min_max(&[]), None);
        assert_eq!(find_min_max(&[5, 2, 9, 4]), Some((2, 9)));
    }
}
