use anyhow::{bail, Result};
use crate::dicom::PhotometricInterpretation;

#[inline]
pub fn validate_photometric_samples(
    photometric_interpretation: &PhotometricInterpretation,
    samples_per_pixel: u16,
) -> Result<()> {
    if !photometric_interpretation.is_grayscale() {
        bail!(
            "Unsupported photometric interpretation: {photometric_interpretation} (only MONOCHROME1 and MONOCHROME2 can be windowed)"
        );
    }

    if samples_per_pixel != 1 {
        bail!(
            "Inconsistent photometric interpretation {photometric_interpretation} with samples per pixel {samples_per_pixel}"
        );
    }

    Ok(())
}

#[inline]
pub fn validate_bit_depth(bits_allocated: u16, bits_stored: u16) -> Result<()> {
    if bits_allocated != 16 {
        bail!("Unsupported bits allocated: {bits_allocated} (expected 16)");
    }

    if bits_stored > bits_allocated {
        bail!("Bits stored ({bits_stored}) exceeds bits allocated ({bits_allocated})");
    }

    Ok(())
}

pub fn validate_metadata(
    photometric_interpretation: &PhotometricInterpretation,
    samples_per_pixel: u16,
    bits_allocated: u16,
    bits_stored: u16,
) -> Result<()> {
    validate_photometric_samples(photometric_interpretation, samples_per_pixel)?;
    validate_bit_depth(bits_allocated, bits_stored)?;
    Ok(())
}
