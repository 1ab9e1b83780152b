use crate::types::{Dimensions, PixelRepresentation, RescaleParams, TransferSyntax, WindowParams};
use dicom::core::Tag;
use dicom::dictionary_std::tags;
use dicom::encoding::TransferSyntaxIndex;
use dicom::object::{FileDicomObject, InMemDicomObject};
use dicom::transfer_syntax::TransferSyntaxRegistry;

use super::PhotometricInterpretation;

/// Columns and Rows; a missing tag reads as 0 and is rejected at load time
pub fn extract_dimensions(obj: &InMemDicomObject) -> Dimensions {
    let width = obj
        .get(tags::COLUMNS)
        .and_then(|e| e.to_int::<u32>().ok())
        .unwrap_or(0);

    let height = obj
        .get(tags::ROWS)
        .and_then(|e| e.to_int::<u32>().ok())
        .unwrap_or(0);

    Dimensions::new(width, height)
}

pub fn extract_rescale_params(obj: &InMemDicomObject) -> RescaleParams {
    // Only CT/PET-like modalities carry these; everything else uses the identity map
    let defaults = RescaleParams::default();

    let slope = first_number(obj, tags::RESCALE_SLOPE).unwrap_or(defaults.slope);
    let intercept = first_number(obj, tags::RESCALE_INTERCEPT).unwrap_or(defaults.intercept);

    RescaleParams::new(slope, intercept)
}

#[inline]
pub fn extract_pixel_representation(obj: &InMemDicomObject) -> PixelRepresentation {
    obj.get(tags::PIXEL_REPRESENTATION)
        .and_then(|e| e.to_int::<u16>().ok())
        .map_or(PixelRepresentation::default(), PixelRepresentation::from_tag_value)
}

/// First window of a possibly multi-valued Window Center / Window Width pair
pub fn extract_window(obj: &InMemDicomObject) -> Option<WindowParams> {
    let center = first_number(obj, tags::WINDOW_CENTER)?;
    let width = first_number(obj, tags::WINDOW_WIDTH)?;
    Some(WindowParams::new(center, width))
}

pub fn extract_photometric_interpretation(obj: &InMemDicomObject) -> PhotometricInterpretation {
    obj.get(tags::PHOTOMETRIC_INTERPRETATION)
        .and_then(|e| e.value().to_str().ok())
        .map_or_else(PhotometricInterpretation::default, |s| PhotometricInterpretation::parse(&s))
}

#[inline]
pub fn extract_number_of_frames(obj: &InMemDicomObject) -> u32 {
    obj.get(tags::NUMBER_OF_FRAMES)
        .and_then(|e| e.to_int::<u32>().ok())
        .unwrap_or(1)
}

#[inline]
pub fn extract_samples_per_pixel(obj: &InMemDicomObject) -> u16 {
    obj.get(tags::SAMPLES_PER_PIXEL)
        .and_then(|e| e.to_int::<u16>().ok())
        .unwrap_or(1)
}

/// (allocated, stored); both default to 16
pub fn extract_bit_depth(obj: &InMemDicomObject) -> (u16, u16) {
    let allocated = obj
        .get(tags::BITS_ALLOCATED)
        .and_then(|e| e.to_int::<u16>().ok())
        .unwrap_or(16);

    let stored = obj
        .get(tags::BITS_STORED)
        .and_then(|e| e.to_int::<u16>().ok())
        .unwrap_or(allocated);

    (allocated, stored)
}

pub fn extract_modality(obj: &InMemDicomObject) -> Option<String> {
    obj.get(tags::MODALITY)
        .and_then(|e| e.value().to_str().ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

pub fn extract_transfer_syntax(obj: &FileDicomObject<InMemDicomObject>) -> TransferSyntax {
    let uid = obj.meta().transfer_syntax().to_string();
    let name = TransferSyntaxRegistry
        .get(&uid)
        .map_or_else(|| "Unknown".to_string(), |ts| ts.name().to_string());

    TransferSyntax::new(uid, name)
}

/// Parse the first value of a numeric or decimal-string element
fn first_number(obj: &InMemDicomObject, tag: Tag) -> Option<f64> {
    let element = obj.get(tag)?;
    let text = element.value().to_str().ok()?;
    parse_multi_valued_number(&text)
}

/// First entry of a backslash-separated multi-value
pub fn parse_multi_valued_number(value: &str) -> Option<f64> {
    value
        .split('\\')
        .next()?
        .trim()
        .trim_end_matches('\0')
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}
