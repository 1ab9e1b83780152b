//! DICOM sources for the frame pipeline
//!
//! Opens DICOM Part 10 files or DICOM JSON datasets and reduces them to a
//! [`FrameSource`]: typed frame metadata plus the decoded first-frame samples.

mod error;
mod json;
mod metadata;
mod parser;
mod photometric;
mod pixel_data;
mod validation;

// Re-export public API
pub use error::ProcessError;
pub use json::parse_dicom_json;
pub use metadata::{FrameSource, SourceInfo};
pub use photometric::PhotometricInterpretation;
pub use pixel_data::decode_samples;

use anyhow::{Context, Result};
use dicom::object::{open_file, DefaultDicomObject, InMemDicomObject};
use std::path::Path;
use tracing::{debug, warn};

use crate::frame::FrameConfig;
use crate::types::TransferSyntax;

/// Open and parse a DICOM file
pub fn open_dicom_file(file_path: &Path) -> Result<DefaultDicomObject> {
    open_file(file_path)
        .with_context(|| format!("Failed to open DICOM file: {}", file_path.display()))
}

/// Extract frame metadata and pixel data from an opened DICOM file
pub fn extract_frame_source(obj: &DefaultDicomObject) -> Result<FrameSource> {
    let transfer_syntax = parser::extract_transfer_syntax(obj);
    extract_from_object(obj, transfer_syntax)
}

/// Extract frame metadata and pixel data from a dataset encoded with `transfer_syntax`
pub fn extract_from_object(obj: &InMemDicomObject, transfer_syntax: TransferSyntax) -> Result<FrameSource> {
    let dimensions = parser::extract_dimensions(obj);
    let rescale = parser::extract_rescale_params(obj);
    let pixel_representation = parser::extract_pixel_representation(obj);
    let window = parser::extract_window(obj);
    let photometric_interpretation = parser::extract_photometric_interpretation(obj);
    let samples_per_pixel = parser::extract_samples_per_pixel(obj);
    let (bits_allocated, bits_stored) = parser::extract_bit_depth(obj);
    let number_of_frames = parser::extract_number_of_frames(obj);

    // Validate all constraints before touching pixel data
    validation::validate_metadata(
        &photometric_interpretation,
        samples_per_pixel,
        bits_allocated,
        bits_stored,
    )?;

    if number_of_frames > 1 {
        warn!(number_of_frames, "Multi-frame object, only the first frame is loaded");
    }

    let samples = pixel_data::extract_pixel_data(obj, dimensions, &transfer_syntax)?;
    debug!(%dimensions, %transfer_syntax, samples = samples.len(), "Extracted pixel data");

    let mut config = FrameConfig::new(dimensions)
        .with_rescale(rescale)
        .with_pixel_representation(pixel_representation);
    config.window = window;

    Ok(FrameSource {
        config,
        samples,
        info: SourceInfo {
            photometric_interpretation,
            bits_stored,
            number_of_frames,
            modality: parser::extract_modality(obj),
            transfer_syntax: Some(transfer_syntax),
        },
    })
}

/// Read a frame source from disk: `*.json` as DICOM JSON, anything else as DICOM Part 10
pub fn read_frame_source(file_path: &Path) -> Result<FrameSource, ProcessError> {
    let is_json = file_path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        let text = std::fs::read_to_string(file_path)
            .with_context(|| format!("Failed to read DICOM JSON file: {}", file_path.display()))
            .map_err(ProcessError::NotADicomFile)?;
        return parse_dicom_json(&text).map_err(ProcessError::ExtractionFailed);
    }

    let obj = open_dicom_file(file_path).map_err(ProcessError::NotADicomFile)?;
    extract_frame_source(&obj).map_err(ProcessError::ExtractionFailed)
}
