//! DICOM JSON model input (PS3.18 Annex F)
//!
//! A dataset is an object keyed by eight-digit hex tags, each element
//! carrying a `vr` and either a `Value` array or, for pixel data, a base64
//! `InlineBinary`. Web viewers typically receive frames this way.

use anyhow::{bail, Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use dicom::core::Tag;
use dicom::dictionary_std::tags;
use serde_json::{Map, Value};
use tracing::debug;

use super::metadata::{FrameSource, SourceInfo};
use super::parser::parse_multi_valued_number;
use super::pixel_data::decode_samples;
use super::{validation, PhotometricInterpretation};
use crate::frame::FrameConfig;
use crate::types::{Dimensions, PixelRepresentation, RescaleParams, WindowParams};

/// Parse a DICOM JSON dataset. A top-level array uses its first dataset.
pub fn parse_dicom_json(text: &str) -> Result<FrameSource> {
    let root: Value = serde_json::from_str(text).context("Invalid JSON")?;

    let dataset = match &root {
        Value::Object(map) => map,
        Value::Array(items) => items
            .first()
            .and_then(Value::as_object)
            .context("DICOM JSON array holds no dataset")?,
        _ => bail!("DICOM JSON root must be an object or an array of objects"),
    };

    extract_from_dataset(dataset)
}

fn extract_from_dataset(dataset: &Map<String, Value>) -> Result<FrameSource> {
    let dimensions = Dimensions::new(
        first_number(dataset, tags::COLUMNS).map_or(0, |v| v as u32),
        first_number(dataset, tags::ROWS).map_or(0, |v| v as u32),
    );

    let defaults = RescaleParams::default();
    let rescale = RescaleParams::new(
        first_number(dataset, tags::RESCALE_SLOPE).unwrap_or(defaults.slope),
        first_number(dataset, tags::RESCALE_INTERCEPT).unwrap_or(defaults.intercept),
    );

    let pixel_representation = first_number(dataset, tags::PIXEL_REPRESENTATION)
        .map_or(PixelRepresentation::default(), |v| PixelRepresentation::from_tag_value(v as u16));

    let window = first_number(dataset, tags::WINDOW_CENTER)
        .zip(first_number(dataset, tags::WINDOW_WIDTH))
        .map(|(center, width)| WindowParams::new(center, width));

    let photometric_interpretation = first_string(dataset, tags::PHOTOMETRIC_INTERPRETATION)
        .map_or_else(PhotometricInterpretation::default, |s| PhotometricInterpretation::parse(&s));
    let samples_per_pixel = first_number(dataset, tags::SAMPLES_PER_PIXEL).map_or(1, |v| v as u16);
    let bits_allocated = first_number(dataset, tags::BITS_ALLOCATED).map_or(16, |v| v as u16);
    let bits_stored = first_number(dataset, tags::BITS_STORED).map_or(bits_allocated, |v| v as u16);
    let number_of_frames = first_number(dataset, tags::NUMBER_OF_FRAMES).map_or(1, |v| v as u32);

    validation::validate_metadata(
        &photometric_interpretation,
        samples_per_pixel,
        bits_allocated,
        bits_stored,
    )?;

    let pixel_bytes = inline_binary(dataset, tags::PIXEL_DATA)?;
    let samples = decode_samples(&pixel_bytes, dimensions, false)?;
    debug!(%dimensions, samples = samples.len(), "Decoded DICOM JSON pixel data");

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
            modality: first_string(dataset, tags::MODALITY),
            transfer_syntax: None,
        },
    })
}

fn tag_key(tag: Tag) -> String {
    format!("{:04X}{:04X}", tag.group(), tag.element())
}

fn first_value(dataset: &Map<String, Value>, tag: Tag) -> Option<&Value> {
    dataset.get(&tag_key(tag))?.get("Value")?.as_array()?.first()
}

/// Numbers may arrive as JSON numbers or, for DS/IS, as strings
fn first_number(dataset: &Map<String, Value>, tag: Tag) -> Option<f64> {
    match first_value(dataset, tag)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_multi_valued_number(s),
        _ => None,
    }
}

fn first_string(dataset: &Map<String, Value>, tag: Tag) -> Option<String> {
    first_value(dataset, tag)?
        .as_str()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn inline_binary(dataset: &Map<String, Value>, tag: Tag) -> Result<Vec<u8>> {
    let element = dataset
        .get(&tag_key(tag))
        .context("Missing pixel data")?;

    if element.get("BulkDataURI").is_some() {
        bail!("Bulk data references are not supported; pixel data must be inline");
    }

    let encoded = element
        .get("InlineBinary")
        .and_then(Value::as_str)
        .context("Pixel data has no InlineBinary value")?;

    STANDARD
        .decode(encoded.trim())
        .context("Failed to decode base64 pixel data")
}
