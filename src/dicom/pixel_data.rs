//! DICOM pixel data extraction
//!
//! Reads native (uncompressed) 16-bit pixel data as signed samples. Only the
//! first frame is returned; the pipeline is single-frame.

use anyhow::{bail, Context, Result};
use dicom::core::PrimitiveValue;
use dicom::dictionary_std::tags;
use dicom::object::InMemDicomObject;

use crate::types::{Dimensions, TransferSyntax};

/// Extract the first frame's samples, honoring the transfer syntax byte order
pub fn extract_pixel_data(
    obj: &InMemDicomObject,
    dimensions: Dimensions,
    transfer_syntax: &TransferSyntax,
) -> Result<Vec<i16>> {
    if detect_compression(&transfer_syntax.uid) {
        bail!("Compressed pixel data is not supported: {transfer_syntax}");
    }

    let pixel_data_obj = obj
        .get(tags::PIXEL_DATA)
        .context("Missing pixel data")?;

    // Words were already swapped to native order by the parser; only raw
    // byte values still carry the transfer syntax byte order
    let samples = match pixel_data_obj.value().primitive() {
        Some(PrimitiveValue::U16(words)) => {
            keep_first_frame(words.iter().map(|&w| w as i16).collect(), dimensions)
        }
        Some(PrimitiveValue::I16(words)) => keep_first_frame(words.to_vec(), dimensions),
        _ => {
            let raw_bytes = pixel_data_obj
                .to_bytes()
                .context("Failed to get raw pixel data bytes")?;
            decode_samples(&raw_bytes, dimensions, transfer_syntax.is_big_endian())?
        }
    };

    Ok(samples)
}

/// Turn raw 16-bit pixel bytes into signed samples, keeping the first frame
pub fn decode_samples(raw_bytes: &[u8], dimensions: Dimensions, big_endian: bool) -> Result<Vec<i16>> {
    if !raw_bytes.len().is_multiple_of(2) {
        bail!("Invalid 16-bit pixel data length: {}", raw_bytes.len());
    }

    let samples = if big_endian {
        raw_bytes
            .chunks_exact(2)
            .map(|chunk| i16::from_be_bytes([chunk[0], chunk[1]]))
            .collect()
    } else {
        raw_bytes
            .chunks_exact(2)
            .map(|chunk| i16::from_le_bytes([chunk[0], chunk[1]]))
            .collect()
    };

    Ok(keep_first_frame(samples, dimensions))
}

/// Drop samples past the first frame. Unknown dimensions keep everything so
/// the size check at load time reports the mismatch.
fn keep_first_frame(mut samples: Vec<i16>, dimensions: Dimensions) -> Vec<i16> {
    let frame_len = dimensions.pixel_count();
    if frame_len > 0 && samples.len() > frame_len {
        samples.truncate(frame_len);
    }
    samples
}

/// Detect if transfer syntax uses compression
#[inline]
#[must_use]
pub fn detect_compression(uid: &str) -> bool {
    uid.starts_with("1.2.840.10008.1.2.4")   // JPEG family, JPEG-LS, JPEG 2000
        || uid.starts_with("1.2.840.10008.1.2.5")   // RLE lossless
        || uid == "1.2.840.10008.1.2.1.99"  // Deflated explicit VR little endian
}

#[cfg(test)]
mod tests {
    use super::*;
    use dicom::core::{DataElement, VR};

    fn little_endian() -> TransferSyntax {
        TransferSyntax::new(
            "1.2.840.10008.1.2.1".to_string(),
            "Explicit VR Little Endian".to_string(),
        )
    }

    #[test]
    fn test_decode_little_endian() {
        let bytes = [0x31, 0x01, 0xFB, 0xFF];
        let samples = decode_samples(&bytes, Dimensions::new(2, 1), false).unwrap();
        assert_eq!(samples, vec![305, -5]);
    }

    #[test]
    fn test_decode_big_endian() {
        let bytes = [0x01, 0x31, 0xFF, 0xFB];
        let samples = decode_samples(&bytes, Dimensions::new(2, 1), true).unwrap();
        assert_eq!(samples, vec![305, -5]);
    }

    #[test]
    fn test_decode_keeps_first_frame_only() {
        let bytes: Vec<u8> = (0..8).collect();
        let samples = decode_samples(&bytes, Dimensions::new(1, 2), false).unwrap();
        assert_eq!(samples, vec![0x0100, 0x0302]);
    }

    #[test]
    fn test_decode_odd_length_rejected() {
        let err = decode_samples(&[1, 2, 3], Dimensions::new(1, 1), false).unwrap_err();
        assert!(err.to_string().contains("Invalid 16-bit pixel data length"));
    }

    #[test]
    fn test_detect_compression() {
        assert!(detect_compression("1.2.840.10008.1.2.4.50"));
        assert!(detect_compression("1.2.840.10008.1.2.4.90"));
        assert!(detect_compression("1.2.840.10008.1.2.5"));
        assert!(!detect_compression("1.2.840.10008.1.2"));
        assert!(!detect_compression("1.2.840.10008.1.2.1"));
        assert!(!detect_compression("1.2.840.10008.1.2.2"));
    }

    #[test]
    fn test_extract_from_object() {
        let obj: InMemDicomObject = InMemDicomObject::from_element_iter([DataElement::new(
            tags::PIXEL_DATA,
            VR::OW,
            PrimitiveValue::U8(vec![0x31, 0x01, 0xFB, 0xFF].into()),
        )]);

        let samples = extract_pixel_data(&obj, Dimensions::new(2, 1), &little_endian()).unwrap();
        assert_eq!(samples, vec![305, -5]);
    }

    #[test]
    fn test_extract_native_words_ignore_byte_order() {
        let obj: InMemDicomObject = InMemDicomObject::from_element_iter([DataElement::new(
            tags::PIXEL_DATA,
            VR::OW,
            PrimitiveValue::U16([305_u16, 0xFFFB, 7].as_slice().into()),
        )]);
        let big_endian = TransferSyntax::new("1.2.840.10008.1.2.2".to_string(), "Explicit VR Big Endian".to_string());

        let samples = extract_pixel_data(&obj, Dimensions::new(2, 1), &big_endian).unwrap();
        assert_eq!(samples, vec![305, -5]);
    }

    #[test]
    fn test_extract_compressed_rejected() {
        let obj: InMemDicomObject = InMemDicomObject::from_element_iter([]);
        let jpeg = TransferSyntax::new("1.2.840.10008.1.2.4.50".to_string(), "JPEG Baseline".to_string());

        let err = extract_pixel_data(&obj, Dimensions::new(1, 1), &jpeg).unwrap_err();
        assert!(err.to_string().contains("Compressed pixel data is not supported"));
    }

    #[test]
    fn test_extract_missing_pixel_data() {
        let obj: InMemDicomObject = InMemDicomObject::from_element_iter([]);
        let err = extract_pixel_data(&obj, Dimensions::new(1, 1), &little_endian()).unwrap_err();
        assert!(err.to_string().contains("Missing pixel data"));
    }
}
