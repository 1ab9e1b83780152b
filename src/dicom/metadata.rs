//! Decoded frame source handed to the pixel pipeline

use super::photometric::PhotometricInterpretation;
use crate::frame::FrameConfig;
use crate::types::TransferSyntax;

/// Descriptive fields that travel with a frame but do not affect the pixels
#[derive(Debug, Clone, Default)]
pub struct SourceInfo {
    pub photometric_interpretation: PhotometricInterpretation,
    pub bits_stored: u16,
    /// Frames present in the source; only the first is loaded
    pub number_of_frames: u32,
    pub modality: Option<String>,
    pub transfer_syntax: Option<TransferSyntax>,
}

/// Typed metadata plus the decoded first-frame samples
#[derive(Debug, Clone)]
pub struct FrameSource {
    pub config: FrameConfig,
    pub samples: Vec<i16>,
    pub info: SourceInfo,
}
