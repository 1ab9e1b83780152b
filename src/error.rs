use thiserror::Error;

/// Failures of the frame pipeline. None of them are fatal; the frame stays
/// usable (and unloaded) after a failed load.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FrameError {
    #[error("Frame is not loaded")]
    NotLoaded,

    #[error("Frame is not encodable: dimensions {width}x{height}")]
    NotEncodable { width: u32, height: u32 },

    #[error("Invalid rescale slope: {0}")]
    InvalidSlope(f64),

    #[error("Sample count mismatch: expected {expected}, got {actual}")]
    SampleCountMismatch { expected: usize, actual: usize },

    #[error("Frame is already loaded")]
    AlreadyLoaded,
}

pub type Result<T> = std::result::Result<T, FrameError>;
