use crate::dicom::SourceInfo;
use crate::error::FrameError;
use thiserror::Error;

/// Per-file failure of the viewer pipeline, keeping source info when available
#[derive(Debug, Error)]
pub enum ProcessError {
    /// File could not be opened or parsed as DICOM / DICOM JSON
    #[error("{0:#}")]
    NotADicomFile(anyhow::Error),

    /// Parsed, but the frame metadata or pixel data is unusable
    #[error("{0:#}")]
    ExtractionFailed(anyhow::Error),

    /// Source extracted, but the frame pipeline rejected it
    #[error("{error}")]
    LoadFailed {
        info: Box<SourceInfo>,
        error: FrameError,
    },

    /// Frame ready but rendering or display failed
    #[error("{error:#}")]
    DisplayFailed {
        info: Box<SourceInfo>,
        error: anyhow::Error,
    },
}

impl ProcessError {
    /// Returns source info if available (for verbose display before error)
    #[must_use]
    pub fn info(&self) -> Option<&SourceInfo> {
        match self {
            ProcessError::LoadFailed { info, .. } | ProcessError::DisplayFailed { info, .. } => {
                Some(info)
            }
            _ => None,
        }
    }
}
