pub mod cli;
pub mod dicom;
pub mod display;
pub mod display_metadata;
pub mod error;
pub mod frame;
pub mod interactive;
pub mod render;
pub mod types;

// Re-export commonly used items
pub use display_metadata::print_metadata;
pub use error::FrameError;
pub use frame::{FrameConfig, ImageFrame};
