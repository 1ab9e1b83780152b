use clap::Parser;
use std::path::PathBuf;

/// Window/level viewer for 16-bit grayscale DICOM frames
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// DICOM (.dcm) or DICOM JSON (.json) file path(s) to display
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Output width in terminal columns at zoom 1.0
    #[arg(short = 'W', long)]
    pub width: Option<u32>,

    /// Output height in terminal rows at zoom 1.0
    #[arg(short = 'H', long)]
    pub height: Option<u32>,

    /// Show frame metadata and debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Shift the window center by this amount after loading
    #[arg(long, value_name = "DELTA", allow_negative_numbers = true, value_parser = parse_finite)]
    pub center_delta: Option<f64>,

    /// Widen (or narrow, if negative) the window after loading
    #[arg(long, value_name = "DELTA", allow_negative_numbers = true, value_parser = parse_finite)]
    pub width_delta: Option<f64>,

    /// Change the zoom ratio after loading
    #[arg(long, value_name = "DELTA", allow_negative_numbers = true, value_parser = parse_finite)]
    pub zoom_delta: Option<f64>,

    /// Adjust window and zoom from the keyboard
    #[arg(short, long)]
    pub interactive: bool,

    /// Write the windowed frame to an image file (format from extension)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Window center change per key press in interactive mode
    #[arg(long, value_parser = parse_finite, default_value_t = 10.0)]
    pub center_step: f64,

    /// Window width change per key press in interactive mode
    #[arg(long, value_parser = parse_finite, default_value_t = 20.0)]
    pub width_step: f64,

    /// Zoom change per key press in interactive mode
    #[arg(long, value_parser = parse_finite, default_value_t = 0.25)]
    pub zoom_step: f64,
}

/// Reject NaN and infinities so window and zoom stay finite
fn parse_finite(value: &str) -> Result<f64, String> {
    let parsed: f64 = value.parse().map_err(|e| format!("invalid number: {e}"))?;
    if parsed.is_finite() {
        Ok(parsed)
    } else {
        Err(format!("expected a finite number, got {value}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_deltas() {
        let args = Args::try_parse_from([
            "dcmwin",
            "--center-delta",
            "-40",
            "--width-delta",
            "120.5",
            "--zoom-delta",
            "-0.5",
            "ct.dcm",
        ])
        .unwrap();

        assert_eq!(args.files, vec![PathBuf::from("ct.dcm")]);
        assert_eq!(args.center_delta, Some(-40.0));
        assert_eq!(args.width_delta, Some(120.5));
        assert_eq!(args.zoom_delta, Some(-0.5));
        assert!(!args.interactive);
    }

    #[test]
    fn test_non_finite_deltas_rejected() {
        for value in ["NaN", "inf", "-inf"] {
            let arg = format!("--width-delta={value}");
            assert!(Args::try_parse_from(["dcmwin", arg.as_str(), "ct.dcm"]).is_err());
        }
        assert!(Args::try_parse_from(["dcmwin", "--zoom-step", "NaN", "ct.dcm"]).is_err());
        assert!(Args::try_parse_from(["dcmwin", "--center-delta", "abc", "ct.dcm"]).is_err());
    }

    #[test]
    fn test_step_defaults() {
        let args = Args::try_parse_from(["dcmwin", "-i", "frame.json"]).unwrap();
        assert!(args.interactive);
        assert_eq!(args.center_step, 10.0);
        assert_eq!(args.width_step, 20.0);
        assert_eq!(args.zoom_step, 0.25);
    }
}
