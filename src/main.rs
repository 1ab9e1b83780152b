use anyhow::Context;
use clap::{CommandFactory, Parser};
use dcmwin::cli::Args;
use dcmwin::dicom::{self, ProcessError};
use dcmwin::interactive::{self, Steps};
use dcmwin::render::render_gray;
use dcmwin::{display, ImageFrame};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse();

    if args.files.is_empty() {
        let _ = Args::command().print_help();
        println!();
        return;
    }

    init_tracing(args.verbose);

    let multiple_files = args.files.len() > 1;
    let mut any_failed = false;

    for (idx, file_path) in args.files.iter().enumerate() {
        if multiple_files {
            println!("{}", file_path.display());
        }

        if let Err(e) = process_file(file_path, &args) {
            if args.verbose
                && let Some(info) = e.info() {
                    dcmwin::display_metadata::print_source_info(info);
                }
            println!("Error: {e}");
            any_failed = true;
        }

        if multiple_files && idx < args.files.len() - 1 {
            println!();
        }
    }

    if any_failed {
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins; otherwise `debug` with `--verbose` and `warn` without
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Process a single DICOM or DICOM JSON file
fn process_file(file_path: &std::path::Path, args: &Args) -> Result<(), ProcessError> {
    // Stage 1: Open and extract metadata and samples
    let source = dicom::read_frame_source(file_path)?;
    debug!(path = %file_path.display(), "Frame source extracted");

    // Stage 2: Normalize and encode
    let mut frame = ImageFrame::from_samples(source.config, source.samples)
        .map_err(|error| ProcessError::LoadFailed {
            info: Box::new(source.info.clone()),
            error,
        })?;

    // Stage 3: Initial viewport adjustments
    apply_deltas(&mut frame, args);

    if args.verbose {
        dcmwin::print_metadata(&frame, &source.info);
    }

    let invert = source.info.photometric_interpretation.should_invert();

    // Stage 4: Optional image output
    if let Some(output) = &args.output {
        render_gray(&frame, invert)
            .and_then(|image| {
                image
                    .save(output)
                    .with_context(|| format!("Failed to write image: {}", output.display()))
            })
            .map_err(|error| ProcessError::DisplayFailed {
                info: Box::new(source.info.clone()),
                error,
            })?;
        info!(path = %output.display(), "Windowed frame written");
    }

    // Stage 5: Display
    let shown = if args.interactive {
        let steps = Steps {
            center: args.center_step,
            width: args.width_step,
            zoom: args.zoom_step,
        };
        interactive::run(&mut frame, invert, args.width, args.height, steps)
    } else {
        display::print_frame(&frame, invert, args.width, args.height)
    };

    shown.map_err(|error| ProcessError::DisplayFailed {
        info: Box::new(source.info),
        error,
    })
}

fn apply_deltas(frame: &mut ImageFrame, args: &Args) {
    if let Some(delta) = args.center_delta {
        frame.adjust_window_center(delta);
    }
    if let Some(delta) = args.width_delta {
        frame.adjust_window_width(delta);
    }
    if let Some(delta) = args.zoom_delta {
        frame.adjust_zoom(delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn args_for(file_path: &std::path::Path) -> Args {
        Args::try_parse_from([std::ffi::OsStr::new("dcmwin"), file_path.as_os_str()]).unwrap()
    }

    #[test]
    fn test_plain_text_returns_notadicomfile_error() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("notes.dcm");
        std::fs::write(&file_path, "not a dicom file").unwrap();

        let result = process_file(&file_path, &args_for(&file_path));
        assert_matches!(result, Err(ProcessError::NotADicomFile(_)));
    }

    #[test]
    fn test_zero_width_returns_loadfailed_error() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("empty.json");
        let json = r#"{
            "00280010": {"vr": "US", "Value": [1]},
            "00280011": {"vr": "US", "Value": [0]},
            "7FE00010": {"vr": "OW", "InlineBinary": ""}
        }"#;
        std::fs::write(&file_path, json).unwrap();

        let result = process_file(&file_path, &args_for(&file_path));
        assert_matches!(
            result,
            Err(ProcessError::LoadFailed {
                error: dcmwin::FrameError::NotEncodable { width: 0, height: 1 },
                ..
            })
        );
    }

    #[test]
    fn test_deltas_applied_in_order() {
        let config = dcmwin::FrameConfig::new(dcmwin::types::Dimensions::new(1, 1))
            .with_window(dcmwin::types::WindowParams::new(40.0, 400.0));
        let mut frame = ImageFrame::from_samples(config, vec![0]).unwrap();
        let args = Args::try_parse_from([
            "dcmwin",
            "--center-delta=-40",
            "--width-delta=-500",
            "--zoom-delta=1.5",
            "a.dcm",
        ])
        .unwrap();

        apply_deltas(&mut frame, &args);
        assert_eq!(frame.viewport().window_center(), 0.0);
        assert_eq!(frame.viewport().window_width(), 0.0);
        assert_eq!(frame.viewport().zoom_ratio(), 2.5);
    }
}
