use crate::dicom::SourceInfo;
use crate::frame::ImageFrame;

pub fn print_metadata(frame: &ImageFrame, info: &SourceInfo) {
    print_field("Modality", info.modality.as_ref());

    print_dimensions(frame, info);
    print_pixel_representation(frame, info);

    if let Some(ts) = &info.transfer_syntax {
        println!("{:20}: {}", "Transfer Syntax", ts);
    }
    if info.number_of_frames > 1 {
        println!("{:20}: {} (showing first)", "Frames", info.number_of_frames);
    }

    println!("{:20}: {}", "Rescale", frame.rescale());
    print_viewport(frame);

    println!();
}

/// Source tags only, for files that failed before a frame was loaded
pub fn print_source_info(info: &SourceInfo) {
    print_field("Modality", info.modality.as_ref());
    println!("{:20}: {}", "Photometric", info.photometric_interpretation);
    println!("{:20}: {}", "Bits Stored", info.bits_stored);
    if let Some(ts) = &info.transfer_syntax {
        println!("{:20}: {}", "Transfer Syntax", ts);
    }
    println!();
}

/// One-line window/zoom summary, also used as the interactive status line
#[must_use]
pub fn viewport_summary(frame: &ImageFrame) -> String {
    let viewport = frame.viewport();
    let range = frame
        .display_range()
        .map_or_else(|e| e.to_string(), |r| {
            if r.is_empty() { format!("{r} (empty)") } else { r.to_string() }
        });

    format!(
        "WC {center} WW {width} -> {range}  zoom {zoom:.2}",
        center = viewport.window_center(),
        width = viewport.window_width(),
        zoom = viewport.zoom_ratio(),
    )
}

fn print_field(name: &str, value: Option<&String>) {
    if let Some(v) = value {
        println!("{name:20}: {v}");
    }
}

fn print_dimensions(frame: &ImageFrame, info: &SourceInfo) {
    println!(
        "{:20}: {} [{}]",
        "Dimensions", frame.dimensions(), info.photometric_interpretation
    );
}

fn print_pixel_representation(frame: &ImageFrame, info: &SourceInfo) {
    println!(
        "{:20}: {} ({} bits stored)",
        "Pixel Repr.", frame.pixel_representation(), info.bits_stored
    );
    if frame.shift() > 0 {
        println!(
            "{:20}: min {} shifted by {}",
            "Normalization", frame.min_sample_value(), frame.shift()
        );
    }
}

fn print_viewport(frame: &ImageFrame) {
    println!("{:20}: {}", "Window", viewport_summary(frame));
    println!(
        "{:20}: {:.3} x {:.3}",
        "Scale", frame.scale_x(), frame.scale_y()
    );
}
