use std::io::{IsTerminal, Write};

use anyhow::{anyhow, Result};
use image::DynamicImage;
use viuer::{print, Config as ViuerConfig};

use crate::frame::{ImageFrame, BASE_EXTENT};
use crate::render::render_gray;

/// Terminal columns used for the longer image axis at zoom 1.0
pub const DEFAULT_EXTENT_CELLS: u32 = 24;

/// Render the frame's current window and print it to the terminal
pub fn print_frame(frame: &ImageFrame, invert: bool, width: Option<u32>, height: Option<u32>) -> Result<()> {
    let is_tty = std::io::stdout().is_terminal();
    let gray = render_gray(frame, invert)?;
    let image = DynamicImage::ImageLuma8(gray);

    let (config_width, config_height) =
        target_cells(frame.scale_x(), frame.scale_y(), width, height);

    let config = ViuerConfig {
        width: config_width,
        height: config_height,
        absolute_offset: false,
        use_kitty: is_tty,
        use_iterm: is_tty,
        use_sixel: is_tty,
        ..Default::default()
    };

    std::io::stdout().flush()
        .map_err(|e| anyhow!("Failed to flush stdout: {e}"))?;

    print(&image, &config)
        .map_err(|e| anyhow!("Failed to display image: {e}"))?;

    Ok(())
}

/// Terminal size for the scaled frame. Only one axis is passed to viuer so it
/// keeps the aspect ratio; an explicit width wins over an explicit height.
#[must_use]
pub fn target_cells(
    scale_x: f64,
    scale_y: f64,
    width: Option<u32>,
    height: Option<u32>,
) -> (Option<u32>, Option<u32>) {
    let scaled = |extent: u32, scale: f64| ((f64::from(extent) * scale / BASE_EXTENT).round() as u32).max(1);

    match (width, height) {
        (Some(w), ..) => (Some(scaled(w, scale_x)), None),
        (None, Some(h)) => (None, Some(scaled(h, scale_y))),
        (None, None) => (Some(scaled(DEFAULT_EXTENT_CELLS, scale_x)), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_width_for_wide_frame() {
        assert_eq!(target_cells(2.0, 1.0, None, None), (Some(24), None));
    }

    #[test]
    fn test_tall_frame_narrows() {
        assert_eq!(target_cells(1.0, 2.0, None, None), (Some(12), None));
    }

    #[test]
    fn test_zoom_grows_requested_extent() {
        assert_eq!(target_cells(4.0, 4.0, Some(30), None), (Some(60), None));
        assert_eq!(target_cells(3.0, 3.0, None, Some(10)), (None, Some(15)));
    }

    #[test]
    fn test_never_zero_cells() {
        assert_eq!(target_cells(0.01, 2.0, Some(1), None), (Some(1), None));
    }
}
