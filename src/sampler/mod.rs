// Image sampling: decode, resize, column-major HSV extraction

pub mod hsv;

pub use hsv::*;

use image::imageops::FilterType;
use std::path::Path;

use crate::config::Config;
use crate::error::PipelineError;

/// One opaque pixel, in column-major traversal order.
#[derive(Debug, Clone, Copy)]
pub struct ColorSample {
    pub column: u32,
    pub row: u32,
    pub hsv: Hsv,
}

/// Samples extracted from an image, plus the grid dimensions.
#[derive(Debug, Clone)]
pub struct SampleGrid {
    pub samples: Vec<ColorSample>,
    pub width: u32,
    pub height: u32,
}

/// Decode an image, resize it to the configured grid, and extract HSV
/// samples column by column. Pixels below the opacity threshold are
/// dropped and never reach the sequencer.
pub fn sample_image(path: &Path, config: &Config) -> Result<SampleGrid, PipelineError> {
    let source = image::open(path).map_err(|source| PipelineError::ImageDecode {
        path: path.to_path_buf(),
        source,
    })?;

    log::info!(
        "Decoded {} ({}x{})",
        path.display(),
        source.width(),
        source.height()
    );

    let grid = source
        .resize_exact(config.grid_width, config.grid_height, FilterType::Lanczos3)
        .to_rgba8();

    let (width, height) = grid.dimensions();
    let mut samples = Vec::new();

    // Column-major: all rows of column 0, then column 1, ...
    // This ordering is what makes note start times monotonic.
    for x in 0..width {
        for y in 0..height {
            let image::Rgba([r, g, b, a]) = *grid.get_pixel(x, y);

            if a < config.min_alpha {
                continue;
            }

            samples.push(ColorSample {
                column: x,
                row: y,
                hsv: rgb_to_hsv(r, g, b),
            });
        }
    }

    log::info!(
        "Extracted {} opaque samples from {}x{} grid",
        samples.len(),
        width,
        height
    );

    Ok(SampleGrid {
        samples,
        width,
        height,
    })
}
