//! Training image decoding and PNG export of generated grids

use crate::color::point::Point;
use crate::io::error::{ChromaError, Result};
use crate::model::training::TrainingImage;
use image::{ImageBuffer, Rgb};
use ndarray::Array2;
use std::path::Path;

/// Decode any supported image file into an RGB training buffer
///
/// Alpha is discarded and grayscale or palette images are expanded to RGB.
///
/// # Errors
///
/// Returns an error if:
/// - The file at the given path cannot be opened or decoded
/// - The decoded buffer does not match the reported dimensions
pub fn load_training_image<P: AsRef<Path>>(path: P) -> Result<TrainingImage> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|e| ChromaError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    let rgb = img.to_rgb8();
    let (width, height) = (rgb.width() as usize, rgb.height() as usize);
    TrainingImage::from_raw(width, height, rgb.into_raw())
}

/// Export a `(rows, cols)` grid of colors as an RGB image
///
/// # Errors
///
/// Returns an error if:
/// - The grid is empty or too large for an image
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_grid_as_png<P: AsRef<Path>>(grid: &Array2<Point>, output_path: P) -> Result<()> {
    let output_path = output_path.as_ref();
    let (rows, cols) = grid.dim();
    let (Ok(width), Ok(height)) = (u32::try_from(cols), u32::try_from(rows)) else {
        return Err(ChromaError::InvalidSourceData {
            reason: format!("grid of {cols}x{rows} is too large to export"),
        });
    };
    if width == 0 || height == 0 {
        return Err(ChromaError::InvalidSourceData {
            reason: "cannot export an empty grid".to_string(),
        });
    }

    let img = ImageBuffer::from_fn(width, height, |x, y| {
        let color = grid
            .get((y as usize, x as usize))
            .copied()
            .unwrap_or_default();
        Rgb(color.to_rgb())
    });

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ChromaError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| ChromaError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
