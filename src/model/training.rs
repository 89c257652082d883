//! Pixel buffers used to train transition models

use crate::color::point::Point;
use crate::io::configuration::CHANNELS;
use crate::io::error::{ChromaError, Result};
use ndarray::Array3;

/// An RGB image as a `(height, width, channel)` array of 8-bit samples
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrainingImage {
    pixels: Array3<u8>,
}

impl TrainingImage {
    /// Wrap an existing `(height, width, 3)` array
    ///
    /// # Errors
    ///
    /// Returns [`ChromaError::InvalidSourceData`] if the last axis does not hold
    /// exactly three channels
    pub fn new(pixels: Array3<u8>) -> Result<Self> {
        let (_, _, channels) = pixels.dim();
        if channels != CHANNELS {
            return Err(ChromaError::InvalidSourceData {
                reason: format!("expected {CHANNELS} channels per pixel, found {channels}"),
            });
        }
        Ok(Self { pixels })
    }

    /// Build an image from a flat row-major buffer of RGB samples
    ///
    /// # Errors
    ///
    /// Returns [`ChromaError::InvalidSourceData`] if the buffer length is not
    /// `width * height * 3`
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        let len = data.len();
        let pixels = Array3::from_shape_vec((height, width, CHANNELS), data).map_err(|e| {
            ChromaError::InvalidSourceData {
                reason: format!("buffer of {len} samples does not fit {width}x{height}: {e}"),
            }
        })?;
        Ok(Self { pixels })
    }

    /// Image width in pixels
    pub fn width(&self) -> usize {
        self.pixels.dim().1
    }

    /// Image height in pixels
    pub fn height(&self) -> usize {
        self.pixels.dim().0
    }

    /// Color at column `x`, row `y`
    pub fn pixel(&self, x: usize, y: usize) -> Option<Point> {
        let r = *self.pixels.get((y, x, 0))?;
        let g = *self.pixels.get((y, x, 1))?;
        let b = *self.pixels.get((y, x, 2))?;
        Some(Point::from_rgb([r, g, b]))
    }

    /// All pixel colors in row-major order
    pub fn colors(&self) -> impl Iterator<Item = Point> + '_ {
        let width = self.width();
        (0..self.height())
            .flat_map(move |y| (0..width).filter_map(move |x| self.pixel(x, y)))
    }
}
