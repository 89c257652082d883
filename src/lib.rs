//! Median-cut color quantization with a second-order Markov pixel model
//!
//! Training images are reduced to a small palette by recursively splitting
//! color space at the median of the observed colors. A transition table then
//! records which palette bucket a pixel falls into given the buckets of its
//! left and above neighbors, and new images are sampled from those counts.

#![forbid(unsafe_code)]

/// Points, boxes and buckets in 3-dimensional color space
pub mod color;
/// Input/output operations, configuration and error handling
pub mod io;
/// Transition model training, sampling and image generation
pub mod model;
/// Palette construction by median cut
pub mod palette;

pub use io::error::{ChromaError, Result};
