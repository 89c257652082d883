//! Error types for quantization, transition modelling and driver operations

use crate::color::point::Point;
use std::fmt;
use std::path::PathBuf;

/// Main error type for all palette and model operations
#[derive(Debug)]
pub enum ChromaError {
    /// Point or box component accessed outside of {0, 1, 2}
    InvalidAxis {
        /// Offending axis index
        index: usize,
    },

    /// Insert into a bucket that already holds its capacity
    CapacityExceeded {
        /// Capacity of the bucket that rejected the point
        capacity: usize,
    },

    /// Insert of a point outside the bucket's bounding box
    NotContained {
        /// The rejected point
        point: Point,
    },

    /// Split or merge rebalancing could not move a point it had to move
    ///
    /// The operation is aborted; the buckets involved should be discarded.
    InvariantViolation {
        /// Operation that detected the violation
        operation: &'static str,
        /// Description of the broken invariant
        reason: String,
    },

    /// Sampling requested from a row whose counts sum to zero
    EmptyPopulation {
        /// Bucket index of the left neighbor
        left: usize,
        /// Bucket index of the above neighbor
        above: usize,
    },

    /// A color lies in none of the palette buckets
    Unclassified {
        /// The color that could not be classified
        point: Point,
    },

    /// No training image could be processed
    EmptyCorpus,

    /// Palette length does not match the transition table dimension
    PaletteMismatch {
        /// Dimension of the transition table
        expected: usize,
        /// Number of buckets supplied
        actual: usize,
    },

    /// Input data is unusable (empty palette, malformed buffer, no images)
    InvalidSourceData {
        /// Description of what's wrong with the source data
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to load a training image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save a generated image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for ChromaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAxis { index } => {
                write!(f, "Axis index {index} is out of range (expected 0, 1 or 2)")
            }
            Self::CapacityExceeded { capacity } => {
                write!(f, "Bucket is full (capacity {capacity})")
            }
            Self::NotContained { point } => {
                write!(f, "Point {point} lies outside the bucket bounds")
            }
            Self::InvariantViolation { operation, reason } => {
                write!(f, "Invariant violated during {operation}: {reason}")
            }
            Self::EmptyPopulation { left, above } => {
                write!(
                    f,
                    "No transitions recorded for context (left {left}, above {above})"
                )
            }
            Self::Unclassified { point } => {
                write!(f, "Color {point} is not covered by any palette bucket")
            }
            Self::EmptyCorpus => write!(f, "No training image could be processed"),
            Self::PaletteMismatch { expected, actual } => {
                write!(
                    f,
                    "Palette has {actual} buckets but the model expects {expected}"
                )
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for ChromaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for crate results
pub type Result<T> = std::result::Result<T, ChromaError>;

impl From<image::ImageError> for ChromaError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for ChromaError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> ChromaError {
    ChromaError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invariant violation error
pub fn invariant_violation(operation: &'static str, reason: &impl ToString) -> ChromaError {
    ChromaError::InvariantViolation {
        operation,
        reason: reason.to_string(),
    }
}
