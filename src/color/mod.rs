//! Geometric partitioning of color space
//!
//! This module contains the median-cut building blocks:
//! - Points and axes in 3-dimensional color space
//! - Half-open bounding boxes
//! - Buckets holding sorted, capacity-bounded point sets
//! - Randomized order-statistic selection

/// Half-open axis-aligned boxes
pub mod bounds;
/// Sorted point sets with split and merge operations
pub mod bucket;
/// Integer color coordinates and axes
pub mod point;
/// Randomized median selection over index arrays
pub mod select;

pub use bounds::BoundBox;
pub use bucket::{Bucket, MergeOutcome};
pub use point::{Axis, Point};
