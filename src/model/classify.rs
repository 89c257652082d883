//! Mapping colors to palette buckets

use crate::color::bucket::Bucket;
use crate::color::point::Point;

/// Index of the first bucket whose box contains `color`
///
/// Buckets produced by splitting tile the space they started from, so at most
/// one bucket normally matches.
pub fn classify(palette: &[Bucket], color: Point) -> Option<usize> {
    palette
        .iter()
        .position(|bucket| bucket.bounds().contains(color))
}
