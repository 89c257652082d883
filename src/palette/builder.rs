//! Median-cut palette construction
//!
//! Starts from one bucket covering the whole color cube and repeatedly splits
//! the most populated bucket until the requested number of buckets hold colors.

use crate::color::bounds::BoundBox;
use crate::color::bucket::{Bucket, MergeOutcome};
use crate::color::point::Point;
use crate::io::error::{ChromaError, Result, invalid_parameter};
use rand::Rng;

/// Builds a palette of buckets from a stream of observed colors
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaletteBuilder {
    target_size: usize,
    capacity: usize,
}

impl PaletteBuilder {
    /// Builder producing up to `target_size` buckets of `capacity` points each
    pub const fn new(target_size: usize, capacity: usize) -> Self {
        Self {
            target_size,
            capacity,
        }
    }

    /// Requested number of buckets
    pub const fn target_size(&self) -> usize {
        self.target_size
    }

    /// Point capacity of every bucket
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Partition the color cube around `colors`
    ///
    /// Duplicate colors are stored once. Distinct colors beyond the root bucket's
    /// capacity are dropped with a warning. Splitting continues until
    /// `target_size` buckets hold colors or no bucket with at least two points
    /// is left. Every split shrinks the box of the side holding the points, so
    /// a cut that leaves one side empty is kept. Empty buckets still cover
    /// their part of the cube and are compacted into a neighbor where possible.
    /// Every returned bucket has its color recomputed.
    ///
    /// # Errors
    ///
    /// Returns [`ChromaError::InvalidParameter`] for a zero target size or
    /// capacity, [`ChromaError::InvalidSourceData`] when no color fits the
    /// cube, and propagates invariant violations from split and merge.
    pub fn build<I, R>(&self, colors: I, rng: &mut R) -> Result<Vec<Bucket>>
    where
        I: IntoIterator<Item = Point>,
        R: Rng,
    {
        if self.target_size == 0 {
            return Err(invalid_parameter(
                "target_size",
                &self.target_size,
                &"palette needs at least one bucket",
            ));
        }
        if self.capacity == 0 {
            return Err(invalid_parameter(
                "capacity",
                &self.capacity,
                &"buckets must hold at least one point",
            ));
        }

        // Sorted input turns every ordered insert into an append.
        let mut colors: Vec<Point> = colors.into_iter().collect();
        colors.sort_unstable();
        colors.dedup();

        let mut root = Bucket::new(BoundBox::color_cube(), self.capacity);
        let mut dropped = 0usize;
        let mut outside = 0usize;
        for color in colors {
            match root.try_insert(color) {
                Ok(()) => {}
                Err(ChromaError::CapacityExceeded { .. }) => dropped += 1,
                Err(ChromaError::NotContained { .. }) => outside += 1,
                Err(err) => return Err(err),
            }
        }
        if dropped > 0 || outside > 0 {
            tracing::warn!(
                dropped,
                outside,
                capacity = self.capacity,
                "Some colors were not added to the palette"
            );
        }
        if root.is_empty() {
            return Err(ChromaError::InvalidSourceData {
                reason: "no colors inside the color cube".to_string(),
            });
        }

        let mut buckets = vec![root];
        let mut frozen = vec![false];
        while populated(&buckets) < self.target_size {
            let Some(index) = most_populated(&buckets, &frozen) else {
                tracing::info!(
                    buckets = buckets.len(),
                    target = self.target_size,
                    "No splittable bucket left"
                );
                break;
            };
            let Some(bucket) = buckets.get_mut(index) else {
                break;
            };

            let axis = bucket.bounds().longest_axis();
            let low = bucket.bounds().pos.get(axis);
            let mut sibling = Bucket::new(BoundBox::default(), self.capacity);
            let mut split = bucket.split(&mut sibling, rng)?;

            if split && bucket.is_empty() && bucket.bounds().dims.get(axis) == 0 {
                // The median sat on the lower face, so the cut removed nothing.
                // Cut just above that face instead.
                *bucket = std::mem::replace(
                    &mut sibling,
                    Bucket::new(BoundBox::default(), self.capacity),
                );
                split = bucket.split_at(&mut sibling, axis, low + 1)?;
            }

            if !split {
                if let Some(flag) = frozen.get_mut(index) {
                    *flag = true;
                }
                continue;
            }
            if bucket.is_empty() || sibling.is_empty() {
                tracing::debug!(index, axis = ?axis, "Split left one side empty");
            }

            buckets.push(sibling);
            frozen.push(false);
        }

        let removed = compact(&mut buckets)?;
        if removed > 0 {
            tracing::debug!(removed, "Compacted empty buckets");
        }
        for bucket in &mut buckets {
            bucket.recompute_color();
        }
        Ok(buckets)
    }
}

// Buckets holding at least one color.
fn populated(buckets: &[Bucket]) -> usize {
    buckets.iter().filter(|bucket| !bucket.is_empty()).count()
}

// First bucket with the most points among those that can still be split.
fn most_populated(buckets: &[Bucket], frozen: &[bool]) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;
    for (index, (bucket, &is_frozen)) in buckets.iter().zip(frozen).enumerate() {
        let count = bucket.num_points();
        if is_frozen || count < 2 {
            continue;
        }
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((index, count));
        }
    }
    best.map(|(index, _)| index)
}

/// Merge every empty bucket into a face-adjacent neighbor
///
/// Only pairs accepted by [`Bucket::matches`] are merged, so the union of the
/// boxes is unchanged. Returns the number of buckets removed.
///
/// # Errors
///
/// Propagates invariant violations from [`Bucket::merge`].
pub fn compact(buckets: &mut Vec<Bucket>) -> Result<usize> {
    let mut removed = 0;
    let mut index = 0;
    while index < buckets.len() {
        let Some(empty) = buckets.get(index).filter(|b| b.is_empty()).cloned() else {
            index += 1;
            continue;
        };

        let mut absorbed = false;
        for (other, bucket) in buckets.iter_mut().enumerate() {
            if other != index
                && bucket.matches(&empty)
                && bucket.merge(&empty)? == MergeOutcome::Merged
            {
                absorbed = true;
                break;
            }
        }

        if absorbed {
            buckets.remove(index);
            removed += 1;
        } else {
            index += 1;
        }
    }
    Ok(removed)
}
