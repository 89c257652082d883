//! Capacity-bounded sorted point sets over a box of color space
//!
//! A bucket owns an axis-aligned region, the distinct colors observed inside
//! it and a cached representative color. Buckets are split along their
//! longest axis at the median of their points (median cut) and can be merged
//! back with an adjacent sibling.

use crate::color::bounds::BoundBox;
use crate::color::point::{Axis, Point};
use crate::color::select::select_nth;
use crate::io::error::{ChromaError, Result, invariant_violation};
use rand::Rng;

/// Result of a merge attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Points and bounds were absorbed
    Merged,
    /// The combined point count would reach or exceed capacity
    Overfilled,
    /// The bounding boxes are separated by a gap on some axis
    NoIntersection,
}

impl MergeOutcome {
    /// True when the merge took place
    pub const fn is_merged(self) -> bool {
        matches!(self, Self::Merged)
    }
}

/// An axis-aligned region of color space and the distinct points inside it
///
/// Invariants:
/// - every stored point lies inside `bounds`
/// - points are sorted ascending with no duplicates
/// - the number of points never exceeds `capacity`
///
/// The representative color is only refreshed by [`Bucket::recompute_color`].
#[derive(Clone, Debug)]
pub struct Bucket {
    bounds: BoundBox,
    points: Vec<Point>,
    capacity: usize,
    color: Point,
}

impl Bucket {
    /// Create an empty bucket
    pub const fn new(bounds: BoundBox, capacity: usize) -> Self {
        Self {
            bounds,
            points: Vec::new(),
            capacity,
            color: Point::new(0, 0, 0),
        }
    }

    /// Bounding box of the bucket
    pub const fn bounds(&self) -> &BoundBox {
        &self.bounds
    }

    /// Stored points in ascending order
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Point at a position in the sorted order
    pub fn point(&self, index: usize) -> Option<Point> {
        self.points.get(index).copied()
    }

    /// Number of stored points
    pub const fn num_points(&self) -> usize {
        self.points.len()
    }

    /// True when no points are stored
    pub const fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Maximum number of points
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Cached representative color, (0, 0, 0) until first computed
    pub const fn color(&self) -> Point {
        self.color
    }

    /// True when `p` is stored
    pub fn contains_point(&self, p: Point) -> bool {
        self.points.binary_search(&p).is_ok()
    }

    /// Insert a point, reporting why it was rejected
    ///
    /// Inserting a point that is already stored succeeds without changing the set.
    ///
    /// # Errors
    ///
    /// Returns [`ChromaError::NotContained`] if `p` lies outside the bounds and
    /// [`ChromaError::CapacityExceeded`] if the bucket is full.
    pub fn try_insert(&mut self, p: Point) -> Result<()> {
        if !self.bounds.contains(p) {
            return Err(ChromaError::NotContained { point: p });
        }
        if self.points.len() >= self.capacity {
            return Err(ChromaError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        if let Err(position) = self.points.binary_search(&p) {
            self.points.insert(position, p);
        }
        Ok(())
    }

    /// Insert a point, returning false if it is outside the bounds or the bucket is full
    pub fn insert(&mut self, p: Point) -> bool {
        self.try_insert(p).is_ok()
    }

    /// Remove a point, returning false if it was not stored
    pub fn remove(&mut self, p: Point) -> bool {
        match self.points.binary_search(&p) {
            Ok(position) => {
                self.points.remove(position);
                true
            }
            Err(_) => false,
        }
    }

    /// Index of the point holding the median coordinate on `axis`
    ///
    /// The median is the element at sorted position `count / 2`. Points are
    /// already ordered by X, so that axis needs no work; the other axes use
    /// randomized selection with pivots drawn from `rng`. Returns `None` for
    /// an empty bucket.
    pub fn find_median<R: Rng>(&self, axis: Axis, rng: &mut R) -> Option<usize> {
        let count = self.points.len();
        if count == 0 {
            return None;
        }
        if axis == Axis::X {
            return Some(count / 2);
        }

        let mut indices: Vec<usize> = (0..count).collect();
        let points = &self.points;
        select_nth(
            &mut indices,
            count / 2,
            |i| points.get(i).map_or(0, |p| p.get(axis)),
            rng,
        )
    }

    /// Split this bucket at the median of its longest axis
    ///
    /// This bucket keeps the lower part of the box and `other` receives the
    /// upper part together with every point that moved there. Returns
    /// `Ok(false)` without changes when `other` is not empty or this bucket
    /// has no points.
    ///
    /// # Errors
    ///
    /// Returns [`ChromaError::InvariantViolation`] if a point cannot be moved
    /// into `other`. Both buckets must then be discarded.
    pub fn split<R: Rng>(&mut self, other: &mut Self, rng: &mut R) -> Result<bool> {
        if !other.is_empty() {
            tracing::debug!(
                other_points = other.num_points(),
                "Refusing to split into a non-empty bucket"
            );
            return Ok(false);
        }

        let axis = self.bounds.longest_axis();
        let Some(median) = self
            .find_median(axis, rng)
            .and_then(|index| self.point(index))
        else {
            return Ok(false);
        };

        self.split_at(other, axis, median.get(axis))
    }

    /// Split this bucket at coordinate `at` on `axis`
    ///
    /// Points below `at` stay, the rest move into `other` together with the
    /// upper part of the box. Returns `Ok(false)` without changes when `other`
    /// is not empty or `at` lies outside the box on `axis`.
    ///
    /// # Errors
    ///
    /// Returns [`ChromaError::InvariantViolation`] if a point cannot be moved
    /// into `other`. Both buckets must then be discarded.
    pub fn split_at(&mut self, other: &mut Self, axis: Axis, at: i32) -> Result<bool> {
        if !other.is_empty() || at < self.bounds.pos.get(axis) || at > self.bounds.end(axis) {
            return Ok(false);
        }

        let (lower, upper) = self.bounds.cut(axis, at);
        self.bounds = lower;
        other.bounds = upper;

        let (kept, moved): (Vec<Point>, Vec<Point>) = std::mem::take(&mut self.points)
            .into_iter()
            .partition(|&p| lower.contains(p));
        self.points = kept;

        for p in moved {
            if let Err(err) = other.try_insert(p) {
                tracing::error!(point = %p, error = %err, "Split rebalancing failed");
                return Err(invariant_violation(
                    "split",
                    &format!("could not move {p} into {upper}: {err}"),
                ));
            }
        }

        tracing::debug!(
            axis = ?axis,
            cut = at,
            kept = self.num_points(),
            moved = other.num_points(),
            "Split bucket"
        );
        Ok(true)
    }

    /// Absorb the bounds and points of an intersecting bucket
    ///
    /// The box grows to the hull of both boxes. `other` is left unchanged and
    /// should be discarded by the caller after a successful merge.
    ///
    /// # Errors
    ///
    /// Returns [`ChromaError::InvariantViolation`] if a point of `other`
    /// cannot be inserted after the bounds were grown.
    pub fn merge(&mut self, other: &Self) -> Result<MergeOutcome> {
        if self.num_points() + other.num_points() >= self.capacity {
            tracing::debug!(
                points = self.num_points(),
                other_points = other.num_points(),
                capacity = self.capacity,
                "Merge rejected: overfilled bucket"
            );
            return Ok(MergeOutcome::Overfilled);
        }
        if !self.bounds.intersects(&other.bounds) {
            tracing::debug!(
                bounds = %self.bounds,
                other = %other.bounds,
                "Merge rejected: no intersection"
            );
            return Ok(MergeOutcome::NoIntersection);
        }

        self.bounds = self.bounds.hull(&other.bounds);
        for &p in &other.points {
            if let Err(err) = self.try_insert(p) {
                tracing::error!(point = %p, error = %err, "Merge rebalancing failed");
                return Err(invariant_violation(
                    "merge",
                    &format!("could not absorb {p} into {}: {err}", self.bounds),
                ));
            }
        }
        Ok(MergeOutcome::Merged)
    }

    /// True when the boxes share a face and agree on the other two axes
    ///
    /// Flags sibling pairs that can be merged back along the third axis.
    pub fn matches(&self, other: &Self) -> bool {
        let a = &self.bounds;
        let b = &other.bounds;
        let mut equal = 0;
        let mut aligned = false;
        for axis in Axis::ALL {
            if a.pos.get(axis) == b.pos.get(axis) && a.dims.get(axis) == b.dims.get(axis) {
                equal += 1;
            } else if a.end(axis) == b.pos.get(axis) || b.end(axis) == a.pos.get(axis) {
                aligned = true;
            }
        }
        equal == 2 && aligned
    }

    /// Recompute the cached color as the truncated per-axis mean of the points
    ///
    /// An empty bucket resets the color to (0, 0, 0).
    pub fn recompute_color(&mut self) {
        let count = self.points.len() as i64;
        if count == 0 {
            self.color = Point::default();
            return;
        }

        let mut sums = [0i64; 3];
        for p in &self.points {
            for (sum, axis) in sums.iter_mut().zip(Axis::ALL) {
                *sum += i64::from(p.get(axis));
            }
        }
        let [x, y, z] = sums.map(|sum| (sum / count) as i32);
        self.color = Point::new(x, y, z);
    }
}
