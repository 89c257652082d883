//! Axis-aligned boxes over color space

use crate::color::point::{Axis, Point};
use crate::io::configuration::COLOR_CUBE_EXTENT;
use std::fmt;

/// Half-open box `[pos, pos + dims)` on every axis
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BoundBox {
    /// Lower corner (inclusive)
    pub pos: Point,
    /// Extent along each axis
    pub dims: Point,
}

impl BoundBox {
    /// Create a box from its lower corner and extents
    pub const fn new(pos: Point, dims: Point) -> Self {
        Self { pos, dims }
    }

    /// The full 8-bit RGB cube `[0, 256)^3`
    pub const fn color_cube() -> Self {
        Self::new(
            Point::new(0, 0, 0),
            Point::new(COLOR_CUBE_EXTENT, COLOR_CUBE_EXTENT, COLOR_CUBE_EXTENT),
        )
    }

    /// Exclusive far edge on an axis
    pub const fn end(&self, axis: Axis) -> i32 {
        self.pos.get(axis) + self.dims.get(axis)
    }

    /// True iff `p` lies inside the half-open region on all three axes
    pub const fn contains(&self, p: Point) -> bool {
        p.x >= self.pos.x
            && p.x < self.pos.x + self.dims.x
            && p.y >= self.pos.y
            && p.y < self.pos.y + self.dims.y
            && p.z >= self.pos.z
            && p.z < self.pos.z + self.dims.z
    }

    /// True iff no axis separates the boxes by a strict gap
    ///
    /// Boxes that only touch along a face count as intersecting.
    pub fn intersects(&self, other: &Self) -> bool {
        Axis::ALL.iter().all(|&axis| {
            other.pos.get(axis) <= self.end(axis) && other.end(axis) >= self.pos.get(axis)
        })
    }

    /// Longest axis, preferring X, then Y, then Z on ties
    pub fn longest_axis(&self) -> Axis {
        let d = self.dims;
        if d.x >= d.y && d.x >= d.z {
            Axis::X
        } else if d.y >= d.z {
            Axis::Y
        } else {
            Axis::Z
        }
    }

    /// Cut the box at coordinate `at` on `axis`
    ///
    /// Returns the lower part `[pos, at)` and the complementary upper part
    /// `[at, end)`. The two parts share only the cut plane and together cover
    /// the original box.
    pub fn cut(&self, axis: Axis, at: i32) -> (Self, Self) {
        let mut lower = *self;
        let kept = at - self.pos.get(axis);
        *lower.dims.get_mut(axis) = kept;

        let mut upper = *self;
        *upper.pos.get_mut(axis) = self.pos.get(axis) + kept;
        *upper.dims.get_mut(axis) = self.dims.get(axis) - kept;

        (lower, upper)
    }

    /// Smallest box containing both boxes
    pub fn hull(&self, other: &Self) -> Self {
        let mut hull = Self::default();
        for axis in Axis::ALL {
            let low = self.pos.get(axis).min(other.pos.get(axis));
            let high = self.end(axis).max(other.end(axis));
            *hull.pos.get_mut(axis) = low;
            *hull.dims.get_mut(axis) = high - low;
        }
        hull
    }

    /// Number of integer points inside the box
    pub fn volume(&self) -> u64 {
        Axis::ALL
            .iter()
            .map(|&axis| u64::try_from(self.dims.get(axis)).unwrap_or(0))
            .product()
    }
}

impl fmt::Display for BoundBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.pos, self.dims)
    }
}
