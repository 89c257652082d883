//! Integer coordinates in 3-dimensional color space

use crate::io::error::{ChromaError, Result};
use std::cmp::Ordering;
use std::fmt;

/// One of the three color-space axes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// First channel (primary sort key)
    X,
    /// Second channel
    Y,
    /// Third channel
    Z,
}

impl Axis {
    /// All axes in iteration order
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    /// Numeric index of the axis
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}

impl TryFrom<usize> for Axis {
    type Error = ChromaError;

    fn try_from(index: usize) -> Result<Self> {
        match index {
            0 => Ok(Self::X),
            1 => Ok(Self::Y),
            2 => Ok(Self::Z),
            _ => Err(ChromaError::InvalidAxis { index }),
        }
    }
}

/// A color as three integer channel values
///
/// Ordered lexicographically by `(x, y, z)`. Points stored inside a
/// [`Bucket`](crate::color::bucket::Bucket) are never mutated in place; a changed
/// point has to be removed and re-inserted to keep the stored order intact.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point {
    /// First channel
    pub x: i32,
    /// Second channel
    pub y: i32,
    /// Third channel
    pub z: i32,
}

impl Point {
    /// Create a point from its three channels
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Build a point from an 8-bit RGB triple
    pub fn from_rgb(rgb: [u8; 3]) -> Self {
        let [r, g, b] = rgb;
        Self::new(i32::from(r), i32::from(g), i32::from(b))
    }

    /// Convert to an 8-bit RGB triple, clamping out-of-range channels
    pub fn to_rgb(self) -> [u8; 3] {
        let clamp = |v: i32| v.clamp(0, 255) as u8;
        [clamp(self.x), clamp(self.y), clamp(self.z)]
    }

    /// Channel value on an axis
    pub const fn get(self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Mutable slot for the channel on an axis
    pub const fn get_mut(&mut self, axis: Axis) -> &mut i32 {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
            Axis::Z => &mut self.z,
        }
    }

    /// Channel value by numeric index
    ///
    /// # Errors
    ///
    /// Returns [`ChromaError::InvalidAxis`] for any index other than 0, 1 or 2
    pub fn axis(self, index: usize) -> Result<i32> {
        Axis::try_from(index).map(|axis| self.get(axis))
    }

    /// Mutable channel slot by numeric index
    ///
    /// # Errors
    ///
    /// Returns [`ChromaError::InvalidAxis`] for any index other than 0, 1 or 2
    pub fn axis_mut(&mut self, index: usize) -> Result<&mut i32> {
        let axis = Axis::try_from(index)?;
        Ok(self.get_mut(axis))
    }

    /// Total-order comparison, `x` first, then `y`, then `z`
    pub fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    /// Componentwise equality
    pub fn equals(&self, other: &Self) -> bool {
        self == other
    }

    /// Strictly after `other` in the total order
    pub fn greater_than(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Greater
    }

    /// Strictly before `other` in the total order
    pub fn less_than(&self, other: &Self) -> bool {
        !(self.equals(other) || self.greater_than(other))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
