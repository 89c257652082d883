//! Image synthesis by repeated transition sampling

use crate::color::bucket::Bucket;
use crate::color::point::Point;
use crate::io::configuration::MAX_OUTPUT_DIMENSION;
use crate::io::error::{ChromaError, Result, invalid_parameter};
use crate::model::transition::TransitionModel;
use ndarray::Array2;
use rand::Rng;

/// Fill a `height x width` grid of colors row by row
///
/// The top-left pixel takes the color of a uniformly chosen bucket. The rest
/// of the first row uses its left neighbor for both inputs, the rest of the
/// first column uses its above neighbor for both, and every other pixel uses
/// its left and above neighbors.
///
/// # Errors
///
/// Returns [`ChromaError::InvalidParameter`] for zero or oversized dimensions,
/// [`ChromaError::InvalidSourceData`] for an empty palette, and propagates
/// sampling errors from [`TransitionModel::step`].
pub fn generate<R: Rng>(
    model: &TransitionModel,
    palette: &[Bucket],
    width: usize,
    height: usize,
    rng: &mut R,
) -> Result<Array2<Point>> {
    for (parameter, value) in [("width", width), ("height", height)] {
        if value == 0 || value > MAX_OUTPUT_DIMENSION {
            return Err(invalid_parameter(
                parameter,
                &value,
                &format!("must be between 1 and {MAX_OUTPUT_DIMENSION}"),
            ));
        }
    }
    if palette.is_empty() {
        return Err(ChromaError::InvalidSourceData {
            reason: "palette has no buckets".to_string(),
        });
    }

    let mut grid = Array2::from_elem((height, width), Point::default());
    for y in 0..height {
        for x in 0..width {
            let left = x.checked_sub(1).and_then(|lx| grid.get((y, lx)).copied());
            let above = y.checked_sub(1).and_then(|ay| grid.get((ay, x)).copied());

            let color = match (left, above) {
                (Some(l), Some(a)) => model.step(l, a, palette, rng)?,
                (Some(l), None) => model.step(l, l, palette, rng)?,
                (None, Some(a)) => model.step(a, a, palette, rng)?,
                (None, None) => {
                    let seed = rng.random_range(0..palette.len());
                    palette.get(seed).map(Bucket::color).unwrap_or_default()
                }
            };

            if let Some(cell) = grid.get_mut((y, x)) {
                *cell = color;
            }
        }
    }

    Ok(grid)
}
