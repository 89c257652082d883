//! Second-order transition statistics over palette buckets
//!
//! The model counts, for every pixel of the training images that has both a
//! left and an above neighbor, which bucket the pixel fell into given the
//! buckets of those two neighbors. Sampling draws a successor bucket with
//! probability proportional to the recorded counts.

use crate::color::bucket::Bucket;
use crate::color::point::Point;
use crate::io::error::{ChromaError, Result, invariant_violation};
use crate::model::classify::classify;
use crate::model::training::TrainingImage;
use ndarray::{Array3, ArrayView1, Axis};
use rand::Rng;

/// Counts gathered by a [`TransitionModel::populate`] pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PopulationSummary {
    /// Images scanned
    pub images_processed: usize,
    /// Images too small to contain a pixel with both neighbors
    pub images_skipped: usize,
    /// Pixel contexts added to the table
    pub contexts_counted: u64,
    /// Pixel contexts dropped because a color matched no bucket
    pub contexts_unclassified: u64,
}

/// Cubic count table indexed by (left, above, center) bucket indices
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionModel {
    table: Array3<u64>,
}

impl TransitionModel {
    /// Create a model over `dim` buckets
    ///
    /// Every (left, above) row starts with a single count on bucket 0, so an
    /// untrained row always samples bucket 0.
    pub fn new(dim: usize) -> Self {
        let mut table = Array3::zeros((dim, dim, dim));
        if dim > 0 {
            table.index_axis_mut(Axis(2), 0).fill(1);
        }
        Self { table }
    }

    /// Number of buckets the model was built for
    pub fn dim(&self) -> usize {
        self.table.dim().0
    }

    /// Count for a single (left, above, center) cell, 0 when out of range
    pub fn count(&self, left: usize, above: usize, center: usize) -> u64 {
        self.table.get((left, above, center)).copied().unwrap_or(0)
    }

    /// Sum of a (left, above) row, 0 when out of range
    pub fn row_total(&self, left: usize, above: usize) -> u64 {
        self.row(left, above).map_or(0, |row| row.sum())
    }

    // Counts for every center bucket of a (left, above) context
    fn row(&self, left: usize, above: usize) -> Option<ArrayView1<'_, u64>> {
        if left >= self.dim() || above >= self.dim() {
            return None;
        }
        Some(
            self.table
                .index_axis(Axis(0), left)
                .index_axis_move(Axis(0), above),
        )
    }

    /// Sum of every cell in the table
    pub fn total(&self) -> u64 {
        self.table.sum()
    }

    fn check_palette(&self, palette: &[Bucket]) -> Result<()> {
        if palette.len() == self.dim() {
            Ok(())
        } else {
            Err(ChromaError::PaletteMismatch {
                expected: self.dim(),
                actual: palette.len(),
            })
        }
    }

    /// Record the neighbor statistics of every training image
    ///
    /// Pixels are scanned row-major from the second row and second column so
    /// that both neighbors exist. A context whose colors are not all covered
    /// by the palette is dropped and counted in the summary.
    ///
    /// # Errors
    ///
    /// Returns [`ChromaError::PaletteMismatch`] if the palette length differs
    /// from [`Self::dim`] and [`ChromaError::EmptyCorpus`] if no image could be
    /// scanned.
    pub fn populate(
        &mut self,
        images: &[TrainingImage],
        palette: &[Bucket],
    ) -> Result<PopulationSummary> {
        self.check_palette(palette)?;

        let mut summary = PopulationSummary::default();
        for (index, image) in images.iter().enumerate() {
            let (width, height) = (image.width(), image.height());
            if width < 2 || height < 2 {
                tracing::warn!(index, width, height, "Skipping training image without neighbors");
                summary.images_skipped += 1;
                continue;
            }

            for y in 1..height {
                for x in 1..width {
                    let context = (
                        image.pixel(x - 1, y).and_then(|p| classify(palette, p)),
                        image.pixel(x, y - 1).and_then(|p| classify(palette, p)),
                        image.pixel(x, y).and_then(|p| classify(palette, p)),
                    );
                    match context {
                        (Some(left), Some(above), Some(center)) => {
                            if let Some(cell) = self.table.get_mut((left, above, center)) {
                                *cell += 1;
                                summary.contexts_counted += 1;
                            }
                        }
                        _ => summary.contexts_unclassified += 1,
                    }
                }
            }
            summary.images_processed += 1;
        }

        if summary.images_processed == 0 {
            return Err(ChromaError::EmptyCorpus);
        }

        tracing::info!(
            images = summary.images_processed,
            skipped = summary.images_skipped,
            contexts = summary.contexts_counted,
            unclassified = summary.contexts_unclassified,
            "Populated transition model"
        );
        Ok(summary)
    }

    /// Sample a center bucket index for known neighbor bucket indices
    ///
    /// Draws an integer uniformly from `1..=row_total` and walks the row,
    /// subtracting counts until the draw is used up.
    ///
    /// # Errors
    ///
    /// Returns [`ChromaError::EmptyPopulation`] if the row is out of range or
    /// its counts sum to zero.
    pub fn sample_index<R: Rng>(&self, left: usize, above: usize, rng: &mut R) -> Result<usize> {
        let Some(row) = self.row(left, above).filter(|row| row.sum() > 0) else {
            return Err(ChromaError::EmptyPopulation { left, above });
        };
        let total = row.sum();

        let mut roll = rng.random_range(1..=total);
        for (center, &count) in row.iter().enumerate() {
            if roll <= count {
                return Ok(center);
            }
            roll -= count;
        }

        Err(invariant_violation(
            "step",
            &format!("draw exceeded row total {total} for ({left}, {above})"),
        ))
    }

    /// Generate the next color from the colors of its left and above neighbors
    ///
    /// Returns the cached color of the sampled bucket, so every bucket should
    /// have had [`Bucket::recompute_color`] called first.
    ///
    /// # Errors
    ///
    /// Returns [`ChromaError::PaletteMismatch`] if the palette length differs
    /// from [`Self::dim`], [`ChromaError::Unclassified`] if a neighbor lies in
    /// no bucket, and [`ChromaError::EmptyPopulation`] if the row is empty.
    pub fn step<R: Rng>(
        &self,
        left: Point,
        above: Point,
        palette: &[Bucket],
        rng: &mut R,
    ) -> Result<Point> {
        self.check_palette(palette)?;
        let left_index =
            classify(palette, left).ok_or(ChromaError::Unclassified { point: left })?;
        let above_index =
            classify(palette, above).ok_or(ChromaError::Unclassified { point: above })?;

        let center = self.sample_index(left_index, above_index, rng)?;
        palette
            .get(center)
            .map(Bucket::color)
            .ok_or_else(|| invariant_violation("step", &format!("bucket {center} missing")))
    }
}
