//! Tests for transition table population and sampling

#[cfg(test)]
mod tests {
    use chromarkov::ChromaError;
    use chromarkov::color::bounds::BoundBox;
    use chromarkov::color::bucket::Bucket;
    use chromarkov::color::point::Point;
    use chromarkov::model::training::TrainingImage;
    use chromarkov::model::transition::TransitionModel;
    use rand::{SeedableRng, rngs::StdRng};

    // Four slabs along the first axis, each holding a single color
    fn quartered_palette() -> Vec<Bucket> {
        (0..4)
            .map(|k| {
                let bounds = BoundBox::new(Point::new(64 * k, 0, 0), Point::new(64, 256, 256));
                let mut bucket = Bucket::new(bounds, 16);
                assert!(bucket.insert(representative(k as usize)));
                bucket.recompute_color();
                bucket
            })
            .collect()
    }

    fn representative(bucket: usize) -> Point {
        let k = bucket as i32;
        Point::new(64 * k + 10, 20 * k, 5)
    }

    // Image whose pixels are the representatives of the given bucket indices
    fn image_of(width: usize, height: usize, buckets: &[usize]) -> TrainingImage {
        let data = buckets
            .iter()
            .flat_map(|&b| representative(b).to_rgb())
            .collect();
        TrainingImage::from_raw(width, height, data).expect("valid buffer")
    }

    // Tests the prior puts a single count on bucket 0 of every row
    // Verified by seeding every cell with 1
    #[test]
    fn test_new_applies_prior() {
        let model = TransitionModel::new(4);
        assert_eq!(model.dim(), 4);
        assert_eq!(model.total(), 16);
        for left in 0..4 {
            for above in 0..4 {
                assert_eq!(model.count(left, above, 0), 1);
                assert_eq!(model.row_total(left, above), 1);
                for center in 1..4 {
                    assert_eq!(model.count(left, above, center), 0);
                }
            }
        }
        assert_eq!(model.count(4, 0, 0), 0);
        assert_eq!(model.row_total(4, 0), 0);
        assert_eq!(model.row_total(0, 4), 0);
        assert_eq!(TransitionModel::new(0).total(), 0);
    }

    // Tests an untrained model always produces the color of bucket 0
    // Verified by drawing from 0..=total
    #[test]
    fn test_untrained_step_returns_bucket_zero() {
        let palette = quartered_palette();
        let model = TransitionModel::new(4);
        let mut rng = StdRng::seed_from_u64(17);

        for left in 0..4 {
            for above in 0..4 {
                let color = model
                    .step(representative(left), representative(above), &palette, &mut rng)
                    .expect("step succeeds");
                assert_eq!(color, representative(0));
            }
        }
    }

    // Tests one image adds (W-1)*(H-1) contexts to the table
    // Verified by starting the scan at the first column
    #[test]
    fn test_populate_counts_every_context() {
        let palette = quartered_palette();
        let mut model = TransitionModel::new(4);
        let buckets = [0, 1, 2, 3, 1, 2, 3, 0, 2, 3, 0, 1];
        let image = image_of(4, 3, &buckets);

        let summary = model.populate(&[image], &palette).expect("populate succeeds");

        assert_eq!(summary.images_processed, 1);
        assert_eq!(summary.contexts_counted, 6);
        assert_eq!(summary.contexts_unclassified, 0);
        assert_eq!(model.total(), 16 + 6);

        // Pixel (1, 1) has left bucket 1, above bucket 1 and is bucket 2
        assert_eq!(model.count(1, 1, 2), 1);
        // Pixel (3, 2) has left bucket 0, above bucket 0 and is bucket 1
        assert_eq!(model.count(0, 0, 1), 1);
    }

    // Tests every image of the corpus is scanned
    // Verified by returning after the first image
    #[test]
    fn test_populate_processes_all_images() {
        let palette = quartered_palette();
        let mut model = TransitionModel::new(4);
        let images = vec![
            image_of(3, 2, &[2; 6]),
            image_of(2, 2, &[3; 4]),
            image_of(1, 5, &[1; 5]),
        ];

        let summary = model.populate(&images, &palette).expect("populate succeeds");

        assert_eq!(summary.images_processed, 2);
        assert_eq!(summary.images_skipped, 1);
        assert_eq!(summary.contexts_counted, 3);
        assert_eq!(model.count(2, 2, 2), 2);
        assert_eq!(model.count(3, 3, 3), 1);
    }

    // Tests contexts with uncovered colors are dropped and counted
    // Verified by classifying uncovered colors as bucket 0
    #[test]
    fn test_populate_skips_unclassified_contexts() {
        let palette: Vec<Bucket> = quartered_palette().into_iter().take(2).collect();
        let mut model = TransitionModel::new(2);
        let data = vec![10, 0, 0, 10, 0, 0, 10, 0, 0, 200, 0, 0];
        let image = TrainingImage::from_raw(2, 2, data).expect("valid buffer");

        let summary = model.populate(&[image], &palette).expect("populate succeeds");

        assert_eq!(summary.contexts_counted, 0);
        assert_eq!(summary.contexts_unclassified, 1);
        assert_eq!(model.total(), 4);
    }

    // Tests the failure cases of populate
    // Verified by returning an empty summary for an empty corpus
    #[test]
    fn test_populate_failures() {
        let palette = quartered_palette();
        let mut model = TransitionModel::new(4);

        assert!(matches!(
            model.populate(&[], &palette),
            Err(ChromaError::EmptyCorpus)
        ));
        assert!(matches!(
            model.populate(&[image_of(1, 1, &[0])], &palette),
            Err(ChromaError::EmptyCorpus)
        ));

        let mut wrong = TransitionModel::new(3);
        match wrong.populate(&[image_of(2, 2, &[0; 4])], &palette) {
            Err(ChromaError::PaletteMismatch { expected, actual }) => {
                assert_eq!(expected, 3);
                assert_eq!(actual, 4);
            }
            other => unreachable!("expected PaletteMismatch, got {other:?}"),
        }
    }

    // Tests sampled indices follow the row counts and stay in range
    // Verified by sampling uniformly over all buckets
    #[test]
    fn test_sample_index_follows_counts() {
        let palette = quartered_palette();
        let mut model = TransitionModel::new(4);
        let image = image_of(5, 1, &[2; 5]);
        let tall = image_of(3, 4, &[2; 12]);
        model
            .populate(&[image, tall], &palette)
            .expect("populate succeeds");
        assert_eq!(model.count(2, 2, 2), 6);

        let mut rng = StdRng::seed_from_u64(23);
        let mut seen = [0usize; 4];
        for _ in 0..700 {
            let index = model.sample_index(2, 2, &mut rng).expect("row is populated");
            assert!(index < 4);
            seen[index] += 1;
        }

        assert!(seen[0] > 0);
        assert!(seen[2] > seen[0]);
        assert_eq!(seen[1], 0);
        assert_eq!(seen[3], 0);
    }

    // Tests rows without counts cannot be sampled
    // Verified by returning bucket 0 for empty rows
    #[test]
    fn test_sample_index_empty_row() {
        let mut rng = StdRng::seed_from_u64(0);
        let model = TransitionModel::new(2);
        match model.sample_index(2, 0, &mut rng) {
            Err(ChromaError::EmptyPopulation { left, above }) => {
                assert_eq!((left, above), (2, 0));
            }
            other => unreachable!("expected EmptyPopulation, got {other:?}"),
        }
        assert!(TransitionModel::new(0).sample_index(0, 0, &mut rng).is_err());
    }

    // Tests step rejects neighbors outside the palette and mismatched palettes
    // Verified by classifying uncovered neighbors as bucket 0
    #[test]
    fn test_step_failures() {
        let palette: Vec<Bucket> = quartered_palette().into_iter().take(2).collect();
        let model = TransitionModel::new(2);
        let mut rng = StdRng::seed_from_u64(1);
        let outside = Point::new(200, 0, 0);

        match model.step(outside, Point::new(0, 0, 0), &palette, &mut rng) {
            Err(ChromaError::Unclassified { point }) => assert_eq!(point, outside),
            other => unreachable!("expected Unclassified, got {other:?}"),
        }
        assert!(matches!(
            model.step(Point::new(0, 0, 0), outside, &palette, &mut rng),
            Err(ChromaError::Unclassified { .. })
        ));
        assert!(matches!(
            model.step(Point::new(0, 0, 0), Point::new(0, 0, 0), &quartered_palette(), &mut rng),
            Err(ChromaError::PaletteMismatch { .. })
        ));
    }
}
