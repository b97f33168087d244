//! Property tests over the partitioning and clustering invariants that must
//! hold regardless of input size or shape.

use kmeans_core::engine::KMeansEngine;
use kmeans_core::io::points::PointMatrix;
use kmeans_core::model::point_store::partition_slices;
use proptest::prelude::*;

proptest! {
    #[test]
    fn partition_slices_cover_every_point_exactly_once(n in 0usize..500, threads in 1usize..17) {
        let slices = partition_slices(n, threads);
        let mut covered = vec![false; n];
        for slice in &slices {
            for i in slice.indices() {
                prop_assert!(!covered[i]);
                covered[i] = true;
            }
        }
        prop_assert!(covered.iter().all(|&c| c));
        prop_assert_eq!(slices.iter().map(|s| s.len).sum::<usize>(), n);
    }

    #[test]
    fn final_labels_are_within_range_and_counts_are_coherent(
        points in prop::collection::vec(-100.0f64..100.0, 4..60),
        k in 2usize..4,
        threads in 1usize..5,
    ) {
        // Build a 2-D matrix out of the flat sample, dropping a trailing odd
        // coordinate if the sample has one.
        let mut data = points;
        if data.len() % 2 != 0 {
            data.pop();
        }
        let n = data.len() / 2;
        prop_assume!(n >= k);

        let engine = KMeansEngine::new(PointMatrix { data, dims: 2 }, k, threads, Some(123)).unwrap();
        let outcome = engine.run();

        prop_assert_eq!(outcome.labels.len(), n);
        prop_assert!(outcome.labels.iter().all(|&l| l < k));
        prop_assert_eq!(outcome.centroids.len(), k);
        for centroid in &outcome.centroids {
            prop_assert_eq!(centroid.len(), 2);
            prop_assert!(centroid.iter().all(|c| c.is_finite()));
        }
    }
}
