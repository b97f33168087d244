//! End-to-end scenarios driving the full engine through `KMeansEngine::new`.

use kmeans_core::concurrency::atomic::AtomicFlag;
use kmeans_core::concurrency::{Barrier, CachePadded};
use kmeans_core::engine::KMeansEngine;
use kmeans_core::io::points::PointMatrix;
use kmeans_core::model::point_store::partition_slices;
use kmeans_core::model::{ClusterState, PointStore};
use kmeans_core::worker::run_worker;

fn matrix(data: Vec<f64>, dims: usize) -> PointMatrix {
    PointMatrix { data, dims }
}

#[test]
fn two_well_separated_clusters_are_recovered() {
    let data = vec![0.0, 0.0, 0.1, -0.1, -0.1, 0.1, 50.0, 50.0, 50.2, 49.8, 49.8, 50.2];
    let engine = KMeansEngine::new(matrix(data, 2), 2, 4, Some(11)).unwrap();
    let outcome = engine.run();

    let left = &outcome.labels[0..3];
    let right = &outcome.labels[3..6];
    assert!(left.iter().all(|&l| l == left[0]));
    assert!(right.iter().all(|&l| l == right[0]));
    assert_ne!(left[0], right[0]);
}

#[test]
fn degenerate_duplicate_points_converge() {
    let data = vec![3.0, 3.0, 3.0, 3.0, 3.0, 3.0, 3.0, 3.0];
    let engine = KMeansEngine::new(matrix(data, 2), 2, 2, Some(2)).unwrap();
    let outcome = engine.run();
    let first = outcome.labels[0];
    assert!(outcome.labels.iter().all(|&l| l == first));
}

#[test]
fn more_threads_than_clusters_converges() {
    let data = vec![0.0, 0.0, 0.3, 0.2, 30.0, 30.0, 30.1, 29.9];
    let engine = KMeansEngine::new(matrix(data, 2), 2, 6, Some(5)).unwrap();
    let outcome = engine.run();
    assert_eq!(outcome.labels[0], outcome.labels[1]);
    assert_eq!(outcome.labels[2], outcome.labels[3]);
}

#[test]
fn single_threaded_and_multi_threaded_runs_agree() {
    let data: Vec<f64> = (0..60)
        .map(|i| {
            let base = (i / 2) as f64;
            if i % 2 == 0 {
                base
            } else {
                base + 500.0
            }
        })
        .collect();

    let run_with = |threads| {
        KMeansEngine::new(matrix(data.clone(), 2), 2, threads, Some(42))
            .unwrap()
            .run()
    };

    let serial = run_with(1);
    let parallel = run_with(8);
    assert_eq!(serial.labels, parallel.labels);
    assert_eq!(serial.centroids, parallel.centroids);
}

#[test]
fn empty_clusters_retain_their_centroid() {
    // Three initial centroids, but all points are clustered around two
    // locations, so the third cluster should end up with count 0 and its
    // original centroid retained.
    let data = vec![0.0, 0.0, 0.1, 0.1, 0.2, -0.1, 40.0, 40.0, 40.1, 39.9, 39.9, 40.1];
    let engine = KMeansEngine::new(matrix(data, 2), 3, 3, Some(99)).unwrap();
    let outcome = engine.run();
    assert_eq!(outcome.centroids.len(), 3);
    for centroid in &outcome.centroids {
        assert_eq!(centroid.len(), 2);
        assert!(centroid.iter().all(|c| c.is_finite()));
    }
}

#[test]
fn rerunning_from_output_centroids_converges_in_one_iteration() {
    let data = vec![0.0, 0.0, 0.2, -0.1, 25.0, 25.0, 25.1, 24.9];
    let dims = 2;
    let threads = 2;

    let engine = KMeansEngine::new(matrix(data.clone(), dims), 2, threads, Some(17)).unwrap();
    let first = engine.run();

    // Feed the first run's output centroids back in as the second run's
    // seed, through the same `ClusterState::from_centroids` hook a re-run
    // uses — `KMeansEngine`'s fields are private, so this drives the point
    // store / cluster state / barrier / worker loop directly rather than
    // through the engine, the same way `src/worker.rs`'s own multi-worker
    // tests do.
    let points = PointStore::new(data, dims);
    let clusters = ClusterState::from_centroids(first.centroids.clone(), dims, threads);
    let barrier = Barrier::new(threads);
    let flags: Vec<CachePadded<AtomicFlag>> = (0..threads)
        .map(|_| CachePadded::new(AtomicFlag::new(false)))
        .collect();
    let slices = partition_slices(points.size(), threads);

    std::thread::scope(|s| {
        for (w, &slice) in slices.iter().enumerate() {
            let points = &points;
            let clusters = &clusters;
            let barrier = &barrier;
            let flags = &flags;
            s.spawn(move || run_worker(w, slice, points, clusters, barrier, flags));
        }
    });

    assert_eq!(points.labels_snapshot(), first.labels);
    assert_eq!(clusters.all_centroids(), first.centroids);
}
