//! The per-worker iteration loop: the heart of the clustering algorithm.
//!
//! Grounded on `K_means_processor::thread_worker` (`K_means_processor.cpp`):
//! the same three-barrier structure — assign, synchronize, recenter — with
//! the same owned-centroid partitioning (`c mod threads_number == thread_id`
//! there, `c % threads == w` here) and the same lowest-index tie-break on
//! equal distances.

use std::sync::atomic::Ordering;

use crate::concurrency::{Barrier, CachePadded};
use crate::concurrency::atomic::AtomicFlag;
use crate::model::point_store::{PointStore, Slice};
use crate::model::ClusterState;

/// Computes the squared Euclidean distance between two equal-length vectors.
fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Picks the cluster with the smallest squared distance to `point`, breaking
/// ties by lowest cluster index — the determinism `spec.md` §4.4 requires to
/// guarantee termination.
fn nearest_centroid(point: &[f64], clusters: &ClusterState) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for c in 0..clusters.k() {
        let distance = squared_distance(point, &clusters.centroid(c));
        if distance < best_distance {
            best_distance = distance;
            best = c;
        }
    }
    best
}

/// Runs one worker's share of the clustering loop to convergence.
///
/// `w` is this worker's index among `flags.len()` participants; `slice` is
/// the contiguous range of point indices this worker owns.
///
/// Returns the number of iterations this worker completed before the
/// convergence check passed for everyone.
pub fn run_worker(
    w: usize,
    slice: Slice,
    points: &PointStore,
    clusters: &ClusterState,
    barrier: &Barrier,
    flags: &[CachePadded<AtomicFlag>],
) -> usize {
    let mut iterations = 0;

    loop {
        // Phase A: assignment.
        let mut changed = false;
        for i in slice.indices() {
            let old = points.label(i);
            let best = nearest_centroid(points.row(i), clusters);
            points.set_label(i, best);
            clusters.add_to_count(best, 1);
            if best != old {
                changed = true;
            }
        }
        flags[w].store(changed, Ordering::Relaxed);

        barrier.arrive_and_wait();

        if flags.iter().all(|flag| !flag.load(Ordering::Relaxed)) {
            return iterations;
        }

        // Phase B: recentering.
        let mut snapshot_counts = vec![0usize; clusters.k()];
        for c in 0..clusters.k() {
            snapshot_counts[c] = clusters.count(c);
        }
        for c in clusters.owned_by(w) {
            // SAFETY: `w` owns `c` by construction of `owned_by`, and no
            // accumulate/reset step for the prior iteration can still be
            // in flight past Barrier 3.
            unsafe {
                clusters.zero_owned_centroid_unless_empty(c, snapshot_counts[c]);
            }
        }

        barrier.arrive_and_wait();

        for i in slice.indices() {
            let c = points.label(i);
            clusters.accumulate(c, points.row(i), snapshot_counts[c]);
        }
        for c in clusters.owned_by(w) {
            clusters.reset_count(c);
        }

        barrier.arrive_and_wait();

        iterations += 1;
    }
}
