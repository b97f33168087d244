//! Shared, concurrently-updated centroid and membership-count state.
//!
//! Grounded on the original `K_means_processor::Cluster` (`K_means_processor.h`):
//! a center vector plus a point count, there protected by an
//! `Atomic_buffer<float>` and a plain `std::atomic<size_t>`. Here the center
//! is a `Box<[UnsafeCell<f64>]>` guarded at part granularity by
//! [`crate::model::part::PartGuard`] and the count is an
//! [`crate::concurrency::atomic::AtomicCounter`].

use std::cell::UnsafeCell;
use std::collections::HashSet;
use std::sync::atomic::Ordering;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::concurrency::atomic::AtomicCounter;
use crate::model::part::{part_count_for, PartGuard};
use crate::model::point_store::PointStore;

/// One cluster's centroid vector and membership count.
struct Cluster {
    center: Box<[UnsafeCell<f64>]>,
    count: AtomicCounter,
    parts: PartGuard,
}

// SAFETY: `center` is only ever zeroed/read wholesale by the single worker
// that owns this cluster (enforced by `ClusterState::owned_by`), and only
// ever accumulated into through `PartGuard`'s part-level test-and-set, which
// serializes concurrent writers per part. `count` is a plain atomic.
unsafe impl Sync for Cluster {}

impl Cluster {
    fn new(initial: Vec<f64>, parts_number: usize) -> Self {
        let dims = initial.len();
        let center = initial.into_iter().map(UnsafeCell::new).collect();
        Self {
            center,
            count: AtomicCounter::new(0),
            parts: PartGuard::new(dims, parts_number),
        }
    }

    fn centroid(&self) -> Vec<f64> {
        self.center.iter().map(|c| unsafe { *c.get() }).collect()
    }

    /// # Safety
    /// Must only be called by this cluster's owning worker, and only between
    /// Barrier 1 and Barrier 2 (before any `accumulate` call for this cycle).
    unsafe fn zero(&self) {
        for cell in self.center.iter() {
            *cell.get() = 0.0;
        }
    }

    fn accumulate(&self, point: &[f64], weight: f64) {
        self.parts.for_each_part_once(|_index, part| {
            for d in part.first..part.first + part.len {
                // SAFETY: this part's busy bit is held for the duration of
                // this closure, so no other accumulate call touches these
                // coordinates concurrently; `zero`/centroid reads never
                // overlap an in-flight accumulation phase (barrier-ordered).
                unsafe {
                    let cell = self.center[d].get();
                    *cell += point[d] * weight;
                }
            }
        });
    }
}

/// Owns the K centroids and their membership counts.
pub struct ClusterState {
    clusters: Vec<Cluster>,
    dims: usize,
    threads: usize,
}

impl ClusterState {
    /// Builds the initial cluster state by drawing `k` distinct point indices
    /// uniformly at random (rejecting duplicates) from `points` and copying
    /// each as an initial centroid. The original leaves seeding unspecified;
    /// here it is resolved with an explicit, optional seed for reproducibility.
    ///
    /// # Panics
    /// Panics if `k < 2`, `points.size() < k`, or `threads == 0`.
    pub fn new(points: &PointStore, k: usize, threads: usize, seed: Option<u64>) -> Self {
        assert!(k >= 2, "need at least 2 clusters");
        assert!(points.size() >= k, "fewer points than clusters");
        assert!(threads > 0, "need at least one worker thread");

        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut chosen = HashSet::with_capacity(k);
        while chosen.len() < k {
            chosen.insert(rng.gen_range(0..points.size()));
        }
        let mut chosen: Vec<usize> = chosen.into_iter().collect();
        chosen.sort_unstable();

        let parts_number = part_count_for(points.dims(), threads);
        let clusters = chosen
            .into_iter()
            .map(|i| Cluster::new(points.row(i).to_vec(), parts_number))
            .collect();

        Self {
            clusters,
            dims: points.dims(),
            threads,
        }
    }

    /// Builds cluster state from explicit initial centroids — the hook
    /// a re-run can use to feed a prior run's output centroids back in as
    /// the next run's seed.
    ///
    /// # Panics
    /// Panics if `centroids.len() < 2`, any centroid's length differs from
    /// `dims`, or `threads == 0`.
    pub fn from_centroids(centroids: Vec<Vec<f64>>, dims: usize, threads: usize) -> Self {
        assert!(centroids.len() >= 2, "need at least 2 clusters");
        assert!(threads > 0, "need at least one worker thread");
        assert!(
            centroids.iter().all(|c| c.len() == dims),
            "every centroid must have `dims` coordinates"
        );

        let parts_number = part_count_for(dims, threads);
        let clusters = centroids
            .into_iter()
            .map(|c| Cluster::new(c, parts_number))
            .collect();

        Self {
            clusters,
            dims,
            threads,
        }
    }

    /// The number of clusters K.
    pub fn k(&self) -> usize {
        self.clusters.len()
    }

    /// The dimensionality D shared by every centroid.
    pub fn dims(&self) -> usize {
        self.dims
    }

    /// A read-only copy of cluster `c`'s current centroid.
    pub fn centroid(&self, c: usize) -> Vec<f64> {
        self.clusters[c].centroid()
    }

    /// All K centroids, in cluster-index order.
    pub fn all_centroids(&self) -> Vec<Vec<f64>> {
        self.clusters.iter().map(Cluster::centroid).collect()
    }

    /// Cluster `c`'s current membership count.
    pub fn count(&self, c: usize) -> usize {
        self.clusters[c].count.load(Ordering::Relaxed)
    }

    /// Sets cluster `c`'s count to zero.
    pub fn reset_count(&self, c: usize) {
        self.clusters[c].count.store(0, Ordering::Relaxed);
    }

    /// Atomically adds `n` to cluster `c`'s count.
    pub fn add_to_count(&self, c: usize, n: usize) {
        self.clusters[c].count.fetch_add(n, Ordering::Relaxed);
    }

    /// The clusters worker `w` is responsible for zeroing and resetting:
    /// `{ c : c mod threads == w }`.
    pub fn owned_by(&self, w: usize) -> impl Iterator<Item = usize> + '_ {
        let threads = self.threads;
        (0..self.k()).filter(move |c| c % threads == w)
    }

    /// Zeroes cluster `c`'s centroid, unless its snapshotted count was zero —
    /// the empty-cluster retention rule: when the snapshot count is 0, the
    /// zero step is skipped and the previous centroid value is retained.
    ///
    /// # Safety
    /// Must only be called by the worker that owns `c` (see [`Self::owned_by`]),
    /// and only between Barrier 1 and Barrier 2 of a given iteration.
    pub unsafe fn zero_owned_centroid_unless_empty(&self, c: usize, snapshot_count: usize) {
        if snapshot_count > 0 {
            self.clusters[c].zero();
        }
    }

    /// Adds `point[d] / snapshot_count` to every coordinate of cluster `c`'s
    /// centroid, serialized at part granularity so many workers can
    /// contribute to the same centroid concurrently.
    /// A no-op if `snapshot_count == 0` (no point is assigned to `c`).
    pub fn accumulate(&self, c: usize, point: &[f64], snapshot_count: usize) {
        if snapshot_count == 0 {
            return;
        }
        self.clusters[c].accumulate(point, 1.0 / snapshot_count as f64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_construction_is_deterministic() {
        let points = PointStore::new(
            (0..40).map(|i| i as f64).collect::<Vec<_>>(),
            2,
        );
        let a = ClusterState::new(&points, 3, 4, Some(7));
        let b = ClusterState::new(&points, 3, 4, Some(7));
        assert_eq!(a.all_centroids(), b.all_centroids());
    }

    #[test]
    fn owned_centroids_partition_cluster_indices() {
        let points = PointStore::new(vec![0.0; 20], 2);
        let state = ClusterState::new(&points, 5, 8, Some(1));
        let mut seen = vec![false; 5];
        for w in 0..8 {
            for c in state.owned_by(w) {
                assert!(!seen[c], "cluster {c} owned twice");
                seen[c] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn empty_cluster_zero_is_skipped() {
        let points = PointStore::new(vec![1.0, 1.0, 2.0, 2.0], 2);
        let state = ClusterState::new(&points, 2, 1, Some(3));
        let before = state.centroid(0);
        unsafe {
            state.zero_owned_centroid_unless_empty(0, 0);
        }
        assert_eq!(state.centroid(0), before);
    }

    #[test]
    fn concurrent_accumulate_matches_serial_sum() {
        let points = PointStore::new(vec![0.0, 0.0, 10.0, 10.0], 2);
        let state = ClusterState::new(&points, 2, 4, Some(9));
        unsafe {
            state.zero_owned_centroid_unless_empty(0, 4);
        }

        let contributions: Vec<Vec<f64>> = (0..4).map(|_| vec![1.0, 2.0]).collect();
        std::thread::scope(|s| {
            for point in &contributions {
                let state = &state;
                s.spawn(move || state.accumulate(0, point, 4));
            }
        });

        let centroid = state.centroid(0);
        assert!((centroid[0] - 1.0).abs() < 1e-9);
        assert!((centroid[1] - 2.0).abs() < 1e-9);
    }
}
