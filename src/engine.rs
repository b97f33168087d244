//! Wires the point store, cluster state, and barrier together and drives one
//! clustering run to completion.
//!
//! Grounded on `K_means_lib::process` (construction/validation) and
//! `K_means_processor::process` (spawning `threads_number` `thread_worker`s
//! and joining them) from `K_means_processor.cpp`.

use crate::concurrency::atomic::AtomicFlag;
use crate::concurrency::{Barrier, CachePadded};
use crate::config::Config;
use crate::error::KMeansError;
use crate::io::points::{read_points, PointMatrix};
use crate::model::point_store::partition_slices;
use crate::model::{ClusterState, PointStore};
use crate::worker::run_worker;

/// The result of a completed clustering run.
#[derive(Debug, Clone)]
pub struct Outcome {
    /// The K final centroids, in cluster-index order.
    pub centroids: Vec<Vec<f64>>,
    /// The cluster label of each input point, in input order.
    pub labels: Vec<usize>,
}

/// Owns a point store, cluster state, and worker count for one clustering run.
pub struct KMeansEngine {
    points: PointStore,
    clusters: ClusterState,
    threads: usize,
}

impl KMeansEngine {
    /// Builds an engine from an already-parsed point matrix.
    ///
    /// # Errors
    /// Returns [`KMeansError::InvalidParameters`] if `k < 2`, `n < k`,
    /// `threads == 0`, or `dims == 0`.
    pub fn new(
        matrix: PointMatrix,
        k: usize,
        threads: usize,
        seed: Option<u64>,
    ) -> Result<Self, KMeansError> {
        let n = if matrix.dims == 0 { 0 } else { matrix.data.len() / matrix.dims };
        if k < 2 || n < k || threads == 0 || matrix.dims == 0 {
            return Err(KMeansError::InvalidParameters {
                k,
                n,
                threads,
                dims: matrix.dims,
            });
        }

        let points = PointStore::new(matrix.data, matrix.dims);
        let clusters = ClusterState::new(&points, k, threads, seed);

        Ok(Self {
            points,
            clusters,
            threads,
        })
    }

    /// Loads the input matrix from `config.data_filename` and builds an
    /// engine ready to [`run`](Self::run).
    ///
    /// # Errors
    /// Returns [`KMeansError::Io`] if the input file cannot be read, or
    /// [`KMeansError::InvalidParameters`] if the configured parameters are
    /// invalid.
    pub fn from_config(config: &Config) -> Result<Self, KMeansError> {
        let matrix = read_points(
            &config.data_filename,
            config.dimensions_number,
            config.points_number,
        )?;
        Self::new(
            matrix,
            config.clusters_number,
            config.threads_number,
            config.seed,
        )
    }

    /// Runs the clustering loop to convergence and harvests the result.
    pub fn run(&self) -> Outcome {
        let barrier = Barrier::new(self.threads);
        let flags: Vec<CachePadded<AtomicFlag>> = (0..self.threads)
            .map(|_| CachePadded::new(AtomicFlag::new(false)))
            .collect();
        let slices = partition_slices(self.points.size(), self.threads);

        std::thread::scope(|scope| {
            for (w, &slice) in slices.iter().enumerate() {
                let points = &self.points;
                let clusters = &self.clusters;
                let barrier = &barrier;
                let flags = &flags;
                scope.spawn(move || run_worker(w, slice, points, clusters, barrier, flags));
            }
        });

        Outcome {
            centroids: self.clusters.all_centroids(),
            labels: self.points.labels_snapshot(),
        }
    }
}
