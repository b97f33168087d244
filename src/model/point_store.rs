//! The point matrix and per-point cluster labels.
//!
//! Grounded on the original `K_means_processor`'s `_points` buffer and
//! `Point_holder`/`Point` structs in `K_means_processor.h`/`.cpp`: an
//! immutable row-major matrix plus one mutable label per row. The label array
//! carries no internal synchronization — ownership discipline (each label
//! exclusively written by the worker whose slice contains it) is enforced by
//! the worker protocol, not by a lock.

use std::cell::UnsafeCell;

/// The immutable N×D point matrix plus the mutable per-point cluster labels.
///
/// `row(i)` is safe to call concurrently from any thread (the matrix is
/// read-only after construction). `label`/`set_label` are *not* internally
/// synchronized: a given index `i` must only ever be read or written by the
/// single worker whose slice contains it. Calling
/// them from any other thread is a data race even though the compiler won't
/// catch it — see the `# Safety` notes below.
pub struct PointStore {
    /// Row-major N×D matrix.
    data: Vec<f64>,
    dims: usize,
    size: usize,
    labels: Box<[UnsafeCell<usize>]>,
}

// SAFETY: `labels` cells are only ever accessed through `label`/`set_label`,
// whose safety contract restricts each cell to a single owning thread. The
// matrix itself (`data`) is immutable after construction.
unsafe impl Sync for PointStore {}

impl PointStore {
    /// Builds a point store from a row-major N×D matrix.
    ///
    /// # Panics
    /// Panics if `dims == 0`, `data` is empty, or `data.len()` is not a
    /// multiple of `dims`.
    pub fn new(data: Vec<f64>, dims: usize) -> Self {
        assert!(dims > 0, "dimensionality must be at least 1");
        assert!(!data.is_empty(), "point matrix must not be empty");
        assert_eq!(
            data.len() % dims,
            0,
            "point matrix length must be a multiple of its dimensionality"
        );
        let size = data.len() / dims;
        let labels = (0..size).map(|_| UnsafeCell::new(0)).collect();
        Self {
            data,
            dims,
            size,
            labels,
        }
    }

    /// The dimensionality D of each point.
    pub fn dims(&self) -> usize {
        self.dims
    }

    /// The number of points N.
    pub fn size(&self) -> usize {
        self.size
    }

    /// A read-only view of point `i`'s D coordinates.
    ///
    /// # Panics
    /// Panics if `i >= size()`.
    pub fn row(&self, i: usize) -> &[f64] {
        let start = i * self.dims;
        &self.data[start..start + self.dims]
    }

    /// The current cluster label of point `i`.
    ///
    /// # Safety
    /// Must only be called by the worker that owns `i`'s slice, or after a
    /// barrier has published a write made by that worker.
    #[inline]
    pub fn label(&self, i: usize) -> usize {
        // SAFETY: caller contract above; no concurrent writer per the
        // ownership discipline enforced by the worker protocol.
        unsafe { *self.labels[i].get() }
    }

    /// Sets point `i`'s cluster label.
    ///
    /// # Safety
    /// Must only be called by the worker that owns `i`'s slice.
    #[inline]
    pub fn set_label(&self, i: usize, cluster: usize) {
        // SAFETY: caller contract above.
        unsafe {
            *self.labels[i].get() = cluster;
        }
    }

    /// Copies out the full label array, in point-index order.
    ///
    /// Intended for result harvest after all workers have joined; at that
    /// point there are no other readers or writers left.
    pub fn labels_snapshot(&self) -> Vec<usize> {
        self.labels.iter().map(|c| unsafe { *c.get() }).collect()
    }
}

/// A contiguous, disjoint index range owned by one worker.
///
/// Grounded on `K_means_lib::utils::Range` (`utils.hpp`): the original wraps a
/// raw pointer-and-length pair; here a plain `Range<usize>` over point
/// indices plays the same role since [`PointStore::row`] already does bounds
/// checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slice {
    pub first: usize,
    pub len: usize,
}

impl Slice {
    /// Iterates the point indices in this slice.
    pub fn indices(self) -> impl Iterator<Item = usize> {
        self.first..(self.first + self.len)
    }
}

/// Splits `n` points across `threads` workers as evenly as possible: the
/// first `n % threads` workers get one extra point each.
///
/// # Panics
/// Panics if `threads == 0`.
pub fn partition_slices(n: usize, threads: usize) -> Vec<Slice> {
    assert!(threads > 0, "need at least one worker");
    let base = n / threads;
    let remainder = n % threads;
    let mut slices = Vec::with_capacity(threads);
    let mut first = 0;
    for w in 0..threads {
        let len = base + usize::from(w < remainder);
        slices.push(Slice { first, len });
        first += len;
    }
    slices
}
