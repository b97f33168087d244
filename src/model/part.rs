//! Lock-free, bounded-contention writes into a shared centroid vector.
//!
//! Grounded directly on `Buffer.hpp`'s `Atomic_buffer<float>`: the original
//! splits a centroid's coordinates into `parts_number` contiguous `Part`s,
//! each carrying an `std::atomic_flag`, and `atomic_write` loops over parts
//! taking whichever one it can `test_and_set`, applying the update, then
//! clearing the flag, until every part has been visited exactly once
//! (`parts_processing_indicators`/`is_done` in the original). This module is
//! the same algorithm with the single `atomic_flag` replaced by one bit of
//! [`crate::concurrency::atomic::AtomicBitset`] per part, so a single
//! cache-line-sized bitset can guard an arbitrary number of parts.

use core::sync::atomic::Ordering;

use crate::concurrency::atomic::AtomicBitset;

/// One contiguous sub-range of a centroid's D coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Part {
    pub first: usize,
    pub len: usize,
}

/// Splits `dims` coordinates into `parts_number` contiguous, near-equal parts,
/// distributing the remainder across the first parts — the same scheme
/// the same scheme used to split points across workers, and the one
/// `Atomic_buffer::make_parts` uses in the original.
///
/// # Panics
/// Panics if `dims == 0` or `parts_number == 0`.
pub fn layout(dims: usize, parts_number: usize) -> Vec<Part> {
    assert!(dims > 0, "a centroid needs at least one coordinate");
    assert!(parts_number > 0, "need at least one part");
    let parts_number = parts_number.min(dims);
    let base = dims / parts_number;
    let remainder = dims % parts_number;
    let mut parts = Vec::with_capacity(parts_number);
    let mut first = 0;
    for i in 0..parts_number {
        let len = base + usize::from(i < remainder);
        parts.push(Part { first, len });
        first += len;
    }
    parts
}

/// The number of parts prescribed for a centroid with `dims`
/// coordinates shared by `threads` workers: `P = min(D, 2T)`.
pub fn part_count_for(dims: usize, threads: usize) -> usize {
    dims.min(2 * threads)
}

/// Guards one centroid's parts with a test-and-set bit each, giving lock-free,
/// bounded-contention access: a writer that loses the race for a part simply
/// tries the next one and comes back to it later, instead of blocking.
pub struct PartGuard {
    parts: Vec<Part>,
    busy: AtomicBitset,
}

impl PartGuard {
    /// Builds a part guard over `dims` coordinates split into
    /// `parts_number` parts.
    pub fn new(dims: usize, parts_number: usize) -> Self {
        let parts = layout(dims, parts_number);
        let busy = AtomicBitset::new(parts.len());
        Self { parts, busy }
    }

    /// The parts this guard manages, in coordinate order.
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Visits every part exactly once, calling `apply(index, part)` while
    /// holding that part's busy bit. A part already claimed by a concurrent
    /// caller is retried later in the same call — each caller is responsible
    /// for applying its own contribution to every part, so it cannot skip
    /// one just because another caller currently holds it.
    pub fn for_each_part_once(&self, mut apply: impl FnMut(usize, &Part)) {
        let mut done = vec![false; self.parts.len()];
        let mut remaining = done.len();

        while remaining > 0 {
            for (index, part) in self.parts.iter().enumerate() {
                if done[index] {
                    continue;
                }

                if self.busy.test_and_set(index, Ordering::AcqRel) {
                    apply(index, part);
                    self.busy.clear_bit(index, Ordering::Release);
                    done[index] = true;
                    remaining -= 1;
                }
            }
        }
    }
}
