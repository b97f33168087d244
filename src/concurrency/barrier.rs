//! A reusable two-phase barrier for a fixed number of participants.
//!
//! Unlike `std::sync::Barrier`, this one never "leaks" generation state across
//! cycles through a single counter: a single fetch-and-check-equals-T counter
//! has a well-known race where a fast participant can lap a slow one and
//! re-enter the next cycle before the slow one has left the current one. Two
//! counters — one for arrivals, one for departures — close that race: a
//! participant may not start announcing its arrival in cycle `c + 1` until it
//! has observed that *every* participant's departure from cycle `c` has been
//! recorded.
//!
//! Grounded on the `synchronize_threads` two-counter toggle from the original
//! `K_means_processor.cpp`, reworked around two monotonically increasing
//! counters (rather than an up/down toggle), and built from the same atomic
//! building blocks as the rest of [`crate::concurrency::atomic`].

use core::sync::atomic::Ordering;
use crossbeam_utils::Backoff;

use super::atomic::AtomicCounter;

/// A reusable two-phase barrier for `participants` threads.
///
/// `arrive_and_wait` blocks the calling thread until every participant has
/// called it, then returns. The barrier may be reused for an unbounded number
/// of cycles over its lifetime; it never fails, times out, or can be
/// cancelled.
pub struct Barrier {
    participants: usize,
    entry: AtomicCounter,
    exit: AtomicCounter,
}

impl Barrier {
    /// Creates a new barrier for exactly `participants` threads.
    ///
    /// # Panics
    /// Panics if `participants == 0`.
    pub fn new(participants: usize) -> Self {
        assert!(participants > 0, "a barrier needs at least one participant");
        Self {
            participants,
            entry: AtomicCounter::new(0),
            exit: AtomicCounter::new(0),
        }
    }

    /// The number of participants this barrier was built for.
    pub fn participants(&self) -> usize {
        self.participants
    }

    /// Blocks until all participants have called `arrive_and_wait` for the
    /// current cycle, then returns.
    ///
    /// Every write performed before this call by any participant is visible
    /// to every participant after their matching `arrive_and_wait` returns
    /// (a full fence is issued on the path out of the barrier).
    pub fn arrive_and_wait(&self) {
        let t = self.participants;

        // Phase 0: don't start a new cycle until the previous one has fully
        // drained (every participant has reached step 3 below).
        let backoff = Backoff::new();
        while self.exit.load(Ordering::Acquire) % t != 0 {
            spin_or_yield(&backoff);
        }

        // Phase 1: announce arrival, then wait for the rest of the cohort.
        self.entry.fetch_add(1, Ordering::AcqRel);
        let backoff = Backoff::new();
        while self.entry.load(Ordering::Acquire) % t != 0 {
            spin_or_yield(&backoff);
        }

        // Publish every write made before this call to every participant
        // crossing the barrier after it.
        core::sync::atomic::fence(Ordering::SeqCst);

        // Phase 2: announce departure.
        self.exit.fetch_add(1, Ordering::Release);
    }
}

#[inline]
fn spin_or_yield(backoff: &Backoff) {
    if backoff.is_completed() {
        std::thread::yield_now();
    } else {
        backoff.snooze();
    }
}
