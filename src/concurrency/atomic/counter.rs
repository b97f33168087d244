use core::sync::atomic::{AtomicUsize, Ordering};

/// A thin `AtomicUsize` wrapper, used for cluster membership counts and the
/// barrier's entry/exit counters.
#[repr(transparent)]
pub struct AtomicCounter {
    inner: AtomicUsize,
}

impl AtomicCounter {
    /// Creates a new counter.
    #[inline(always)]
    pub const fn new(value: usize) -> Self {
        Self {
            inner: AtomicUsize::new(value),
        }
    }

    /// Loads the current value.
    #[inline(always)]
    pub fn load(&self, order: Ordering) -> usize {
        self.inner.load(order)
    }

    /// Stores a new value.
    #[inline(always)]
    pub fn store(&self, value: usize, order: Ordering) {
        self.inner.store(value, order);
    }

    /// Adds to the current value, returning the previous value.
    #[inline(always)]
    pub fn fetch_add(&self, value: usize, order: Ordering) -> usize {
        self.inner.fetch_add(value, order)
    }

    /// Bitwise OR with the current value, returning the previous value.
    #[inline(always)]
    pub fn fetch_or(&self, value: usize, order: Ordering) -> usize {
        self.inner.fetch_or(value, order)
    }

    /// Bitwise AND with the current value, returning the previous value.
    #[inline(always)]
    pub fn fetch_and(&self, value: usize, order: Ordering) -> usize {
        self.inner.fetch_and(value, order)
    }
}

unsafe impl Send for AtomicCounter {}
unsafe impl Sync for AtomicCounter {}
