use core::sync::atomic::{AtomicBool, Ordering};

/// A thin `AtomicBool` wrapper, used for each worker's per-iteration
/// "did any point in my slice change cluster" flag.
#[repr(transparent)]
pub struct AtomicFlag {
    inner: AtomicBool,
}

impl AtomicFlag {
    /// Creates a new flag.
    #[inline(always)]
    pub const fn new(value: bool) -> Self {
        Self {
            inner: AtomicBool::new(value),
        }
    }

    /// Loads the current value.
    #[inline(always)]
    pub fn load(&self, order: Ordering) -> bool {
        self.inner.load(order)
    }

    /// Stores a new value.
    #[inline(always)]
    pub fn store(&self, value: bool, order: Ordering) {
        self.inner.store(value, order);
    }
}

unsafe impl Send for AtomicFlag {}
unsafe impl Sync for AtomicFlag {}
