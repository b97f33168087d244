//! Concurrency primitives backing the clustering engine's worker protocol:
//! lock-free atomics ([`atomic`]), a reusable two-phase barrier ([`barrier`]),
//! and cache-line padding ([`cache_padded`]) to keep per-worker state from
//! false-sharing.

pub mod atomic;
pub mod barrier;
pub mod cache_padded;

pub use barrier::Barrier;
pub use cache_padded::CachePadded;
