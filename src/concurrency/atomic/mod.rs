//! Lock-free atomic primitives used by the clustering engine's concurrency
//! protocol: plain wrappers over `core::sync::atomic` with the relaxed-ordering
//! helpers the barrier, worker change flags, and centroid part locks need.
//!
//! There is no token to brand these atomics against: the engine's
//! synchronization comes from the barrier, not from aliasing discipline, so
//! the types here are used directly as shared atomics behind an `Arc` or a
//! scoped-thread reference.

/// Atomic bitset with bit-granularity test-and-set, for part busy flags.
pub mod bitset;
/// `AtomicUsize` with the read-modify-write helpers the barrier needs.
pub mod counter;
/// A cache-line-friendly `AtomicBool`, for worker change flags.
pub mod flag;

pub use bitset::AtomicBitset;
pub use counter::AtomicCounter;
pub use flag::AtomicFlag;
