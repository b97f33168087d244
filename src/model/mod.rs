//! The clustering engine's data model: the immutable point matrix with its
//! labels ([`point_store`]), the shared centroid/count state
//! ([`cluster_state`]), and the lock-free part-level write discipline that
//! lets many workers contribute to the same centroid concurrently
//! ([`part`]).

pub mod cluster_state;
pub mod part;
pub mod point_store;

pub use cluster_state::ClusterState;
pub use point_store::PointStore;
