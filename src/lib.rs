//! A multi-threaded Lloyd's k-means clustering engine.
//!
//! Splits an N×D point matrix across a fixed worker pool and iterates the
//! standard two-phase refinement — assign each point to its nearest centroid,
//! then recompute each centroid as the mean of its members — until no point
//! changes cluster or an iteration cap is reached. Concurrency is hand-rolled:
//! a reusable two-phase [`concurrency::Barrier`] synchronizes the phases, and
//! a lock-free part-level write discipline ([`model::part`]) lets many workers
//! accumulate into the same centroid without a mutex.
//!
//! ```no_run
//! use kmeans_core::config::Config;
//! use kmeans_core::engine::KMeansEngine;
//! use kmeans_core::io::points::read_points;
//!
//! # fn main() -> Result<(), kmeans_core::error::KMeansError> {
//! let config = Config::load("kmeans.toml")?;
//! let points = read_points(&config.data_filename, config.dimensions_number, config.points_number)?;
//! let engine = KMeansEngine::new(points, config.clusters_number, config.threads_number, config.seed)?;
//! let outcome = engine.run();
//! # let _ = outcome;
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod concurrency;
pub mod config;
pub mod engine;
pub mod error;
pub mod io;
pub mod model;
pub mod worker;

pub use config::Config;
pub use engine::{KMeansEngine, Outcome};
pub use error::KMeansError;
