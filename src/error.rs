//! The crate's error type.

use std::path::PathBuf;

/// Everything that can go wrong building or running a [`crate::engine::KMeansEngine`].
#[derive(thiserror::Error, Debug)]
pub enum KMeansError {
    /// A config file is missing a required field or otherwise malformed in a
    /// way TOML deserialization alone can't express.
    #[error("configuration error: {0}")]
    Config(String),

    /// Construction-time parameter validation failed — reported before any
    /// worker thread is spawned.
    #[error("invalid parameters: k={k}, n={n}, threads={threads}, dims={dims}")]
    InvalidParameters {
        /// Requested cluster count.
        k: usize,
        /// Point count.
        n: usize,
        /// Requested worker thread count.
        threads: usize,
        /// Point dimensionality.
        dims: usize,
    },

    /// Reading or writing a data file failed.
    #[error("I/O error reading {path}: {source}")]
    Io {
        /// The file that could not be read or written.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The config file's TOML was not well-formed.
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}
