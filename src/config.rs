//! TOML-deserialized run configuration.
//!
//! Grounded on `K_means_lib::process`'s `boost::property_tree` settings read
//! (`K_means_lib.cpp`): `Data filename` and `Clusters number` are
//! hard-required there — missing either logs a diagnostic and returns
//! `nullptr` — while `Dimensions number`/`Points number` are optional hints
//! and `Threads number` defaults to 1 (with an explicit `== 0` guard falling
//! back to 1 too). The same four optional/defaulted fields and two required
//! ones are reproduced here as `serde` fields on [`Config`].

use std::path::Path;

use serde::Deserialize;

use crate::error::KMeansError;

/// The settings that drive one clustering run, read from a TOML file.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Path to the whitespace/comma-delimited input point matrix.
    pub data_filename: String,
    /// Path the output centroids are written to.
    pub result_filename: String,
    /// K, the number of clusters to fit.
    pub clusters_number: usize,
    /// T, the number of worker threads. Treated as 1 if absent or zero.
    #[serde(default = "default_threads_number")]
    pub threads_number: usize,
    /// D, the point dimensionality. Inferred from the input's first row if absent.
    pub dimensions_number: Option<usize>,
    /// N, the point count. Inferred by counting input rows if absent.
    pub points_number: Option<usize>,
    /// Seed for the initial centroid draw. Drawn from entropy if absent.
    pub seed: Option<u64>,
}

fn default_threads_number() -> usize {
    1
}

impl Config {
    /// Reads and parses a TOML config file.
    ///
    /// # Errors
    /// Returns [`KMeansError::ConfigParse`] if the file isn't well-formed
    /// TOML, [`KMeansError::Io`] if it can't be read, or
    /// [`KMeansError::Config`] if `threads_number` is present but zero.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, KMeansError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| KMeansError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Config = toml::from_str(&text)?;
        if config.threads_number == 0 {
            config.threads_number = default_threads_number();
        }
        Ok(config)
    }
}
