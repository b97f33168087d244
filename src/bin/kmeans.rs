//! Top-level driver binary: loads a TOML config, runs the clustering engine,
//! and writes the resulting centroids to disk.
//!
//! The original's counterpart is `Example/main.cpp`: read a settings file
//! path from the command line, call `K_means_lib::process`, and
//! `print_result_to_file` the outcome.

use std::path::PathBuf;

use anyhow::Context;
use kmeans_core::config::Config;
use kmeans_core::engine::KMeansEngine;
use kmeans_core::io::writer::write_centroids;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config_path: PathBuf = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .context("usage: kmeans <config.toml>")?;

    let config = Config::load(&config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;

    let engine = KMeansEngine::from_config(&config).context("building clustering engine")?;

    tracing::info!(
        clusters = config.clusters_number,
        threads = config.threads_number,
        "starting clustering run"
    );

    let outcome = engine.run();

    write_centroids(&config.result_filename, &outcome.centroids)
        .with_context(|| format!("writing result to {}", config.result_filename))?;

    tracing::info!(path = %config.result_filename, "wrote centroids");

    Ok(())
}
