//! Writes the final centroids to disk.
//!
//! Grounded on `K_means_lib::print_result_to_file`: one record per cluster,
//! coordinates joined by `", "` and terminated by a newline, with a blank
//! line separating records. The original preallocates the output file with a
//! `boost::iostreams::mapped_file_sink`; that's a write-throughput
//! optimization with no externally visible effect, so it is not reproduced
//! here.

use std::path::Path;

use crate::error::KMeansError;

/// Writes `centroids` to `path`, one record per cluster.
///
/// # Errors
/// Returns [`KMeansError::Io`] if `path` cannot be written.
pub fn write_centroids(path: impl AsRef<Path>, centroids: &[Vec<f64>]) -> Result<(), KMeansError> {
    let path = path.as_ref();

    let mut out = String::new();
    for centroid in centroids {
        let joined = centroid
            .iter()
            .map(|coordinate| coordinate.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&joined);
        out.push('\n');
        out.push('\n');
    }

    std::fs::write(path, out).map_err(|source| KMeansError::Io {
        path: path.to_path_buf(),
        source,
    })
}
