//! Reads the whitespace/comma-delimited input point matrix.
//!
//! Grounded on the mixed `strtod`-plus-manual-split parsing in
//! `K_means_lib.cpp` and the `boost::tokenizer`-based variant in
//! `library.cpp`: both tolerate a malformed numeric field by substituting
//! `0.0` and logging rather than aborting the whole read, and both pad or
//! truncate a ragged row to the declared dimensionality (or, if none was
//! declared, take the first row's field count as the dimensionality).

use std::path::Path;

use crate::error::KMeansError;

/// A row-major N×D point matrix, as read from disk.
#[derive(Debug, Clone)]
pub struct PointMatrix {
    /// Row-major N×D data.
    pub data: Vec<f64>,
    /// D, the inferred or declared dimensionality.
    pub dims: usize,
}

fn split_fields(line: &str) -> Vec<&str> {
    line.split(|c: char| c.is_whitespace() || c == ',')
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .collect()
}

/// Reads one point per non-empty line from `path`.
///
/// `dimensions_hint` fixes the dimensionality up front; if absent it is taken
/// from the first row's field count. `points_hint` is used only to
/// preallocate; it is not validated against the actual row count.
///
/// A field that fails to parse as `f64` is replaced with `0.0` and logged. A
/// row with too few or too many fields is padded with `0.0` or truncated to
/// match the dimensionality, also logged.
///
/// # Errors
/// Returns [`KMeansError::Io`] if `path` cannot be read, or
/// [`KMeansError::Config`] if the file contains no data rows.
pub fn read_points(
    path: impl AsRef<Path>,
    dimensions_hint: Option<usize>,
    points_hint: Option<usize>,
) -> Result<PointMatrix, KMeansError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| KMeansError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut dims = dimensions_hint;
    let mut data = Vec::with_capacity(points_hint.unwrap_or(0) * dims.unwrap_or(1));
    let mut rows = 0usize;

    for (line_number, line) in text.lines().enumerate() {
        let fields = split_fields(line);
        if fields.is_empty() {
            continue;
        }

        let declared = *dims.get_or_insert(fields.len());

        let mut row: Vec<f64> = fields
            .iter()
            .enumerate()
            .map(|(field_number, field)| {
                field.parse::<f64>().unwrap_or_else(|_| {
                    tracing::warn!(
                        line = line_number + 1,
                        field = field_number + 1,
                        value = field,
                        "invalid numeric field, substituting 0.0"
                    );
                    0.0
                })
            })
            .collect();

        if row.len() != declared {
            tracing::warn!(
                line = line_number + 1,
                expected = declared,
                found = row.len(),
                "row field count disagrees with dimensionality, padding/truncating"
            );
            row.resize(declared, 0.0);
        }

        data.extend(row);
        rows += 1;
    }

    if rows == 0 {
        return Err(KMeansError::Config(format!(
            "{} contains no data rows",
            path.display()
        )));
    }

    Ok(PointMatrix {
        data,
        dims: dims.unwrap_or(0),
    })
}
