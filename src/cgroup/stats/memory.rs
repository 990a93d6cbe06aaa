//! File-level readers for the cgroup v1 memory controller.
//!
//! Each reader opens its file, consumes it and drops the handle before
//! returning, on every path. Nothing is kept open between scrapes.

use std::path::Path;

use crate::fsutil;

use super::{StatParseError, StatReadError, parser};

/// Reads a single-value file such as `memory.usage_in_bytes`.
///
/// # Errors
///
/// Returns [`StatReadError::File`] if the file cannot be opened or read, and
/// [`StatReadError::Parse`] if its trimmed content is not a number.
pub fn read_single_value(path: impl AsRef<Path>) -> Result<f64, StatReadError> {
    let path = path.as_ref();
    let content = fsutil::read_to_string(path)?;
    parser::parse_single_value(&content).map_err(|source| StatReadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads `memory.stat` and passes every two-field line to `on_pair`.
///
/// # Errors
///
/// Returns [`StatReadError::File`] if the file cannot be opened and
/// [`StatReadError::Parse`] if reading stops midway. Lines handed to `on_pair`
/// before the failure are not rolled back.
pub fn read_memory_stat(
    path: impl AsRef<Path>,
    on_pair: impl FnMut(usize, &str, &str),
) -> Result<(), StatReadError> {
    let path = path.as_ref();
    let mut reader = fsutil::open_file_reader(path).map_err(fsutil::FileReadError::from)?;
    parser::for_each_stat_pair(&mut reader, on_pair).map_err(|source: StatParseError| {
        StatReadError::Parse {
            path: path.to_path_buf(),
            source,
        }
    })
}
