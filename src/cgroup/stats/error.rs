//! Structured error types for reading and parsing memory controller files.
//!
//! - [`StatParseError`] describes content that could not be turned into a value.
//! - [`StatReadError`] pairs a parse failure, or a failure to read the file at
//!   all, with the path it happened at.
//!
//! The collector never surfaces these to its caller; they exist so every skipped
//! entry carries a reason that can be logged.

use std::num::ParseFloatError;
use std::path::PathBuf;

use thiserror::Error;

use crate::fsutil::FileReadError;

#[derive(Debug, Error)]
pub enum StatParseError {
    #[error("invalid value for '{key}' at line {line}: '{value}': {source}")]
    InvalidKeyValue {
        key: String,
        value: String,
        line: usize,
        #[source]
        source: ParseFloatError,
    },

    #[error("invalid value at line {line}: '{value}': {source}")]
    InvalidValue {
        value: String,
        line: usize,
        #[source]
        source: ParseFloatError,
    },

    #[error("error during I/O: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum StatReadError {
    #[error(transparent)]
    File(#[from] FileReadError),

    #[error("failed to parse `{path}`: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: StatParseError,
    },
}
