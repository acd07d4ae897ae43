//! Error types for steamguide operations.
//!
//! Only the I/O boundary (manifest loading, file handling) can fail; the
//! conversion core degrades to fallback output instead of erroring.

use thiserror::Error;

/// Errors that can occur while loading inputs or writing outputs.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid image manifest: {0}")]
    InvalidManifest(String),
}

pub type Result<T> = std::result::Result<T, Error>;
