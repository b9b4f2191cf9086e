// src/error.rs
use thiserror::Error;

/// Result type for NDVI calculations.
pub type Result<T> = std::result::Result<T, NdviError>;

/// Failure of a single NDVI calculation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NdviError {
    /// One of the requested band numbers is outside `1..=band_count`.
    #[error(
        "Band numbers out of range (red={red_band}, nir={nir_band}). \
         Valid range is 1 to {band_count}; image has {band_count} bands."
    )]
    InvalidBand {
        red_band: usize,
        nir_band: usize,
        band_count: usize,
    },

    /// The buffer could not be decoded, or a band could not be read.
    #[error("I/O error: could not read image. {0}")]
    Io(String),

    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

impl NdviError {
    /// True when the failure was caused by the caller's input.
    pub fn is_client_error(&self) -> bool {
        matches!(self, NdviError::InvalidBand { .. } | NdviError::Io(_))
    }
}
