// src/processing/ndvi.rs
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::error::{NdviError, Result};
use crate::io::DecodedRaster;
use crate::processing::indices::{IndexCalculator, NDI};
use crate::utils::Statistics;

/// NDVI array with its summary statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NdviResult {
    /// Row-major, `shape.0` rows of `shape.1` values each.
    pub ndvi_array: Vec<Vec<f32>>,
    pub statistics: Statistics,
    /// (height, width)
    pub shape: (usize, usize),
}

/// Computes NDVI from an encoded raster held in memory.
///
/// `red_band` and `nir_band` are 1-indexed band numbers. Both are checked
/// against the raster's band count before anything is read.
#[instrument(level = "debug", skip(buffer), fields(bytes = buffer.len()))]
pub fn compute(buffer: Vec<u8>, red_band: usize, nir_band: usize) -> Result<NdviResult> {
    let result = compute_inner(buffer, red_band, nir_band);
    if let Err(e) = &result {
        warn!(error = %e, "NDVI calculation failed");
    }
    result
}

fn compute_inner(buffer: Vec<u8>, red_band: usize, nir_band: usize) -> Result<NdviResult> {
    let raster = DecodedRaster::from_bytes(buffer)?;

    let band_count = raster.band_count();
    let valid = |band: usize| (1..=band_count).contains(&band);
    if !(valid(red_band) && valid(nir_band)) {
        return Err(NdviError::InvalidBand {
            red_band,
            nir_band,
            band_count,
        });
    }

    let red = raster.read_band(red_band)?;
    let nir = raster.read_band(nir_band)?;

    let calculator = NDI::ndvi(0, 1);
    let ndvi = calculator.calculate(&[nir, red])?;
    let (width, height) = ndvi.shape();

    let statistics = Statistics::from_values(ndvi.data())
        .ok_or_else(|| NdviError::Unexpected("raster has no pixels".to_string()))?;

    debug!(index = calculator.name(), width, height, ?statistics, "computed index");

    let ndvi_array = ndvi
        .data()
        .chunks(width)
        .map(<[f32]>::to_vec)
        .collect();

    Ok(NdviResult {
        ndvi_array,
        statistics,
        shape: (height, width),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_buffer_is_io_error() {
        assert!(matches!(compute(Vec::new(), 1, 2), Err(NdviError::Io(_))));
    }

    #[test]
    fn garbage_is_io_error() {
        let garbage = b"definitely not a raster file".to_vec();
        assert!(matches!(compute(garbage, 1, 1), Err(NdviError::Io(_))));
    }
}
