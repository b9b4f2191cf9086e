// src/processing/indices/mod.rs
pub mod ndi;

use gdal::raster::Buffer;

use crate::error::Result;

// Re-export indices
pub use ndi::NDI;

/// Trait for spectral index calculators
pub trait IndexCalculator: Send + Sync {
    /// Calculate the index from the provided input bands
    fn calculate(&self, inputs: &[Buffer<f32>]) -> Result<Buffer<f32>>;

    /// Return the name of the index
    fn name(&self) -> &str;
}
