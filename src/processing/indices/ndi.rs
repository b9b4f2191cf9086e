// src/processing/indices/ndi.rs
use gdal::raster::Buffer;
use rayon::prelude::*;

use crate::error::{NdviError, Result};
use crate::processing::indices::IndexCalculator;

/// Normalized Difference Index (NDI) calculator: `(A - B) / (A + B)`.
///
/// Output is clipped to `[-1, 1]`. Pixels where `A + B == 0`, and pixels that
/// end up non-finite (NaN or infinite inputs), are written as `0.0`.
pub struct NDI {
    band_a_index: usize,
    band_b_index: usize,
    name: String,
}

impl NDI {
    pub fn new(band_a_index: usize, band_b_index: usize, name: Option<String>) -> Self {
        Self {
            band_a_index,
            band_b_index,
            name: name.unwrap_or_else(|| "NDI".to_string()),
        }
    }

    /// NDVI with NIR in input slot `nir_index` and red in `red_index`.
    pub fn ndvi(nir_index: usize, red_index: usize) -> Self {
        Self::new(nir_index, red_index, Some("NDVI".to_string()))
    }

    fn input<'a>(&self, inputs: &'a [Buffer<f32>], index: usize) -> Result<&'a Buffer<f32>> {
        inputs.get(index).ok_or_else(|| {
            NdviError::Unexpected(format!(
                "{} expects an input band at slot {}, got {} inputs",
                self.name,
                index,
                inputs.len()
            ))
        })
    }
}

/// Normalized difference of a single pixel pair.
#[inline]
pub fn normalized_difference(a: f32, b: f32) -> f32 {
    let denominator = a + b;
    let value = if denominator == 0.0 {
        0.0
    } else {
        (a - b) / denominator
    };

    sanitize(value.clamp(-1.0, 1.0))
}

/// Replaces NaN and infinities with zero.
#[inline]
pub fn sanitize(value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

impl IndexCalculator for NDI {
    fn calculate(&self, inputs: &[Buffer<f32>]) -> Result<Buffer<f32>> {
        let band_a = self.input(inputs, self.band_a_index)?;
        let band_b = self.input(inputs, self.band_b_index)?;

        let shape = band_a.shape();
        if band_b.shape() != shape {
            return Err(NdviError::Unexpected(format!(
                "band shapes differ: {:?} vs {:?}",
                shape,
                band_b.shape()
            )));
        }

        let result_data: Vec<f32> = band_a
            .data()
            .par_iter()
            .zip(band_b.data().par_iter())
            .map(|(&a, &b)| normalized_difference(a, b))
            .collect();

        Ok(Buffer::new(shape, result_data))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
