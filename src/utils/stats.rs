// src/utils/stats.rs
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Summary statistics of an index array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl Statistics {
    /// Returns `None` for an empty slice.
    ///
    /// Values are expected to be finite. The mean is accumulated in `f64`
    /// and kept inside `[min, max]`.
    pub fn from_values(values: &[f32]) -> Option<Self> {
        let (min, max) = values.iter().copied().minmax().into_option()?;
        let (min, max) = (f64::from(min), f64::from(max));

        let sum: f64 = values.iter().map(|&v| f64::from(v)).sum();
        let mean = (sum / values.len() as f64).clamp(min, max);

        Some(Self { min, max, mean })
    }
}
