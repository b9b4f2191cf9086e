// src/processing/mod.rs
pub mod indices;
pub mod ndvi;

// Re-export main components
pub use ndvi::{compute, NdviResult};
