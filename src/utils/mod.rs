// src/utils/mod.rs
pub mod stats;

pub use stats::Statistics;
