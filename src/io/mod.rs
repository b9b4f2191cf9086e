// src/io/mod.rs
pub mod reader;

pub use reader::DecodedRaster;
