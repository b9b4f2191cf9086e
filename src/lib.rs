// src/lib.rs
pub mod cli;
pub mod error;
pub mod io;
pub mod logging;
pub mod processing;
pub mod server;
pub mod utils;

pub use error::NdviError;
pub use processing::{compute, NdviResult};
pub use utils::Statistics;

// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
