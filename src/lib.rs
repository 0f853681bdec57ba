// Pairwise Granger causality scanner.
// The Rust API lives in the modules below; with the `python` feature the same
// scan is also exposed as the `_core` Python extension module.

pub mod analysis;
pub mod compute;
pub mod config;
pub mod display;
pub mod error;
pub mod pipeline;
pub mod store;

#[cfg(feature = "python")]
mod bindings;

pub use config::{ScanConfig, Statistic};
pub use error::ScanError;
pub use pipeline::{run, RunSummary};
