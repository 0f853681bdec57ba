//! Owns the loaded time-series table.
pub mod loader;
pub mod registry;
pub mod types;

pub use loader::{load_dataset, read_dataset};
pub use registry::Dataset;
pub use types::{PairId, VariableId};
