pub mod report;

pub use report::{write_atomic, write_report, ResultDocument};
