//! Pair enumeration and the pairwise scan.
pub mod pairs;
pub mod scanner;

pub use pairs::ordered_pairs;
pub use scanner::PairwiseScanner;
