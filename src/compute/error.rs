//! Pair-level failures. These are recorded in the results, never propagated.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TestError {
    #[error("Insufficient observations. Maximum allowable lag is {max_allowable}")]
    InsufficientObservations { max_allowable: i64 },
    #[error("Series have different lengths ({left} vs {right})")]
    LengthMismatch { left: usize, right: usize },
    #[error("x contains NaN or inf values.")]
    NonFiniteValues,
    #[error("The x values include a column with constant values and so the test statistic cannot be computed.")]
    ConstantColumn,
    #[error("The Granger causality test statistic cannot be computed because the VAR has a perfect fit of the data.")]
    PerfectFit,
    #[error("Least squares failed: {0}")]
    Solver(String),
    #[error("Distribution error: {0}")]
    Distribution(String),
}
