//! The statistical core: lag matrices, least squares and the Granger test.
pub mod error;
pub mod granger;
pub mod lagmat;
pub mod ledger;
pub mod ols;

pub use error::TestError;
pub use granger::{granger_test, GrangerTest, LagStatistics, PValues};
pub use ledger::{Ledger, PairResult};
