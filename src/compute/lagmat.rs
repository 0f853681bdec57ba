//! Lagged design matrices for the restricted and unrestricted regressions.
use nalgebra::{DMatrix, DVector};

/// Regression inputs for one lag order, trimmed at both ends.
///
/// Row `r` corresponds to time `t = r + lag`. Column layout:
/// - restricted:   `[effect[t-1], .., effect[t-lag], 1]`
/// - unrestricted: `[effect[t-1], .., effect[t-lag], cause[t-1], .., cause[t-lag], 1]`
///
/// The contemporaneous cause value is never a regressor.
#[derive(Debug, Clone)]
pub struct LaggedDesign {
    pub lag: usize,
    pub dependent: DVector<f64>,
    pub restricted: DMatrix<f64>,
    pub unrestricted: DMatrix<f64>,
}

impl LaggedDesign {
    /// Requires `effect.len() == cause.len() > lag`.
    pub fn build(effect: &[f64], cause: &[f64], lag: usize) -> Self {
        let nobs = effect.len() - lag;
        let at = |series: &[f64], r: usize, k: usize| series[r + lag - 1 - k];

        let dependent = DVector::from_fn(nobs, |r, _| effect[r + lag]);
        let restricted = DMatrix::from_fn(nobs, lag + 1, |r, c| {
            if c < lag { at(effect, r, c) } else { 1.0 }
        });
        let unrestricted = DMatrix::from_fn(nobs, 2 * lag + 1, |r, c| {
            if c < lag {
                at(effect, r, c)
            } else if c < 2 * lag {
                at(cause, r, c - lag)
            } else {
                1.0
            }
        });

        Self { lag, dependent, restricted, unrestricted }
    }

    pub fn nobs(&self) -> usize { self.dependent.len() }

    /// True when a lagged regressor is constant, making it collinear with the intercept.
    pub fn has_constant_regressor(&self) -> bool {
        let lagged = self.unrestricted.ncols() - 1;
        (0..lagged).any(|c| {
            let column = self.unrestricted.column(c);
            column.max() == column.min()
        })
    }
}
