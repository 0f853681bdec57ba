//! Ordinary least squares via SVD, with pseudo-inverse semantics for rank-deficient designs.
use super::error::TestError;
use nalgebra::{DMatrix, DVector};

const PINV_RCOND: f64 = 1e-15;

#[derive(Debug, Clone)]
pub struct OlsFit {
    pub params: DVector<f64>,
    /// Sum of squared residuals.
    pub ssr: f64,
    pub rank: usize,
    pub nobs: usize,
}

impl OlsFit {
    pub fn df_resid(&self) -> f64 {
        self.nobs as f64 - self.rank as f64
    }

    /// Gaussian log-likelihood at the fitted parameters.
    pub fn log_likelihood(&self) -> f64 {
        let n = self.nobs as f64;
        -n / 2.0 * ((2.0 * std::f64::consts::PI).ln() + (self.ssr / n).ln() + 1.0)
    }
}

pub fn fit(design: &DMatrix<f64>, dependent: &DVector<f64>) -> Result<OlsFit, TestError> {
    let (rows, cols) = design.shape();
    let svd = design.clone().svd(true, true);

    let largest = svd.singular_values.max();
    let params = svd
        .solve(dependent, pinv_cutoff(largest))
        .map_err(|e| TestError::Solver(e.to_string()))?;
    let rank = svd.rank(rank_tolerance(largest, rows, cols));
    let ssr = (dependent - design * &params).norm_squared();

    Ok(OlsFit { params, ssr, rank, nobs: rows })
}

/// Singular values at or below this are dropped from the pseudo-inverse (`rcond = 1e-15`).
pub fn pinv_cutoff(largest: f64) -> f64 {
    PINV_RCOND * largest
}

/// Singular values at or below this do not count towards the rank used for `df_resid`.
pub fn rank_tolerance(largest: f64, rows: usize, cols: usize) -> f64 {
    largest * rows.max(cols) as f64 * f64::EPSILON
}

/// Total sum of squares around the mean.
pub fn centered_tss(dependent: &DVector<f64>) -> f64 {
    let mean = dependent.mean();
    dependent.iter().map(|v| (v - mean).powi(2)).sum()
}
