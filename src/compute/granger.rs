//! Granger causality test for one ordered pair of series.
//!
//! `effect` is the dependent series; the test asks whether lags of `cause`
//! improve its prediction beyond its own lags. Swapping the arguments
//! inverts the causal direction being tested.
use super::error::TestError;
use super::lagmat::LaggedDesign;
use super::ols::{self, OlsFit};
use crate::config::Statistic;
use statrs::distribution::{ChiSquared, ContinuousCDF, FisherSnedecor};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestStatistic {
    pub value: f64,
    pub p_value: f64,
}

/// All sub-statistics computed for one lag order.
#[derive(Debug, Clone, PartialEq)]
pub struct LagStatistics {
    pub lag: usize,
    pub ssr_chi2: TestStatistic,
    pub ssr_f: TestStatistic,
    pub lr: TestStatistic,
    pub df_resid: f64,
}

impl LagStatistics {
    pub fn get(&self, statistic: Statistic) -> TestStatistic {
        match statistic {
            Statistic::SsrChi2 => self.ssr_chi2,
            Statistic::SsrF => self.ssr_f,
            Statistic::Lr => self.lr,
        }
    }
}

/// Runs the test for every lag in `1..=max_lag`.
pub fn granger_test(effect: &[f64], cause: &[f64], max_lag: usize) -> Result<Vec<LagStatistics>, TestError> {
    if effect.len() != cause.len() {
        return Err(TestError::LengthMismatch { left: effect.len(), right: cause.len() });
    }
    let n = effect.len();
    // Three observations per lag, plus one for the intercept.
    if n <= 3 * max_lag + 1 {
        return Err(TestError::InsufficientObservations {
            max_allowable: (n as i64 - 1) / 3 - 1,
        });
    }
    if effect.iter().chain(cause).any(|v| !v.is_finite()) {
        return Err(TestError::NonFiniteValues);
    }

    (1..=max_lag).map(|lag| test_single_lag(effect, cause, lag)).collect()
}

fn test_single_lag(effect: &[f64], cause: &[f64], lag: usize) -> Result<LagStatistics, TestError> {
    let design = LaggedDesign::build(effect, cause, lag);
    if design.has_constant_regressor() {
        return Err(TestError::ConstantColumn);
    }

    let restricted = ols::fit(&design.restricted, &design.dependent)?;
    let unrestricted = ols::fit(&design.unrestricted, &design.dependent)?;
    let tss = ols::centered_tss(&design.dependent);
    check_fit(&unrestricted, tss)?;

    let q = lag as f64;
    let nobs = design.nobs() as f64;
    let df_resid = unrestricted.df_resid();
    let gain = (restricted.ssr - unrestricted.ssr).max(0.0);

    let chi2 = ChiSquared::new(q).map_err(|e| TestError::Distribution(e.to_string()))?;
    let f_dist = FisherSnedecor::new(q, df_resid).map_err(|e| TestError::Distribution(e.to_string()))?;

    let chi2_value = nobs * gain / unrestricted.ssr;
    let f_value = gain / unrestricted.ssr / q * df_resid;
    let lr_value = (-2.0 * (restricted.log_likelihood() - unrestricted.log_likelihood())).max(0.0);

    Ok(LagStatistics {
        lag,
        ssr_chi2: TestStatistic { value: chi2_value, p_value: chi2.sf(chi2_value) },
        ssr_f: TestStatistic { value: f_value, p_value: f_dist.sf(f_value) },
        lr: TestStatistic { value: lr_value, p_value: chi2.sf(lr_value) },
        df_resid,
    })
}

fn check_fit(unrestricted: &OlsFit, tss: f64) -> Result<(), TestError> {
    let ssr = unrestricted.ssr;
    if tss == 0.0 || ssr == 0.0 || ssr.is_nan() || tss.is_nan() || ssr / tss < f64::EPSILON {
        return Err(TestError::PerfectFit);
    }
    Ok(())
}

/// Per-lag p-values of the chosen statistic, rounded, and their minimum.
#[derive(Debug, Clone, PartialEq)]
pub struct PValues {
    pub p_values: Vec<f64>,
    pub min_p_value: f64,
}

/// A configured test: which statistic to report and how to round it.
#[derive(Debug, Clone, Copy)]
pub struct GrangerTest {
    pub max_lag: usize,
    pub statistic: Statistic,
    pub precision: u32,
}

impl GrangerTest {
    pub fn evaluate(&self, effect: &[f64], cause: &[f64]) -> Result<PValues, TestError> {
        let lags = granger_test(effect, cause, self.max_lag)?;
        let p_values: Vec<f64> = lags
            .iter()
            .map(|l| round_to(l.get(self.statistic).p_value, self.precision))
            .collect();
        let min_p_value = p_values.iter().copied().fold(f64::INFINITY, f64::min);
        Ok(PValues { p_values, min_p_value })
    }
}

/// Rounds to `digits` decimal places using the exact binary value, so
/// `0.19565` (stored just below the tie) becomes `0.1956`.
pub fn round_to(value: f64, digits: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.*}", digits as usize, value).parse().unwrap_or(value)
}
