// Uses `pyo3` to define the `_core` Python module around the Rust scan.
use crate::config::{ScanConfig, Statistic};
use crate::pipeline;
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use std::path::PathBuf;

/// Scans `input` and writes the JSON results to `output`.
///
/// Returns `(pairs, failed_pairs)`. Run-level failures raise `RuntimeError`.
#[pyfunction]
#[pyo3(signature = (input, output, max_lag=3, statistic="ssr_chi2test", workers=None))]
fn scan(
    input: PathBuf,
    output: PathBuf,
    max_lag: usize,
    statistic: &str,
    workers: Option<usize>,
) -> PyResult<(usize, usize)> {
    let statistic = Statistic::from_name(statistic)
        .ok_or_else(|| PyValueError::new_err(format!("Unknown statistic '{}'", statistic)))?;
    let config = ScanConfig { statistic, workers, ..ScanConfig::new(input, output).with_max_lag(max_lag) };
    let summary = pipeline::run(&config).map_err(|e| PyRuntimeError::new_err(e.to_string()))?;
    Ok((summary.pairs, summary.failed_pairs))
}

/// This function defines the `_core` Python module.
#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(scan, m)?)?;
    Ok(())
}
