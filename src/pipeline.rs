//! load -> select variables -> scan pairs -> write results.
use crate::analysis::PairwiseScanner;
use crate::compute::{GrangerTest, Ledger};
use crate::config::ScanConfig;
use crate::display::write_report;
use crate::error::ScanError;
use crate::store::{load_dataset, Dataset};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub output: PathBuf,
    pub variables: usize,
    pub pairs: usize,
    pub failed_pairs: usize,
}

/// Runs a full scan. Nothing is written unless loading and scanning both succeed;
/// pair-level test failures are part of the results, not errors.
pub fn run(config: &ScanConfig) -> Result<RunSummary, ScanError> {
    config.validate()?;
    let dataset = load_dataset(&config.input, config.id_columns, config.delimiter as u8)?;
    let ledger = scan(&dataset, config)?;
    write_report(&config.output, &dataset, &ledger)?;

    Ok(RunSummary {
        output: config.output.clone(),
        variables: dataset.count(),
        pairs: ledger.filled(),
        failed_pairs: ledger.failures(),
    })
}

/// Scans an already loaded dataset, on a dedicated pool when `workers` is set.
pub fn scan(dataset: &Dataset, config: &ScanConfig) -> Result<Ledger, ScanError> {
    let test = GrangerTest {
        max_lag: config.max_lag,
        statistic: config.statistic,
        precision: config.precision,
    };
    let scanner = PairwiseScanner::new(dataset, test);

    match config.workers {
        Some(n) => {
            let pool = rayon::ThreadPoolBuilder::new().num_threads(n).build()?;
            Ok(pool.install(|| scanner.scan()))
        }
        None => Ok(scanner.scan()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Statistic;
    use rstest::rstest;
    use serde_json::Value;
    use std::collections::BTreeSet;
    use std::fmt::Write as _;
    use std::fs;
    use std::path::Path;

    /// 50 rows of linearly related series: B follows A with one step of delay, C mixes both.
    fn write_linear_csv(path: &Path) {
        let mut text = String::from("YEAR,DOY,A,B,C\n");
        let mut a_prev = 0.0;
        let mut b_prev = 0.0;
        for t in 0..50 {
            let wobble = ((t * 7919 % 101) as f64) / 101.0 - 0.5;
            let a = (t as f64 * 0.37).sin() + 0.3 * wobble;
            let b = 0.6 * a_prev + 0.2 * wobble.powi(2) + 0.05 * t as f64;
            let c = 0.5 * a_prev - 0.4 * b_prev + ((t * 31 % 17) as f64) / 17.0;
            writeln!(text, "2021,{},{},{},{}", t + 1, a, b, c).unwrap();
            a_prev = a;
            b_prev = b;
        }
        fs::write(path, text).unwrap();
    }

    fn read_json(path: &Path) -> Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn test_end_to_end_three_variables() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("data.csv");
        let output = dir.path().join("granger.json");
        write_linear_csv(&input);

        let summary = run(&ScanConfig::new(&input, &output).with_max_lag(2)).unwrap();
        assert_eq!(summary.variables, 3);
        assert_eq!(summary.pairs, 6);
        assert_eq!(summary.failed_pairs, 0);

        let doc = read_json(&output);
        let top: Vec<&String> = doc.as_object().unwrap().keys().collect();
        assert_eq!(top.len(), 3);
        let names: BTreeSet<&str> = ["A", "B", "C"].into_iter().collect();

        for (effect, row) in doc.as_object().unwrap() {
            let inner: BTreeSet<&str> = row.as_object().unwrap().keys().map(String::as_str).collect();
            let mut expected = names.clone();
            expected.remove(effect.as_str());
            assert_eq!(inner, expected, "row {}", effect);

            for entry in row.as_object().unwrap().values() {
                let p_values: Vec<f64> =
                    entry["p_values"].as_array().unwrap().iter().map(|v| v.as_f64().unwrap()).collect();
                let min = entry["min_p_value"].as_f64().unwrap();
                assert_eq!(p_values.len(), 2);
                assert!(p_values.iter().all(|p| min <= *p));
                assert_eq!(min, p_values.iter().copied().fold(f64::INFINITY, f64::min));
            }
        }
    }

    #[test]
    fn test_variable_order_is_preserved_in_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("data.csv");
        let output = dir.path().join("granger.json");
        write_linear_csv(&input);

        run(&ScanConfig::new(&input, &output).with_max_lag(1)).unwrap();
        let text = fs::read_to_string(&output).unwrap();
        let pos = |key: &str| text.find(&format!("\n    \"{}\": {{", key)).unwrap();
        assert!(pos("A") < pos("B"));
        assert!(pos("B") < pos("C"));
    }

    #[test]
    fn test_output_is_deterministic_across_runs_and_workers() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("data.csv");
        write_linear_csv(&input);

        let mut outputs = Vec::new();
        for (i, workers) in [None, Some(1), Some(4)].into_iter().enumerate() {
            let output = dir.path().join(format!("out{}.json", i));
            let cfg = ScanConfig { workers, ..ScanConfig::new(&input, &output) };
            run(&cfg).unwrap();
            outputs.push(fs::read(&output).unwrap());
        }
        assert_eq!(outputs[0], outputs[1]);
        assert_eq!(outputs[1], outputs[2]);
    }

    #[test]
    fn test_statistic_choice_changes_reported_values() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("data.csv");
        write_linear_csv(&input);

        let chi2_out = dir.path().join("chi2.json");
        let f_out = dir.path().join("f.json");
        run(&ScanConfig::new(&input, &chi2_out)).unwrap();
        run(&ScanConfig { statistic: Statistic::SsrF, ..ScanConfig::new(&input, &f_out) }).unwrap();

        let chi2 = read_json(&chi2_out);
        let f = read_json(&f_out);
        assert_eq!(chi2.as_object().unwrap().len(), f.as_object().unwrap().len());
        // The F form is the small-sample correction, never more significant than chi-squared.
        let chi2_p = chi2["A"]["B"]["p_values"][0].as_f64().unwrap();
        let f_p = f["A"]["B"]["p_values"][0].as_f64().unwrap();
        assert!(f_p >= chi2_p);
    }

    #[test]
    fn test_constant_column_only_fails_its_pairs() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("data.csv");
        let output = dir.path().join("granger.json");
        let mut text = String::from("YEAR,DOY,A,FLAT,B\n");
        for t in 0..30 {
            let a = ((t * 13 % 7) as f64) - 3.0;
            let b = ((t * 5 % 11) as f64) * 0.5;
            writeln!(text, "2021,{},{},4.0,{}", t + 1, a, b).unwrap();
        }
        fs::write(&input, text).unwrap();

        let summary = run(&ScanConfig::new(&input, &output)).unwrap();
        assert_eq!(summary.failed_pairs, 4);

        let doc = read_json(&output);
        assert!(doc["A"]["FLAT"]["error"].as_str().unwrap().contains("constant"));
        assert!(doc["FLAT"]["B"]["error"].is_string());
        assert_eq!(doc["A"]["B"]["p_values"].as_array().unwrap().len(), 3);
        assert_eq!(doc["B"]["A"]["p_values"].as_array().unwrap().len(), 3);
    }

    #[rstest]
    #[case("inf")]
    #[case("-inf")]
    #[case("NaN")]
    fn test_non_finite_cell_only_fails_its_pairs(#[case] cell: &str) {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("data.csv");
        let output = dir.path().join("granger.json");
        let mut text = String::from("YEAR,DOY,A,B,C\n");
        for t in 0..40 {
            let a = if t == 10 { cell.to_string() } else { format!("{}", ((t * 13 % 7) as f64) - 3.0) };
            let b = ((t * 5 % 11) as f64) * 0.5;
            let c = ((t * 17 % 23) as f64) * 0.25 - ((t % 4) as f64);
            writeln!(text, "2021,{},{},{},{}", t + 1, a, b, c).unwrap();
        }
        fs::write(&input, text).unwrap();

        let summary = run(&ScanConfig::new(&input, &output)).unwrap();
        assert_eq!(summary.pairs, 6);
        assert_eq!(summary.failed_pairs, 4);

        let doc = read_json(&output);
        for (effect, cause) in [("A", "B"), ("A", "C"), ("B", "A"), ("C", "A")] {
            let msg = doc[effect][cause]["error"].as_str().unwrap();
            assert_eq!(msg, "x contains NaN or inf values.", "{} <- {}", effect, cause);
        }
        for (effect, cause) in [("B", "C"), ("C", "B")] {
            assert!(doc[effect][cause].get("error").is_none());
            assert_eq!(doc[effect][cause]["p_values"].as_array().unwrap().len(), 3);
        }
    }

    #[test]
    fn test_missing_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("granger.json");
        let err = run(&ScanConfig::new(dir.path().join("nope.csv"), &output)).unwrap_err();

        assert!(matches!(err, ScanError::Io { .. }));
        assert!(!output.exists());
    }

    #[test]
    fn test_run_level_failure_keeps_previous_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("data.csv");
        let output = dir.path().join("granger.json");
        fs::write(&input, "YEAR,DOY\n2021,1\n").unwrap();
        fs::write(&output, "previous").unwrap();

        let err = run(&ScanConfig::new(&input, &output)).unwrap_err();
        assert!(matches!(err, ScanError::TooFewColumns { found: 2, required: 3 }));
        assert_eq!(fs::read_to_string(&output).unwrap(), "previous");
    }

    #[test]
    fn test_invalid_config_is_rejected_before_loading() {
        let err = run(&ScanConfig::new("does-not-matter.csv", "out.json").with_max_lag(0)).unwrap_err();
        assert!(matches!(err, ScanError::InvalidConfig(_)));
    }
}
