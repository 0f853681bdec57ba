use clap::Parser;
use granger_scan::{run, ScanConfig, ScanError, Statistic};
use std::path::PathBuf;
use std::process::ExitCode;

/// Pairwise Granger causality scan over the columns of a time-series CSV.
///
/// The first `--id-columns` columns (YEAR, DOY, ...) are identifiers; every
/// ordered pair of the remaining columns is tested for lags 1..=max-lag and the
/// p-values are written as JSON.
#[derive(Parser, Debug)]
#[command(name = "granger-scan", version)]
struct Args {
    /// JSON file with defaults for any of the options below
    #[arg(long)]
    config: Option<PathBuf>,

    /// Input CSV file
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output JSON file (replaced atomically)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Highest lag to test
    #[arg(long)]
    max_lag: Option<usize>,

    /// Sub-statistic whose p-value is reported
    #[arg(long, value_enum)]
    statistic: Option<Statistic>,

    /// Decimal digits kept in p-values
    #[arg(long)]
    precision: Option<u32>,

    /// Leading identifier columns excluded from the analysis
    #[arg(long)]
    id_columns: Option<usize>,

    /// Field delimiter of the input file
    #[arg(long)]
    delimiter: Option<char>,

    /// Worker threads (defaults to one per core)
    #[arg(long)]
    workers: Option<usize>,
}

impl Args {
    fn into_config(self) -> Result<ScanConfig, ScanError> {
        let mut cfg = match &self.config {
            Some(path) => ScanConfig::from_json_file(path)?,
            None => ScanConfig::default(),
        };
        if let Some(v) = self.input {
            cfg.input = v;
        }
        if let Some(v) = self.output {
            cfg.output = v;
        }
        if let Some(v) = self.max_lag {
            cfg.max_lag = v;
        }
        if let Some(v) = self.statistic {
            cfg.statistic = v;
        }
        if let Some(v) = self.precision {
            cfg.precision = v;
        }
        if let Some(v) = self.id_columns {
            cfg.id_columns = v;
        }
        if let Some(v) = self.delimiter {
            cfg.delimiter = v;
        }
        if self.workers.is_some() {
            cfg.workers = self.workers;
        }
        Ok(cfg)
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::level_filters::LevelFilter::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match args.into_config().and_then(|cfg| run(&cfg)) {
        Ok(summary) => {
            println!("Analysis complete. Results saved to {}", summary.output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("An error occurred: {}", e);
            ExitCode::FAILURE
        }
    }
}
