//! Reads a delimited file into a [`Dataset`].
use super::registry::Dataset;
use crate::error::ScanError;
use std::fs::File;
use std::path::Path;
use tracing::info;

/// Cells that load as a missing observation rather than failing the run.
const MISSING_TOKENS: &[&str] = &["", "NaN", "nan", "NA", "N/A", "null"];

pub fn load_dataset(path: &Path, id_columns: usize, delimiter: u8) -> Result<Dataset, ScanError> {
    let file = File::open(path).map_err(|e| ScanError::io(path, e))?;
    let dataset = read_dataset(file, id_columns, delimiter)?;
    info!(
        path = %path.display(),
        rows = dataset.rows(),
        variables = dataset.count(),
        "Loaded dataset"
    );
    Ok(dataset)
}

/// Parses CSV text from any reader. Row order is preserved; it is the time axis.
pub fn read_dataset<R: std::io::Read>(reader: R, id_columns: usize, delimiter: u8) -> Result<Dataset, ScanError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let header: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut dataset = Dataset::with_header(&header, id_columns)?;

    let mut row = Vec::with_capacity(dataset.count());
    for result in reader.records() {
        let record = result?;
        // Header is line 1.
        let line = record.position().map_or(0, |p| p.line());
        row.clear();
        for (offset, cell) in record.iter().skip(id_columns).enumerate() {
            row.push(parse_cell(cell).ok_or_else(|| ScanError::Parse {
                line,
                column: dataset.names[offset].clone(),
                value: cell.to_string(),
            })?);
        }
        dataset.push_row(&row);
    }

    Ok(dataset)
}

fn parse_cell(cell: &str) -> Option<f64> {
    if MISSING_TOKENS.contains(&cell) {
        return Some(f64::NAN);
    }
    cell.parse::<f64>().ok()
}
