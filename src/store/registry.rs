use super::types::*;
use crate::error::ScanError;
use std::collections::HashSet;

/// Column-major time-series table. Rows are observations in file order.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    // Leading identifier columns, kept by name only
    pub id_names: Vec<String>,

    // Columnar Arrays (one per analysis variable)
    pub names: Vec<String>,
    pub columns: Vec<Vec<f64>>,

    rows: usize,
}

impl Dataset {
    /// Splits a header into identifier names and variable names.
    ///
    /// The table must hold at least one variable after the `id_columns` leading columns.
    pub fn with_header(header: &[String], id_columns: usize) -> Result<Self, ScanError> {
        let required = id_columns + 1;
        if header.len() < required {
            return Err(ScanError::TooFewColumns { found: header.len(), required });
        }

        let mut seen = HashSet::new();
        let names: Vec<String> = header[id_columns..].to_vec();
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(ScanError::DuplicateVariable(name.clone()));
            }
        }

        Ok(Self {
            id_names: header[..id_columns].to_vec(),
            columns: vec![Vec::new(); names.len()],
            names,
            rows: 0,
        })
    }

    pub fn count(&self) -> usize { self.names.len() }
    pub fn rows(&self) -> usize { self.rows }

    /// Appends one observation. `values` holds one entry per variable, in variable order.
    pub fn push_row(&mut self, values: &[f64]) {
        debug_assert_eq!(values.len(), self.columns.len());
        for (column, &v) in self.columns.iter_mut().zip(values) {
            column.push(v);
        }
        self.rows += 1;
    }

    /// Ordered names of the analysis variables.
    pub fn variables(&self) -> &[String] { &self.names }

    pub fn ids(&self) -> impl Iterator<Item = VariableId> {
        (0..self.count()).map(VariableId::new)
    }

    #[inline(always)]
    pub fn name(&self, id: VariableId) -> &str { &self.names[id.index()] }

    #[inline(always)]
    pub fn series(&self, id: VariableId) -> &[f64] { &self.columns[id.index()] }
}
