//! Dense, index-addressed storage for one result per ordered pair.

use super::error::TestError;
use super::granger::PValues;
use crate::store::{PairId, VariableId};
use serde::Serialize;

/// Outcome of one ordered pair as it appears in the output document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PairResult {
    Tested { min_p_value: f64, p_values: Vec<f64> },
    Failed { error: String },
}

impl PairResult {
    pub fn is_failed(&self) -> bool {
        matches!(self, PairResult::Failed { .. })
    }
}

impl From<Result<PValues, TestError>> for PairResult {
    fn from(outcome: Result<PValues, TestError>) -> Self {
        match outcome {
            Ok(PValues { p_values, min_p_value }) => PairResult::Tested { min_p_value, p_values },
            Err(e) => PairResult::Failed { error: e.to_string() },
        }
    }
}

/// An `n x n` grid of slots, row = effect, column = cause. The diagonal stays empty.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    size: usize,
    values: Vec<Option<PairResult>>,
}

impl Ledger {
    pub fn new(size: usize) -> Self {
        Self { size, values: vec![None; size * size] }
    }

    #[inline(always)]
    fn slot(&self, pair: PairId) -> usize {
        pair.effect.index() * self.size + pair.cause.index()
    }

    #[inline(always)]
    pub fn get(&self, pair: PairId) -> Option<&PairResult> {
        self.values.get(self.slot(pair))?.as_ref()
    }

    pub fn insert(&mut self, pair: PairId, value: PairResult) {
        debug_assert!(pair.effect != pair.cause, "self-pairs are never tested");
        let idx = self.slot(pair);
        self.values[idx] = Some(value);
    }

    /// Filled entries of one effect variable, in cause order.
    pub fn row(&self, effect: VariableId) -> impl Iterator<Item = (VariableId, &PairResult)> {
        let start = effect.index() * self.size;
        self.values[start..start + self.size]
            .iter()
            .enumerate()
            .filter_map(|(c, v)| v.as_ref().map(|r| (VariableId::new(c), r)))
    }

    pub fn filled(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    pub fn failures(&self) -> usize {
        self.values.iter().flatten().filter(|r| r.is_failed()).count()
    }
}
