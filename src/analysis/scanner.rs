//! Runs the Granger test over every ordered pair of a dataset.
use super::pairs::ordered_pairs;
use crate::compute::{GrangerTest, Ledger, PairResult};
use crate::store::{Dataset, PairId};
use rayon::prelude::*;
use tracing::{debug, info, warn};

pub struct PairwiseScanner<'a> {
    dataset: &'a Dataset,
    test: GrangerTest,
}

impl<'a> PairwiseScanner<'a> {
    pub fn new(dataset: &'a Dataset, test: GrangerTest) -> Self {
        Self { dataset, test }
    }

    /// Tests all pairs on the current rayon pool.
    ///
    /// Pairs share nothing but the read-only dataset, and each result lands in its
    /// own ledger slot, so the ledger is identical to a sequential scan.
    pub fn scan(&self) -> Ledger {
        let pairs = ordered_pairs(self.dataset.count());
        info!(
            pairs = pairs.len(),
            max_lag = self.test.max_lag,
            statistic = self.test.statistic.name(),
            "Scanning variable pairs"
        );

        let results: Vec<(PairId, PairResult)> = pairs
            .into_par_iter()
            .map(|pair| (pair, self.test_pair(pair)))
            .collect();

        let mut ledger = Ledger::new(self.dataset.count());
        for (pair, result) in results {
            ledger.insert(pair, result);
        }

        info!(tested = ledger.filled(), failed = ledger.failures(), "Scan finished");
        ledger
    }

    /// One pair: `effect` is the dependent series, `cause` the candidate driver.
    pub fn test_pair(&self, pair: PairId) -> PairResult {
        let effect = self.dataset.name(pair.effect);
        let cause = self.dataset.name(pair.cause);

        let outcome = self
            .test
            .evaluate(self.dataset.series(pair.effect), self.dataset.series(pair.cause));
        match &outcome {
            Ok(p) => debug!(effect, cause, min_p_value = p.min_p_value, "Pair tested"),
            Err(e) => warn!(effect, cause, error = %e, "Pair test failed"),
        }
        outcome.into()
    }
}
