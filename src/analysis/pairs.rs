use crate::store::{PairId, VariableId};

/// Every ordered pair of distinct variables, effect-major.
///
/// For `n` variables this yields `n * (n - 1)` pairs: `(0,1), (0,2), .., (1,0), (1,2), ..`.
/// Both directions of each unordered pair are present because Granger causality
/// is asymmetric.
pub fn ordered_pairs(count: usize) -> Vec<PairId> {
    let mut pairs = Vec::with_capacity(count * count.saturating_sub(1));
    for effect in (0..count).map(VariableId::new) {
        for cause in (0..count).map(VariableId::new) {
            if effect != cause {
                pairs.push(PairId::new(effect, cause));
            }
        }
    }
    pairs
}
