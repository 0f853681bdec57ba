use serde::{Serialize, Deserialize};

/// Position of a variable among the analysis columns (identifier columns excluded).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct VariableId(pub u32);

impl VariableId {
    #[inline(always)]
    pub fn index(&self) -> usize { self.0 as usize }
    pub fn new(idx: usize) -> Self { Self(idx as u32) }
}

/// An ordered pair under test. `effect` is the dependent series, `cause` the candidate driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PairId {
    pub effect: VariableId,
    pub cause: VariableId,
}

impl PairId {
    pub fn new(effect: VariableId, cause: VariableId) -> Self { Self { effect, cause } }
}
