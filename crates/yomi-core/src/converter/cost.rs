use super::lattice::LatticeNode;

/// Trait for scoring lattice paths during Viterbi search.
pub(crate) trait CostFunction: Send + Sync {
    fn word_cost(&self, node: &LatticeNode) -> i64;

    fn transition_cost(&self, _prev: &LatticeNode, _next: &LatticeNode) -> i64 {
        0
    }
}

/// Unigram scoring: node cost plus a flat per-segment penalty, so fewer,
/// longer dictionary matches beat a chain of single characters.
pub(crate) struct UnigramCost {
    segment_penalty: i64,
}

impl UnigramCost {
    pub fn new(segment_penalty: i64) -> Self {
        Self { segment_penalty }
    }
}

impl CostFunction for UnigramCost {
    fn word_cost(&self, node: &LatticeNode) -> i64 {
        node.cost as i64 + self.segment_penalty
    }
}
