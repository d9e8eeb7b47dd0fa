use std::collections::HashSet;

use tracing::{debug, debug_span};

use super::cost::CostFunction;
use super::lattice::{Lattice, LatticeNode};

/// A scored path from N-best Viterbi.
#[derive(Debug, Clone)]
pub(crate) struct ScoredPath {
    pub nodes: Vec<LatticeNode>,
    pub viterbi_cost: i64,
}

impl ScoredPath {
    /// Reading key for deduplication: two segmentations that read the
    /// same are the same answer.
    pub fn reading_key(&self) -> String {
        self.nodes.iter().map(|n| n.reading.as_str()).collect()
    }
}

/// A single entry in the top-K list for a node: (accumulated cost, previous node index, rank at
/// that node). `prev_rank` identifies which of the K paths at the previous node this entry
/// continues from.
#[derive(Clone, Copy)]
struct KEntry {
    cost: i64,
    prev_idx: Option<usize>,
    prev_rank: usize,
}

/// Run N-best Viterbi: keep top-K cost/backpointer pairs per node.
///
/// Returns up to `n` distinct `ScoredPath`s, sorted by Viterbi cost (best first).
/// Paths that produce identical reading strings are deduplicated.
pub(crate) fn viterbi_nbest(
    lattice: &Lattice,
    cost_fn: &dyn CostFunction,
    n: usize,
) -> Vec<ScoredPath> {
    let char_count = lattice.char_count;
    let _span = debug_span!("viterbi_nbest", n, char_count).entered();
    if char_count == 0 || n == 0 {
        return Vec::new();
    }

    let num_nodes = lattice.nodes.len();
    // top_k[node_idx] = sorted Vec of KEntry (ascending cost), max `n` entries
    let mut top_k: Vec<Vec<KEntry>> = vec![Vec::new(); num_nodes];

    for &idx in &lattice.nodes_by_start[0] {
        top_k[idx].push(KEntry {
            cost: cost_fn.word_cost(&lattice.nodes[idx]),
            prev_idx: None,
            prev_rank: 0,
        });
    }

    // Forward pass. word_cost is computed once per next_node.
    for pos in 1..char_count {
        for &next_idx in &lattice.nodes_by_start[pos] {
            let next_node = &lattice.nodes[next_idx];
            let word = cost_fn.word_cost(next_node);

            for &prev_idx in &lattice.nodes_by_end[pos] {
                if top_k[prev_idx].is_empty() {
                    continue;
                }
                let transition = cost_fn.transition_cost(&lattice.nodes[prev_idx], next_node);

                for rank in 0..top_k[prev_idx].len() {
                    let total = top_k[prev_idx][rank].cost + transition + word;
                    insert_top_k(
                        &mut top_k[next_idx],
                        n,
                        KEntry {
                            cost: total,
                            prev_idx: Some(prev_idx),
                            prev_rank: rank,
                        },
                    );
                }
            }
        }
    }

    // (total_cost, node_idx, rank) for every path reaching the end of input
    let mut eos_entries: Vec<(i64, usize, usize)> = Vec::new();
    for &node_idx in &lattice.nodes_by_end[char_count] {
        for (rank, entry) in top_k[node_idx].iter().enumerate() {
            eos_entries.push((entry.cost, node_idx, rank));
        }
    }
    eos_entries.sort_by_key(|&(cost, _, _)| cost);

    let mut results: Vec<ScoredPath> = Vec::new();
    let mut seen_readings: HashSet<String> = HashSet::new();

    for &(total_cost, end_idx, end_rank) in &eos_entries {
        if results.len() >= n {
            break;
        }
        let scored = ScoredPath {
            nodes: backtrace_nbest(&top_k, end_idx, end_rank, lattice),
            viterbi_cost: total_cost,
        };
        if seen_readings.insert(scored.reading_key()) {
            results.push(scored);
        }
    }

    debug!(
        result_count = results.len(),
        best_cost = results.first().map(|p| p.viterbi_cost)
    );
    results
}

/// Insert a KEntry into a top-K list, maintaining ascending sort by cost and max size `k`.
///
/// `Vec::insert` keeps indices stable for `backtrace_nbest`, which relies on
/// `prev_rank` indexing into the finalized Vec of a predecessor node.
fn insert_top_k(list: &mut Vec<KEntry>, k: usize, entry: KEntry) {
    let pos = list.partition_point(|e| e.cost <= entry.cost);
    if pos >= k {
        return;
    }
    list.insert(pos, entry);
    if list.len() > k {
        list.pop();
    }
}

/// Backtrace from a specific (node_idx, rank) to reconstruct a path.
fn backtrace_nbest(
    top_k: &[Vec<KEntry>],
    end_idx: usize,
    end_rank: usize,
    lattice: &Lattice,
) -> Vec<LatticeNode> {
    let mut path_indices = Vec::new();
    let mut cur_idx = end_idx;
    let mut cur_rank = end_rank;

    loop {
        path_indices.push(cur_idx);
        let entry = &top_k[cur_idx][cur_rank];
        match entry.prev_idx {
            Some(prev) => {
                cur_rank = entry.prev_rank;
                cur_idx = prev;
            }
            None => break,
        }
    }
    path_indices.reverse();

    path_indices
        .iter()
        .map(|&idx| lattice.nodes[idx].clone())
        .collect()
}
