use std::sync::Arc;

use super::{ReadingDictionary, ReadingEntry, SearchResult};

/// A dictionary that merges results from multiple layers.
///
/// Layers are given lowest priority first; later layers win cost ties.
/// Duplicate entries (same surface + reading) are deduplicated, keeping
/// the lowest cost across all layers.
pub struct CompositeDictionary {
    layers: Vec<Arc<dyn ReadingDictionary>>,
}

impl CompositeDictionary {
    pub fn new(layers: Vec<Arc<dyn ReadingDictionary>>) -> Self {
        Self { layers }
    }

    /// Iterate layers highest priority first.
    fn by_priority(&self) -> impl Iterator<Item = &Arc<dyn ReadingDictionary>> {
        self.layers.iter().rev()
    }
}

/// Deduplicate entries by reading, keeping the lowest cost for each.
/// Input order breaks ties, so callers pass higher-priority entries first.
fn dedup_entries(entries: Vec<ReadingEntry>) -> Vec<ReadingEntry> {
    let mut result: Vec<ReadingEntry> = Vec::with_capacity(entries.len());
    for e in entries {
        match result.iter_mut().find(|r| r.reading == e.reading) {
            Some(existing) if e.cost < existing.cost => existing.cost = e.cost,
            Some(_) => {}
            None => result.push(e),
        }
    }
    result.sort_by_key(|e| e.cost);
    result
}

/// Merge search results by surface, deduplicating entries within each surface.
/// Output is ordered by surface length, matching a single trie's prefix order.
fn merge_results(results: Vec<SearchResult>) -> Vec<SearchResult> {
    let mut by_surface: Vec<(String, Vec<ReadingEntry>)> = Vec::new();
    for sr in results {
        match by_surface.iter_mut().find(|(s, _)| *s == sr.surface) {
            Some((_, entries)) => entries.extend(sr.entries),
            None => by_surface.push((sr.surface, sr.entries)),
        }
    }
    let mut merged: Vec<SearchResult> = by_surface
        .into_iter()
        .map(|(surface, entries)| SearchResult {
            surface,
            entries: dedup_entries(entries),
        })
        .collect();
    merged.sort_by_key(|sr| sr.surface.len());
    merged
}

impl ReadingDictionary for CompositeDictionary {
    fn lookup(&self, surface: &str) -> Vec<ReadingEntry> {
        let mut all = Vec::new();
        for layer in self.by_priority() {
            all.extend(layer.lookup(surface));
        }
        dedup_entries(all)
    }

    fn common_prefix_search(&self, query: &str) -> Vec<SearchResult> {
        let mut all = Vec::new();
        for layer in self.by_priority() {
            all.extend(layer.common_prefix_search(query));
        }
        merge_results(all)
    }
}
