//! Surface → reading dictionary storage.
//!
//! `TrieDictionary` stores surface → reading mappings in a trie so the
//! converter can find every dictionary word starting at a text position with
//! one common-prefix walk. `CompositeDictionary` layers several dictionaries.

mod composite;
mod entry;
mod source;
mod trie_dict;

pub use composite::CompositeDictionary;
pub use entry::ReadingEntry;
pub use source::{parse_tsv, TsvStats, DEFAULT_ENTRY_COST};
pub use trie_dict::TrieDictionary;

use std::io;
use std::sync::{Arc, OnceLock};

/// Embedded seed dictionary in TSV source form.
pub const DEFAULT_DICT_TSV: &str = include_str!("default_dict.tsv");

/// Error type for dictionary binary I/O and source parsing.
#[derive(Debug, thiserror::Error)]
pub enum DictError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid header (too short)")]
    InvalidHeader,

    #[error("invalid magic bytes (expected YMDX)")]
    InvalidMagic,

    #[error("unsupported version: {0}")]
    UnsupportedVersion(u8),

    #[error("checksum mismatch (expected {expected:08x}, got {actual:08x})")]
    ChecksumMismatch { expected: u32, actual: u32 },

    #[error("serialization error: {0}")]
    Serialize(bincode::Error),

    #[error("deserialization error: {0}")]
    Deserialize(bincode::Error),

    #[error("parse error: {0}")]
    Parse(String),
}

pub struct SearchResult {
    pub surface: String,
    pub entries: Vec<ReadingEntry>,
}

pub trait ReadingDictionary: Send + Sync {
    /// Readings for an exact surface, sorted by ascending cost.
    fn lookup(&self, surface: &str) -> Vec<ReadingEntry>;

    /// All surfaces that are prefixes of `query`, shortest first.
    fn common_prefix_search(&self, query: &str) -> Vec<SearchResult>;
}

impl<D: ReadingDictionary + ?Sized> ReadingDictionary for &D {
    fn lookup(&self, surface: &str) -> Vec<ReadingEntry> {
        (**self).lookup(surface)
    }

    fn common_prefix_search(&self, query: &str) -> Vec<SearchResult> {
        (**self).common_prefix_search(query)
    }
}

impl<D: ReadingDictionary + ?Sized> ReadingDictionary for Arc<D> {
    fn lookup(&self, surface: &str) -> Vec<ReadingEntry> {
        (**self).lookup(surface)
    }

    fn common_prefix_search(&self, query: &str) -> Vec<SearchResult> {
        (**self).common_prefix_search(query)
    }
}

/// The embedded seed dictionary, built on first use.
pub fn default_dictionary() -> &'static TrieDictionary {
    static INSTANCE: OnceLock<TrieDictionary> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let (entries, stats) = parse_tsv(DEFAULT_DICT_TSV);
        tracing::debug!(
            surfaces = entries.len(),
            skipped = stats.skipped,
            "built default dictionary"
        );
        TrieDictionary::from_entries(entries)
    })
}
