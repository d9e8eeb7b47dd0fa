use std::fs::{self, File};
use std::path::Path;

use memmap2::Mmap;
use trie_rs::map::{Trie, TrieBuilder};

use super::{DictError, ReadingDictionary, ReadingEntry, SearchResult};

const MAGIC: &[u8; 4] = b"YMDX";
const VERSION: u8 = 1;
const HEADER_SIZE: usize = 4 + 1 + 4 + 4; // magic + version + crc32 + payload_len = 13

/// Surface-keyed dictionary backed by a byte trie.
///
/// The trie maps each surface to an index into `entries`, which keeps the
/// surfaces in byte order so serialization and iteration are deterministic.
pub struct TrieDictionary {
    trie: Trie<u8, u32>,
    entries: Vec<(String, Vec<ReadingEntry>)>,
}

impl TrieDictionary {
    pub fn from_entries(entries: impl IntoIterator<Item = (String, Vec<ReadingEntry>)>) -> Self {
        let mut pairs: Vec<(String, Vec<ReadingEntry>)> = entries
            .into_iter()
            .filter(|(surface, readings)| !surface.is_empty() && !readings.is_empty())
            .collect();
        for (_, readings) in &mut pairs {
            readings.sort_by_key(|e| e.cost);
        }
        pairs.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
        pairs.dedup_by(|later, earlier| {
            if later.0 == earlier.0 {
                earlier.1.append(&mut later.1);
                earlier.1.sort_by_key(|e| e.cost);
                true
            } else {
                false
            }
        });

        let mut builder = TrieBuilder::new();
        for (idx, (surface, _)) in pairs.iter().enumerate() {
            builder.push(surface.as_bytes(), idx as u32);
        }

        Self {
            trie: builder.build(),
            entries: pairs,
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, DictError> {
        let payload = bincode::serialize(&self.entries).map_err(DictError::Serialize)?;
        let payload_len: u32 = payload
            .len()
            .try_into()
            .map_err(|_| DictError::Parse("payload exceeds u32::MAX".to_string()))?;
        let checksum = crc32fast::hash(&payload);

        let mut buf = Vec::with_capacity(HEADER_SIZE + payload.len());
        buf.extend_from_slice(MAGIC);
        buf.push(VERSION);
        buf.extend_from_slice(&checksum.to_le_bytes());
        buf.extend_from_slice(&payload_len.to_le_bytes());
        buf.extend_from_slice(&payload);
        Ok(buf)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, DictError> {
        if data.len() < 5 {
            return Err(DictError::InvalidHeader);
        }
        if &data[..4] != MAGIC {
            return Err(DictError::InvalidMagic);
        }
        if data[4] != VERSION {
            return Err(DictError::UnsupportedVersion(data[4]));
        }
        if data.len() < HEADER_SIZE {
            return Err(DictError::InvalidHeader);
        }

        let expected = read_u32(&data[5..9]);
        let payload_len = read_u32(&data[9..13]) as usize;
        let payload = data
            .get(HEADER_SIZE..HEADER_SIZE + payload_len)
            .ok_or(DictError::InvalidHeader)?;

        let actual = crc32fast::hash(payload);
        if actual != expected {
            return Err(DictError::ChecksumMismatch { expected, actual });
        }

        let entries: Vec<(String, Vec<ReadingEntry>)> =
            bincode::deserialize(payload).map_err(DictError::Deserialize)?;
        Ok(Self::from_entries(entries))
    }

    /// Open a dictionary file, using mmap to avoid doubling peak memory.
    ///
    /// The entries are deserialized from the mapped region, then the mapping
    /// is dropped.
    pub fn open(path: &Path) -> Result<Self, DictError> {
        let file = File::open(path)?;
        if (file.metadata()?.len() as usize) < HEADER_SIZE {
            return Err(DictError::InvalidHeader);
        }
        // SAFETY: The file is opened read-only and the mapping is immutable.
        // The Mmap is dropped after deserialization completes below.
        let mmap = unsafe { Mmap::map(&file)? };
        Self::from_bytes(&mmap)
    }

    pub fn save(&self, path: &Path) -> Result<(), DictError> {
        Ok(fs::write(path, self.to_bytes()?)?)
    }

    /// Iterate over all `(surface, entries)` pairs in byte order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ReadingEntry])> {
        self.entries
            .iter()
            .map(|(surface, readings)| (surface.as_str(), readings.as_slice()))
    }

    /// Returns (surface_count, entry_count).
    pub fn stats(&self) -> (usize, usize) {
        let surfaces = self.entries.len();
        let entries: usize = self.entries.iter().map(|(_, v)| v.len()).sum();
        (surfaces, entries)
    }
}

fn read_u32(bytes: &[u8]) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(bytes);
    u32::from_le_bytes(buf)
}

impl ReadingDictionary for TrieDictionary {
    fn lookup(&self, surface: &str) -> Vec<ReadingEntry> {
        self.trie
            .exact_match(surface.as_bytes())
            .map(|&idx| self.entries[idx as usize].1.clone())
            .unwrap_or_default()
    }

    fn common_prefix_search(&self, query: &str) -> Vec<SearchResult> {
        let hits: Vec<(Vec<u8>, &u32)> =
            self.trie.common_prefix_search(query.as_bytes()).collect();
        hits.into_iter()
            .map(|(_, &idx)| {
                let (surface, readings) = &self.entries[idx as usize];
                SearchResult {
                    surface: surface.clone(),
                    entries: readings.clone(),
                }
            })
            .collect()
    }
}
