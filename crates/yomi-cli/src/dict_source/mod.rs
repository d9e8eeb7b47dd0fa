//! Importers that turn third-party dictionary files into surface → reading
//! entries for `dictool compile`.

mod mozc;
mod tsv;

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use yomi_core::dict::ReadingEntry;

pub use mozc::MozcSource;
pub use tsv::TsvSource;

/// Surface → readings, as produced by a [`DictSource`].
pub type SurfaceEntries = HashMap<String, Vec<ReadingEntry>>;

/// A pluggable dictionary source that parses raw dictionary files into entries.
pub trait DictSource {
    /// Parse one source file, or every matching file in a directory.
    fn parse_path(&self, path: &Path) -> Result<SurfaceEntries, DictSourceError>;

    /// Download raw dictionary files into `dest`.
    fn fetch(&self, dest: &Path) -> Result<(), DictSourceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DictSourceError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("HTTP error: {0}")]
    Http(String),
}

/// Source names accepted by [`from_name`].
pub const SOURCE_NAMES: &str = "tsv, mozc";

/// Create a `DictSource` by name. Returns `None` for unknown source names.
pub fn from_name(name: &str) -> Option<Box<dyn DictSource>> {
    match name {
        "tsv" => Some(Box::new(TsvSource)),
        "mozc" => Some(Box::new(MozcSource)),
        _ => None,
    }
}

/// `path` itself if it is a file, otherwise the files in it whose names
/// satisfy `predicate`, sorted by name.
///
/// Returns an error if a directory holds no matching files, using `label` in
/// the message (e.g. `"dictionary*.txt"`).
pub(super) fn source_files(
    path: &Path,
    label: &str,
    predicate: impl Fn(&str) -> bool,
) -> Result<Vec<PathBuf>, DictSourceError> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files: Vec<PathBuf> = fs::read_dir(path)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| predicate(&entry.file_name().to_string_lossy()))
        .map(|entry| entry.path())
        .collect();
    files.sort();

    if files.is_empty() {
        return Err(DictSourceError::Parse(format!(
            "no {label} files found in {}",
            path.display()
        )));
    }
    Ok(files)
}

/// Add one reading, keeping the lowest cost when `(surface, reading)` repeats.
/// Returns `true` if the reading was new for the surface.
pub(super) fn add_entry(
    entries: &mut SurfaceEntries,
    surface: &str,
    reading: &str,
    cost: i16,
) -> bool {
    let readings = entries.entry(surface.to_string()).or_default();
    match readings.iter_mut().find(|e| e.reading == reading) {
        Some(existing) => {
            existing.cost = existing.cost.min(cost);
            false
        }
        None => {
            readings.push(ReadingEntry {
                reading: reading.to_string(),
                cost,
            });
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_entry_keeps_lowest_cost() {
        let mut entries = SurfaceEntries::new();
        assert!(add_entry(&mut entries, "日", "ひ", 6000));
        assert!(!add_entry(&mut entries, "日", "ひ", 5000));
        assert!(add_entry(&mut entries, "日", "にち", 5500));
        let readings = &entries["日"];
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].cost, 5000);
    }

    #[test]
    fn source_files_lists_matching_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["dictionary01.txt", "dictionary00.txt", "README.md"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        let files = source_files(dir.path(), "dictionary*.txt", |n| {
            n.starts_with("dictionary") && n.ends_with(".txt")
        })
        .unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["dictionary00.txt", "dictionary01.txt"]);
    }

    #[test]
    fn source_files_accepts_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.tsv");
        fs::write(&path, "").unwrap();
        let files = source_files(&path, "*.tsv", |_| false).unwrap();
        assert_eq!(files, vec![path]);
    }

    #[test]
    fn source_files_empty_dir_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = source_files(dir.path(), "*.tsv", |n| n.ends_with(".tsv")).unwrap_err();
        assert!(err.to_string().contains("no *.tsv files"));
    }

    #[test]
    fn from_name_knows_sources() {
        assert!(from_name("tsv").is_some());
        assert!(from_name("mozc").is_some());
        assert!(from_name("sudachi").is_none());
    }
}
