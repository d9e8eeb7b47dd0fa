use std::fs;
use std::path::Path;

use yomi_core::dict::parse_tsv;

use super::{add_entry, source_files, DictSource, DictSourceError, SurfaceEntries};

/// Hand-written `surface\treading[\tcost]` files, the format of the embedded
/// seed dictionary. Files matched in a directory: `*.tsv`.
pub struct TsvSource;

impl DictSource for TsvSource {
    fn parse_path(&self, path: &Path) -> Result<SurfaceEntries, DictSourceError> {
        let mut entries = SurfaceEntries::new();
        for file in source_files(path, "*.tsv", |name| name.ends_with(".tsv"))? {
            eprintln!("Reading {}...", file.display());
            let (parsed, stats) = parse_tsv(&fs::read_to_string(&file)?);
            for (surface, readings) in parsed {
                for e in readings {
                    add_entry(&mut entries, &surface, &e.reading, e.cost);
                }
            }
            eprintln!("  (skipped {} of {} lines)", stats.skipped, stats.lines);
        }
        Ok(entries)
    }

    fn fetch(&self, _dest: &Path) -> Result<(), DictSourceError> {
        Err(DictSourceError::Parse(
            "tsv dictionaries are local files; nothing to fetch".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merges_files_in_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.tsv"), "机\tつくえ\t4000\n").unwrap();
        fs::write(dir.path().join("b.tsv"), "机\tつくえ\t3000\n傘\tかさ\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "傘\tさん\n").unwrap();

        let entries = TsvSource.parse_path(dir.path()).unwrap();
        assert_eq!(entries["机"].len(), 1);
        assert_eq!(entries["机"][0].cost, 3000);
        assert_eq!(entries["傘"].len(), 1);
        assert_eq!(entries["傘"][0].reading, "かさ");
    }

    #[test]
    fn fetch_is_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        assert!(TsvSource.fetch(dir.path()).is_err());
    }
}
