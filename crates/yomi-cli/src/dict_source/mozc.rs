use std::fs;
use std::path::Path;

use yomi_core::unicode::{is_hiragana_reading, is_kanji};

use super::{add_entry, source_files, DictSource, DictSourceError, SurfaceEntries};

const MOZC_CONTENTS_URL: &str =
    "https://api.github.com/repos/google/mozc/contents/src/data/dictionary_oss";
const MOZC_LICENSE_URL: &str = "https://raw.githubusercontent.com/google/mozc/master/LICENSE";

/// Mozc TSV dictionary source.
///
/// File format: `reading\tleft_id\tright_id\tcost\tsurface`
/// Files matched: `dictionary*.txt` in the input directory.
///
/// Rows are inverted into surface → reading. Only surfaces containing a
/// kanji are kept: kana, digits and symbols are read by the converter's
/// fallback, and a dictionary entry for a lone symbol would shadow it.
pub struct MozcSource;

impl MozcSource {
    fn download_file(url: &str, dest: &Path) -> Result<(), DictSourceError> {
        let body = ureq::get(url)
            .call()
            .map_err(|e| DictSourceError::Http(format!("{url}: {e}")))?
            .into_body()
            .read_to_vec()
            .map_err(|e| DictSourceError::Http(format!("{url}: {e}")))?;
        fs::write(dest, &body)?;
        Ok(())
    }

    /// List dictionary files via GitHub Contents API and return (name, download_url) pairs.
    fn list_remote_files() -> Result<Vec<(String, String)>, DictSourceError> {
        let body = ureq::get(MOZC_CONTENTS_URL)
            .call()
            .map_err(|e| DictSourceError::Http(format!("GitHub API: {e}")))?
            .into_body()
            .read_to_string()
            .map_err(|e| DictSourceError::Http(format!("GitHub API: {e}")))?;
        parse_remote_files(&body)
    }
}

fn is_dictionary_file(name: &str) -> bool {
    name.starts_with("dictionary") && name.ends_with(".txt")
}

/// Parse GitHub Contents API JSON and return (name, download_url) pairs
/// for `dictionary*.txt`.
fn parse_remote_files(json: &str) -> Result<Vec<(String, String)>, DictSourceError> {
    let entries: Vec<serde_json::Value> = serde_json::from_str(json)
        .map_err(|e| DictSourceError::Parse(format!("GitHub API JSON: {e}")))?;

    let mut files: Vec<(String, String)> = Vec::new();
    for entry in &entries {
        let (Some(raw_name), Some(url)) = (entry["name"].as_str(), entry["download_url"].as_str())
        else {
            continue;
        };
        if url.is_empty() {
            continue;
        }
        // Basename only, so a hostile listing cannot write outside `dest`.
        let name = Path::new(raw_name)
            .file_name()
            .unwrap_or_default()
            .to_string_lossy();
        if is_dictionary_file(&name) {
            files.push((name.into_owned(), url.to_string()));
        }
    }
    files.sort();
    Ok(files)
}

/// `(surface, reading, cost)` from one Mozc row, or `None` to skip it.
fn parse_row(line: &str) -> Option<(&str, &str, i16)> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < 5 {
        return None;
    }
    let reading = fields[0];
    let cost: i16 = fields[3].parse().ok()?;
    let surface = fields[4];
    if !is_hiragana_reading(reading) || !surface.chars().any(is_kanji) {
        return None;
    }
    Some((surface, reading, cost))
}

impl DictSource for MozcSource {
    fn parse_path(&self, path: &Path) -> Result<SurfaceEntries, DictSourceError> {
        let files = source_files(path, "dictionary*.txt", is_dictionary_file)?;

        let mut entries = SurfaceEntries::new();
        let mut total_lines = 0u64;
        let mut skipped = 0u64;

        for file in &files {
            eprintln!("Reading {}...", file.display());
            let content = fs::read_to_string(file)?;

            for line in content.lines() {
                total_lines += 1;
                if line.is_empty() || line.starts_with('#') {
                    skipped += 1;
                    continue;
                }
                let Some((surface, reading, cost)) = parse_row(line) else {
                    skipped += 1;
                    continue;
                };
                add_entry(&mut entries, surface, reading, cost);
            }
        }

        eprintln!("  (skipped {skipped} of {total_lines} lines)");
        Ok(entries)
    }

    fn fetch(&self, dest: &Path) -> Result<(), DictSourceError> {
        fs::create_dir_all(dest)?;

        eprintln!("Downloading Mozc dictionary files to {}...", dest.display());

        let remote_files = Self::list_remote_files()?;
        for (name, url) in &remote_files {
            let file_path = dest.join(name);
            if file_path.exists() {
                eprintln!("  {name} (already exists, skipping)");
                continue;
            }
            eprintln!("  {name}");
            Self::download_file(url, &file_path)?;
        }

        let license = dest.join("LICENSE");
        if license.exists() {
            eprintln!("  LICENSE (already exists, skipping)");
        } else {
            eprintln!("  LICENSE");
            Self::download_file(MOZC_LICENSE_URL, &license)?;
        }

        eprintln!("Done. Files saved to {}", dest.display());
        Ok(())
    }
}
