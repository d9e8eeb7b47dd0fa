use std::fs;
use std::path::Path;
use std::process;

use yomi_core::dict::{ReadingDictionary, TrieDictionary};

use crate::dict_source::{self, DictSource};

pub fn fetch(source_name: &str, output_dir: &str) {
    let source = source_or_exit(source_name);
    die!(
        source.fetch(Path::new(output_dir)),
        "Error fetching dictionary: {}"
    );
}

pub fn compile(source_name: &str, input: &str, output_file: &str) {
    let source = source_or_exit(source_name);

    eprintln!("Source: {source_name}");
    let entries = die!(
        source.parse_path(Path::new(input)),
        "Error parsing dictionary: {}"
    );
    if entries.is_empty() {
        eprintln!("Error: no valid entries in {input}");
        process::exit(1);
    }

    let surface_count = entries.len();
    let entry_count: usize = entries.values().map(|v| v.len()).sum();
    eprintln!("Building trie from {surface_count} surfaces ({entry_count} entries)...");

    let dict = TrieDictionary::from_entries(entries);
    die!(
        dict.save(Path::new(output_file)),
        "Error writing dictionary: {}"
    );

    let file_size = fs::metadata(output_file).map(|m| m.len()).unwrap_or(0);
    eprintln!("Wrote {output_file} ({:.1} KB)", file_size as f64 / 1024.0);
}

fn source_or_exit(name: &str) -> Box<dyn DictSource> {
    dict_source::from_name(name).unwrap_or_else(|| {
        eprintln!(
            "Error: unknown source '{name}' (available: {})",
            dict_source::SOURCE_NAMES
        );
        process::exit(1);
    })
}

fn open(dict_file: &str) -> TrieDictionary {
    die!(
        TrieDictionary::open(Path::new(dict_file)),
        "Error opening dictionary: {}"
    )
}

pub fn info(dict_file: &str) {
    let dict = open(dict_file);
    let file_size = fs::metadata(dict_file).map(|m| m.len()).unwrap_or(0);
    let (surface_count, entry_count) = dict.stats();

    println!("Dictionary: {dict_file}");
    println!("File size:  {:.1} KB", file_size as f64 / 1024.0);
    println!("Surfaces:   {surface_count}");
    println!("Entries:    {entry_count}");

    let sample_keys = ["漢字", "言葉", "日本語", "東京"];
    println!();
    println!("Sample lookups:");
    for key in &sample_keys {
        let entries = dict.lookup(key);
        if entries.is_empty() {
            println!("  {key} → (not found)");
        } else {
            let readings: Vec<&str> = entries.iter().map(|e| e.reading.as_str()).collect();
            println!("  {key} → {}", readings.join(", "));
        }
    }
}

pub fn lookup(dict_file: &str, surface: &str) {
    let dict = open(dict_file);
    let entries = dict.lookup(surface);
    if entries.is_empty() {
        println!("{surface}: (not found)");
        return;
    }
    for e in &entries {
        println!("{surface}\t{}\t{}", e.reading, e.cost);
    }
}

pub fn prefix(dict_file: &str, query: &str) {
    let dict = open(dict_file);
    let results = dict.common_prefix_search(query);
    if results.is_empty() {
        println!("{query}: (no prefixes)");
        return;
    }
    for r in &results {
        let readings: Vec<String> = r
            .entries
            .iter()
            .map(|e| format!("{}({})", e.reading, e.cost))
            .collect();
        println!("{}\t{}", r.surface, readings.join(", "));
    }
}

/// Dump a compiled dictionary back to TSV source form.
pub fn dump(dict_file: &str) {
    let dict = open(dict_file);
    for (surface, entries) in dict.iter() {
        for e in entries {
            println!("{surface}\t{}\t{}", e.reading, e.cost);
        }
    }
}
