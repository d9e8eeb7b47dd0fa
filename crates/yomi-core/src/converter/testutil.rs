#![cfg(test)]

use crate::dict::{ReadingEntry, TrieDictionary};
use crate::settings::PunctuationStyle;

use super::ConvertOptions;

fn words(list: &[(&str, &[(&str, i16)])]) -> Vec<(String, Vec<ReadingEntry>)> {
    list.iter()
        .map(|(surface, readings)| {
            (
                surface.to_string(),
                readings
                    .iter()
                    .map(|(reading, cost)| ReadingEntry {
                        reading: reading.to_string(),
                        cost: *cost,
                    })
                    .collect(),
            )
        })
        .collect()
}

/// Shared test dictionary for converter tests.
pub fn test_dict() -> TrieDictionary {
    TrieDictionary::from_entries(words(&[
        ("漢", &[("かん", 6500)]),
        ("字", &[("じ", 6500)]),
        ("漢字", &[("かんじ", 4000)]),
        ("言葉", &[("ことば", 4000)]),
        ("葉", &[("は", 6500)]),
        ("今日", &[("きょう", 4000), ("こんにち", 4800)]),
        ("日", &[("ひ", 6500), ("にち", 6800)]),
        ("日本", &[("にほん", 4000), ("にっぽん", 4500)]),
        ("日本語", &[("にほんご", 4000)]),
        ("本", &[("ほん", 6500)]),
        ("語", &[("ご", 6500)]),
        ("食べる", &[("たべる", 4000)]),
        ("食", &[("しょく", 6500)]),
    ]))
}

/// Fixed options, independent of the global settings singleton.
pub fn test_options() -> ConvertOptions {
    ConvertOptions {
        segment_penalty: 3000,
        kana_cost: 500,
        other_cost: 500,
        unknown_kanji_cost: 10000,
        punctuation: PunctuationStyle::Fullwidth,
        katakana_to_hiragana: true,
    }
}
