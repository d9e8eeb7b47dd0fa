//! Property tests: conversion covers every input character exactly once.

use proptest::prelude::*;

use yomi_core::converter::{join_hiragana, validate_segments};
use yomi_core::unicode::{is_hiragana, katakana_to_hiragana};
use yomi_core::{Converter, DictConverter};

fn arb_char() -> impl Strategy<Value = char> {
    prop_oneof![
        4 => prop::sample::select(vec!['漢', '字', '言', '葉', '日', '本', '語', '今', '鬱', '々']),
        4 => prop::sample::select(vec!['あ', 'か', 'ん', 'ひ', 'ら', 'が', 'な', 'ー']),
        2 => prop::sample::select(vec!['ア', 'カ', 'ナ', 'ヴ', 'ッ', 'ヶ']),
        1 => prop::sample::select(vec!['ｶ', 'ﾊ', 'ﾞ', 'ﾟ']),
        2 => prop::sample::select(vec![',', '.', ' ', '\n', 'a', 'Z', '7', '、']),
    ]
}

fn arb_text() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_char(), 0..40).prop_map(|chars| chars.into_iter().collect())
}

fn arb_kana_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec![
            'あ', 'き', 'ょ', 'う', 'ア', 'キ', 'ョ', 'ウ', 'ー', 'ｶ', 'ﾊ', 'ｰ', 'ﾞ', 'ﾟ',
        ]),
        1..30,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #[test]
    fn segments_cover_input_in_order(text in arb_text()) {
        let converter = DictConverter::with_default_dictionary();
        let segments = converter.convert(&text).unwrap();
        prop_assert!(validate_segments(&text, &segments).is_ok());
        let orig: String = segments.iter().map(|s| s.orig.as_str()).collect();
        prop_assert_eq!(orig, text);
    }

    #[test]
    fn pure_kana_reads_as_itself(text in arb_kana_text()) {
        let converter = DictConverter::with_default_dictionary();
        let segments = converter.convert(&text).unwrap();
        let hira = join_hiragana(&segments);
        prop_assert_eq!(&hira, &katakana_to_hiragana(&text));
        prop_assert!(hira.chars().all(|c| is_hiragana(c) || c == 'ー'));
    }
}
