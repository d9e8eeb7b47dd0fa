use std::fs;
use std::path::Path;

use yomi_core::converter::{ConvertOptions, Segment};
use yomi_core::dict::{default_dictionary, TrieDictionary};
use yomi_core::settings::PunctuationStyle;
use yomi_core::{ConvertError, Converter, DictConverter, TransliterateError, Transliterator};

fn default_transliterator() -> Transliterator<DictConverter<&'static TrieDictionary>> {
    Transliterator::new(DictConverter::with_default_dictionary())
}

fn write(path: &Path, text: &str) {
    fs::write(path, text).unwrap();
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

/// Fails on every call, like a conversion backend that crashed.
struct Broken;

impl Converter for Broken {
    fn convert(&self, _text: &str) -> Result<Vec<Segment>, ConvertError> {
        Err(ConvertError::Backend("dictionary service unavailable".to_string()))
    }
}

/// Returns a segment without a hiragana rendering.
struct Malformed;

impl Converter for Malformed {
    fn convert(&self, text: &str) -> Result<Vec<Segment>, ConvertError> {
        Ok(vec![Segment {
            orig: text.to_string(),
            hira: String::new(),
            kana: String::new(),
        }])
    }
}

#[test]
fn in_place_kanji_words_with_comma() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inout.txt");
    write(&path, "漢字,言葉");

    default_transliterator().run(&path, &path).unwrap();

    assert_eq!(read(&path), "かんじ、ことば");
}

#[test]
fn keep_punctuation_policy_preserves_ascii_comma() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inout.txt");
    write(&path, "漢字,言葉");

    let options = ConvertOptions {
        punctuation: PunctuationStyle::Keep,
        ..ConvertOptions::default()
    };
    let converter = DictConverter::with_options(default_dictionary(), options);
    Transliterator::new(converter).run(&path, &path).unwrap();

    assert_eq!(read(&path), "かんじ,ことば");
}

#[test]
fn hiragana_input_is_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inout.txt");
    write(&path, "ひらがな");

    let summary = default_transliterator().run(&path, &path).unwrap();

    assert_eq!(read(&path), "ひらがな");
    assert_eq!(summary.input_chars, 4);
    assert_eq!(summary.output_chars, 4);
}

#[test]
fn katakana_input_is_normalized() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inout.txt");
    write(&path, "カタカナとひらがな");

    default_transliterator().run(&path, &path).unwrap();

    assert_eq!(read(&path), "かたかなとひらがな");
}

#[test]
fn halfwidth_katakana_is_normalized() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inout.txt");
    write(&path, "ｶﾀｶﾅとｶﾞｯｺｳ");

    default_transliterator().run(&path, &path).unwrap();

    assert_eq!(read(&path), "かたかなとがっこう");
}

#[test]
fn counter_marks_read_as_ka() {
    let transliterator = default_transliterator();
    assert_eq!(transliterator.transliterate("三ヶ月").unwrap(), "さんかげつ");
    assert_eq!(transliterator.transliterate("一ヵ所").unwrap(), "いちかしょ");
    assert_eq!(transliterator.transliterate("ヶ").unwrap(), "か");
}

#[test]
fn distinct_paths_leave_input_alone() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.txt");
    let output = dir.path().join("out.txt");
    write(&input, "今日は日本語の勉強");

    default_transliterator().run(&input, &output).unwrap();

    assert_eq!(read(&input), "今日は日本語の勉強");
    assert_eq!(read(&output), "きょうはにほんごのべんきょう");
}

#[test]
fn output_is_fully_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.txt");
    let output = dir.path().join("out.txt");
    write(&input, "言葉");
    write(&output, &"古い内容\n".repeat(100));

    default_transliterator().run(&input, &output).unwrap();

    assert_eq!(read(&output), "ことば");
}

#[test]
fn empty_input_produces_empty_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.txt");
    let output = dir.path().join("out.txt");
    write(&input, "");
    write(&output, "stale");

    let summary = default_transliterator().run(&input, &output).unwrap();

    assert_eq!(read(&output), "");
    assert_eq!(summary.segments, 0);
}

#[test]
fn rerun_on_converted_file_is_stable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inout.txt");
    write(&path, "漢字,言葉");

    let t = default_transliterator();
    t.run(&path, &path).unwrap();
    let first = read(&path);
    t.run(&path, &path).unwrap();

    assert_eq!(read(&path), first);
}

#[test]
fn missing_input_is_input_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("absent.txt");
    let output = dir.path().join("out.txt");
    write(&output, "previous");

    let err = default_transliterator().run(&input, &output).unwrap_err();

    assert!(matches!(err, TransliterateError::InputNotFound { .. }));
    assert_eq!(read(&output), "previous");
}

#[test]
fn directory_input_is_unreadable() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.txt");

    let err = default_transliterator()
        .run(dir.path(), &output)
        .unwrap_err();

    assert!(matches!(err, TransliterateError::InputUnreadable { .. }));
    assert!(!output.exists());
}

#[test]
fn invalid_utf8_is_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inout.txt");
    fs::write(&path, [0x8a, 0xbf, 0x8e, 0x9a]).unwrap();

    let err = default_transliterator().run(&path, &path).unwrap_err();

    assert!(matches!(err, TransliterateError::Decode { .. }));
    assert_eq!(fs::read(&path).unwrap(), vec![0x8a, 0xbf, 0x8e, 0x9a]);
}

#[test]
fn failing_converter_leaves_output_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inout.txt");
    write(&path, "漢字,言葉");

    let err = Transliterator::new(Broken).run(&path, &path).unwrap_err();

    match err {
        TransliterateError::Conversion { source, .. } => {
            assert!(matches!(source, ConvertError::Backend(_)))
        }
        other => panic!("expected conversion error, got {other:?}"),
    }
    assert_eq!(read(&path), "漢字,言葉");
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn malformed_segments_are_conversion_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.txt");
    let output = dir.path().join("out.txt");
    write(&input, "漢字");
    write(&output, "previous");

    let err = Transliterator::new(Malformed)
        .run(&input, &output)
        .unwrap_err();

    assert!(matches!(
        err,
        TransliterateError::Conversion {
            source: ConvertError::MissingReading { .. },
            ..
        }
    ));
    assert_eq!(read(&output), "previous");
}

#[test]
fn unwritable_output_is_output_write_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.txt");
    let output = dir.path().join("no_such_dir").join("out.txt");
    write(&input, "漢字");

    let err = default_transliterator().run(&input, &output).unwrap_err();

    assert!(matches!(err, TransliterateError::OutputWrite { .. }));
    assert_eq!(read(&input), "漢字");
}

#[test]
fn error_messages_name_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("absent.txt");
    let err = default_transliterator().run(&input, &input).unwrap_err();
    assert!(err.to_string().contains("absent.txt"));
}
