//! Kanji-to-hiragana conversion.
//!
//! [`Converter`] is the narrow seam the transliterator talks to: text in,
//! ordered [`Segment`]s out. [`DictConverter`] is the built-in
//! implementation. It builds a character lattice from dictionary
//! common-prefix lookups, runs N-best Viterbi over unigram costs, and groups
//! the winning path into segments.

pub(crate) mod cost;
mod lattice;
mod postprocess;
pub(crate) mod testutil;
mod viterbi;


use serde::Serialize;

use crate::dict::{default_dictionary, ReadingDictionary, TrieDictionary};
use crate::settings::{settings, PunctuationStyle, Settings};

use cost::UnigramCost;
use postprocess::group_segments;
use viterbi::viterbi_nbest;

pub use lattice::{build_lattice, Lattice, LatticeNode, NodeKind};

/// One converted span of the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    /// The input span, exactly as written
    pub orig: String,
    /// Hiragana reading of `orig`
    pub hira: String,
    /// Katakana reading of `orig`
    pub kana: String,
}

/// Failure reported by a [`Converter`], or a contract violation found in its output.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("segment {index} covers no input")]
    EmptySegment { index: usize },

    #[error("segment {index} ({orig:?}) has no hiragana reading")]
    MissingReading { index: usize, orig: String },

    #[error("segments stop matching the input at byte {offset}")]
    Coverage { offset: usize },

    #[error("no conversion path through {chars} characters")]
    NoPath { chars: usize },

    #[error("conversion backend failed: {0}")]
    Backend(String),
}

/// A kanji→hiragana conversion capability.
///
/// Implementations return segments that cover `text` in order with no gaps,
/// each carrying a non-empty hiragana rendering. [`validate_segments`] checks
/// this for any implementation.
pub trait Converter {
    fn convert(&self, text: &str) -> Result<Vec<Segment>, ConvertError>;
}

impl<C: Converter + ?Sized> Converter for &C {
    fn convert(&self, text: &str) -> Result<Vec<Segment>, ConvertError> {
        (**self).convert(text)
    }
}

impl<C: Converter + ?Sized> Converter for Box<C> {
    fn convert(&self, text: &str) -> Result<Vec<Segment>, ConvertError> {
        (**self).convert(text)
    }
}

/// Check that `segments` cover `text` in order and that every segment has a reading.
pub fn validate_segments(text: &str, segments: &[Segment]) -> Result<(), ConvertError> {
    let mut offset = 0;
    for (index, seg) in segments.iter().enumerate() {
        if seg.orig.is_empty() {
            return Err(ConvertError::EmptySegment { index });
        }
        if seg.hira.is_empty() {
            return Err(ConvertError::MissingReading {
                index,
                orig: seg.orig.clone(),
            });
        }
        if !text[offset..].starts_with(seg.orig.as_str()) {
            return Err(ConvertError::Coverage { offset });
        }
        offset += seg.orig.len();
    }
    if offset != text.len() {
        return Err(ConvertError::Coverage { offset });
    }
    Ok(())
}

/// Concatenate the hiragana renderings of `segments` in order.
pub fn join_hiragana(segments: &[Segment]) -> String {
    segments.iter().map(|s| s.hira.as_str()).collect()
}

/// Knobs for [`DictConverter`], normally taken from the global settings.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub segment_penalty: i64,
    pub kana_cost: i16,
    pub other_cost: i16,
    pub unknown_kanji_cost: i16,
    pub punctuation: PunctuationStyle,
    pub katakana_to_hiragana: bool,
}

impl ConvertOptions {
    pub fn from_settings(s: &Settings) -> Self {
        Self {
            segment_penalty: s.cost.segment_penalty,
            kana_cost: s.cost.kana_cost,
            other_cost: s.cost.other_cost,
            unknown_kanji_cost: s.cost.unknown_kanji_cost,
            punctuation: s.output.punctuation,
            katakana_to_hiragana: s.output.katakana_to_hiragana,
        }
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self::from_settings(settings())
    }
}

/// Dictionary-driven [`Converter`].
pub struct DictConverter<D> {
    dict: D,
    options: ConvertOptions,
}

impl DictConverter<&'static TrieDictionary> {
    /// Converter over the embedded seed dictionary and global settings.
    pub fn with_default_dictionary() -> Self {
        Self::new(default_dictionary())
    }
}

impl<D: ReadingDictionary> DictConverter<D> {
    pub fn new(dict: D) -> Self {
        Self::with_options(dict, ConvertOptions::default())
    }

    pub fn with_options(dict: D, options: ConvertOptions) -> Self {
        Self { dict, options }
    }

    /// Up to `n` alternative segmentations with distinct readings, best first.
    pub fn convert_nbest(&self, text: &str, n: usize) -> Vec<Vec<Segment>> {
        if text.is_empty() || n == 0 {
            return Vec::new();
        }
        let lattice = build_lattice(&self.dict, text, &self.options);
        let cost_fn = UnigramCost::new(self.options.segment_penalty);
        viterbi_nbest(&lattice, &cost_fn, n)
            .into_iter()
            .map(|path| group_segments(path.nodes))
            .collect()
    }
}

impl<D: ReadingDictionary> Converter for DictConverter<D> {
    fn convert(&self, text: &str) -> Result<Vec<Segment>, ConvertError> {
        if text.is_empty() {
            return Ok(Vec::new());
        }
        self.convert_nbest(text, 1)
            .into_iter()
            .next()
            .ok_or_else(|| ConvertError::NoPath {
                chars: text.chars().count(),
            })
    }
}
