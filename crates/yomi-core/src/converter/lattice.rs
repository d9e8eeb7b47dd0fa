use tracing::{debug, debug_span, warn};

use crate::dict::ReadingDictionary;
use crate::settings::PunctuationStyle;
use crate::unicode::{
    fullwidth_punctuation, is_halfwidth_katakana, is_hiragana, is_kanji, is_katakana,
    katakana_to_hiragana,
};

use super::ConvertOptions;

/// What produced a lattice node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A dictionary surface with its reading.
    Word,
    /// A kana character with no dictionary entry, read as itself.
    Kana,
    /// A kanji with no dictionary reading, passed through unchanged.
    UnknownKanji,
    /// Anything else: digits, Latin, whitespace, punctuation.
    Other,
}

/// A node in the conversion lattice.
#[derive(Debug, Clone)]
pub struct LatticeNode {
    /// Start position (char index, inclusive)
    pub start: usize,
    /// End position (char index, exclusive)
    pub end: usize,
    /// Input substring covered by this node
    pub surface: String,
    /// Hiragana reading of `surface`
    pub reading: String,
    /// Word cost (lower = more preferred)
    pub cost: i16,
    pub kind: NodeKind,
}

/// The lattice: all possible segmentations of an input text.
pub struct Lattice {
    /// The original input
    pub input: String,
    /// All nodes in the lattice
    pub nodes: Vec<LatticeNode>,
    /// nodes_by_end[i] = indices of nodes that end at position i
    pub nodes_by_end: Vec<Vec<usize>>,
    /// nodes_by_start[i] = indices of nodes that start at position i
    pub nodes_by_start: Vec<Vec<usize>>,
    /// Number of characters in input
    pub char_count: usize,
}

/// Build a lattice from mixed text using dictionary lookups.
///
/// One `common_prefix_search` per starting position finds every dictionary
/// surface that begins there. A 1-char fallback node is added wherever no
/// dictionary entry covers exactly that character, which keeps every
/// position reachable.
pub fn build_lattice(dict: &dyn ReadingDictionary, text: &str, opts: &ConvertOptions) -> Lattice {
    let char_count = text.chars().count();
    let _span = debug_span!("build_lattice", char_count).entered();
    let byte_offsets: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    let mut nodes = Vec::new();
    let mut nodes_by_end: Vec<Vec<usize>> = vec![Vec::new(); char_count + 1];
    let mut nodes_by_start: Vec<Vec<usize>> = vec![Vec::new(); char_count];

    for start in 0..char_count {
        let mut has_single_char_match = false;

        let suffix = &text[byte_offsets[start]..];
        for result in dict.common_prefix_search(suffix) {
            let surface_chars = result.surface.chars().count();
            let end = start + surface_chars;
            for entry in result.entries {
                let idx = nodes.len();
                nodes.push(LatticeNode {
                    start,
                    end,
                    surface: result.surface.clone(),
                    reading: entry.reading,
                    cost: entry.cost,
                    kind: NodeKind::Word,
                });
                nodes_by_end[end].push(idx);
                nodes_by_start[start].push(idx);
                if surface_chars == 1 {
                    has_single_char_match = true;
                }
            }
        }

        if !has_single_char_match {
            let end = fallback_end(text, &byte_offsets, start);
            let next_offset = byte_offsets.get(end).copied().unwrap_or(text.len());
            let ch = &text[byte_offsets[start]..next_offset];
            let idx = nodes.len();
            nodes.push(fallback_node(start, end, ch, opts));
            nodes_by_end[end].push(idx);
            nodes_by_start[start].push(idx);
        }
    }

    debug!(node_count = nodes.len());
    Lattice {
        input: text.to_string(),
        nodes,
        nodes_by_end,
        nodes_by_start,
        char_count,
    }
}

/// End of the fallback node starting at `start`: one character, or two when a
/// half-width kana is followed by a half-width sound mark (ｶﾞ).
fn fallback_end(text: &str, byte_offsets: &[usize], start: usize) -> usize {
    let mut chars = text[byte_offsets[start]..].chars();
    match (chars.next(), chars.next()) {
        (Some(c), Some('ﾞ' | 'ﾟ')) if is_halfwidth_katakana(c) && !matches!(c, 'ﾞ' | 'ﾟ') => {
            start + 2
        }
        _ => start + 1,
    }
}

fn fallback_node(start: usize, end: usize, ch: &str, opts: &ConvertOptions) -> LatticeNode {
    let c = ch.chars().next().unwrap_or_default();
    let is_kana = is_hiragana(c) || is_katakana(c) || is_halfwidth_katakana(c);
    let (kind, reading, cost) = if is_kana {
        let reading = if opts.katakana_to_hiragana {
            katakana_to_hiragana(ch)
        } else {
            ch.to_string()
        };
        (NodeKind::Kana, reading, opts.kana_cost)
    } else if is_kanji(c) {
        warn!(kanji = ch, "no reading for kanji, passing through");
        (NodeKind::UnknownKanji, ch.to_string(), opts.unknown_kanji_cost)
    } else {
        let reading = match opts.punctuation {
            PunctuationStyle::Fullwidth => fullwidth_punctuation(c)
                .map(String::from)
                .unwrap_or_else(|| ch.to_string()),
            PunctuationStyle::Keep => ch.to_string(),
        };
        (NodeKind::Other, reading, opts.other_cost)
    };
    LatticeNode {
        start,
        end,
        surface: ch.to_string(),
        reading,
        cost,
        kind,
    }
}
