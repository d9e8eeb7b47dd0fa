use crate::unicode::hiragana_to_katakana;

use super::lattice::{LatticeNode, NodeKind};
use super::Segment;

/// Turn a Viterbi path into output segments.
///
/// Each dictionary word becomes its own segment. Runs of consecutive
/// fallback nodes of the same kind (kana, unknown kanji, other) are merged,
/// so "ひらがな" is one segment rather than four.
pub(crate) fn group_segments(nodes: Vec<LatticeNode>) -> Vec<Segment> {
    let mut segments: Vec<Segment> = Vec::with_capacity(nodes.len());
    let mut last_kind: Option<NodeKind> = None;

    for node in nodes {
        let mergeable = node.kind != NodeKind::Word && last_kind == Some(node.kind);
        match segments.last_mut() {
            Some(seg) if mergeable => {
                seg.orig.push_str(&node.surface);
                seg.hira.push_str(&node.reading);
            }
            _ => segments.push(Segment {
                orig: node.surface,
                hira: node.reading,
                kana: String::new(),
            }),
        }
        last_kind = Some(node.kind);
    }

    for seg in &mut segments {
        seg.kana = hiragana_to_katakana(&seg.hira);
    }
    segments
}
