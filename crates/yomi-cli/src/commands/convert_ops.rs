use unicode_width::UnicodeWidthStr;
use yomi_core::converter::{join_hiragana, Segment};

use crate::setup::{build_converter, ConverterArgs};

pub fn convert_cmd(args: &ConverterArgs, text: &str, n: usize, json: bool) {
    let converter = die!(build_converter(args), "Error: {}");
    let nbest = converter.convert_nbest(text, n.max(1));

    if json {
        let out = die!(
            serde_json::to_string_pretty(&nbest),
            "Error encoding JSON: {}"
        );
        println!("{out}");
        return;
    }

    for (i, segments) in nbest.iter().enumerate() {
        if nbest.len() > 1 {
            println!("#{:>2}: {}", i + 1, join_hiragana(segments));
        } else {
            println!("{}", join_hiragana(segments));
        }
        for line in segment_table(segments) {
            println!("    {line}");
        }
    }
}

/// Render segments as `orig │ hira │ kana` rows aligned by display width.
pub fn segment_table(segments: &[Segment]) -> Vec<String> {
    let orig_w = column_width(segments.iter().map(|s| s.orig.as_str()));
    let hira_w = column_width(segments.iter().map(|s| s.hira.as_str()));
    segments
        .iter()
        .map(|s| {
            format!(
                "{} │ {} │ {}",
                pad(&printable(&s.orig), orig_w),
                pad(&printable(&s.hira), hira_w),
                printable(&s.kana)
            )
        })
        .collect()
}

fn printable(s: &str) -> String {
    s.escape_debug().to_string()
}

fn column_width<'a>(cells: impl Iterator<Item = &'a str>) -> usize {
    cells.map(|c| printable(c).width()).max().unwrap_or(0)
}

fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    format!("{s}{}", " ".repeat(fill))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(orig: &str, hira: &str, kana: &str) -> Segment {
        Segment {
            orig: orig.to_string(),
            hira: hira.to_string(),
            kana: kana.to_string(),
        }
    }

    #[test]
    fn table_aligns_wide_characters() {
        let rows = segment_table(&[seg("漢字", "かんじ", "カンジ"), seg(",", "、", "、")]);
        assert_eq!(rows[0], "漢字 │ かんじ │ カンジ");
        assert_eq!(rows[1], ",    │ 、     │ 、");
    }

    #[test]
    fn table_escapes_control_characters() {
        let rows = segment_table(&[seg("\n", "\n", "\n")]);
        assert_eq!(rows[0], "\\n │ \\n │ \\n");
    }
}
