//! Character-level Unicode classification and kana normalization for Japanese text.

/// Check the full Hiragana block (U+3040..U+309F). This includes a few unassigned
/// codepoints (U+3040, U+3097-3098) but these never appear in real text, so the
/// simpler block-level check is preferred over an exact range.
pub fn is_hiragana(c: char) -> bool {
    ('\u{3040}'..='\u{309F}').contains(&c)
}

/// Check the full Katakana block (U+30A0..U+30FF). Includes rarely-used symbols
/// (゠ U+30A0, ヿ U+30FF) but no unassigned codepoints.
pub fn is_katakana(c: char) -> bool {
    ('\u{30A0}'..='\u{30FF}').contains(&c)
}

pub fn is_kanji(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
        || ('\u{3400}'..='\u{4DBF}').contains(&c)
        || ('\u{20000}'..='\u{2A6DF}').contains(&c)
        || c == '々'
}

/// Half-width katakana block (ｦ U+FF66 .. ﾟ U+FF9F), including ｰ and the
/// separate sound marks ﾞﾟ.
pub fn is_halfwidth_katakana(c: char) -> bool {
    ('\u{FF66}'..='\u{FF9F}').contains(&c)
}

/// Full-width forms of U+FF66..U+FF9F, in code point order.
const HALFWIDTH_KATAKANA: &str =
    "ヲァィゥェォャュョッーアイウエオカキクケコサシスセソタチツテトナニヌネノハヒフヘホマミムメモヤユヨラリルレロワン゛゜";

fn halfwidth_to_fullwidth(c: char) -> Option<char> {
    if !is_halfwidth_katakana(c) {
        return None;
    }
    HALFWIDTH_KATAKANA.chars().nth((c as u32 - 0xFF66) as usize)
}

/// Apply a trailing half-width ﾞ or ﾟ to a full-width katakana letter.
fn combine_sound_mark(base: char, mark: char) -> Option<char> {
    let offset = match mark {
        'ﾞ' if base == 'ウ' => return Some('ヴ'),
        'ﾞ' if "カキクケコサシスセソタチツテトハヒフヘホ".contains(base) => 1,
        'ﾟ' if "ハヒフヘホ".contains(base) => 2,
        _ => return None,
    };
    char::from_u32(base as u32 + offset)
}

/// Katakana letters that have a hiragana counterpart at a fixed -0x60 offset
/// (ァ U+30A1 .. ヴ U+30F4) plus the iteration marks ヽヾ.
fn has_hiragana_form(c: char) -> bool {
    ('\u{30A1}'..='\u{30F4}').contains(&c) || c == 'ヽ' || c == 'ヾ'
}

fn to_hiragana(c: char) -> char {
    match c {
        // Counter marks, as in 三ヶ月 or 一ヵ所.
        'ヵ' | 'ヶ' => 'か',
        _ if has_hiragana_form(c) => char::from_u32(c as u32 - 0x60).unwrap_or(c),
        _ => c,
    }
}

/// Convert a hiragana string to katakana.
/// Non-hiragana characters (ー, ASCII, etc.) are passed through unchanged.
pub fn hiragana_to_katakana(s: &str) -> String {
    s.chars()
        .map(|c| {
            if ('\u{3041}'..='\u{3096}').contains(&c) || c == 'ゝ' || c == 'ゞ' {
                char::from_u32(c as u32 + 0x60).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

/// Convert a katakana string to hiragana.
///
/// Half-width katakana is widened first, folding a following ﾞ/ﾟ into the
/// letter (ｶﾞ → が). The counter marks ヵヶ read か. ヷ..ヺ and ー have no
/// hiragana form and are kept as written.
pub fn katakana_to_hiragana(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        let mut kana = c;
        if let Some(wide) = halfwidth_to_fullwidth(c) {
            kana = wide;
            if let Some(voiced) = chars.peek().and_then(|&m| combine_sound_mark(wide, m)) {
                kana = voiced;
                chars.next();
            }
        }
        out.push(to_hiragana(kana));
    }
    out
}

/// Check if a string is a valid hiragana reading.
///
/// Accepts hiragana characters (U+3040..U+309F) and the prolonged sound mark
/// ー (U+30FC, technically katakana) which commonly appears in readings like
/// "らーめん".
pub fn is_hiragana_reading(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| is_hiragana(c) || c == 'ー')
}

/// Full-width Japanese form of an ASCII punctuation mark, if it has one.
pub fn fullwidth_punctuation(c: char) -> Option<char> {
    let mapped = match c {
        ',' => '、',
        '.' => '。',
        '!' => '！',
        '?' => '？',
        ':' => '：',
        ';' => '；',
        '(' => '（',
        ')' => '）',
        '[' => '「',
        ']' => '」',
        '~' => '〜',
        _ => return None,
    };
    Some(mapped)
}
