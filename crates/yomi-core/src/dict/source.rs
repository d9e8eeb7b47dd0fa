use std::collections::HashMap;

use crate::unicode::is_hiragana_reading;

use super::ReadingEntry;

/// Cost assigned to TSV lines that omit the third column.
pub const DEFAULT_ENTRY_COST: i16 = 5000;

/// Line counters reported by [`parse_tsv`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TsvStats {
    pub lines: u64,
    pub entries: u64,
    pub skipped: u64,
}

/// Parse dictionary source text: one `surface<TAB>reading[<TAB>cost]` per line.
///
/// Empty lines and `#` comments are skipped. Lines with a missing field, an
/// empty surface, a reading that is not hiragana, or an unparsable cost are
/// skipped and counted in [`TsvStats::skipped`]. A repeated
/// `(surface, reading)` pair keeps its lowest cost.
pub fn parse_tsv(text: &str) -> (HashMap<String, Vec<ReadingEntry>>, TsvStats) {
    let mut entries: HashMap<String, Vec<ReadingEntry>> = HashMap::new();
    let mut stats = TsvStats::default();

    for line in text.lines() {
        stats.lines += 1;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((surface, reading, cost)) = parse_line(line) else {
            tracing::debug!(line, "skipping invalid dictionary line");
            stats.skipped += 1;
            continue;
        };

        let readings = entries.entry(surface.to_string()).or_default();
        match readings.iter_mut().find(|e| e.reading == reading) {
            Some(existing) => existing.cost = existing.cost.min(cost),
            None => {
                readings.push(ReadingEntry {
                    reading: reading.to_string(),
                    cost,
                });
                stats.entries += 1;
            }
        }
    }

    (entries, stats)
}

fn parse_line(line: &str) -> Option<(&str, &str, i16)> {
    let fields: Vec<&str> = line.split('\t').collect();
    if !(2..=3).contains(&fields.len()) {
        return None;
    }
    let surface = fields[0].trim();
    let reading = fields[1].trim();
    if surface.is_empty() || !is_hiragana_reading(reading) {
        return None;
    }
    let cost = match fields.get(2) {
        Some(raw) => raw.trim().parse().ok()?,
        None => DEFAULT_ENTRY_COST,
    };
    Some((surface, reading, cost))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_entries_and_defaults_cost() {
        let (entries, stats) = parse_tsv("漢字\tかんじ\t4000\n言葉\tことば\n");
        assert_eq!(stats.entries, 2);
        assert_eq!(stats.skipped, 0);
        assert_eq!(entries["漢字"][0].cost, 4000);
        assert_eq!(entries["言葉"][0].cost, DEFAULT_ENTRY_COST);
    }

    #[test]
    fn skips_comments_blank_and_invalid_lines() {
        let text = "# header\n\n漢字\tカンジ\n字\n音\tおと\tabc\n日\tひ\t6000\n";
        let (entries, stats) = parse_tsv(text);
        assert_eq!(stats.lines, 6);
        assert_eq!(stats.skipped, 3);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries["日"][0].reading, "ひ");
    }

    #[test]
    fn duplicate_reading_keeps_lowest_cost() {
        let (entries, stats) = parse_tsv("日\tひ\t6000\n日\tにち\t5500\n日\tひ\t5000\n");
        assert_eq!(stats.entries, 2);
        let readings = &entries["日"];
        assert_eq!(readings.len(), 2);
        let hi = readings.iter().find(|e| e.reading == "ひ").unwrap();
        assert_eq!(hi.cost, 5000);
    }

    #[test]
    fn accepts_crlf_line_endings() {
        let (entries, _) = parse_tsv("言葉\tことば\t4000\r\n");
        assert_eq!(entries["言葉"][0].reading, "ことば");
        assert_eq!(entries["言葉"][0].cost, 4000);
    }
}
