use std::fs;

pub fn settings_export() {
    print!("{}", yomi_core::settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(
        yomi_core::settings::parse_settings_toml(&content),
        "Error: {}"
    );
    println!(
        "OK: cost.segment_penalty={}, output.punctuation={:?}, output.katakana_to_hiragana={}",
        s.cost.segment_penalty, s.output.punctuation, s.output.katakana_to_hiragana
    );
}

pub fn dict_export() {
    print!("{}", yomi_core::dict::DEFAULT_DICT_TSV);
}
