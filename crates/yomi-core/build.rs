fn main() {
    // Validate embedded defaults at compile time.
    validate_toml(
        "src/default_settings.toml",
        include_str!("src/default_settings.toml"),
    );
    validate_tsv("src/dict/default_dict.tsv", include_str!("src/dict/default_dict.tsv"));
}

fn validate_toml(path: &str, content: &str) {
    if content.parse::<toml::Value>().is_err() {
        panic!("{path} contains invalid TOML");
    }
}

fn validate_tsv(path: &str, content: &str) {
    for (lineno, line) in content.lines().enumerate() {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields = line.split('\t').count();
        if !(2..=3).contains(&fields) {
            panic!("{path}:{}: expected 2 or 3 tab-separated fields", lineno + 1);
        }
    }
}
