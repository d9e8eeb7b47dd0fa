//! Global settings loaded from TOML.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        // Custom TOML is validated in `init_custom`; the default is validated by build.rs.
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub cost: CostSettings,
    pub output: OutputSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CostSettings {
    pub segment_penalty: i64,
    pub kana_cost: i16,
    pub other_cost: i16,
    pub unknown_kanji_cost: i16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PunctuationStyle {
    /// ASCII punctuation becomes its Japanese full-width form.
    Fullwidth,
    /// Punctuation is copied through unchanged.
    Keep,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputSettings {
    pub punctuation: PunctuationStyle,
    pub katakana_to_hiragana: bool,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_non_negative {
        ($section:ident . $field:ident) => {
            if s.$section.$field < 0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be non-negative".to_string(),
                });
            }
        };
    }

    check_non_negative!(cost.segment_penalty);
    check_non_negative!(cost.kana_cost);
    check_non_negative!(cost.other_cost);
    check_non_negative!(cost.unknown_kanji_cost);

    if s.cost.unknown_kanji_cost < s.cost.kana_cost {
        return Err(SettingsError::InvalidValue {
            field: "cost.unknown_kanji_cost".to_string(),
            reason: "must not be lower than cost.kana_cost".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_parse() {
        let s = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
        assert_eq!(s.cost.segment_penalty, 3000);
        assert_eq!(s.cost.kana_cost, 500);
        assert_eq!(s.cost.other_cost, 500);
        assert_eq!(s.cost.unknown_kanji_cost, 10000);
        assert_eq!(s.output.punctuation, PunctuationStyle::Fullwidth);
        assert!(s.output.katakana_to_hiragana);
    }

    #[test]
    fn parse_valid_custom_toml() {
        let toml = r#"
[cost]
segment_penalty = 1000
kana_cost = 100
other_cost = 200
unknown_kanji_cost = 5000

[output]
punctuation = "keep"
katakana_to_hiragana = false
"#;
        let s = parse_settings_toml(toml).unwrap();
        assert_eq!(s.cost.segment_penalty, 1000);
        assert_eq!(s.output.punctuation, PunctuationStyle::Keep);
        assert!(!s.output.katakana_to_hiragana);
    }

    #[test]
    fn error_negative_penalty() {
        let toml = r#"
[cost]
segment_penalty = -1
kana_cost = 500
other_cost = 500
unknown_kanji_cost = 10000

[output]
punctuation = "fullwidth"
katakana_to_hiragana = true
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { .. }));
        assert!(err.to_string().contains("cost.segment_penalty"));
    }

    #[test]
    fn error_unknown_kanji_cheaper_than_kana() {
        let toml = r#"
[cost]
segment_penalty = 3000
kana_cost = 500
other_cost = 500
unknown_kanji_cost = 100

[output]
punctuation = "fullwidth"
katakana_to_hiragana = true
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(err.to_string().contains("cost.unknown_kanji_cost"));
    }

    #[test]
    fn error_unknown_punctuation_style() {
        let toml = r#"
[cost]
segment_penalty = 3000
kana_cost = 500
other_cost = 500
unknown_kanji_cost = 10000

[output]
punctuation = "halfwidth"
katakana_to_hiragana = true
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn error_invalid_toml() {
        let err = parse_settings_toml("not valid toml {{{").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn error_missing_section() {
        let toml = r#"
[cost]
segment_penalty = 3000
kana_cost = 500
other_cost = 500
unknown_kanji_cost = 10000
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }
}
