//! Shared start-up for the binaries: settings, dictionaries, converter.

use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;

use tracing::info;
use yomi_core::dict::{
    default_dictionary, parse_tsv, CompositeDictionary, DictError, ReadingDictionary,
    TrieDictionary,
};
use yomi_core::settings::{self, SettingsError};
use yomi_core::DictConverter;

#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("cannot read {path}: {source}")]
    Io { path: String, source: io::Error },

    #[error("invalid settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("cannot load dictionary: {0}")]
    Dict(#[from] DictError),
}

/// Dictionary and settings overrides shared by every conversion command.
#[derive(Debug, Default, Clone)]
pub struct ConverterArgs {
    pub settings: Option<String>,
    pub dict: Option<String>,
    pub user_dict: Option<String>,
}

fn read_text(path: &str) -> Result<String, SetupError> {
    fs::read_to_string(path).map_err(|source| SetupError::Io {
        path: path.to_string(),
        source,
    })
}

/// Install a custom settings file, if given. Must run before the first
/// conversion, which freezes the global settings.
pub fn apply_settings(path: Option<&str>) -> Result<(), SetupError> {
    if let Some(path) = path {
        settings::init_custom(read_text(path)?)?;
        info!(path, "loaded settings");
    }
    Ok(())
}

/// The compiled dictionary at `dict` (or the embedded seed dictionary),
/// with an optional TSV user dictionary layered on top.
pub fn load_dictionary(
    dict: Option<&str>,
    user_dict: Option<&str>,
) -> Result<Arc<dyn ReadingDictionary>, SetupError> {
    let base: Arc<dyn ReadingDictionary> = match dict {
        Some(path) => {
            let dict = TrieDictionary::open(Path::new(path))?;
            let (surfaces, entries) = dict.stats();
            info!(path, surfaces, entries, "opened dictionary");
            Arc::new(dict)
        }
        None => Arc::new(default_dictionary()),
    };

    let Some(path) = user_dict else {
        return Ok(base);
    };
    let (entries, stats) = parse_tsv(&read_text(path)?);
    info!(
        path,
        entries = stats.entries,
        skipped = stats.skipped,
        "loaded user dictionary"
    );
    let user: Arc<dyn ReadingDictionary> = Arc::new(TrieDictionary::from_entries(entries));
    Ok(Arc::new(CompositeDictionary::new(vec![base, user])))
}

/// Apply settings, load dictionaries, and build the converter.
pub fn build_converter(
    args: &ConverterArgs,
) -> Result<DictConverter<Arc<dyn ReadingDictionary>>, SetupError> {
    apply_settings(args.settings.as_deref())?;
    let dict = load_dictionary(args.dict.as_deref(), args.user_dict.as_deref())?;
    Ok(DictConverter::new(dict))
}
