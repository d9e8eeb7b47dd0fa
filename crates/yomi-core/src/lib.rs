pub mod converter;
pub mod dict;
pub mod settings;
pub mod transliterator;
pub mod unicode;

pub use converter::{ConvertError, Converter, DictConverter, Segment};
pub use transliterator::{RunSummary, TransliterateError, Transliterator};
