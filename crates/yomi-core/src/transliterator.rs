//! File-to-file hiragana transliteration.
//!
//! [`Transliterator::run`] loads the whole input file, converts it in one
//! call to a [`Converter`], and replaces the output file with the joined
//! hiragana readings. The input is read and closed before anything is
//! written, and the output is replaced by renaming a fully written temporary
//! file, so the same path can be used for both and a failed run never
//! leaves a truncated output behind.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::string::FromUtf8Error;

use tempfile::NamedTempFile;
use tracing::{debug, info, info_span};

use crate::converter::{join_hiragana, validate_segments, ConvertError, Converter};
use crate::unicode::is_kanji;

#[derive(Debug, thiserror::Error)]
pub enum TransliterateError {
    #[error("input file not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("cannot read input file {}: {source}", path.display())]
    InputUnreadable { path: PathBuf, source: io::Error },

    #[error("input file {} is not valid UTF-8: {source}", path.display())]
    Decode {
        path: PathBuf,
        source: FromUtf8Error,
    },

    #[error("conversion failed for {}: {source}", path.display())]
    Conversion {
        path: PathBuf,
        source: ConvertError,
    },

    #[error("cannot write output file {}: {source}", path.display())]
    OutputWrite { path: PathBuf, source: io::Error },
}

/// What a successful run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub input_chars: usize,
    pub output_chars: usize,
    pub segments: usize,
    /// Kanji copied to the output because no reading was found
    pub unconverted_kanji: usize,
}

pub struct Transliterator<C> {
    converter: C,
}

impl<C: Converter> Transliterator<C> {
    pub fn new(converter: C) -> Self {
        Self { converter }
    }

    /// Convert `text` and join the segment readings.
    ///
    /// The converter's output is checked before joining; segments that
    /// skip or repeat input, or lack a reading, are a [`ConvertError`].
    pub fn transliterate(&self, text: &str) -> Result<String, ConvertError> {
        Ok(self.convert_checked(text)?.0)
    }

    fn convert_checked(&self, text: &str) -> Result<(String, usize), ConvertError> {
        let segments = self.converter.convert(text)?;
        validate_segments(text, &segments)?;
        Ok((join_hiragana(&segments), segments.len()))
    }

    /// Transliterate `input` into `output`, which may be the same path.
    pub fn run(&self, input: &Path, output: &Path) -> Result<RunSummary, TransliterateError> {
        let _span =
            info_span!("run", input = %input.display(), output = %output.display()).entered();

        let text = read_input(input)?;
        let (converted, segments) = self
            .convert_checked(&text)
            .map_err(|source| TransliterateError::Conversion {
                path: input.to_path_buf(),
                source,
            })?;
        write_atomic(output, &converted).map_err(|source| TransliterateError::OutputWrite {
            path: output.to_path_buf(),
            source,
        })?;

        let summary = RunSummary {
            input_chars: text.chars().count(),
            output_chars: converted.chars().count(),
            segments,
            unconverted_kanji: converted.chars().filter(|&c| is_kanji(c)).count(),
        };
        info!(
            input_chars = summary.input_chars,
            output_chars = summary.output_chars,
            segments = summary.segments,
            unconverted_kanji = summary.unconverted_kanji,
            "transliterated"
        );
        Ok(summary)
    }
}

fn read_input(path: &Path) -> Result<String, TransliterateError> {
    let bytes = fs::read(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => TransliterateError::InputNotFound {
            path: path.to_path_buf(),
        },
        _ => TransliterateError::InputUnreadable {
            path: path.to_path_buf(),
            source,
        },
    })?;
    debug!(bytes = bytes.len(), "read input");
    String::from_utf8(bytes).map_err(|source| TransliterateError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Replace `path` with `contents` via a temporary file in the same directory.
///
/// The temporary file is deleted on drop if anything fails before the rename.
/// An existing output keeps its permissions.
fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    if let Ok(meta) = fs::metadata(path) {
        tmp.as_file().set_permissions(meta.permissions())?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    debug!(bytes = contents.len(), "wrote output");
    Ok(())
}
