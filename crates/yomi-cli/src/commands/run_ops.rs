use std::path::Path;
use std::process;

use yomi_core::{TransliterateError, Transliterator};

use crate::setup::{build_converter, ConverterArgs};

/// Input path used when none is given: the shared file of the batch job
/// that feeds this tool.
pub const DEFAULT_INOUT_PATH: &str = "tmpWords/inout.txt";

/// Process exit status for each failure, so a calling batch can tell
/// "skip this file" from "abort".
pub fn exit_code(err: &TransliterateError) -> i32 {
    match err {
        TransliterateError::InputNotFound { .. } => 2,
        TransliterateError::InputUnreadable { .. } => 3,
        TransliterateError::Decode { .. } => 4,
        TransliterateError::Conversion { .. } => 5,
        TransliterateError::OutputWrite { .. } => 6,
    }
}

pub fn run_cmd(args: &ConverterArgs, input: &str, output: Option<&str>) {
    let converter = die!(build_converter(args), "Error: {}");
    let output = output.unwrap_or(input);

    let transliterator = Transliterator::new(converter);
    match transliterator.run(Path::new(input), Path::new(output)) {
        Ok(summary) => {
            eprintln!(
                "Wrote {output} ({} chars from {} segments)",
                summary.output_chars, summary.segments
            );
            if summary.unconverted_kanji > 0 {
                eprintln!(
                    "Warning: {} kanji had no reading and were copied unchanged \
                     (use --dict with a compiled dictionary, see `dictool compile --source mozc`)",
                    summary.unconverted_kanji
                );
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(exit_code(&e));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let path = PathBuf::from("x");
        let io = || std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let decode = String::from_utf8(vec![0xff]).unwrap_err();
        let errors = [
            TransliterateError::InputNotFound { path: path.clone() },
            TransliterateError::InputUnreadable {
                path: path.clone(),
                source: io(),
            },
            TransliterateError::Decode {
                path: path.clone(),
                source: decode,
            },
            TransliterateError::Conversion {
                path: path.clone(),
                source: yomi_core::ConvertError::Backend("down".into()),
            },
            TransliterateError::OutputWrite {
                path,
                source: io(),
            },
        ];
        let codes: HashSet<i32> = errors.iter().map(exit_code).collect();
        assert!(codes.iter().all(|&c| c > 1));
        assert_eq!(codes.len(), errors.len());
    }
}
