//! The options that shape a run. A `Config` is built once, before any I/O,
//! and only read from then on.
use std::path::PathBuf;

use crate::error::Error;

/// The separator used in header lines when none is given
pub const DEFAULT_SEPARATOR: &str = "--==FILE==--";

/// Run configuration. Patterns are compiled when they're set, so a bad
/// pattern is reported before we touch the filesystem.
#[derive(Debug, Clone)]
pub struct Config {
    /// Destination file
    pub output: PathBuf,
    /// Append to `output` rather than replacing it
    pub append: bool,
    /// Prefix each output line with its line number
    pub add_numbers: bool,
    /// Drop lines with no non-whitespace content
    pub skip_empty: bool,
    /// Drop lines already seen earlier in the output
    pub unique: bool,
    /// Keep only content lines matching this
    pub line_regex: Option<regex::bytes::Regex>,
    /// Keep only files whose base name matches this
    pub file_name_regex: Option<regex::Regex>,
    /// Walk directory arguments recursively
    pub recursive: bool,
    /// The token that starts each header line
    pub separator: String,
    /// Extra diagnostics on stderr
    pub verbose: bool,
    /// Translate UTF-16 inputs to UTF-8 and drop Byte Order Marks
    pub decode_bom: bool,
}

impl Config {
    /// A configuration writing to `output` with every option off
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Config {
            output: output.into(),
            append: false,
            add_numbers: false,
            skip_empty: false,
            unique: false,
            line_regex: None,
            file_name_regex: None,
            recursive: false,
            separator: DEFAULT_SEPARATOR.to_string(),
            verbose: false,
            decode_bom: false,
        }
    }

    /// Sets the content line filter
    pub fn with_line_pattern(mut self, pattern: &str) -> Result<Self, Error> {
        let regex = regex::bytes::Regex::new(pattern).map_err(|source| Error::Pattern {
            flag: "--filter",
            pattern: pattern.to_string(),
            source,
        })?;
        self.line_regex = Some(regex);
        Ok(self)
    }

    /// Sets the file name filter
    pub fn with_file_name_pattern(mut self, pattern: &str) -> Result<Self, Error> {
        let regex = regex::Regex::new(pattern).map_err(|source| Error::Pattern {
            flag: "--file-filter",
            pattern: pattern.to_string(),
            source,
        })?;
        self.file_name_regex = Some(regex);
        Ok(self)
    }

    /// The header line for a source called `display_name`
    #[must_use]
    pub fn header_for(&self, display_name: &str) -> Vec<u8> {
        format!("{} {}", self.separator, display_name).into_bytes()
    }
}
