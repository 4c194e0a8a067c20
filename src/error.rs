//! The fatal error classes. Problems with a single input are not errors in
//! this sense: they're logged as warnings and that input is skipped.
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop a `linecat` run
#[derive(Debug, Error)]
pub enum Error {
    /// Required configuration is missing (no output path, no inputs)
    #[error("{0}")]
    Usage(String),

    /// A `--filter` or `--file-filter` pattern doesn't compile
    #[error("invalid {flag} pattern `{pattern}`")]
    Pattern {
        /// The flag the pattern was given with
        flag: &'static str,
        /// The pattern as given
        pattern: String,
        /// What the regex compiler said
        #[source]
        source: regex::Error,
    },

    /// Every input was rejected by the file name filter
    #[error("no input file name matches `{pattern}`")]
    NoMatchingInputs {
        /// The file name pattern
        pattern: String,
    },

    /// Not a single input could be read
    #[error("none of the {attempted} input(s) could be read")]
    NoReadableInputs {
        /// How many sources we tried
        attempted: usize,
    },

    /// The existing output couldn't be copied aside before overwriting it
    #[error("can't back up {} to {}", .output.display(), .backup.display())]
    BackupFailed {
        /// The file we were about to replace
        output: PathBuf,
        /// Where its copy should have gone
        backup: PathBuf,
        /// Why the copy failed
        #[source]
        source: io::Error,
    },

    /// The output couldn't be written
    #[error("can't write {}", .output.display())]
    WriteFailed {
        /// The destination
        output: PathBuf,
        /// Why the write failed
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// The process exit status for this error. Each class gets its own code so
    /// scripts can tell them apart; 2 is shared with `clap`'s own usage errors.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) => 2,
            Self::Pattern { .. } => 3,
            Self::NoMatchingInputs { .. } => 4,
            Self::NoReadableInputs { .. } => 5,
            Self::BackupFailed { .. } => 6,
            Self::WriteFailed { .. } => 7,
        }
    }

    pub(crate) fn write_failed(output: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::WriteFailed { output: output.into(), source }
    }
}

#[allow(clippy::pedantic)]
#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn each_error_class_has_its_own_exit_code() {
        let pattern_error = regex::Regex::new("(").unwrap_err();
        let errors = [
            Error::Usage("no inputs".into()),
            Error::Pattern { flag: "--filter", pattern: "(".into(), source: pattern_error },
            Error::NoMatchingInputs { pattern: "x".into() },
            Error::NoReadableInputs { attempted: 1 },
            Error::BackupFailed {
                output: "out".into(),
                backup: "out.bak".into(),
                source: io::Error::from(io::ErrorKind::PermissionDenied),
            },
            Error::write_failed("out", io::Error::from(io::ErrorKind::PermissionDenied)),
        ];
        let mut codes: Vec<i32> = errors.iter().map(Error::exit_code).collect();
        assert!(codes.iter().all(|&c| c != 0));
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn messages_name_the_paths_involved() {
        let err = Error::write_failed("reports/all.txt", io::Error::from(io::ErrorKind::Other));
        assert_eq!(err.to_string(), "can't write reports/all.txt");
    }
}
