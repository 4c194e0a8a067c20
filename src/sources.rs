//! Turns the command line's input arguments into the ordered list of sources
//! to read, and applies the file name filter to that list.
use std::borrow::Cow;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use regex::Regex;
use walkdir::{DirEntry, WalkDir};

/// The argument that stands for standard input
pub const STDIN_ARG: &str = "-";

/// Where a source's lines come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// A file (or something claiming to be one; it's checked when read)
    File,
    /// Standard input
    Stdin,
}

/// One input: a header line plus its content lines in the output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    /// File or stdin
    pub kind: SourceKind,
    /// The file's path; empty for stdin
    pub path: PathBuf,
    /// What the header calls this source
    pub display_name: String,
}

impl Source {
    /// A standard input source
    #[must_use]
    pub fn stdin() -> Self {
        Source { kind: SourceKind::Stdin, path: PathBuf::new(), display_name: "stdin".into() }
    }

    /// A file source, named by its path as given
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let display_name = path.display().to_string();
        Source { kind: SourceKind::File, path, display_name }
    }

    /// The last component of the path, which is what `--file-filter` looks at.
    /// Paths like `..` have no last component, so we fall back to the whole name.
    #[must_use]
    pub fn base_name(&self) -> Cow<'_, str> {
        match self.path.file_name() {
            Some(name) => name.to_string_lossy(),
            None => Cow::Borrowed(&self.display_name),
        }
    }
}

/// Expands `args` into sources, in argument order:
/// * `-` becomes a stdin source (each time it appears),
/// * a directory becomes the regular files inside it (just its children,
///   or the whole tree if `recursive`), sorted by name within each directory,
/// * anything else becomes a file source, whether or not it exists.
///
/// A directory we can't read is reported and contributes nothing.
#[must_use]
pub fn expand(args: &[OsString], recursive: bool) -> Vec<Source> {
    let mut sources = Vec::new();
    for arg in args {
        if arg == STDIN_ARG {
            sources.push(Source::stdin());
            continue;
        }
        let path = PathBuf::from(arg);
        if path.is_dir() {
            let before = sources.len();
            let unreadable = expand_directory(&path, recursive, &mut sources);
            debug!(
                "{} expands to {} file(s), {unreadable} unreadable entr(ies)",
                path.display(),
                sources.len() - before
            );
        } else {
            sources.push(Source::file(path));
        }
    }
    sources
}

/// Appends the regular files under `dir` to `sources`, and returns how many
/// entries (the root included) couldn't be read.
fn expand_directory(dir: &Path, recursive: bool, sources: &mut Vec<Source>) -> usize {
    // Symlinked directories aren't followed, so no path is visited twice
    let mut walker = WalkDir::new(dir).min_depth(1).follow_links(false).sort_by_file_name();
    if !recursive {
        walker = walker.max_depth(1);
    }
    let mut unreadable = 0;
    for entry in walker {
        match entry {
            Ok(entry) if is_regular_file(&entry) => sources.push(Source::file(entry.into_path())),
            Ok(_) => {}
            Err(err) => {
                let path = err.path().unwrap_or(dir).display().to_string();
                warn!("can't read directory {path}: {err}");
                unreadable += 1;
            }
        }
    }
    unreadable
}

/// Regular files, and symlinks that lead to regular files
fn is_regular_file(entry: &DirEntry) -> bool {
    if entry.file_type().is_file() {
        return true;
    }
    entry.path_is_symlink() && fs::metadata(entry.path()).is_ok_and(|meta| meta.is_file())
}

/// Drops the file sources whose base name doesn't match `pattern`. Stdin
/// sources always stay, and so does everything when there's no pattern.
#[must_use]
pub fn filter_by_name(sources: Vec<Source>, pattern: Option<&Regex>) -> Vec<Source> {
    let Some(pattern) = pattern else { return sources };
    sources
        .into_iter()
        .filter(|source| {
            let keep = source.kind == SourceKind::Stdin || pattern.is_match(&source.base_name());
            if !keep {
                debug!("skipping {}: name doesn't match `{pattern}`", source.display_name);
            }
            keep
        })
        .collect()
}
