//! `linecat` concatenates files, directory trees and standard input into a
//! single output file. Each input is introduced by a header line, and the
//! output can be filtered, deduplicated and numbered on the way.
//!
//! The `run` function is the kernel of the application: it takes the parsed
//! `Config` and the input arguments through
//! * `sources::expand`, which turns arguments into files and stdin markers,
//! * `sources::filter_by_name`, the `--file-filter`,
//! * `pipeline::gather`, which reads each source into the `LineBuffer`,
//! * `post::apply`, which drops empty lines, dedups and numbers, and
//! * `sink::commit`, which writes the result.
//!
//! Problems with individual inputs are logged and skipped; only the
//! conditions in `error::Error` stop a run.

#![cfg_attr(debug_assertions, allow(dead_code, unused_imports))]
#![deny(unused_must_use)]
#![deny(clippy::all)]
#![allow(clippy::needless_return)]
#![deny(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![deny(missing_docs)]

use std::ffi::OsString;
use std::io::Read;

use log::debug;

pub mod args;
pub mod buffer;
pub mod config;
pub mod error;
pub(crate) mod io;
pub mod pipeline;
pub mod post;
pub mod sink;
pub mod sources;

pub use crate::config::Config;
pub use crate::error::Error;

/// What a successful run did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Sources whose header and lines made it into the output
    pub sources_read: usize,
    /// Sources that were skipped because they couldn't be read
    pub sources_skipped: usize,
    /// Lines written to the output, headers included
    pub lines_written: usize,
}

/// Concatenates `inputs` into `config.output`. `stdin` is what a `-` input
/// reads from.
pub fn run(config: &Config, inputs: &[OsString], stdin: &mut impl Read) -> Result<Summary, Error> {
    if inputs.is_empty() {
        return Err(Error::Usage("at least one input (file, directory or -) is required".into()));
    }
    if config.output.as_os_str().is_empty() {
        return Err(Error::Usage("an output file is required".into()));
    }

    let sources = sources::expand(inputs, config.recursive);
    for source in &sources {
        debug!("input: {}", source.display_name);
    }
    let sources = sources::filter_by_name(sources, config.file_name_regex.as_ref());
    if sources.is_empty() {
        let pattern = config.file_name_regex.as_ref().map_or_else(String::new, ToString::to_string);
        return Err(Error::NoMatchingInputs { pattern });
    }

    let pipeline::Gathered { mut buffer, read, skipped } = pipeline::gather(&sources, config, stdin)?;
    post::apply(&mut buffer, config);
    sink::commit(&buffer, config)?;

    Ok(Summary { sources_read: read, sources_skipped: skipped, lines_written: buffer.len() })
}
