//! Reads each source in turn, keeps the lines the line filter wants, and
//! appends a header plus those lines to the buffer.
use std::io::Read;

use anyhow::Result;
use log::{debug, warn};

use crate::buffer::{Line, LineBuffer};
use crate::config::Config;
use crate::error::Error;
use crate::io::{open_file, Input};
use crate::sources::{Source, SourceKind};

/// The buffer built from the sources, with a count of how many sources made
/// it in and how many were skipped.
#[derive(Debug)]
pub struct Gathered {
    /// Headers and content lines, in source order
    pub buffer: LineBuffer,
    /// Sources read successfully
    pub read: usize,
    /// Sources skipped because they couldn't be opened or read
    pub skipped: usize,
}

/// Builds the buffer from `sources`, in order. `stdin` is read by each stdin
/// source; the first one drains it.
///
/// A source that's missing, isn't a regular file, or can't be read is
/// reported and skipped (without a header). The only failure is when that
/// happens to every source.
pub fn gather(sources: &[Source], config: &Config, stdin: &mut impl Read) -> Result<Gathered, Error> {
    let mut gathered = Gathered { buffer: LineBuffer::new(), read: 0, skipped: 0 };
    let line_regex = config.line_regex.as_ref();
    let decode = config.decode_bom;

    for source in sources {
        // The whole source is read before anything is added, so a read error
        // halfway through leaves no trace of it in the output.
        let lines = match source.kind {
            SourceKind::Stdin => read_lines(Input::new(&source.display_name, &mut *stdin, decode), line_regex),
            SourceKind::File => open_file(&source.path)
                .and_then(|file| read_lines(Input::new(&source.display_name, file, decode), line_regex)),
        };
        match lines {
            Ok((lines, seen)) => {
                debug!("read {}: kept {} of {seen} line(s)", source.display_name, lines.len());
                gathered.buffer.push(config.header_for(&source.display_name));
                gathered.buffer.extend(lines);
                gathered.read += 1;
            }
            Err(err) => {
                warn!("skipping {}: {err:#}", source.display_name);
                gathered.skipped += 1;
            }
        }
    }

    if gathered.read == 0 {
        return Err(Error::NoReadableInputs { attempted: sources.len() });
    }
    Ok(gathered)
}

/// Returns the lines of `input` that match `line_regex` (all of them if
/// there's no regex), along with the number of lines read.
fn read_lines(input: Input<'_>, line_regex: Option<&regex::bytes::Regex>) -> Result<(Vec<Line>, usize)> {
    let mut kept = Vec::new();
    let mut seen = 0_usize;
    input.for_byte_line(|line| {
        seen += 1;
        if line_regex.is_none_or(|regex| regex.is_match(line)) {
            kept.push(line.to_vec());
        }
    })?;
    Ok((kept, seen))
}
