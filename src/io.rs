//! Opening and reading inputs. Bytes pass through untouched apart from the
//! line terminators. With `--decode-bom`, UTF-16 inputs (recognized by their
//! Byte Order Mark) are translated to UTF-8 and Byte Order Marks are dropped.
use anyhow::{bail, Context, Result};
use bstr::io::BufReadExt;
use encoding_rs_io::DecodeReaderBytesBuilder;
use std::{
    fs,
    fs::File,
    io::{BufRead, BufReader, Read},
    ops::FnMut,
    path::Path,
};

/// Opens `path` for reading, insisting that it exists and is a regular file
/// (directories, fifos and devices are refused).
pub(crate) fn open_file(path: &Path) -> Result<File> {
    let meta = fs::metadata(path).with_context(|| format!("Can't find file: {}", path.display()))?;
    if !meta.is_file() {
        bail!("Not a regular file: {}", path.display());
    }
    File::open(path).with_context(|| format!("Can't open file: {}", path.display()))
}

/// An `Input` is a reader for one source, plus the name we use for it in
/// error messages.
pub(crate) struct Input<'a> {
    name: String,
    reader: Box<dyn BufRead + 'a>,
}

impl<'a> Input<'a> {
    pub(crate) fn new(name: &str, raw: impl Read + 'a, decode_bom: bool) -> Self {
        let reader: Box<dyn BufRead + 'a> = if decode_bom {
            // Double-buffered: `DecodeReaderBytes` has its own buffer inside the
            // `BufReader`.
            Box::new(BufReader::new(
                DecodeReaderBytesBuilder::new()
                    .bom_sniffing(true) // Look at the BOM to detect UTF-16 files and convert to UTF-8
                    .strip_bom(true) // Remove the BOM before sending data to us
                    .utf8_passthru(true) // Don't enforce UTF-8 (BOM or no BOM)
                    .build(raw),
            ))
        } else {
            Box::new(BufReader::new(raw))
        };
        Input { name: name.to_string(), reader }
    }

    /// A convenience wrapper around `bstr::for_byte_line`: each line is passed
    /// without its `\n` or `\r\n` terminator.
    pub(crate) fn for_byte_line<F>(self, mut for_each_line: F) -> Result<()>
    where
        F: FnMut(&[u8]),
    {
        let Input { name, mut reader } = self;
        reader
            .for_byte_line(|line| {
                for_each_line(line);
                Ok(true)
            })
            .with_context(|| format!("Error reading {name}"))?;
        Ok(())
    }
}
