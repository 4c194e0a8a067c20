//! Code to parse the command line using `clap`, and to turn the parsed
//! result into a `Config`

use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::config::{Config, DEFAULT_SEPARATOR};
use crate::error::Error;

/// Returns the parsed command line. `clap` itself reports malformed command
/// lines (and `--help`/`--version`) and exits; a pattern that doesn't compile
/// comes back as an `Error`.
pub fn parsed() -> Result<Args, Error> {
    CliArgs::parse().into_args()
}

/// The parsed command line
#[derive(Debug)]
pub struct Args {
    /// Everything but the inputs
    pub config: Config,
    /// Files, directories and `-`, in command line order
    pub inputs: Vec<OsString>,
}

#[derive(Debug, Parser)]
#[command(name = "linecat", version)]
/// Concatenate files, directories and stdin into one output file, with a
/// header line before each input.
struct CliArgs {
    /// Write the result to FILE (the old FILE is backed up first)
    #[arg(short = 'o', long, value_name = "FILE")]
    output: PathBuf,

    /// Append to FILE instead of replacing it
    #[arg(short = 'a', long)]
    append: bool,

    /// Number the output lines
    #[arg(short = 'n', long = "number")]
    add_numbers: bool,

    /// Leave out empty and whitespace-only lines
    #[arg(short = 's', long)]
    skip_empty: bool,

    /// Leave out lines already written
    #[arg(short = 'u', long)]
    unique: bool,

    /// Keep only lines matching REGEX
    #[arg(short = 'f', long = "filter", value_name = "REGEX")]
    line_pattern: Option<String>,

    /// Read only files whose name matches REGEX
    #[arg(short = 'F', long = "file-filter", value_name = "REGEX")]
    file_name_pattern: Option<String>,

    /// Read directories recursively
    #[arg(short = 'r', long)]
    recursive: bool,

    /// Start each header line with STRING
    #[arg(short = 'S', long, value_name = "STRING", default_value = DEFAULT_SEPARATOR, allow_hyphen_values = true)]
    separator: String,

    /// Translate UTF-16 inputs to UTF-8 and drop Byte Order Marks
    #[arg(short = 'B', long)]
    decode_bom: bool,

    /// Report what's being read on stderr
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Input files and directories; `-` reads standard input
    #[arg(value_name = "INPUT", required = true)]
    inputs: Vec<OsString>,
}

impl CliArgs {
    fn into_args(self) -> Result<Args, Error> {
        let mut config = Config::new(self.output);
        config.append = self.append;
        config.add_numbers = self.add_numbers;
        config.skip_empty = self.skip_empty;
        config.unique = self.unique;
        config.recursive = self.recursive;
        config.separator = self.separator;
        config.verbose = self.verbose;
        config.decode_bom = self.decode_bom;
        if let Some(pattern) = &self.line_pattern {
            config = config.with_line_pattern(pattern)?;
        }
        if let Some(pattern) = &self.file_name_pattern {
            config = config.with_file_name_pattern(pattern)?;
        }
        Ok(Args { config, inputs: self.inputs })
    }
}
