//! Writes the finished buffer to the output file, either by appending to it or
//! by replacing it. Replacement backs up the old file, writes a temporary file
//! beside it, and renames that into place, so the output is never seen half
//! written.
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use log::{debug, info};
use tempfile::NamedTempFile;

use crate::buffer::LineBuffer;
use crate::config::Config;
use crate::error::Error;

/// Commits `buffer` to `config.output`, creating missing parent directories.
pub fn commit(buffer: &LineBuffer, config: &Config) -> Result<(), Error> {
    let output = config.output.as_path();
    let dir = parent_dir(output);
    fs::create_dir_all(dir).map_err(|source| Error::write_failed(output, source))?;
    if config.append {
        append(buffer, output)
    } else {
        replace(output, |out| buffer.write_to(out))?;
        debug!("wrote {} line(s) to {}", buffer.len(), output.display());
        Ok(())
    }
}

/// The directory `output` lives in; `.` for a bare file name
fn parent_dir(output: &Path) -> &Path {
    match output.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}

fn append(buffer: &LineBuffer, output: &Path) -> Result<(), Error> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(output)
        .map_err(|source| Error::write_failed(output, source))?;
    buffer
        .write_to(&mut BufWriter::new(file))
        .map_err(|source| Error::write_failed(output, source))?;
    debug!("appended {} line(s) to {}", buffer.len(), output.display());
    Ok(())
}

/// Backs up `output` if it exists, then has `write` fill a temporary file
/// that replaces `output` only once it's complete.
fn replace(
    output: &Path,
    write: impl FnOnce(&mut BufWriter<&mut File>) -> io::Result<()>,
) -> Result<(), Error> {
    let existing = fs::metadata(output).ok();
    if existing.is_some() {
        let backup = backup_path(output, &Local::now());
        fs::copy(output, &backup).map_err(|source| Error::BackupFailed {
            output: output.to_path_buf(),
            backup: backup.clone(),
            source,
        })?;
        info!("backed up {} to {}", output.display(), backup.display());
    }

    let failed = |source| Error::write_failed(output, source);
    // Until `persist` succeeds, the temporary file is deleted when dropped
    let mut temp = NamedTempFile::new_in(parent_dir(output)).map_err(failed)?;
    write(&mut BufWriter::new(temp.as_file_mut())).map_err(failed)?;
    temp.as_file().sync_all().map_err(failed)?;
    if let Some(meta) = existing {
        fs::set_permissions(temp.path(), meta.permissions()).map_err(failed)?;
    }
    temp.persist(output).map_err(|err| failed(err.error))?;
    Ok(())
}

/// `<output>.bak.<YYYYMMDDTHHMMSS>`, with `.1`, `.2`, ... added if that name
/// is already taken.
pub(crate) fn backup_path(output: &Path, now: &DateTime<Local>) -> PathBuf {
    let mut base = OsString::from(output.as_os_str());
    base.push(format!(".bak.{}", now.format("%Y%m%dT%H%M%S")));
    let mut candidate = PathBuf::from(&base);
    let mut n = 0_u32;
    while candidate.exists() {
        n += 1;
        let mut numbered = base.clone();
        numbered.push(format!(".{n}"));
        candidate = PathBuf::from(numbered);
    }
    candidate
}
