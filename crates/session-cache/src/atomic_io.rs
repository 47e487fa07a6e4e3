//! Temp-file-and-rename writes for the session file.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use camino::Utf8Path;
use cap_std::fs::{Dir, OpenOptions};

use crate::error::SessionCacheError;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Owner read/write only; the file holds a live API token.
#[cfg(unix)]
const SESSION_FILE_MODE: u32 = 0o600;

/// Replace `file_name` inside `dir` with `contents` in one rename.
///
/// `display_path` is only used in error messages.
pub(crate) fn write_atomic(
    dir: &Dir,
    file_name: &str,
    contents: &str,
    display_path: &Utf8Path,
) -> Result<(), SessionCacheError> {
    let tmp_name = temp_name_for(file_name);
    let write_error = |err: io::Error| SessionCacheError::WriteError {
        path: display_path.to_path_buf(),
        message: err.to_string(),
    };

    if let Err(err) = write_temp(dir, &tmp_name, contents) {
        discard(dir, &tmp_name);
        return Err(write_error(err));
    }
    if let Err(err) = rename_over(dir, &tmp_name, file_name) {
        discard(dir, &tmp_name);
        return Err(write_error(err));
    }
    Ok(())
}

fn temp_name_for(file_name: &str) -> String {
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos());
    format!(".{file_name}.{}.{nanos}.{counter}.tmp", std::process::id())
}

fn write_temp(dir: &Dir, tmp_name: &str, contents: &str) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    restrict_mode(&mut options);
    let mut file = dir.open_with(tmp_name, &options)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()
}

#[cfg(unix)]
fn restrict_mode(options: &mut OpenOptions) {
    use cap_std::fs::OpenOptionsExt;
    options.mode(SESSION_FILE_MODE);
}

#[cfg(not(unix))]
fn restrict_mode(_options: &mut OpenOptions) {}

#[cfg(windows)]
fn rename_over(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    // Windows refuses to rename onto an existing file.
    match dir.remove_file(target_name) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    dir.rename(tmp_name, dir, target_name)
}

#[cfg(not(windows))]
fn rename_over(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    dir.rename(tmp_name, dir, target_name)
}

fn discard(dir: &Dir, tmp_name: &str) {
    if dir.remove_file(tmp_name).is_err() {
        // The temp file may never have been created.
    }
}
