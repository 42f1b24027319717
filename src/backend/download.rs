//! Writing downloaded files to disk
//!
//! File names come from configuration and the backend, so they are reduced
//! to a single path component before touching the filesystem. Existing files
//! are never overwritten; a ` (n)` suffix is added instead.

use crate::error::{PassdownError, Result, ResultExt};
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Give up looking for a free name after this many candidates
const MAX_NAME_ATTEMPTS: u32 = 1000;

/// Reduce a file name to its last path component
pub fn sanitize_filename(name: &str) -> Result<String> {
    let last = name
        .rsplit(['/', '\\'])
        .find(|part| !part.trim().is_empty())
        .map(str::trim)
        .unwrap_or("");

    if last.is_empty() || last == "." || last == ".." {
        return Err(PassdownError::Download(format!(
            "Invalid file name: {:?}",
            name
        )));
    }

    Ok(last.to_string())
}

/// File name for the `attempt`-th try: the name itself, then `stem (n).ext`
pub fn candidate_name(name: &str, attempt: u32) -> String {
    if attempt == 0 {
        return name.to_string();
    }

    let path = Path::new(name);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(name);
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{} ({}).{}", stem, attempt, ext),
        None => format!("{} ({})", stem, attempt),
    }
}

/// Create a new file in `dir` for `name`, never opening an existing entry.
///
/// The existence check and the creation are one `create_new` open, so a file
/// appearing between attempts is skipped rather than truncated.
pub fn create_unique(dir: &Path, name: &str) -> Result<(PathBuf, File)> {
    for attempt in 0..=MAX_NAME_ATTEMPTS {
        let path = dir.join(candidate_name(name, attempt));
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to create {}", path.display()))
            }
        }
    }

    Err(PassdownError::Download(format!(
        "No free file name for {} in {}",
        name,
        dir.display()
    )))
}

/// Save downloaded bytes into `dir` and return the written path
pub fn save_download(dir: &Path, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
    let name = sanitize_filename(filename)?;

    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let (path, mut file) = create_unique(dir, &name)?;
    file.write_all(bytes)
        .and_then(|_| file.flush())
        .with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::info!("Saved {} ({} bytes) to {}", name, bytes.len(), path.display());
    Ok(path)
}
