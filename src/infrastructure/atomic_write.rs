//! Replace files without leaving them half-written

use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Sibling file `contents` are written to before being renamed over `path`
pub fn temp_path(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "file".to_string());
    path.with_file_name(format!(".{}.tmp", file_name))
}

/// Write `contents` to `path` through a temp file and a rename, creating
/// missing parent directories. Readers see either the old file or the new one.
pub fn write_atomic(path: &Path, contents: impl AsRef<[u8]>) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let temp = temp_path(path);
    fs::write(&temp, contents)?;
    fs::rename(&temp, path)?;

    Ok(())
}
