//! Artifact writing.

use apigen_core::{Error, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes `content` to `path` atomically.
///
/// The text goes to a temporary sibling first, is synced, and is then
/// renamed over the destination, so readers never observe a partial
/// artifact. Missing parent directories are created.
///
/// # Errors
///
/// Returns [`Error::Io`] naming the path that failed.
///
/// # Examples
///
/// ```
/// use apigen_codegen::output::write_atomic;
///
/// let dir = tempfile::tempdir().unwrap();
/// let path = dir.path().join("api/types.ts");
/// write_atomic(&path, "export {};\n").unwrap();
/// assert_eq!(std::fs::read_to_string(&path).unwrap(), "export {};\n");
/// ```
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let temp_path = temp_sibling(path);
    let written = fs::File::create(&temp_path).and_then(|mut file| {
        file.write_all(content.as_bytes())?;
        file.sync_all()
    });
    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::io(&temp_path, e));
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        Error::io(path, e)
    })?;

    tracing::debug!("Wrote {} ({} bytes)", path.display(), content.len());
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(std::ffi::OsStr::to_os_string)
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
