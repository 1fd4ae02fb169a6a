use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Contents of a previous output, or `None` when there is nothing usable.
pub fn read_existing(path: &Path) -> Option<String> {
    if !path.exists() {
        return None;
    }
    match fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                error = %err,
                "could not read existing storyboard, generating a new one"
            );
            None
        }
    }
}

/// Replace `path` with `contents` through a sibling temp file, so a failed
/// write never leaves a truncated storyboard behind.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let write_error = |source: std::io::Error| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(write_error)?;
    }

    let temp = temp_sibling(path);
    if let Err(err) = fs::write(&temp, contents) {
        let _ = fs::remove_file(&temp);
        return Err(write_error(err));
    }
    if let Err(err) = fs::rename(&temp, path) {
        let _ = fs::remove_file(&temp);
        return Err(write_error(err));
    }
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.{}.tmp", name, std::process::id()))
}
