//! Crash-safe writes of small owner-only files.
//!
//! Both helpers stage the bytes in a hidden sibling (`.<name>.tmp`,
//! mode 0600, fsynced) and only then publish it under the real name, so
//! the real path never holds a partial file.  The staged file is removed
//! whenever publishing does not happen.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::errors::{Result, SecError};

/// Write `data` to `path`, replacing whatever is there.
pub(crate) fn replace(path: &Path, data: &[u8]) -> Result<()> {
    let staged = stage(path, data)?;
    fs::rename(&staged, path).map_err(|e| {
        let _ = fs::remove_file(&staged);
        SecError::io("replace", path)(e)
    })
}

/// Write `data` to `path` only if nothing exists there yet.
///
/// Returns `false`, leaving the existing file alone, if `path` already
/// exists by the time the staged file is published.
pub(crate) fn create_new(path: &Path, data: &[u8]) -> Result<bool> {
    let staged = stage(path, data)?;
    let linked = fs::hard_link(&staged, path);
    let _ = fs::remove_file(&staged);
    match linked {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(SecError::io("create", path)(e)),
    }
}

/// Hidden temp sibling used while writing `path`.
pub(crate) fn staging_path(path: &Path) -> PathBuf {
    let name = path.file_name().unwrap_or_default().to_string_lossy();
    path.with_file_name(format!(".{name}.tmp"))
}

fn stage(path: &Path, data: &[u8]) -> Result<PathBuf> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(SecError::io("create directory", parent))?;
        }
    }

    let staged = staging_path(path);

    // A leftover from an interrupted write would defeat `create_new`.
    match fs::remove_file(&staged) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(SecError::io("remove stale temp file", &staged)(e)),
    }

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let written = options
        .open(&staged)
        .and_then(|mut file| {
            file.write_all(data)?;
            file.sync_all()
        })
        .map_err(SecError::io("write temp file", &staged));

    if let Err(e) = written {
        let _ = fs::remove_file(&staged);
        return Err(e);
    }
    Ok(staged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn staging_path_is_hidden_sibling() {
        assert_eq!(
            staging_path(Path::new("/home/user/.sec.enc")),
            PathBuf::from("/home/user/..sec.enc.tmp")
        );
    }

    #[test]
    fn replace_overwrites_and_cleans_up() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("f");
        fs::write(&path, b"old").unwrap();

        replace(&path, b"new").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"new");
        assert!(!staging_path(&path).exists());
    }

    #[test]
    fn create_new_never_clobbers() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("f");

        assert!(create_new(&path, b"first").unwrap());
        assert!(!create_new(&path, b"second").unwrap());
        assert_eq!(fs::read(&path).unwrap(), b"first");
        assert!(!staging_path(&path).exists());
    }

    #[test]
    fn failed_staging_leaves_target_absent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("f");
        fs::create_dir(staging_path(&path)).unwrap();

        assert!(create_new(&path, b"data").is_err());
        assert!(!path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn published_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("f");
        create_new(&path, b"x").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
