//! File access for CHANGELOG documents.
//!
//! Writes go to a temporary file in the target directory which is then renamed
//! over the target, so readers never observe a half-written CHANGELOG.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{KacError, Result};

/// Read the whole file as UTF-8 text
pub fn read_all(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => KacError::FileNotFound(path.to_path_buf()),
        _ => KacError::Io(e),
    })
}

/// Replace the file contents with `text`
///
/// Existing file permissions are carried over to the replacement. The
/// temporary file is removed if any step fails.
pub fn write_all(path: &Path, text: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(text.as_bytes())?;
    tmp.as_file().sync_all()?;

    if let Ok(metadata) = fs::metadata(path) {
        fs::set_permissions(tmp.path(), metadata.permissions())?;
    }

    tmp.persist(path).map_err(|e| KacError::Io(e.error))?;
    tracing::info!(path = %path.display(), bytes = text.len(), "wrote changelog");
    Ok(())
}

/// Write `text` to a new file, refusing to overwrite unless `overwrite` is set
pub fn create(path: &Path, text: &str, overwrite: bool) -> Result<()> {
    if !overwrite && path.exists() {
        return Err(KacError::Io(std::io::Error::new(
            ErrorKind::AlreadyExists,
            format!("{} already exists", path.display()),
        )));
    }
    write_all(path, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("CHANGELOG.md");
        match read_all(&path) {
            Err(KacError::FileNotFound(p)) => assert_eq!(p, path),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("CHANGELOG.md");
        write_all(&path, "first\n").unwrap();
        write_all(&path, "second\n").unwrap();
        assert_eq!(read_all(&path).unwrap(), "second\n");
        // Only the target remains, no stray temp files
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("CHANGELOG.md");
        assert!(matches!(write_all(&path, "x"), Err(KacError::Io(_))));
    }

    #[test]
    fn test_create_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("CHANGELOG.md");
        create(&path, "one", false).unwrap();
        assert!(create(&path, "two", false).is_err());
        create(&path, "three", true).unwrap();
        assert_eq!(read_all(&path).unwrap(), "three");
    }

    #[cfg(unix)]
    #[test]
    fn test_write_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("CHANGELOG.md");
        fs::write(&path, "old").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        write_all(&path, "new").unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
    }
}
