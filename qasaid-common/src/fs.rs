//! File system helpers

use crate::Result;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Temp file used while writing `path`: `<file name>.tmp` in the same directory
pub fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write data to a file atomically using temp file + rename
///
/// The target is either fully replaced or left untouched. The temp file
/// is removed when any step fails.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    let temp_path = temp_path_for(path);

    let result = (|| -> std::io::Result<()> {
        let mut file = File::create(&temp_path)?;
        file.write_all(data)?;
        file.sync_all()?;
        fs::rename(&temp_path, path)
    })();

    if let Err(e) = result {
        let _ = fs::remove_file(&temp_path);
        return Err(e.into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_temp_path_is_sibling() {
        let temp = temp_path_for(Path::new("/data/media/media.json"));
        assert_eq!(temp, PathBuf::from("/data/media/media.json.tmp"));
    }

    #[test]
    fn test_atomic_write_replaces_target() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("media.json");
        fs::write(&target, "old").unwrap();

        atomic_write(&target, b"new").unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "new");
        assert!(!temp_path_for(&target).exists());
    }

    #[test]
    fn test_atomic_write_missing_directory_leaves_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("missing").join("media.json");

        assert!(atomic_write(&target, b"{}").is_err());
        assert!(!target.exists());
        assert!(!temp_path_for(&target).exists());
    }
}
