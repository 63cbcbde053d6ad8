use crate::error::{HuntrError, Result};
use std::path::{Path, PathBuf};

/// Default data directory name
const DATA_DIR_NAME: &str = "gymhuntr";

/// Get the data directory path for the gym store
/// Returns ~/.local/share/gymhuntr on Unix, ~/Library/Application Support/gymhuntr on macOS
pub fn data_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|p| p.join(DATA_DIR_NAME))
        .ok_or_else(|| HuntrError::config("Could not determine data directory"))
}

/// Default path of the SQLite gym store
pub fn default_db_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("gyms.db"))
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_dir_exists() {
        let dir = data_dir();
        assert!(dir.is_ok());
        let path = dir.unwrap();
        assert!(path.ends_with("gymhuntr"));
    }

    #[test]
    fn test_default_db_path() {
        let path = default_db_path().unwrap();
        assert!(path.ends_with("gymhuntr/gyms.db"));
    }

    #[test]
    fn test_ensure_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("a/b/c");
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
        // Idempotent
        ensure_dir(&nested).unwrap();
    }
}
