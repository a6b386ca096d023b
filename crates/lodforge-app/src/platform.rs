//! Platform directory resolution for settings and logs.

use std::io;
use std::path::{Path, PathBuf};

/// Errors that can occur while preparing the platform directories.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// The OS did not provide a configuration directory.
    #[error("could not determine OS configuration directory")]
    NoConfigDir,
    /// Creating a directory failed.
    #[error("platform I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Where LODForge keeps its settings file and debug logs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlatformDirs {
    /// Holds `lodforge.ron`.
    pub config_dir: PathBuf,
    /// JSON log files (debug builds).
    pub log_dir: PathBuf,
}

const APP_NAME: &str = "lodforge";

impl PlatformDirs {
    /// Resolve the OS-specific directories without creating them.
    pub fn resolve() -> Result<Self, PlatformError> {
        let config_dir = dirs::config_dir()
            .ok_or(PlatformError::NoConfigDir)?
            .join(APP_NAME);
        let log_dir = dirs::data_local_dir()
            .map(|d| d.join(APP_NAME))
            .unwrap_or_else(|| config_dir.clone())
            .join("logs");
        Ok(Self {
            config_dir,
            log_dir,
        })
    }

    /// Use an explicit config directory; logs go to `{config_dir}/logs`.
    pub fn with_config_dir(config_dir: &Path) -> Self {
        Self {
            config_dir: config_dir.to_path_buf(),
            log_dir: config_dir.join("logs"),
        }
    }

    /// Create all directories on disk.
    pub fn create_dirs(&self) -> Result<(), PlatformError> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_config_dir_layout() {
        let dir = tempfile::tempdir().unwrap();
        let dirs = PlatformDirs::with_config_dir(dir.path());
        assert_eq!(dirs.config_dir, dir.path());
        assert_eq!(dirs.log_dir, dir.path().join("logs"));
        dirs.create_dirs().unwrap();
        assert!(dirs.log_dir.is_dir());
    }

    #[test]
    fn test_resolve_ends_with_app_name() {
        if let Ok(dirs) = PlatformDirs::resolve() {
            assert!(dirs.config_dir.ends_with(APP_NAME));
            assert!(dirs.log_dir.ends_with("logs"));
        }
    }

    #[test]
    fn test_error_display() {
        assert!(PlatformError::NoConfigDir.to_string().contains("configuration"));
        let io = PlatformError::from(io::Error::other("disk full"));
        assert!(io.to_string().contains("disk full"));
        assert!(std::error::Error::source(&io).is_some());
    }

    #[test]
    fn test_create_dirs_over_a_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocked");
        std::fs::write(&blocker, "").unwrap();
        let dirs = PlatformDirs::with_config_dir(&blocker);
        assert!(matches!(dirs.create_dirs(), Err(PlatformError::Io(_))));
    }
}
