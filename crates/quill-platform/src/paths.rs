use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AppPathsError {
    #[error("Could not determine home directory")]
    HomeDirUnavailable,
    #[error("Could not determine cache directory")]
    CacheDirUnavailable,
}

/// Filesystem locations owned by the launcher.
///
/// Downloaded assets, the managed executable, the version marker, and the
/// debug log all live in one per-user cache directory namespaced to Quill.
pub struct AppPaths {
    pub cache_dir: PathBuf,
}

impl AppPaths {
    /// Build launcher paths for the current platform.
    ///
    /// # Errors
    /// Returns an error when the user cache directory cannot be determined.
    pub fn new() -> Result<Self, AppPathsError> {
        #[cfg(target_os = "macos")]
        {
            let home = dirs::home_dir().ok_or(AppPathsError::HomeDirUnavailable)?;
            Ok(Self {
                cache_dir: home.join("Library/Caches/quill"),
            })
        }

        #[cfg(not(target_os = "macos"))]
        {
            Ok(Self {
                cache_dir: dirs::cache_dir()
                    .ok_or(AppPathsError::CacheDirUnavailable)?
                    .join("quill"),
            })
        }
    }

    /// The single version marker file.
    #[must_use]
    pub fn marker_file(&self) -> PathBuf {
        self.cache_dir.join("version")
    }

    #[must_use]
    pub fn log_file(&self) -> PathBuf {
        self.cache_dir.join("launcher.log")
    }

    /// Ensure the cache directory exists on disk.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.cache_dir)
    }
}

#[cfg(test)]
mod tests {
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::AppPaths;

    fn test_paths() -> AppPaths {
        let nonce = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock should be after unix epoch")
            .as_nanos();
        AppPaths {
            cache_dir: std::env::temp_dir().join(format!(
                "quill-platform-paths-test-{}-{}",
                std::process::id(),
                nonce
            )),
        }
    }

    #[test]
    fn file_paths_use_expected_filenames() {
        let paths = test_paths();
        assert!(paths.marker_file().ends_with("version"));
        assert!(paths.log_file().ends_with("launcher.log"));
        assert_eq!(paths.marker_file().parent(), Some(paths.cache_dir.as_path()));
    }

    #[test]
    fn ensure_dirs_creates_the_cache_directory() {
        let paths = test_paths();

        paths
            .ensure_dirs()
            .expect("cache directory should be created");
        assert!(paths.cache_dir.is_dir());

        let _ = std::fs::remove_dir_all(&paths.cache_dir);
    }
}
