use std::path::PathBuf;

use log::warn;

/// Persisted record of which release is installed and how the user wants
/// future updates handled.
///
/// On disk this is the bare release tag, optionally followed by a single
/// control character: `x` for [`VersionMarker::Disabled`], `i` for
/// [`VersionMarker::Ignored`]. The suffix exists only in the serialized form;
/// comparisons always work on the bare tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionMarker {
    /// A release is installed and updates are welcome.
    Active(String),
    /// Updates are permanently disabled for this install.
    Disabled(String),
    /// This specific release tag was skipped once.
    Ignored(String),
}

impl VersionMarker {
    /// Parse marker text as written by [`VersionMarker::encode`]. At most one
    /// trailing control character is recognized. Empty text means no marker.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        if let Some(tag) = text.strip_suffix('x') {
            Some(Self::Disabled(tag.to_string()))
        } else if let Some(tag) = text.strip_suffix('i') {
            Some(Self::Ignored(tag.to_string()))
        } else {
            Some(Self::Active(text.to_string()))
        }
    }

    #[must_use]
    pub fn encode(&self) -> String {
        match self {
            Self::Active(tag) => tag.clone(),
            Self::Disabled(tag) => format!("{tag}x"),
            Self::Ignored(tag) => format!("{tag}i"),
        }
    }

    /// The release tag this marker refers to, without any control suffix.
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            Self::Active(tag) | Self::Disabled(tag) | Self::Ignored(tag) => tag,
        }
    }
}

/// The single marker file under the launcher cache directory.
///
/// There is no history and no multi-version retention; every write replaces
/// the previous marker.
pub struct MarkerStore {
    path: PathBuf,
}

impl MarkerStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Read the persisted marker. A missing or unreadable file means "first
    /// launch" and is never surfaced as an error.
    #[must_use]
    pub fn read(&self) -> Option<VersionMarker> {
        let text = std::fs::read_to_string(&self.path).ok()?;
        VersionMarker::parse(&text)
    }

    /// Overwrite the marker file.
    ///
    /// # Errors
    /// Returns an error when the file (or its parent directory) cannot be
    /// written.
    pub fn write(&self, marker: &VersionMarker) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.exists()
            && let Err(error) = std::fs::create_dir_all(parent)
        {
            warn!("cannot create marker directory {}: {error}", parent.display());
            return Err(error);
        }
        std::fs::write(&self.path, marker.encode())
    }
}
