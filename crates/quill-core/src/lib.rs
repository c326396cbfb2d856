//! Update-decision and asset-download engine for the Quill launcher.
//!
//! Everything here is independent of the UI shell:
//! - Release feed models and the degrading fetch.
//! - Version parsing and update classification.
//! - The once-per-start update decision table.
//! - Platform asset selection.
//! - The concurrent, staged-commit downloader.
//! - The persisted version marker.

pub mod assets;
mod decision;
mod download;
mod marker;
mod release;
mod version;

/// Update decision table and status strings.
pub use decision::Decision;
/// Concurrent download round with install-then-commit semantics.
pub use download::{DownloadProgress, RoundOutcome, run_round};
/// Version marker model and its single-file store.
pub use marker::{MarkerStore, VersionMarker};
/// Release feed models and fetch helper.
pub use release::{Asset, ReleaseInfo, fetch_latest_release};
/// Version parsing and tri-state update classification.
pub use version::{UpdateClass, Version, VersionParseError};
