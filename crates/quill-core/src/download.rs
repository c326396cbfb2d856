use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use futures_util::StreamExt;
use log::{debug, info, warn};
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;

use crate::release::{Asset, USER_AGENT};

/// Prefix for staged files. A round streams every asset under this prefix
/// and only renames them into place once all transfers have succeeded.
const STAGING_PREFIX: &str = "_";

/// Shared byte counters polled by the presentation layer while a round runs.
///
/// `expected == 0` is the idle signal. Both counters only grow during a
/// round, so a read between two worker increments is still a valid snapshot.
/// The counters are a progress signal only; commit is gated on per-asset
/// success flags, never on byte equality.
#[derive(Debug, Clone, Default)]
pub struct DownloadProgress {
    inner: Arc<Counters>,
}

#[derive(Debug, Default)]
struct Counters {
    expected: AtomicU64,
    completed: AtomicU64,
}

impl DownloadProgress {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn reset(&self, expected: u64) {
        self.inner.completed.store(0, Ordering::Relaxed);
        self.inner.expected.store(expected, Ordering::Relaxed);
    }

    fn add_completed(&self, bytes: u64) {
        self.inner.completed.fetch_add(bytes, Ordering::Relaxed);
    }

    /// `(completed, expected)` bytes. Lock-free; safe to poll from a render
    /// loop.
    #[must_use]
    pub fn snapshot(&self) -> (u64, u64) {
        (
            self.inner.completed.load(Ordering::Relaxed),
            self.inner.expected.load(Ordering::Relaxed),
        )
    }

    /// Whether a round is in flight (or committed without a handoff).
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.inner.expected.load(Ordering::Relaxed) > 0
    }
}

/// Result of one download round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    /// Every asset downloaded completely and was renamed into place.
    Committed,
    /// At least one transfer or rename failed. Nothing changed beyond
    /// orphaned staging files; the caller may re-trigger from scratch.
    Aborted,
}

struct WorkerReport {
    name: String,
    ok: bool,
}

/// Download `selection` into `dir` concurrently with install-then-commit
/// semantics.
///
/// One task per asset, no worker pool: asset lists are small. Workers report
/// back over a channel to this coordinating task, which joins them, decides
/// the commit, and resets the progress handle to idle on failure. Callers
/// must not start a second round while one is in flight; the progress handle
/// they poll doubles as the in-flight signal.
pub async fn run_round(
    client: &reqwest::Client,
    dir: &Path,
    selection: Vec<Asset>,
    progress: &DownloadProgress,
) -> RoundOutcome {
    progress.reset(selection.iter().map(|asset| asset.size).sum());

    if let Err(error) = tokio::fs::create_dir_all(dir).await {
        warn!("cannot create download directory {}: {error}", dir.display());
        progress.reset(0);
        return RoundOutcome::Aborted;
    }

    let expected = selection.len();
    let (report_tx, mut report_rx) = mpsc::channel(expected.max(1));

    for asset in selection {
        if asset.name.contains(['/', '\\']) {
            // A feed asset must never escape the download directory.
            warn!("refusing asset with path separator in name: {:?}", asset.name);
            continue;
        }

        let client = client.clone();
        let progress = progress.clone();
        let staging = staging_path(dir, &asset.name);
        let report_tx = report_tx.clone();

        tokio::spawn(async move {
            let ok = fetch_to_staging(&client, &asset, &staging, &progress).await;
            let _ = report_tx.send(WorkerReport { name: asset.name, ok }).await;
        });
    }
    drop(report_tx);

    let mut completed = Vec::with_capacity(expected);
    let mut all_ok = true;
    while let Some(report) = report_rx.recv().await {
        if report.ok {
            completed.push(report.name);
        } else {
            all_ok = false;
        }
    }

    if !all_ok || completed.len() != expected {
        debug!(
            "download round aborted: {} of {expected} assets completed",
            completed.len()
        );
        progress.reset(0);
        return RoundOutcome::Aborted;
    }

    match commit(dir, &completed) {
        Ok(()) => {
            info!("download round committed: {expected} assets");
            RoundOutcome::Committed
        }
        Err(error) => {
            warn!("download round commit failed: {error}");
            progress.reset(0);
            RoundOutcome::Aborted
        }
    }
}

fn staging_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{STAGING_PREFIX}{name}"))
}

/// Stream one asset to its staging path.
///
/// Any transport error, non-200 status, or write failure fails the whole
/// asset; there are no retries and no partial credit. Bytes are added to the
/// progress counter only after they reach the file, and a stream that fails
/// partway is never decremented: the per-asset flag is what fails the round.
async fn fetch_to_staging(
    client: &reqwest::Client,
    asset: &Asset,
    staging: &Path,
    progress: &DownloadProgress,
) -> bool {
    let response = match client
        .get(&asset.browser_download_url)
        .header("User-Agent", USER_AGENT)
        .send()
        .await
    {
        Ok(response) if response.status() == reqwest::StatusCode::OK => response,
        Ok(response) => {
            debug!("{}: HTTP {}", asset.name, response.status());
            return false;
        }
        Err(error) => {
            debug!("{}: request failed: {error}", asset.name);
            return false;
        }
    };

    let mut file = match tokio::fs::File::create(staging).await {
        Ok(file) => file,
        Err(error) => {
            debug!("{}: cannot create staging file: {error}", asset.name);
            return false;
        }
    };

    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let Ok(chunk) = chunk else {
            debug!("{}: stream failed mid-transfer", asset.name);
            return false;
        };
        if let Err(error) = file.write_all(&chunk).await {
            debug!("{}: write failed: {error}", asset.name);
            return false;
        }
        progress.add_completed(chunk.len() as u64);
    }

    if let Err(error) = file.flush().await {
        debug!("{}: flush failed: {error}", asset.name);
        return false;
    }

    true
}

/// Rename every staged file into place, removing pre-existing finals first.
///
/// A rename failure aborts the remaining renames; files already moved stay
/// moved. That partial commit is an accepted risk, detected by the caller
/// never updating the version marker.
fn commit(dir: &Path, names: &[String]) -> std::io::Result<()> {
    for name in names {
        let final_path = dir.join(name);
        match std::fs::remove_file(&final_path) {
            Ok(()) => {}
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {}
            Err(error) => return Err(error),
        }
        std::fs::rename(staging_path(dir, name), &final_path)?;
    }
    Ok(())
}
