use log::warn;

use quill_core::{
    Decision, DownloadProgress, MarkerStore, ReleaseInfo, RoundOutcome, UpdateClass,
    VersionMarker, assets, fetch_latest_release, run_round,
};
use quill_platform::AppPaths;

/// What the UI shell should do after an action completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The managed application was spawned; terminate the launcher.
    LaunchedAndExit,
    /// Keep the launcher running.
    KeepRunning,
}

/// One launcher run: the update decision, evaluated exactly once, plus the
/// action triggers and progress handle the UI shell renders.
///
/// The captured classification is reused by the download trigger even after
/// the marker file has been rewritten mid-session; the decision table is
/// never re-evaluated.
pub struct Session {
    client: reqwest::Client,
    paths: AppPaths,
    store: MarkerStore,
    release: ReleaseInfo,
    decision: Decision,
    class: UpdateClass,
    status: Option<String>,
    first_install: bool,
    progress: DownloadProgress,
}

impl Session {
    /// Read local state, fetch the release feed, and evaluate the decision
    /// table. Silent-launch decisions attempt the handoff immediately; the
    /// shell should exit before showing anything when the returned outcome
    /// says so.
    pub async fn start(client: reqwest::Client, paths: AppPaths) -> (Self, ActionOutcome) {
        if let Err(error) = paths.ensure_dirs() {
            warn!("cannot create cache directory: {error}");
        }

        let store = MarkerStore::new(paths.marker_file());
        let marker = store.read();
        let release = fetch_latest_release(&client).await;
        let decision = Decision::evaluate(marker.as_ref(), &release);

        let session = Self {
            client,
            paths,
            store,
            class: decision.class(),
            status: decision.status(),
            first_install: marker.is_none(),
            decision,
            release,
            progress: DownloadProgress::new(),
        };

        let outcome = if session.decision == Decision::SilentLaunch {
            session.handoff()
        } else {
            ActionOutcome::KeepRunning
        };
        (session, outcome)
    }

    /// Status line to show under the title, if any.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    #[must_use]
    pub fn decision(&self) -> &Decision {
        &self.decision
    }

    /// Cloneable handle over the two byte counters the shell polls for its
    /// progress bar. A zero expected total means no round is running.
    #[must_use]
    pub fn progress(&self) -> DownloadProgress {
        self.progress.clone()
    }

    /// First-run gating: with nothing installed, every action except the
    /// primary one and exit is pointless and should be disabled.
    #[must_use]
    pub fn secondary_actions_enabled(&self) -> bool {
        !self.first_install
    }

    #[must_use]
    pub fn primary_action_label(&self) -> &'static str {
        if self.first_install {
            "Install Quill"
        } else {
            "Download Update"
        }
    }

    /// Primary action: download the selected assets, commit, persist the new
    /// marker, and hand off. A no-op while a round is in flight (the shell
    /// also disables the trigger) or when there is no release to download.
    pub async fn download_and_install(&self) -> ActionOutcome {
        if self.release.is_empty() || self.progress.is_active() {
            return ActionOutcome::KeepRunning;
        }

        let selection: Vec<_> =
            assets::select(&self.release.assets, self.class, std::env::consts::OS)
                .into_iter()
                .cloned()
                .collect();

        match run_round(&self.client, &self.paths.cache_dir, selection, &self.progress).await {
            RoundOutcome::Committed => {
                self.persist(&VersionMarker::Active(self.release.tag_name.clone()));
                self.handoff()
            }
            RoundOutcome::Aborted => ActionOutcome::KeepRunning,
        }
    }

    /// Skip this specific release and launch whatever is installed. The next
    /// release will prompt again.
    pub fn skip_update(&self) -> ActionOutcome {
        if !self.release.is_empty() {
            self.persist(&VersionMarker::Ignored(self.release.tag_name.clone()));
        }
        self.handoff()
    }

    /// Permanently disable update prompts for this install.
    pub fn disable_updates(&self) -> ActionOutcome {
        if !self.release.is_empty() {
            self.persist(&VersionMarker::Disabled(self.release.tag_name.clone()));
        }
        self.handoff()
    }

    /// Launch without persisting anything; ask again next start.
    pub fn remind_later(&self) -> ActionOutcome {
        self.handoff()
    }

    fn persist(&self, marker: &VersionMarker) {
        if let Err(error) = self.store.write(marker) {
            warn!("cannot persist version marker: {error}");
        }
    }

    fn handoff(&self) -> ActionOutcome {
        match quill_platform::launch_managed(&self.paths.cache_dir) {
            Ok(true) => ActionOutcome::LaunchedAndExit,
            Ok(false) => ActionOutcome::KeepRunning,
            Err(error) => {
                warn!("failed to launch managed application: {error}");
                ActionOutcome::KeepRunning
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ActionOutcome, Session};
    use quill_core::{Asset, Decision, DownloadProgress, MarkerStore, ReleaseInfo, VersionMarker};
    use quill_platform::AppPaths;

    fn release(tag: &str, assets: Vec<Asset>) -> ReleaseInfo {
        ReleaseInfo {
            tag_name: tag.to_string(),
            assets,
        }
    }

    fn session_with(dir: &std::path::Path, release: ReleaseInfo, first_install: bool) -> Session {
        let paths = AppPaths {
            cache_dir: dir.to_path_buf(),
        };
        let store = MarkerStore::new(paths.marker_file());
        let marker = if first_install {
            None
        } else {
            Some(VersionMarker::Active("1.0.0".to_string()))
        };
        let decision = Decision::evaluate(marker.as_ref(), &release);

        Session {
            client: reqwest::Client::new(),
            store,
            class: decision.class(),
            status: decision.status(),
            first_install,
            decision,
            release,
            progress: DownloadProgress::new(),
            paths,
        }
    }

    #[test]
    fn skip_persists_the_ignored_marker() {
        let temp = tempfile::tempdir().expect("tempdir should be created");
        let session = session_with(temp.path(), release("1.4.0", Vec::new()), false);

        let outcome = session.skip_update();

        // No managed executable exists, so the launcher keeps running.
        assert_eq!(outcome, ActionOutcome::KeepRunning);
        let raw = std::fs::read_to_string(temp.path().join("version"))
            .expect("marker file should be written");
        assert_eq!(raw, "1.4.0i");
    }

    #[test]
    fn disable_persists_the_disabled_marker() {
        let temp = tempfile::tempdir().expect("tempdir should be created");
        let session = session_with(temp.path(), release("1.4.0", Vec::new()), false);

        session.disable_updates();

        let raw = std::fs::read_to_string(temp.path().join("version"))
            .expect("marker file should be written");
        assert_eq!(raw, "1.4.0x");
    }

    #[test]
    fn remind_later_leaves_the_marker_alone() {
        let temp = tempfile::tempdir().expect("tempdir should be created");
        let session = session_with(temp.path(), release("1.4.0", Vec::new()), false);

        let outcome = session.remind_later();

        assert_eq!(outcome, ActionOutcome::KeepRunning);
        assert!(!temp.path().join("version").exists());
    }

    #[test]
    fn skip_with_a_failed_check_writes_nothing() {
        let temp = tempfile::tempdir().expect("tempdir should be created");
        let session = session_with(temp.path(), ReleaseInfo::default(), false);

        session.skip_update();

        assert!(!temp.path().join("version").exists());
    }

    #[test]
    fn first_install_gates_secondary_actions_and_relabels_the_primary() {
        let temp = tempfile::tempdir().expect("tempdir should be created");
        let session = session_with(temp.path(), release("1.4.0", Vec::new()), true);
        assert!(!session.secondary_actions_enabled());
        assert_eq!(session.primary_action_label(), "Install Quill");

        let session = session_with(temp.path(), release("1.4.0", Vec::new()), false);
        assert!(session.secondary_actions_enabled());
        assert_eq!(session.primary_action_label(), "Download Update");
    }

    #[tokio::test]
    async fn download_with_a_failed_check_is_a_no_op() {
        let temp = tempfile::tempdir().expect("tempdir should be created");
        let session = session_with(temp.path(), ReleaseInfo::default(), false);

        let outcome = session.download_and_install().await;

        assert_eq!(outcome, ActionOutcome::KeepRunning);
        assert!(!temp.path().join("version").exists());
    }

    #[tokio::test]
    async fn aborted_round_leaves_the_marker_unchanged() {
        let temp = tempfile::tempdir().expect("tempdir should be created");
        let assets = vec![Asset {
            name: "quill.pck".to_string(),
            // Not listening; every transfer fails and the round aborts.
            browser_download_url: "http://127.0.0.1:9/quill.pck".to_string(),
            size: 100,
        }];
        let session = session_with(temp.path(), release("1.4.0", assets), false);

        let outcome = session.download_and_install().await;

        assert_eq!(outcome, ActionOutcome::KeepRunning);
        assert!(!temp.path().join("version").exists());
        assert!(!session.progress().is_active());
    }
}
