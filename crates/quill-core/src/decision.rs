use crate::marker::VersionMarker;
use crate::release::ReleaseInfo;
use crate::version::UpdateClass;

/// Outcome of the once-per-start update check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// The release feed could not be checked. The primary action stays
    /// available in case the user wants to retry a download later; with an
    /// empty tag it is a no-op.
    CheckFailed,
    /// No local version marker: nothing is installed yet. The shell gates
    /// every secondary action except exit.
    FirstInstall { tag: String },
    /// The install is current, or updates are disabled, or this exact tag
    /// was ignored: launch without any interaction.
    SilentLaunch,
    /// An update is available for download.
    UpdateAvailable { tag: String, class: UpdateClass },
}

impl Decision {
    /// Evaluate the decision table, in order:
    ///
    /// 1. empty tag → [`Decision::CheckFailed`];
    /// 2. no marker → [`Decision::FirstInstall`];
    /// 3. marker matches the tag, or updates are disabled, or this exact tag
    ///    was ignored → [`Decision::SilentLaunch`];
    /// 4. otherwise classify the two versions.
    ///
    /// Called exactly once per process start; the result is captured by the
    /// session and never re-derived after the marker file is rewritten.
    #[must_use]
    pub fn evaluate(marker: Option<&VersionMarker>, release: &ReleaseInfo) -> Self {
        if release.is_empty() {
            return Self::CheckFailed;
        }

        let tag = release.tag_name.clone();
        let Some(marker) = marker else {
            return Self::FirstInstall { tag };
        };

        // Raw-text equality comes before any variant interpretation: tags
        // are opaque and may themselves end in a control letter, so a marker
        // whose on-disk form equals the tag means this exact release is
        // installed even when it parsed as a suffixed variant.
        if marker.encode() == tag {
            return Self::SilentLaunch;
        }

        let silent = match marker {
            VersionMarker::Disabled(_) => true,
            VersionMarker::Ignored(ignored) => *ignored == tag,
            VersionMarker::Active(_) => false,
        };
        if silent {
            return Self::SilentLaunch;
        }

        match UpdateClass::between(marker.tag(), &tag) {
            // Numerically equal despite differing strings (leading zeros).
            UpdateClass::None => Self::SilentLaunch,
            class => Self::UpdateAvailable { tag, class },
        }
    }

    /// Status line for the presentation layer; silent launches show nothing.
    #[must_use]
    pub fn status(&self) -> Option<String> {
        match self {
            Self::CheckFailed => Some("Unable to check for updates.".to_string()),
            Self::FirstInstall { tag } => Some(format!("Version {tag} available")),
            Self::SilentLaunch => None,
            Self::UpdateAvailable { tag, class } => Some(match class {
                UpdateClass::Patch => format!("Patch update {tag} available"),
                UpdateClass::MinorOrMajor => format!("Full update {tag} available"),
                UpdateClass::None | UpdateClass::Unknown => format!("Update {tag} available"),
            }),
        }
    }

    /// Classification the asset selector should use for this decision.
    /// Anything other than a known patch gets the full asset set.
    #[must_use]
    pub fn class(&self) -> UpdateClass {
        match self {
            Self::UpdateAvailable { class, .. } => *class,
            Self::CheckFailed | Self::FirstInstall { .. } | Self::SilentLaunch => {
                UpdateClass::Unknown
            }
        }
    }
}
