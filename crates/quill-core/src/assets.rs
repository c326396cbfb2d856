//! Narrows a release's asset list to what the running platform needs.

use crate::release::Asset;
use crate::version::UpdateClass;

/// Suffix of the platform-independent payload assets.
const PACKAGE_SUFFIX: &str = ".pck";

/// Select the assets worth downloading for `platform` under the given
/// classification.
///
/// Payload packages are always relevant. The platform executable (any asset
/// whose name contains the platform identifier, case-insensitively) is only
/// included outside patch updates; a patch never replaces the executable the
/// launcher manages.
#[must_use]
pub fn select<'a>(assets: &'a [Asset], class: UpdateClass, platform: &str) -> Vec<&'a Asset> {
    let platform = platform.to_ascii_lowercase();

    assets
        .iter()
        .filter(|asset| {
            let is_package = asset.name.ends_with(PACKAGE_SUFFIX);
            if class == UpdateClass::Patch {
                return is_package;
            }
            is_package || asset.name.to_ascii_lowercase().contains(&platform)
        })
        .collect()
}

/// Sum of the declared sizes of a selection; the progress-bar denominator.
#[must_use]
pub fn total_size(selection: &[&Asset]) -> u64 {
    selection.iter().map(|asset| asset.size).sum()
}
