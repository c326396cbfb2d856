use log::warn;
use serde::Deserialize;

const RELEASE_FEED_URL: &str = "https://api.github.com/repos/quillworks/quill/releases/latest";

pub(crate) const USER_AGENT: &str = "quill-launcher";

/// One downloadable file attached to a release.
#[derive(Debug, Clone, Deserialize)]
pub struct Asset {
    pub name: String,
    pub browser_download_url: String,
    /// Declared size in bytes. Advisory: it feeds the progress denominator
    /// and is never validated against the bytes actually received.
    #[serde(default)]
    pub size: u64,
}

/// The latest published release, fetched once per process start.
///
/// An empty `tag_name` is the "release feed unavailable" sentinel.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReleaseInfo {
    #[serde(default)]
    pub tag_name: String,
    #[serde(default)]
    pub assets: Vec<Asset>,
}

impl ReleaseInfo {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tag_name.is_empty()
    }
}

/// Fetch the latest release document from the feed. Network failure, a
/// non-success status, and malformed JSON all degrade to an empty
/// [`ReleaseInfo`]; the caller never sees an error.
pub async fn fetch_latest_release(client: &reqwest::Client) -> ReleaseInfo {
    fetch_release(client, RELEASE_FEED_URL).await
}

async fn fetch_release(client: &reqwest::Client, url: &str) -> ReleaseInfo {
    match try_fetch_release(client, url).await {
        Ok(release) => release,
        Err(error) => {
            warn!("release feed unavailable: {error}");
            ReleaseInfo::default()
        }
    }
}

async fn try_fetch_release(
    client: &reqwest::Client,
    url: &str,
) -> Result<ReleaseInfo, reqwest::Error> {
    let response = client
        .get(url)
        .header("User-Agent", USER_AGENT)
        .send()
        .await?
        .error_for_status()?;

    response.json().await
}
