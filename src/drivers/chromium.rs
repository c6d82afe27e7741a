//! Chromium driver (chromedriver) resolution via the Chrome for Testing
//! JSON catalogs.

use crate::DriverSource;
use crate::error::DriverError;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;

const ENDPOINT_BASE: &str = "https://googlechromelabs.github.io/chrome-for-testing";
const LAST_KNOWN_GOOD: &str = "last-known-good-versions-with-downloads.json";
const KNOWN_GOOD: &str = "known-good-versions-with-downloads.json";

/// Download-map keys tried in order; the first key carrying an artifact
/// for the current platform wins. `chromedriver` is the artifact we want,
/// `chrome` the generic fallback carried by every catalog entry.
const DOWNLOAD_KEYS: &[&str] = &["chromedriver", "chrome"];

/// Chromedriver, resolved from Google's Chrome for Testing catalogs.
pub struct Chromium {
    endpoint_base: String,
}

impl Chromium {
    pub fn new() -> Self {
        Self::with_endpoint(ENDPOINT_BASE)
    }

    /// Points catalog lookups at an alternate base URL (mirrors, tests).
    pub fn with_endpoint(endpoint_base: impl Into<String>) -> Self {
        Self {
            endpoint_base: endpoint_base.into(),
        }
    }

    fn platform() -> Result<&'static str, DriverError> {
        match std::env::consts::OS {
            "windows" => Ok("win64"),
            "linux" => Ok("linux64"),
            "macos" => Ok("mac-x64"),
            other => Err(DriverError::UnsupportedPlatform(other.to_string())),
        }
    }
}

impl Default for Chromium {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DriverSource for Chromium {
    fn settings_key(&self) -> &'static str {
        "chromiumdriver_path"
    }

    fn executable_names(&self) -> &'static [&'static str] {
        &["chromedriver", "chromedriver.exe"]
    }

    async fn latest_version(&self, client: &reqwest::Client) -> Result<String, DriverError> {
        let catalog = fetch_last_known_good(client, &self.endpoint_base).await?;
        Ok(catalog.channels.stable.version)
    }

    async fn download_url(
        &self,
        client: &reqwest::Client,
        version: &str,
    ) -> Result<String, DriverError> {
        let platform = Self::platform()?;

        // The latest stable version ships directly in the last-known-good
        // catalog; any other version has to be looked up in the full
        // known-good listing.
        let stable = fetch_last_known_good(client, &self.endpoint_base)
            .await?
            .channels
            .stable;
        if stable.version == version {
            return pick_url(&stable.downloads, platform);
        }

        let url = format!("{}/{}", self.endpoint_base, KNOWN_GOOD);
        let catalog: KnownGoodCatalog = fetch_json(client, &url).await?;
        let entry = catalog
            .versions
            .into_iter()
            .find(|v| v.version == version)
            .ok_or_else(|| DriverError::VersionNotFound {
                version: version.to_string(),
                hint_url: url.clone(),
            })?;

        pick_url(&entry.downloads, platform)
    }
}

/// One platform's artifact inside a downloads list.
#[derive(Debug, Deserialize)]
struct PlatformDownload {
    platform: String,
    url: String,
}

/// A catalog entry: a version plus its downloads keyed by artifact type
/// (`chromedriver`, `chrome`, ...).
#[derive(Debug, Deserialize)]
struct VersionEntry {
    version: String,
    downloads: HashMap<String, Vec<PlatformDownload>>,
}

#[derive(Debug, Deserialize)]
struct Channels {
    #[serde(rename = "Stable")]
    stable: VersionEntry,
}

#[derive(Debug, Deserialize)]
struct LastKnownGoodCatalog {
    channels: Channels,
}

#[derive(Debug, Deserialize)]
struct KnownGoodCatalog {
    versions: Vec<VersionEntry>,
}

async fn fetch_last_known_good(
    client: &reqwest::Client,
    endpoint_base: &str,
) -> Result<LastKnownGoodCatalog, DriverError> {
    let url = format!("{endpoint_base}/{LAST_KNOWN_GOOD}");
    fetch_json(client, &url).await
}

async fn fetch_json<T: serde::de::DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
) -> Result<T, DriverError> {
    let catalog_err = |source| DriverError::Catalog {
        url: url.to_string(),
        source,
    };

    client
        .get(url)
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(catalog_err)?
        .json()
        .await
        .map_err(catalog_err)
}

/// Walks the ordered candidate keys and returns the URL for `platform`
/// from the first artifact list that is present.
fn pick_url(
    downloads: &HashMap<String, Vec<PlatformDownload>>,
    platform: &str,
) -> Result<String, DriverError> {
    DOWNLOAD_KEYS
        .iter()
        .filter_map(|key| downloads.get(*key))
        .flat_map(|list| list.iter())
        .find(|d| d.platform == platform)
        .map(|d| d.url.clone())
        .ok_or_else(|| DriverError::UnsupportedPlatform(platform.to_string()))
}

// --- Tests ---
