//! Gecko driver (geckodriver) resolution via the GitHub releases API.

use crate::DriverSource;
use crate::error::DriverError;
use async_trait::async_trait;
use serde::Deserialize;

const API_BASE: &str = "https://api.github.com/repos/mozilla/geckodriver";
const RELEASES_PAGE: &str = "https://github.com/mozilla/geckodriver/releases";

/// Geckodriver, resolved from mozilla/geckodriver release tags.
pub struct Gecko {
    api_base: String,
}

impl Gecko {
    pub fn new() -> Self {
        Self::with_endpoint(API_BASE)
    }

    /// Points release lookups at an alternate API base URL (tests).
    pub fn with_endpoint(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
        }
    }

    /// Substring the release asset's filename must contain for this OS.
    fn asset_marker() -> Result<&'static str, DriverError> {
        match std::env::consts::OS {
            "windows" => Ok("win64.zip"),
            "linux" => Ok("linux64.tar.gz"),
            "macos" => Ok("macos"),
            other => Err(DriverError::UnsupportedPlatform(other.to_string())),
        }
    }
}

impl Default for Gecko {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DriverSource for Gecko {
    fn settings_key(&self) -> &'static str {
        "geckodriver_path"
    }

    fn executable_names(&self) -> &'static [&'static str] {
        &["geckodriver", "geckodriver.exe"]
    }

    async fn latest_version(&self, client: &reqwest::Client) -> Result<String, DriverError> {
        let url = format!("{}/releases/latest", self.api_base);
        let release: Release = fetch_release(client, &url).await?;
        Ok(release.tag_name.trim_start_matches('v').to_string())
    }

    async fn download_url(
        &self,
        client: &reqwest::Client,
        version: &str,
    ) -> Result<String, DriverError> {
        let marker = Self::asset_marker()?;
        let url = format!("{}/releases/tags/v{version}", self.api_base);

        let response = client.get(&url).send().await.map_err(|e| DriverError::Catalog {
            url: url.clone(),
            source: e,
        })?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(DriverError::VersionNotFound {
                version: version.to_string(),
                hint_url: RELEASES_PAGE.to_string(),
            });
        }
        let release: Release = response
            .error_for_status()
            .map_err(|e| DriverError::Catalog {
                url: url.clone(),
                source: e,
            })?
            .json()
            .await
            .map_err(|e| DriverError::Catalog {
                url: url.clone(),
                source: e,
            })?;

        release
            .assets
            .into_iter()
            .find(|asset| asset.name.contains(marker))
            .map(|asset| asset.browser_download_url)
            .ok_or_else(|| DriverError::UnsupportedPlatform(std::env::consts::OS.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct Release {
    tag_name: String,
    #[serde(default)]
    assets: Vec<Asset>,
}

#[derive(Debug, Deserialize)]
struct Asset {
    name: String,
    browser_download_url: String,
}

async fn fetch_release(client: &reqwest::Client, url: &str) -> Result<Release, DriverError> {
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

// --- Tests ---
