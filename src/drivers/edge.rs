//! Edge driver (msedgedriver) resolution via templated direct-download URLs.

use crate::DriverSource;
use crate::error::DriverError;
use async_trait::async_trait;

const DOWNLOAD_BASE: &str = "https://msedgedriver.azureedge.net";
const WEBDRIVER_PAGE: &str =
    "https://developer.microsoft.com/en-us/microsoft-edge/tools/webdriver/";

/// Microsoft publishes no machine-readable "latest" catalog for
/// msedgedriver, so an unpinned request falls back to this known version.
const FALLBACK_VERSION: &str = "124.0.2478.0";

/// Msedgedriver, downloaded from Microsoft's templated artifact URLs.
pub struct Edge {
    download_base: String,
}

impl Edge {
    pub fn new() -> Self {
        Self::with_endpoint(DOWNLOAD_BASE)
    }

    /// Points downloads at an alternate base URL (tests).
    pub fn with_endpoint(download_base: impl Into<String>) -> Self {
        Self {
            download_base: download_base.into(),
        }
    }

    fn platform_suffix() -> Result<&'static str, DriverError> {
        match std::env::consts::OS {
            "windows" => Ok("win64"),
            "linux" => Ok("linux64"),
            "macos" => Ok("mac64"),
            other => Err(DriverError::UnsupportedPlatform(other.to_string())),
        }
    }
}

impl Default for Edge {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DriverSource for Edge {
    fn settings_key(&self) -> &'static str {
        "edgedriver_path"
    }

    fn executable_names(&self) -> &'static [&'static str] {
        &["msedgedriver", "msedgedriver.exe"]
    }

    async fn latest_version(&self, _client: &reqwest::Client) -> Result<String, DriverError> {
        Ok(FALLBACK_VERSION.to_string())
    }

    async fn download_url(
        &self,
        client: &reqwest::Client,
        version: &str,
    ) -> Result<String, DriverError> {
        let suffix = Self::platform_suffix()?;
        let url = format!(
            "{}/{version}/edgedriver_{suffix}.zip",
            self.download_base
        );

        // There is no catalog to consult, so the only way to validate a
        // version is to probe the artifact itself.
        let response = client.head(&url).send().await.map_err(|e| DriverError::Catalog {
            url: url.clone(),
            source: e,
        })?;
        if !response.status().is_success() {
            return Err(DriverError::VersionNotFound {
                version: version.to_string(),
                hint_url: WEBDRIVER_PAGE.to_string(),
            });
        }

        Ok(url)
    }
}

// --- Tests ---

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unpinned_version_uses_fallback_without_network() {
        let edge = Edge::with_endpoint("http://127.0.0.1:1");
        let client = reqwest::Client::new();
        let version = edge.latest_version(&client).await.unwrap();
        assert_eq!(version, FALLBACK_VERSION);
    }
}
