//! Shared resolution flow: cache check, download, locate, persist.

use crate::error::DriverError;
use crate::settings::Settings;
use crate::{DriverSource, downloader, locator};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const DEFAULT_SETTINGS_PATH: &str = "settings.json";
const DEFAULT_DRIVERS_DIR: &str = "drivers";

/// Resolves driver requests against the local cache, downloading on a miss.
///
/// One `Resolver` serves all engines; per-engine behavior comes from the
/// [`DriverSource`] passed to [`Resolver::resolve`].
pub struct Resolver {
    settings_path: PathBuf,
    drivers_dir: PathBuf,
    client: reqwest::Client,
}

impl Resolver {
    /// Creates a resolver with the default relative paths
    /// (`settings.json` and `drivers/` in the working directory).
    pub fn new() -> Self {
        Self::with_paths(DEFAULT_SETTINGS_PATH, DEFAULT_DRIVERS_DIR)
    }

    /// Creates a resolver with explicit settings-file and drivers-directory
    /// locations.
    pub fn with_paths(settings_path: impl Into<PathBuf>, drivers_dir: impl Into<PathBuf>) -> Self {
        // The GitHub releases API (Gecko) rejects requests without a User-Agent.
        let client = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .unwrap_or_default();

        Self {
            settings_path: settings_path.into(),
            drivers_dir: drivers_dir.into(),
            client,
        }
    }

    /// Returns the absolute path to a ready-to-run driver executable.
    ///
    /// With `version: None` the engine's latest version is resolved; with
    /// an explicit version that exact version is required and a missing
    /// catalog entry fails with [`DriverError::VersionNotFound`] rather than
    /// falling back to latest.
    ///
    /// A cached entry is reused only when its recorded version equals the
    /// target version and its recorded path still exists on disk. Stale
    /// entries are ignored, never deleted.
    pub async fn resolve(
        &self,
        source: &dyn DriverSource,
        version: Option<&str>,
    ) -> Result<PathBuf, DriverError> {
        let target_version = match version {
            Some(v) => v.to_string(),
            None => source.latest_version(&self.client).await?,
        };

        let key = source.settings_key();
        let version_key = format!("{key}_version");

        let mut settings = Settings::load(&self.settings_path)?;
        if let (Some(path), Some(stored_version)) =
            (settings.get(key), settings.get(&version_key))
        {
            if stored_version == target_version && Path::new(path).exists() {
                debug!(driver = key, version = %target_version, path, "cache hit");
                return Ok(PathBuf::from(path));
            }
        }

        info!(driver = key, version = %target_version, "driver missing or stale, downloading");
        let url = source.download_url(&self.client, &target_version).await?;
        let extract_root = downloader::fetch_and_extract(&self.client, &url, &self.drivers_dir)
            .await?;
        let driver_path = locator::locate(&extract_root, source.executable_names())?;

        settings.set(key, &driver_path.to_string_lossy());
        settings.set(&version_key, &target_version);
        settings.save(&self.settings_path)?;

        info!(driver = key, path = %driver_path.display(), "driver installed");
        Ok(driver_path)
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}
