//! Resolves, downloads and caches WebDriver binaries.
//!
//! Each supported browser engine (Chromium, Gecko, Edge) implements the
//! [`DriverSource`] trait; the [`Resolver`] orchestrates cache validation,
//! download, extraction and settings persistence:
//!
//! ```no_run
//! use driver_downloader::{Chromium, Resolver};
//!
//! # async fn demo() -> Result<(), driver_downloader::DriverError> {
//! let resolver = Resolver::new();
//! let path = resolver.resolve(&Chromium::new(), None).await?;
//! println!("chromedriver ready at {}", path.display());
//! # Ok(())
//! # }
//! ```

// Top-level public modules
pub mod downloader;
pub mod drivers;
pub mod error;
pub mod locator;
pub mod resolver;
pub mod settings;

pub use drivers::{chromium::Chromium, edge::Edge, gecko::Gecko};
pub use error::DriverError;
pub use resolver::Resolver;

// Main public trait
use async_trait::async_trait;

/// A downloadable driver for one browser engine.
///
/// Implementations supply the engine-specific pieces of resolution: the
/// settings namespace, the expected executable filenames, a latest-version
/// lookup and a version-to-URL mapping. The shared orchestration lives in
/// [`Resolver`].
#[async_trait]
pub trait DriverSource: Sync {
    /// Settings key under which the resolved path is cached
    /// (e.g., "chromiumdriver_path"). The resolved version is stored
    /// alongside it under `{key}_version`.
    fn settings_key(&self) -> &'static str;

    /// Exact filenames the extracted executable may carry
    /// (e.g., "chromedriver" or "chromedriver.exe").
    fn executable_names(&self) -> &'static [&'static str];

    /// Determines the newest available driver version.
    async fn latest_version(&self, client: &reqwest::Client) -> Result<String, DriverError>;

    /// Builds the download URL for `version` on the current platform.
    ///
    /// Fails with [`DriverError::VersionNotFound`] when the version is absent
    /// from the remote catalog and [`DriverError::UnsupportedPlatform`] when
    /// the catalog entry carries no artifact for this OS.
    async fn download_url(
        &self,
        client: &reqwest::Client,
        version: &str,
    ) -> Result<String, DriverError>;
}
