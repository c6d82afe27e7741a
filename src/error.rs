use std::path::PathBuf;
use thiserror::Error;

/// Error type for all possible failures in the library.
#[derive(Error, Debug)]
pub enum DriverError {
    #[error("Settings file '{}' exists but is not a valid JSON object: {source}", .path.display())]
    CorruptState {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error accessing path '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to query version catalog at '{url}': {source}")]
    Catalog {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Download of '{url}' failed: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to decompress zip archive '{}': {source}", .path.display())]
    Zip {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Failed to unpack tar archive '{}': {source}", .path.display())]
    TarUnpack {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Downloaded file '{file_name}' is neither a .zip nor a .tar.gz archive")]
    UnsupportedFormat { file_name: String },

    #[error("No executable named one of {names:?} found under '{}'", .dir.display())]
    DriverNotFound { names: Vec<String>, dir: PathBuf },

    #[error("Version '{version}' was not found in the remote catalog. Check {hint_url} for available versions")]
    VersionNotFound { version: String, hint_url: String },

    #[error("No driver artifact available for platform '{0}'")]
    UnsupportedPlatform(String),
}
