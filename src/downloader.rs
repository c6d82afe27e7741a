//! Downloads driver archives and extracts them into the drivers directory.

use crate::error::DriverError;
use flate2::read::GzDecoder;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// Archive formats this crate knows how to extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArchiveKind {
    Zip,
    TarGz,
}

impl ArchiveKind {
    /// Decides the archive kind from the URL's trailing filename.
    ///
    /// Anything that is not a `.zip` or `.tar.gz` is rejected up front,
    /// before any bytes are transferred.
    fn from_file_name(file_name: &str) -> Result<Self, DriverError> {
        if file_name.ends_with(".zip") {
            Ok(Self::Zip)
        } else if file_name.ends_with(".tar.gz") {
            Ok(Self::TarGz)
        } else {
            Err(DriverError::UnsupportedFormat {
                file_name: file_name.to_string(),
            })
        }
    }
}

/// Downloads `url` into `drivers_dir` and extracts the archive in place.
///
/// The archive file itself is deleted after successful extraction; the
/// extracted tree stays. Returns the extraction root (`drivers_dir`).
pub async fn fetch_and_extract(
    client: &reqwest::Client,
    url: &str,
    drivers_dir: &Path,
) -> Result<PathBuf, DriverError> {
    let file_name = url.rsplit('/').next().unwrap_or(url);
    let kind = ArchiveKind::from_file_name(file_name)?;

    fs::create_dir_all(drivers_dir)
        .await
        .map_err(|e| DriverError::Io {
            path: drivers_dir.to_path_buf(),
            source: e,
        })?;

    let archive_path = drivers_dir.join(file_name);
    info!(url, archive = %archive_path.display(), "downloading driver archive");
    download_file(client, url, &archive_path).await?;

    debug!(archive = %archive_path.display(), ?kind, "extracting");
    match kind {
        ArchiveKind::Zip => unzip_file(&archive_path, drivers_dir).await?,
        ArchiveKind::TarGz => untar_gz_file(&archive_path, drivers_dir).await?,
    }

    fs::remove_file(&archive_path)
        .await
        .map_err(|e| DriverError::Io {
            path: archive_path,
            source: e,
        })?;

    Ok(drivers_dir.to_path_buf())
}

/// Downloads a file from a given URL and saves it to a destination path.
///
/// The response body is streamed to disk chunk by chunk so that large
/// archives never have to fit in memory.
async fn download_file(
    client: &reqwest::Client,
    url: &str,
    dest_path: &Path,
) -> Result<(), DriverError> {
    let download_err = |source| DriverError::Download {
        url: url.to_string(),
        source,
    };

    let mut response = client
        .get(url)
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(download_err)?;

    let mut dest_file = File::create(dest_path).await.map_err(|e| DriverError::Io {
        path: dest_path.to_path_buf(),
        source: e,
    })?;

    while let Some(chunk) = response.chunk().await.map_err(download_err)? {
        dest_file
            .write_all(&chunk)
            .await
            .map_err(|e| DriverError::Io {
                path: dest_path.to_path_buf(),
                source: e,
            })?;
    }

    dest_file.flush().await.map_err(|e| DriverError::Io {
        path: dest_path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

/// Decompresses a .zip archive to a specified directory.
///
/// The core zip logic is synchronous, so we wrap it in `spawn_blocking` to
/// avoid blocking the Tokio runtime.
async fn unzip_file(archive_path: &Path, extract_to: &Path) -> Result<(), DriverError> {
    let archive_path_buf = archive_path.to_path_buf();
    let extract_to_buf = extract_to.to_path_buf();

    tokio::task::spawn_blocking(move || {
        let file = std::fs::File::open(&archive_path_buf).map_err(|e| DriverError::Io {
            path: archive_path_buf.clone(),
            source: e,
        })?;

        let mut archive = zip::ZipArchive::new(file).map_err(|e| DriverError::Zip {
            path: archive_path_buf.clone(),
            source: e,
        })?;

        for i in 0..archive.len() {
            let mut file = archive.by_index(i).map_err(|e| DriverError::Zip {
                path: archive_path_buf.clone(),
                source: e,
            })?;

            let outpath = match file.enclosed_name() {
                Some(path) => extract_to_buf.join(path),
                None => continue,
            };

            if file.name().ends_with('/') {
                std::fs::create_dir_all(&outpath).map_err(|e| DriverError::Io {
                    path: outpath,
                    source: e,
                })?;
            } else {
                if let Some(p) = outpath.parent() {
                    if !p.exists() {
                        std::fs::create_dir_all(p).map_err(|e| DriverError::Io {
                            path: p.to_path_buf(),
                            source: e,
                        })?;
                    }
                }

                let mut outfile =
                    std::fs::File::create(&outpath).map_err(|e| DriverError::Io {
                        path: outpath.clone(),
                        source: e,
                    })?;

                std::io::copy(&mut file, &mut outfile).map_err(|e| DriverError::Io {
                    path: outpath.clone(),
                    source: e,
                })?;

                // Preserve mode bits recorded in the archive on Unix-like systems.
                #[cfg(unix)]
                {
                    use std::os::unix::fs::PermissionsExt;
                    if let Some(mode) = file.unix_mode() {
                        std::fs::set_permissions(
                            &outpath,
                            std::fs::Permissions::from_mode(mode),
                        )
                        .map_err(|e| DriverError::Io {
                            path: outpath,
                            source: e,
                        })?;
                    }
                }
            }
        }
        Ok(())
    })
    .await
    .unwrap() // Propagate panics from the blocking task.
}

/// Decompresses a .tar.gz archive to a specified directory.
async fn untar_gz_file(archive_path: &Path, extract_to: &Path) -> Result<(), DriverError> {
    let archive_path_buf = archive_path.to_path_buf();
    let extract_to_buf = extract_to.to_path_buf();

    tokio::task::spawn_blocking(move || {
        let file = std::fs::File::open(&archive_path_buf).map_err(|e| DriverError::Io {
            path: archive_path_buf.clone(),
            source: e,
        })?;

        let mut archive = tar::Archive::new(GzDecoder::new(file));
        archive
            .unpack(&extract_to_buf)
            .map_err(|e| DriverError::TarUnpack {
                path: archive_path_buf,
                source: e,
            })
    })
    .await
    .unwrap() // Propagate panics from the blocking task.
}

// --- Tests ---
