//! Finds the extracted driver executable inside the drivers directory.

use crate::error::DriverError;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Searches `root` recursively for a file whose exact name is one of
/// `names`, marks it executable and returns its canonical absolute path.
///
/// Traversal order is filesystem-dependent; when duplicates exist the first
/// one encountered wins.
pub fn locate(root: &Path, names: &[&str]) -> Result<PathBuf, DriverError> {
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|e| DriverError::Io {
            path: e.path().unwrap_or(root).to_path_buf(),
            source: e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("directory walk failed")),
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let matches = entry
            .file_name()
            .to_str()
            .is_some_and(|file_name| names.contains(&file_name));
        if !matches {
            continue;
        }

        debug!(path = %entry.path().display(), "found driver executable");
        make_executable(entry.path())?;
        return dunce::canonicalize(entry.path()).map_err(|e| DriverError::Io {
            path: entry.path().to_path_buf(),
            source: e,
        });
    }

    Err(DriverError::DriverNotFound {
        names: names.iter().map(|n| n.to_string()).collect(),
        dir: root.to_path_buf(),
    })
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<(), DriverError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).map_err(|e| {
        DriverError::Io {
            path: path.to_path_buf(),
            source: e,
        }
    })
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<(), DriverError> {
    Ok(())
}

// --- Tests ---

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_driver_in_nested_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("chromedriver-linux64");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(nested.join("LICENSE.chromedriver"), "license text").unwrap();
        std::fs::write(nested.join("chromedriver"), "binary").unwrap();

        let found = locate(dir.path(), &["chromedriver", "chromedriver.exe"]).unwrap();
        assert_eq!(found.file_name().unwrap(), "chromedriver");
        assert!(found.is_absolute());
    }

    #[cfg(unix)]
    #[test]
    fn marks_found_driver_executable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("geckodriver"), "binary").unwrap();

        let found = locate(dir.path(), &["geckodriver"]).unwrap();
        let mode = std::fs::metadata(&found).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn reports_candidates_and_directory_when_absent() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("README.txt"), "nothing here").unwrap();

        let err = locate(dir.path(), &["msedgedriver", "msedgedriver.exe"]).unwrap_err();
        match err {
            DriverError::DriverNotFound { names, dir: searched } => {
                assert_eq!(names, vec!["msedgedriver", "msedgedriver.exe"]);
                assert_eq!(searched, dir.path());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn ignores_directories_with_matching_names() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("chromedriver")).unwrap();

        let err = locate(dir.path(), &["chromedriver"]).unwrap_err();
        assert!(matches!(err, DriverError::DriverNotFound { .. }));
    }
}
