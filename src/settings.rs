//! Flat key-value settings file used as the driver cache index.

use crate::error::DriverError;
use serde::Serialize;
use serde_json::{Map, Value};
use std::io::Write;
use std::path::Path;

/// In-memory view of the settings file.
///
/// The file is a single flat JSON object. Only string values are meaningful
/// to this crate, but unknown keys and non-string values are carried through
/// load/save untouched.
#[derive(Debug, Default)]
pub struct Settings {
    entries: Map<String, Value>,
}

impl Settings {
    /// Reads the settings file, returning an empty record when it does not
    /// exist yet.
    pub fn load(path: &Path) -> Result<Self, DriverError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(DriverError::Io {
                    path: path.to_path_buf(),
                    source: e,
                });
            }
        };

        let entries =
            serde_json::from_str(&text).map_err(|e| DriverError::CorruptState {
                path: path.to_path_buf(),
                source: e,
            })?;
        Ok(Self { entries })
    }

    /// Writes the settings file, pretty-printed with 4-space indentation.
    ///
    /// The content is serialized to a temporary file in the destination
    /// directory and renamed over the target, so a concurrent reader never
    /// observes a half-written file.
    pub fn save(&self, path: &Path) -> Result<(), DriverError> {
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.entries
            .serialize(&mut ser)
            .map_err(|e| DriverError::Io {
                path: path.to_path_buf(),
                source: e.into(),
            })?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| DriverError::Io {
            path: dir.to_path_buf(),
            source: e,
        })?;
        tmp.write_all(&buf).map_err(|e| DriverError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        tmp.persist(path).map_err(|e| DriverError::Io {
            path: path.to_path_buf(),
            source: e.error,
        })?;
        Ok(())
    }

    /// Returns the string value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(Value::as_str)
    }

    /// Stores a string value under `key`, replacing any previous value.
    pub fn set(&mut self, key: &str, value: &str) {
        self.entries
            .insert(key.to_string(), Value::String(value.to_string()));
    }
}

// --- Tests ---
