//! Whole-file JSON persistence
//!
//! Files are pretty-printed with two-space indentation. Writes go to a
//! sibling `.tmp` file which is then renamed over the target, so readers
//! never observe a half-written file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tokio::fs;

use crate::error::{StoreError, StoreResult};

/// A JSON document on disk
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn exists(&self) -> bool {
        fs::try_exists(&self.path).await.unwrap_or(false)
    }

    /// Read and parse the file. A missing file is `Ok(None)`.
    pub async fn read<T: DeserializeOwned>(&self) -> StoreResult<Option<T>> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })
    }

    /// Replace the file contents with `value`.
    pub async fn write<T: Serialize + ?Sized>(&self, value: &T) -> StoreResult<()> {
        let body = serde_json::to_string_pretty(value)?;
        let tmp_path = self.tmp_path();

        fs::write(&tmp_path, body)
            .await
            .map_err(|source| StoreError::Write {
                path: tmp_path.clone(),
                source,
            })?;

        fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|source| StoreError::Write {
                path: self.path.clone(),
                source,
            })
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_reads_none() {
        let dir = TempDir::new().unwrap();
        let file = JsonFile::new(dir.path().join("absent.json"));

        let value: Option<Value> = file.read().await.unwrap();
        assert!(value.is_none());
        assert!(!file.exists().await);
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let file = JsonFile::new(dir.path().join("doc.json"));

        file.write(&json!({"a": [1, 2]})).await.unwrap();
        assert!(file.exists().await);
        assert!(!dir.path().join("doc.json.tmp").exists());

        let raw = std::fs::read_to_string(file.path()).unwrap();
        assert!(raw.contains("\n  \"a\""));

        let value: Value = file.read().await.unwrap().unwrap();
        assert_eq!(value["a"][1], 2);
    }

    #[tokio::test]
    async fn test_malformed_file_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result: StoreResult<Option<Value>> = JsonFile::new(&path).read().await;
        assert!(matches!(result, Err(StoreError::Parse { .. })));
    }

    #[tokio::test]
    async fn test_write_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let file = JsonFile::new(dir.path().join("nope").join("doc.json"));

        let result = file.write(&json!({})).await;
        assert!(matches!(result, Err(StoreError::Write { .. })));
    }
}
