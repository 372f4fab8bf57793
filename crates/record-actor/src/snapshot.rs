//! # Snapshot Files
//!
//! A record actor can be backed by a snapshot file: one JSON object holding the
//! whole map, keyed by record key. The file is read once when the actor is
//! built and rewritten after every mutation.
//!
//! Writes go to a sibling `<name>.tmp` file that is synced to disk and then
//! renamed over the target, so readers only ever see a complete map. A failed
//! write removes the temporary file again.
//!
//! Every write rewrites the whole map, so the cost of a mutation grows with
//! the number of records. Fine for maps of a few thousand entries; an
//! ever-growing log would want an append-only format instead.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::ffi::OsString;
use std::hash::Hash;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Errors raised while reading or writing a snapshot file.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Corrupt snapshot {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Could not encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Location of a snapshot on disk.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn io_error(&self, source: std::io::Error) -> SnapshotError {
        SnapshotError::Io {
            path: self.path.clone(),
            source,
        }
    }

    /// Reads the map stored in the file. A missing file is an empty map.
    pub async fn load<K, T>(&self) -> Result<HashMap<K, T>, SnapshotError>
    where
        K: Eq + Hash + DeserializeOwned,
        T: DeserializeOwned,
    {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No snapshot yet");
                return Ok(HashMap::new());
            }
            Err(e) => return Err(self.io_error(e)),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(HashMap::new());
        }
        serde_json::from_slice(&bytes).map_err(|source| SnapshotError::Decode {
            path: self.path.clone(),
            source,
        })
    }

    /// Replaces the file contents with `map`.
    pub async fn store<K, T>(&self, map: &HashMap<K, T>) -> Result<(), SnapshotError>
    where
        K: Eq + Hash + Serialize,
        T: Serialize,
    {
        let bytes = serde_json::to_vec_pretty(map)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }
        let temp = self.temp_path();
        if let Err(e) = replace_with(&temp, &self.path, &bytes).await {
            if let Err(cleanup) = tokio::fs::remove_file(&temp).await {
                debug!(path = %temp.display(), error = %cleanup, "Temporary snapshot not removed");
            }
            return Err(self.io_error(e));
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            sync_dir(parent).await;
        }
        debug!(path = %self.path.display(), records = map.len(), "Snapshot written");
        Ok(())
    }
}

/// Writes `bytes` to `temp`, flushes them to disk and renames `temp` to `target`.
async fn replace_with(temp: &Path, target: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::File::create(temp).await?;
    file.write_all(bytes).await?;
    file.sync_all().await?;
    drop(file);
    tokio::fs::rename(temp, target).await
}

/// Persists the rename itself. Best effort: not every platform can open a
/// directory for syncing.
async fn sync_dir(dir: &Path) {
    let synced = match tokio::fs::File::open(dir).await {
        Ok(handle) => handle.sync_all().await,
        Err(e) => Err(e),
    };
    if let Err(e) = synced {
        debug!(path = %dir.display(), error = %e, "Directory not synced");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_loads_as_empty_map() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = SnapshotFile::new(dir.path().join("absent.json"));

        let map: HashMap<String, u32> = snapshot.load().await.unwrap();
        assert!(map.is_empty());
    }

    #[tokio::test]
    async fn store_creates_parent_dirs_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("map.json");
        let snapshot = SnapshotFile::new(&path);

        let mut map = HashMap::new();
        map.insert("1042".to_string(), 7_u32);
        snapshot.store(&map).await.unwrap();

        assert!(path.exists());
        assert!(!snapshot.temp_path().exists());
        let loaded: HashMap<String, u32> = snapshot.load().await.unwrap();
        assert_eq!(loaded.get("1042"), Some(&7));
    }

    #[tokio::test]
    async fn failed_rename_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.json");
        // A non-empty directory at the target makes the rename fail
        tokio::fs::create_dir_all(path.join("occupied")).await.unwrap();
        let snapshot = SnapshotFile::new(&path);

        let mut map = HashMap::new();
        map.insert("1042".to_string(), 7_u32);
        let result = snapshot.store(&map).await;

        assert!(matches!(result, Err(SnapshotError::Io { .. })));
        assert!(!snapshot.temp_path().exists());
        assert!(path.is_dir());
    }

    #[tokio::test]
    async fn corrupt_file_is_reported_not_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.json");
        tokio::fs::write(&path, b"{ not json").await.unwrap();

        let result: Result<HashMap<String, u32>, _> = SnapshotFile::new(&path).load().await;
        assert!(matches!(result, Err(SnapshotError::Decode { .. })));
    }
}
