//! One JSON file per player identity under `<data_dir>/SpawnLoadouts/`.

use bevy::prelude::*;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::record::LoadoutRecord;

pub const STORE_DIRECTORY: &str = "SpawnLoadouts";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("loadout store I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("loadout record {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// What the store holds for an identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredLoadout {
    /// No file: fall back to the default loadout
    Missing,
    /// Explicit `null`: the player asked for nothing
    Reset,
    Saved(LoadoutRecord),
}

#[derive(Resource, Debug, Clone)]
pub struct LoadoutStore {
    root: PathBuf,
}

impl LoadoutStore {
    /// Store rooted at `<data_dir>/SpawnLoadouts`; the directory is created on first save
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            root: data_dir.as_ref().join(STORE_DIRECTORY),
        }
    }

    fn record_path(&self, identity: &str) -> PathBuf {
        self.root.join(format!("{identity}.json"))
    }

    pub fn load(&self, identity: &str) -> Result<StoredLoadout, StoreError> {
        let path = self.record_path(identity);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(StoredLoadout::Missing),
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        let record: Option<LoadoutRecord> = serde_json::from_str(&text)
            .map_err(|source| StoreError::Json { path: path.clone(), source })?;

        debug!("Loaded loadout record from {}", path.display());
        Ok(match record {
            Some(record) => StoredLoadout::Saved(record),
            None => StoredLoadout::Reset,
        })
    }

    /// Writes `record`; `None` persists the explicit reset marker.
    pub fn save(&self, identity: &str, record: Option<&LoadoutRecord>) -> Result<(), StoreError> {
        let path = self.record_path(identity);
        write_json(&path, &record).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        debug!("Saved loadout record to {}", path.display());
        Ok(())
    }
}

/// Pretty-printed JSON through a temp file and an atomic rename
pub(crate) fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let bytes = serde_json::to_vec_pretty(value)?;
    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, bytes)?;
    fs::rename(&temp_path, path)
}
