//! services/api/src/adapters/profile_store.rs
//!
//! This module contains the profile storage adapter, the concrete implementation
//! of the `ProfileStore` port from the `core` crate. Storage is a small JSON
//! key-value file; the profile lives under a single fixed key and a missing key
//! means the student has not onboarded yet.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use study_assistant_core::{
    domain::UserProfile,
    ports::{PortError, PortResult, ProfileStore},
};
use tracing::warn;

/// Key under which the profile record is stored.
pub const PROFILE_KEY: &str = "edugenie_profile";

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A file-backed adapter that implements the `ProfileStore` port.
#[derive(Clone, Debug)]
pub struct JsonFileProfileStore {
    path: PathBuf,
}

impl JsonFileProfileStore {
    /// Creates a new `JsonFileProfileStore`. The file is created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_entries(&self) -> PortResult<Map<String, Value>> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(PortError::Unexpected(e.to_string())),
        };
        match serde_json::from_slice::<Value>(&raw) {
            Ok(Value::Object(entries)) => Ok(entries),
            Ok(_) => Err(PortError::Malformed(format!(
                "{} does not hold a JSON object",
                self.path.display()
            ))),
            Err(e) => Err(PortError::Malformed(e.to_string())),
        }
    }

    /// Entries to write back. An unreadable file is replaced rather than
    /// blocking every later save.
    async fn entries_for_write(&self) -> PortResult<Map<String, Value>> {
        match self.read_entries().await {
            Err(PortError::Malformed(reason)) => {
                warn!("Replacing unreadable profile file: {}", reason);
                Ok(Map::new())
            }
            other => other,
        }
    }

    /// Writes to a sibling temp file and renames it over the original.
    async fn write_entries(&self, entries: &Map<String, Value>) -> PortResult<()> {
        let json = serde_json::to_vec_pretty(entries)
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| PortError::Unexpected(e.to_string()))?;
        }

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))
    }
}

//=========================================================================================
// `ProfileStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl ProfileStore for JsonFileProfileStore {
    async fn load(&self) -> PortResult<Option<UserProfile>> {
        let mut entries = self.read_entries().await?;
        let Some(record) = entries.remove(PROFILE_KEY) else {
            return Ok(None);
        };
        // The record carries no version, so a shape change shows up as a parse failure here.
        serde_json::from_value(record).map(Some).map_err(|e| {
            warn!("Stored profile could not be read: {}", e);
            PortError::Malformed(e.to_string())
        })
    }

    async fn save(&self, profile: &UserProfile) -> PortResult<()> {
        let mut entries = self.entries_for_write().await?;
        let record =
            serde_json::to_value(profile).map_err(|e| PortError::Unexpected(e.to_string()))?;
        entries.insert(PROFILE_KEY.to_string(), record);
        self.write_entries(&entries).await
    }

    async fn clear(&self) -> PortResult<()> {
        let mut entries = self.entries_for_write().await?;
        if entries.remove(PROFILE_KEY).is_none() {
            return Ok(());
        }
        self.write_entries(&entries).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use study_assistant_core::domain::{Board, Language, Stream};

    fn profile() -> UserProfile {
        UserProfile {
            name: "Meera".to_string(),
            class_level: "12".to_string(),
            board: Board::Icse,
            stream: Some(Stream::SciencePcb),
            language: Language::Hindi,
            onboarded: true,
        }
    }

    #[tokio::test]
    async fn missing_file_means_not_onboarded() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileProfileStore::new(dir.path().join("profile.json"));
        assert_eq!(store.load().await.unwrap(), None);
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn round_trips_profile() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("profile.json");
        JsonFileProfileStore::new(&path).save(&profile()).await.unwrap();

        let reloaded = JsonFileProfileStore::new(&path).load().await.unwrap();
        assert_eq!(reloaded, Some(profile()));

        let raw: Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(raw[PROFILE_KEY]["classLevel"], "12");
        assert_eq!(raw[PROFILE_KEY]["onboarded"], true);
    }

    #[tokio::test]
    async fn clear_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");
        std::fs::write(&path, r#"{"theme":"dark"}"#).unwrap();

        let store = JsonFileProfileStore::new(&path);
        store.save(&profile()).await.unwrap();
        store.clear().await.unwrap();

        assert_eq!(store.load().await.unwrap(), None);
        let raw: Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(raw["theme"], "dark");
    }

    #[tokio::test]
    async fn corrupt_record_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");
        std::fs::write(&path, r#"{"edugenie_profile":{"name":"x"}}"#).unwrap();
        let err = JsonFileProfileStore::new(&path).load().await.unwrap_err();
        assert!(matches!(err, PortError::Malformed(_)));
    }

    #[tokio::test]
    async fn save_replaces_unreadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = JsonFileProfileStore::new(&path);
        assert!(matches!(store.load().await.unwrap_err(), PortError::Malformed(_)));
        store.save(&profile()).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(profile()));
    }
}
