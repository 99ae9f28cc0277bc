//! crates/study_assistant_core/src/profile.rs
//!
//! The single process-wide profile slot, backed by a `ProfileStore`.

use crate::domain::UserProfile;
use crate::ports::{PortError, PortResult, ProfileStore};
use std::sync::Arc;
use tracing::{info, warn};

/// Holds the current profile. Loaded once at startup, replaced on onboarding,
/// emptied on logout.
pub struct ProfileState {
    store: Arc<dyn ProfileStore>,
    current: Option<UserProfile>,
}

impl ProfileState {
    /// Loads the persisted profile, if there is one. An unreadable record
    /// counts as no profile; onboarding again overwrites it.
    pub async fn init(store: Arc<dyn ProfileStore>) -> PortResult<Self> {
        let current = match store.load().await {
            Ok(current) => current,
            Err(PortError::Malformed(reason)) => {
                warn!("Ignoring unreadable stored profile: {}", reason);
                None
            }
            Err(e) => return Err(e),
        };
        info!(onboarded = current.is_some(), "Profile slot initialised");
        Ok(Self { store, current })
    }

    pub fn current(&self) -> Option<&UserProfile> {
        self.current.as_ref()
    }

    pub fn is_onboarded(&self) -> bool {
        self.current.as_ref().is_some_and(|p| p.onboarded)
    }

    /// Persists the profile, then replaces the slot wholesale.
    pub async fn set_on_onboard(&mut self, profile: UserProfile) -> PortResult<()> {
        self.store.save(&profile).await?;
        info!(class = %profile.class_level, board = %profile.board, "Profile saved");
        self.current = Some(profile);
        Ok(())
    }

    /// Removes the persisted profile, then empties the slot.
    pub async fn clear_on_logout(&mut self) -> PortResult<()> {
        self.store.clear().await?;
        self.current = None;
        info!("Profile cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Board, Language};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryStore {
        saved: Mutex<Option<String>>,
        fail_writes: bool,
    }

    #[async_trait]
    impl ProfileStore for MemoryStore {
        async fn load(&self) -> PortResult<Option<UserProfile>> {
            let saved = self.saved.lock().unwrap();
            saved
                .as_deref()
                .map(|json| serde_json::from_str(json).map_err(|e| PortError::Malformed(e.to_string())))
                .transpose()
        }

        async fn save(&self, profile: &UserProfile) -> PortResult<()> {
            if self.fail_writes {
                return Err(PortError::Unexpected("disk full".to_string()));
            }
            let json = serde_json::to_string(profile).map_err(|e| PortError::Malformed(e.to_string()))?;
            *self.saved.lock().unwrap() = Some(json);
            Ok(())
        }

        async fn clear(&self) -> PortResult<()> {
            *self.saved.lock().unwrap() = None;
            Ok(())
        }
    }

    fn asha() -> UserProfile {
        UserProfile {
            name: "Asha".to_string(),
            class_level: "10".to_string(),
            board: Board::Cbse,
            stream: None,
            language: Language::Hinglish,
            onboarded: true,
        }
    }

    #[tokio::test]
    async fn round_trips_across_restarts() {
        let store = Arc::new(MemoryStore::default());
        let mut state = ProfileState::init(store.clone()).await.unwrap();
        assert!(!state.is_onboarded());

        state.set_on_onboard(asha()).await.unwrap();

        let reloaded = ProfileState::init(store).await.unwrap();
        assert_eq!(reloaded.current(), Some(&asha()));
        assert!(reloaded.is_onboarded());
    }

    #[tokio::test]
    async fn logout_clears_slot_and_store() {
        let store = Arc::new(MemoryStore::default());
        let mut state = ProfileState::init(store.clone()).await.unwrap();
        state.set_on_onboard(asha()).await.unwrap();
        state.clear_on_logout().await.unwrap();

        assert!(state.current().is_none());
        assert!(ProfileState::init(store).await.unwrap().current().is_none());
    }

    #[tokio::test]
    async fn unreadable_record_means_not_onboarded() {
        let store = Arc::new(MemoryStore::default());
        *store.saved.lock().unwrap() = Some(r#"{"name":"Asha"}"#.to_string());

        let mut state = ProfileState::init(store.clone()).await.unwrap();
        assert!(state.current().is_none());
        assert!(!state.is_onboarded());

        state.set_on_onboard(asha()).await.unwrap();
        let reloaded = ProfileState::init(store).await.unwrap();
        assert_eq!(reloaded.current(), Some(&asha()));
    }

    #[tokio::test]
    async fn failed_save_keeps_previous_slot() {
        let store = Arc::new(MemoryStore {
            fail_writes: true,
            ..Default::default()
        });
        let mut state = ProfileState::init(store).await.unwrap();
        assert!(state.set_on_onboard(asha()).await.is_err());
        assert!(state.current().is_none());
    }
}
