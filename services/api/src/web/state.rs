//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.
//!
//! The service is single-user: one profile slot, one set of feature screens,
//! one shell. Locks are held only to read or mutate that state and are always
//! released before a generation or transcription call is awaited.

use crate::config::Config;
use study_assistant_core::{
    onboarding::OnboardingWizard, ports::SpeechToTextService, profile::ProfileState,
    screens::Screens, shell::Shell, StudyAssistant,
};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
pub struct AppState {
    pub config: Arc<Config>,
    pub assistant: StudyAssistant,
    /// `None` when voice input is not available on this deployment.
    pub stt_adapter: Option<Arc<dyn SpeechToTextService>>,
    pub profile: RwLock<ProfileState>,
    pub onboarding: Mutex<OnboardingWizard>,
    pub screens: Mutex<Screens>,
    pub shell: Mutex<Shell>,
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        assistant: StudyAssistant,
        stt_adapter: Option<Arc<dyn SpeechToTextService>>,
        profile: ProfileState,
    ) -> Self {
        Self {
            config,
            assistant,
            stt_adapter,
            profile: RwLock::new(profile),
            onboarding: Mutex::new(OnboardingWizard::new()),
            screens: Mutex::new(Screens::default()),
            shell: Mutex::new(Shell::default()),
        }
    }
}
