pub mod assistant;
pub mod domain;
pub mod generation;
pub mod onboarding;
pub mod ports;
pub mod profile;
pub mod prompts;
pub mod quiz;
pub mod screens;
pub mod shell;
pub mod speech;
pub mod validation;

pub use assistant::StudyAssistant;
pub use domain::{
    Board, ChatMessage, ChatRole, DayPlan, Language, NoteStyle, QuizQuestion, Stream, StudySlot,
    UserProfile,
};
pub use generation::{ContentPart, GenerationRequest};
pub use ports::{GenerationService, PortError, PortResult, ProfileStore, SpeechToTextService};
pub use profile::ProfileState;
