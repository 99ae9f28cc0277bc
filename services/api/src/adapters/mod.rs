pub mod gemini_llm;
pub mod profile_store;
pub mod sst;

pub use gemini_llm::GeminiAdapter;
pub use profile_store::JsonFileProfileStore;
pub use sst::OpenAiSstAdapter;
