//! Collaborator traits
//!
//! External collaborators are consumed through these narrow contracts so
//! the dialogue engine can be exercised with in-memory doubles.

pub mod inventory;
pub mod store;
pub mod voice;

pub use inventory::Inventory;
pub use store::{AnswerRecord, ResponseStore};
pub use voice::{
    AudioSink, ListenOptions, ManualEntry, RecognizeOptions, SpeechRecognizer, SpeechSynthesizer,
    VoiceCapabilities, VoiceIo,
};
