//! Core types and collaborator traits for the voice showroom assistant
//!
//! This crate provides the foundational types used across all other crates:
//! - Conversation types (questions, answers, dialogue state)
//! - Normalized inventory records and structured filters
//! - Collaborator traits (speech I/O, response store, inventory)
//! - Error types

pub mod audio;
pub mod car;
pub mod conversation;
pub mod error;
pub mod filter;
pub mod traits;

// Re-exports from modules
pub use audio::AudioClip;
pub use car::Car;
pub use conversation::{
    Answers, AnswerValue, ConversationState, DialoguePhase, Question, ValidationResult,
};
pub use error::{Error, Result, SpeechError, UpstreamError};
pub use filter::StructuredFilter;

// Trait re-exports
pub use traits::{
    AnswerRecord,
    AudioSink,
    Inventory,
    ListenOptions,
    ManualEntry,
    RecognizeOptions,
    ResponseStore,
    SpeechRecognizer,
    SpeechSynthesizer,
    VoiceCapabilities,
    VoiceIo,
};
