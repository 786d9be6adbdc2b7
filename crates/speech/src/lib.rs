//! Voice I/O for the showroom assistant
//!
//! The `VoiceGateway` schedules text-to-speech playback (with an audio
//! cache keyed by exact prompt text) and speech capture (with a timeout and
//! graceful fallback). The synthesis backend is consumed over HTTP through
//! `HttpSynthesizer`.

pub mod entry;
pub mod gateway;
pub mod tts;

pub use entry::StdinEntry;
pub use gateway::VoiceGateway;
pub use tts::{HttpSynthesizer, SynthesisConfig};
