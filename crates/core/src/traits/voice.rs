//! Speech collaborator traits
//!
//! The gateway composes four narrow contracts: a synthesis backend, an
//! optional on-device fallback synthesizer, an optional recognition
//! capability, and a playback sink. Recognition absence is a detectable
//! capability, not an error, so the conversation can degrade to manual
//! text entry.

use crate::{AudioClip, Result};
use async_trait::async_trait;
use std::time::Duration;

/// Text-to-speech backend
///
/// Implementations:
/// - `HttpSynthesizer` - synthesis proxy consumed over HTTP
/// - on-device fallback synthesizers
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync + 'static {
    /// Synthesize one utterance to an audio clip
    async fn synthesize(&self, text: &str) -> Result<AudioClip>;

    /// Backend name for logging
    fn name(&self) -> &str;

    /// Credentials/settings required by this backend are present
    ///
    /// Checked at gateway construction so a missing credential is reported
    /// before a user is affected, not on first use.
    fn is_configured(&self) -> bool {
        true
    }
}

/// Options for one recognition session
#[derive(Debug, Clone)]
pub struct RecognizeOptions {
    /// Emit only the final transcript, never partials
    pub interim_results: bool,
    /// Number of alternative transcripts to consider
    pub max_alternatives: u8,
    /// BCP-47 language tag
    pub language: String,
}

impl Default for RecognizeOptions {
    fn default() -> Self {
        Self {
            interim_results: false,
            max_alternatives: 1,
            language: "en-US".to_string(),
        }
    }
}

/// Speech-to-text capability
///
/// One call is one capture: the session is started, a single settled result
/// comes back, and dropping the future cancels that capture only.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync + 'static {
    /// Capture one utterance and return the top transcript
    async fn recognize(&self, opts: &RecognizeOptions) -> Result<String>;

    /// Backend name for logging
    fn name(&self) -> &str;
}

/// Audio playback sink
#[async_trait]
pub trait AudioSink: Send + Sync + 'static {
    /// Play a clip to completion
    async fn play(&self, clip: &AudioClip) -> Result<()>;

    /// Stop any playback currently in flight
    fn stop(&self);
}

/// Manual text entry, used when no recognition capability exists
#[async_trait]
pub trait ManualEntry: Send + Sync + 'static {
    /// Prompt the operator/user for a typed reply
    async fn read_reply(&self, prompt: &str) -> Result<String>;
}

/// Options for one listen call
#[derive(Debug, Clone)]
pub struct ListenOptions {
    /// How long to wait for a transcript before resolving empty
    pub timeout: Duration,
}

impl Default for ListenOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(15_000),
        }
    }
}

/// What the execution environment can actually do, reported eagerly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoiceCapabilities {
    /// A speech recognizer is available
    pub recognition: bool,
    /// A manual-entry fallback is configured
    pub manual_entry: bool,
    /// The synthesis backend has credentials configured
    pub synthesis_configured: bool,
}

/// Voice I/O surface the dialogue engine drives
///
/// Playback is best-effort: a failed utterance never blocks dialogue
/// progress. Capture is gated: `listen` is rejected while speaking and is a
/// no-op while another capture is active.
#[async_trait]
pub trait VoiceIo: Send + Sync + 'static {
    /// Speak an utterance, preempting any current playback
    async fn speak(&self, text: &str) -> Result<()>;

    /// Capture one spoken reply; empty string on timeout or no speech
    async fn listen(&self, opts: ListenOptions) -> Result<String>;

    /// Best-effort cache warm for an upcoming prompt
    async fn preload(&self, text: &str);

    /// Playback currently in flight
    fn is_speaking(&self) -> bool;

    /// Capture currently active
    fn is_listening(&self) -> bool;

    /// Capability report for this environment
    fn capabilities(&self) -> VoiceCapabilities;
}
