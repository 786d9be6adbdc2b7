//! Error types for the voice showroom assistant

use thiserror::Error;

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the assistant
///
/// Nothing in this taxonomy is fatal to the process: speech failures degrade
/// to fallbacks, upstream failures are surfaced with the attempted target and
/// the dialogue step is preserved, and configuration gaps are reported at
/// capability-check time rather than on first use.
#[derive(Error, Debug)]
pub enum Error {
    // Speech synthesis / capture errors
    #[error("Speech error: {0}")]
    Speech(#[from] SpeechError),

    // Collaborator (inventory, synthesis backend) errors
    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    // Missing credentials or settings, reported eagerly
    #[error("Configuration missing: {0}")]
    ConfigurationMissing(String),

    // Invalid settings values
    #[error("Configuration error: {0}")]
    Config(String),

    // IO errors (response log file)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Generic errors
    #[error("{0}")]
    Other(String),
}

/// Speech-specific errors
#[derive(Error, Debug)]
pub enum SpeechError {
    /// Synthesis backend and fallback both failed for an utterance
    #[error("Synthesis unavailable: {0}")]
    SynthesisUnavailable(String),

    /// `listen` was invoked while playback is in flight
    #[error("Capture rejected: synthesis or playback in progress")]
    CaptureWhileSpeaking,

    /// No recognition capability and no manual-entry fallback configured
    #[error("Recognition unavailable and no manual entry configured")]
    RecognitionUnavailable,

    /// Playback sink failed
    #[error("Playback error: {0}")]
    Playback(String),
}

/// Errors reaching an external collaborator
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("{target} unreachable: {message}")]
    Unreachable { target: String, message: String },

    #[error("{target} returned status {status}: {message}")]
    Status {
        target: String,
        status: u16,
        message: String,
    },

    #[error("{target} returned an invalid response: {message}")]
    InvalidResponse { target: String, message: String },
}

impl UpstreamError {
    /// The collaborator endpoint that was being contacted
    pub fn target(&self) -> &str {
        match self {
            UpstreamError::Unreachable { target, .. }
            | UpstreamError::Status { target, .. }
            | UpstreamError::InvalidResponse { target, .. } => target,
        }
    }
}

impl Error {
    /// Create a generic error from a string
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Create a configuration-missing error
    pub fn configuration_missing<S: Into<String>>(msg: S) -> Self {
        Error::ConfigurationMissing(msg.into())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_target_is_preserved() {
        let err = UpstreamError::Status {
            target: "http://localhost:5002/cars".to_string(),
            status: 503,
            message: "service unavailable".to_string(),
        };
        assert_eq!(err.target(), "http://localhost:5002/cars");
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn test_speech_error_wraps_into_error() {
        let err: Error = SpeechError::CaptureWhileSpeaking.into();
        assert!(matches!(err, Error::Speech(_)));
    }
}
