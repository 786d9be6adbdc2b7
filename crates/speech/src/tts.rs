//! HTTP speech-synthesis client
//!
//! Consumes the synthesis collaborator over its narrow request/response
//! contract: text in, an audio byte stream out. Missing credentials are
//! reported at construction time and surface as `ConfigurationMissing` on
//! use; upstream failures propagate with the attempted target, status, and
//! message.

use async_trait::async_trait;
use carvoice_core::{AudioClip, Error, Result, SpeechSynthesizer, UpstreamError};
use serde::Serialize;

/// Synthesis client configuration
#[derive(Debug, Clone)]
pub struct SynthesisConfig {
    /// Base URL of the synthesis service
    pub base_url: String,
    /// API key; `None` means synthesis is unconfigured
    pub api_key: Option<String>,
    /// Voice to synthesize with
    pub voice_id: String,
    /// Synthesis model
    pub model_id: String,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.elevenlabs.io".to_string(),
            api_key: None,
            voice_id: "Qggl4b0xRMiqOwhPtVWT".to_string(),
            model_id: "eleven_multilingual_v2".to_string(),
            timeout_ms: 10_000,
        }
    }
}

/// Voice rendering parameters sent with every request
#[derive(Debug, Clone, Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
    style: f32,
    use_speaker_boost: bool,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        // Lower stability reads less robotic for conversational prompts.
        Self {
            stability: 0.2,
            similarity_boost: 0.8,
            style: 0.3,
            use_speaker_boost: true,
        }
    }
}

#[derive(Debug, Serialize)]
struct SynthesisRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: &'a VoiceSettings,
}

/// HTTP text-to-speech backend
pub struct HttpSynthesizer {
    config: SynthesisConfig,
    settings: VoiceSettings,
    client: reqwest::Client,
}

impl HttpSynthesizer {
    /// Create a new synthesis client
    ///
    /// A missing API key is warned about here so the operator sees it
    /// before the first user does; requests made without one fail with
    /// `ConfigurationMissing`.
    pub fn new(config: SynthesisConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| Error::other(format!("Failed to create HTTP client: {}", e)))?;

        if config.api_key.is_none() {
            tracing::warn!(
                "Synthesis API key is not set; text-to-speech will be unavailable until provided"
            );
        }

        Ok(Self {
            config,
            settings: VoiceSettings::default(),
            client,
        })
    }

    /// Create with default config
    pub fn new_default() -> Result<Self> {
        Self::new(SynthesisConfig::default())
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1/text-to-speech/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.voice_id
        )
    }
}

#[async_trait]
impl SpeechSynthesizer for HttpSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<AudioClip> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| Error::configuration_missing("synthesis API key is not set"))?;

        let url = self.endpoint();
        let request = SynthesisRequest {
            text,
            model_id: &self.config.model_id,
            voice_settings: &self.settings,
        };

        let response = self
            .client
            .post(&url)
            .header("xi-api-key", api_key)
            .header(reqwest::header::ACCEPT, "audio/mpeg")
            .json(&request)
            .send()
            .await
            .map_err(|e| UpstreamError::Unreachable {
                target: url.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                target: url,
                status: status.as_u16(),
                message,
            }
            .into());
        }

        let media_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("audio/mpeg")
            .to_string();

        let bytes = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::InvalidResponse {
                target: url,
                message: e.to_string(),
            })?;

        Ok(AudioClip::new(bytes.to_vec(), media_type))
    }

    fn name(&self) -> &str {
        "http-tts"
    }

    fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = SynthesisConfig::default();
        assert_eq!(config.base_url, "https://api.elevenlabs.io");
        assert_eq!(config.model_id, "eleven_multilingual_v2");
        assert!(config.api_key.is_none());
    }

    #[tokio::test]
    async fn test_missing_key_is_configuration_error() {
        let synth = HttpSynthesizer::new_default().unwrap();
        assert!(!synth.is_configured());
        let err = synth.synthesize("hello").await.unwrap_err();
        assert!(matches!(err, Error::ConfigurationMissing(_)));
    }

    #[test]
    fn test_endpoint_shape() {
        let synth = HttpSynthesizer::new(SynthesisConfig {
            base_url: "http://localhost:5001/".to_string(),
            voice_id: "abc".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(synth.endpoint(), "http://localhost:5001/v1/text-to-speech/abc");
    }
}
