//! Main settings module
//!
//! Settings layer a config file under a `CARVOICE_`-prefixed environment
//! overlay, with serde defaults so a bare process still starts. Validation
//! runs eagerly on load, and credential gaps are reported as capability
//! warnings at the same time so operators hear about them before users do.

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::ConfigError;

/// Speech synthesis and capture settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechSettings {
    /// Base URL of the synthesis service
    #[serde(default = "default_tts_url")]
    pub tts_url: String,

    /// Synthesis API key; absent means synthesis is unconfigured
    #[serde(default)]
    pub api_key: Option<String>,

    /// Voice to synthesize with
    #[serde(default = "default_voice_id")]
    pub voice_id: String,

    /// Synthesis request timeout in milliseconds
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// How long one capture waits for a transcript, in milliseconds
    #[serde(default = "default_listen_timeout_ms")]
    pub listen_timeout_ms: u64,
}

fn default_tts_url() -> String {
    "https://api.elevenlabs.io".to_string()
}

fn default_voice_id() -> String {
    "Qggl4b0xRMiqOwhPtVWT".to_string()
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_listen_timeout_ms() -> u64 {
    15_000
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            tts_url: default_tts_url(),
            api_key: None,
            voice_id: default_voice_id(),
            request_timeout_ms: default_request_timeout_ms(),
            listen_timeout_ms: default_listen_timeout_ms(),
        }
    }
}

/// Inventory collaborator settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventorySettings {
    /// Base URL of the inventory service
    #[serde(default = "default_inventory_url")]
    pub base_url: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_inventory_timeout_ms")]
    pub timeout_ms: u64,

    /// Result-count limit requested from the collaborator
    #[serde(default = "default_result_limit")]
    pub result_limit: usize,
}

fn default_inventory_url() -> String {
    "http://127.0.0.1:5002".to_string()
}

fn default_inventory_timeout_ms() -> u64 {
    8_000
}

fn default_result_limit() -> usize {
    50
}

impl Default for InventorySettings {
    fn default() -> Self {
        Self {
            base_url: default_inventory_url(),
            timeout_ms: default_inventory_timeout_ms(),
            result_limit: default_result_limit(),
        }
    }
}

/// Response log settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseLogSettings {
    /// Path of the append-only response log
    #[serde(default = "default_log_path")]
    pub path: String,
}

fn default_log_path() -> String {
    "responses.txt".to_string()
}

impl Default for ResponseLogSettings {
    fn default() -> Self {
        Self {
            path: default_log_path(),
        }
    }
}

/// Main application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Speech synthesis and capture
    #[serde(default)]
    pub speech: SpeechSettings,

    /// Inventory collaborator
    #[serde(default)]
    pub inventory: InventorySettings,

    /// Response log
    #[serde(default)]
    pub responses: ResponseLogSettings,
}

impl Settings {
    /// Create default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from an optional file plus the environment overlay
    ///
    /// Environment variables use the `CARVOICE_` prefix with `__` section
    /// separators, e.g. `CARVOICE_SPEECH__API_KEY`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        let config = builder
            .add_source(Environment::with_prefix("CARVOICE").separator("__"))
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        settings.validate()?;

        for warning in settings.capability_warnings() {
            tracing::warn!("{}", warning);
        }

        Ok(settings)
    }

    /// Validate settings values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.speech.tts_url.is_empty() {
            return Err(ConfigError::Invalid("speech.tts_url must not be empty".into()));
        }
        if self.speech.request_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "speech.request_timeout_ms must be positive".into(),
            ));
        }
        if self.speech.listen_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "speech.listen_timeout_ms must be positive".into(),
            ));
        }
        if self.inventory.base_url.is_empty() {
            return Err(ConfigError::Invalid(
                "inventory.base_url must not be empty".into(),
            ));
        }
        if self.inventory.result_limit == 0 || self.inventory.result_limit > 50 {
            return Err(ConfigError::Invalid(
                "inventory.result_limit must be between 1 and 50".into(),
            ));
        }
        if self.responses.path.is_empty() {
            return Err(ConfigError::Invalid(
                "responses.path must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Capability gaps worth reporting before a user is affected
    pub fn capability_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.speech.api_key.is_none() {
            warnings.push(
                "Speech API key is not set; synthesis will rely on the fallback synthesizer"
                    .to_string(),
            );
        }
        warnings
    }
}
