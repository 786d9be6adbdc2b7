//! Configuration for the voice showroom assistant
//!
//! Settings come from an optional file layered under a `CARVOICE_`-prefixed
//! environment overlay. Validation and capability reporting happen at load
//! time: an operator sees a missing credential in the logs before the first
//! user hears silence.

pub mod settings;

pub use settings::{InventorySettings, ResponseLogSettings, Settings, SpeechSettings};

use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
