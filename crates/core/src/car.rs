//! Normalized inventory record
//!
//! The inventory collaborator historically returned car records with
//! optional and inconsistently named fields across call sites. Everything is
//! normalized into this one record type when the collaborator's response is
//! deserialized, so downstream code never re-checks shapes.

use serde::{Deserialize, Serialize};

/// One car in the inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    /// Upstream identifier, when provided
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    /// Model name, e.g. "Corolla"
    #[serde(alias = "name")]
    pub model: String,
    /// Model year
    #[serde(default)]
    pub year: Option<u16>,
    /// Sticker price in dollars
    pub price: f64,
    /// Body type, e.g. "Sedan", "SUV"
    #[serde(default, rename = "type")]
    pub body_type: Option<String>,
    /// Fuel type, e.g. "Hybrid", "Gasoline"
    #[serde(default, rename = "fuelType")]
    pub fuel_type: Option<String>,
    /// Available colors
    #[serde(default)]
    pub colors: Vec<String>,
    /// Seat count
    #[serde(default)]
    pub seats: Option<u8>,
    /// Estimated monthly payment under standard financing assumptions
    #[serde(default, rename = "monthlyEstimate")]
    pub monthly_estimate: Option<f64>,
    /// Image path or URL
    #[serde(default)]
    pub image: Option<String>,
}

impl Car {
    /// Parse one collaborator record, normalizing it once
    ///
    /// Returns `None` for records missing required fields; callers log and
    /// skip those rather than failing the whole response.
    pub fn from_value(value: serde_json::Value) -> Option<Self> {
        match serde_json::from_value::<Car>(value) {
            Ok(car) => Some(car),
            Err(err) => {
                tracing::warn!(error = %err, "Skipping malformed inventory record");
                None
            }
        }
    }
}
