//! Inventory collaborator clients
//!
//! `HttpInventoryClient` consumes the inventory API's `{ ok, cars }`
//! envelope and normalizes every record once into `Car`, skipping malformed
//! entries with a warning. `InMemoryInventory` carries the same
//! deterministic near-miss fill contract for tests and degraded operation:
//! items within the monthly bound come back cheapest first, items just
//! above the bound fill remaining slots, and cheapest-by-price items fill
//! whatever is still short.

use async_trait::async_trait;
use carvoice_core::{Car, Inventory, Result, UpstreamError};
use serde::Deserialize;
use std::cmp::Ordering;

/// Inventory client configuration
#[derive(Debug, Clone)]
pub struct InventoryConfig {
    /// Base URL of the inventory service
    pub base_url: String,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
    /// Limit used when fetching the full list
    pub list_limit: usize,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5002".to_string(),
            timeout_ms: 8_000,
            list_limit: 50,
        }
    }
}

/// Response envelope from the inventory service
#[derive(Debug, Deserialize)]
struct CarsEnvelope {
    ok: bool,
    #[serde(default)]
    cars: Vec<serde_json::Value>,
    #[serde(default)]
    error: Option<String>,
}

/// HTTP inventory client
pub struct HttpInventoryClient {
    config: InventoryConfig,
    client: reqwest::Client,
}

impl HttpInventoryClient {
    pub fn new(config: InventoryConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| carvoice_core::Error::other(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { config, client })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(InventoryConfig::default())
    }

    fn endpoint(&self) -> String {
        format!("{}/cars", self.config.base_url.trim_end_matches('/'))
    }

    async fn fetch(&self, query: &[(&str, String)]) -> Result<Vec<Car>> {
        let url = self.endpoint();

        let response = self
            .client
            .get(&url)
            .query(query)
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

        let envelope: CarsEnvelope =
            response
                .json()
                .await
                .map_err(|e| UpstreamError::InvalidResponse {
                    target: url.clone(),
                    message: e.to_string(),
                })?;

        if !envelope.ok {
            return Err(UpstreamError::InvalidResponse {
                target: url,
                message: envelope
                    .error
                    .unwrap_or_else(|| "collaborator reported failure".to_string()),
            }
            .into());
        }

        let total = envelope.cars.len();
        let cars: Vec<Car> = envelope.cars.into_iter().filter_map(Car::from_value).collect();
        if cars.len() < total {
            tracing::warn!(
                skipped = total - cars.len(),
                "Inventory response contained malformed records"
            );
        }
        Ok(cars)
    }
}

#[async_trait]
impl Inventory for HttpInventoryClient {
    async fn all(&self) -> Result<Vec<Car>> {
        // Without a monthly bound the service returns cheapest-first.
        self.fetch(&[("limit", self.config.list_limit.to_string())])
            .await
    }

    async fn query_by_monthly(&self, max_monthly: f64, limit: usize) -> Result<Vec<Car>> {
        self.fetch(&[
            ("maxMonthly", max_monthly.to_string()),
            ("limit", limit.to_string()),
        ])
        .await
    }
}

fn by_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// In-memory inventory with the collaborator's fill contract
pub struct InMemoryInventory {
    cars: Vec<Car>,
}

impl InMemoryInventory {
    pub fn new(cars: Vec<Car>) -> Self {
        Self { cars }
    }

    fn same_car(a: &Car, b: &Car) -> bool {
        match (&a.id, &b.id) {
            (Some(x), Some(y)) => x == y,
            _ => a.model == b.model && a.price == b.price,
        }
    }
}

#[async_trait]
impl Inventory for InMemoryInventory {
    async fn all(&self) -> Result<Vec<Car>> {
        let mut cars = self.cars.clone();
        cars.sort_by(|a, b| by_f64(a.price, b.price));
        Ok(cars)
    }

    async fn query_by_monthly(&self, max_monthly: f64, limit: usize) -> Result<Vec<Car>> {
        let mut picked: Vec<Car> = self
            .cars
            .iter()
            .filter(|c| c.monthly_estimate.map(|m| m <= max_monthly).unwrap_or(false))
            .cloned()
            .collect();
        picked.sort_by(|a, b| by_f64(a.monthly_estimate.unwrap_or(f64::MAX), b.monthly_estimate.unwrap_or(f64::MAX)));
        picked.truncate(limit);

        // Near misses above the bound fill remaining slots.
        if picked.len() < limit {
            let mut above: Vec<Car> = self
                .cars
                .iter()
                .filter(|c| c.monthly_estimate.map(|m| m > max_monthly).unwrap_or(false))
                .cloned()
                .collect();
            above.sort_by(|a, b| {
                by_f64(a.monthly_estimate.unwrap_or(f64::MAX), b.monthly_estimate.unwrap_or(f64::MAX))
            });
            for car in above {
                if picked.len() >= limit {
                    break;
                }
                picked.push(car);
            }
        }

        // Still short (records without estimates): cheapest by price.
        if picked.len() < limit {
            let mut by_price = self.cars.clone();
            by_price.sort_by(|a, b| by_f64(a.price, b.price));
            for car in by_price {
                if picked.len() >= limit {
                    break;
                }
                if !picked.iter().any(|p| Self::same_car(p, &car)) {
                    picked.push(car);
                }
            }
        }

        Ok(picked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn car(id: &str, model: &str, price: f64, monthly: Option<f64>) -> Car {
        Car {
            id: Some(id.to_string()),
            model: model.to_string(),
            year: Some(2024),
            price,
            body_type: None,
            fuel_type: None,
            colors: vec![],
            seats: None,
            monthly_estimate: monthly,
            image: None,
        }
    }

    fn fleet() -> Vec<Car> {
        vec![
            car("1", "Corolla", 22000.0, Some(415.17)),
            car("2", "Camry", 28000.0, Some(528.39)),
            car("3", "RAV4", 33000.0, Some(566.14)),
            car("4", "Prius", 25000.0, Some(471.78)),
            car("5", "Yaris", 20000.0, Some(377.42)),
        ]
    }

    #[tokio::test]
    async fn test_within_bound_sorted_ascending() {
        let inventory = InMemoryInventory::new(fleet());
        let cars = inventory.query_by_monthly(480.0, 5).await.unwrap();
        let models: Vec<&str> = cars.iter().map(|c| c.model.as_str()).collect();
        // Yaris (377), Corolla (415), Prius (471) qualify; near misses
        // Camry (528) and RAV4 (566) fill the remaining two slots.
        assert_eq!(models, vec!["Yaris", "Corolla", "Prius", "Camry", "RAV4"]);
    }

    #[tokio::test]
    async fn test_limit_is_respected() {
        let inventory = InMemoryInventory::new(fleet());
        let cars = inventory.query_by_monthly(480.0, 2).await.unwrap();
        let models: Vec<&str> = cars.iter().map(|c| c.model.as_str()).collect();
        assert_eq!(models, vec!["Yaris", "Corolla"]);
    }

    #[tokio::test]
    async fn test_no_estimates_fall_back_to_price() {
        let inventory = InMemoryInventory::new(vec![
            car("1", "Tundra", 46000.0, None),
            car("2", "Tacoma", 33000.0, None),
        ]);
        let cars = inventory.query_by_monthly(500.0, 2).await.unwrap();
        let models: Vec<&str> = cars.iter().map(|c| c.model.as_str()).collect();
        assert_eq!(models, vec!["Tacoma", "Tundra"]);
    }

    #[tokio::test]
    async fn test_fill_does_not_duplicate() {
        let inventory = InMemoryInventory::new(vec![
            car("1", "Corolla", 22000.0, Some(415.17)),
            car("2", "Sienna", 36000.0, None),
        ]);
        let cars = inventory.query_by_monthly(480.0, 3).await.unwrap();
        let models: Vec<&str> = cars.iter().map(|c| c.model.as_str()).collect();
        assert_eq!(models, vec!["Corolla", "Sienna"]);
    }

    #[tokio::test]
    async fn test_all_is_cheapest_first() {
        let inventory = InMemoryInventory::new(fleet());
        let cars = inventory.all().await.unwrap();
        assert_eq!(cars[0].model, "Yaris");
        assert_eq!(cars[4].model, "RAV4");
    }

    #[test]
    fn test_envelope_failure_message() {
        let envelope: CarsEnvelope =
            serde_json::from_str(r#"{"ok": false, "error": "db down"}"#).unwrap();
        assert!(!envelope.ok);
        assert_eq!(envelope.error.as_deref(), Some("db down"));
        assert!(envelope.cars.is_empty());
    }
}
