//! Inventory collaborator
//!
//! Query surface over the car inventory. `query_by_monthly` carries the
//! deterministic fallback contract: items within the bound come back sorted
//! ascending by monthly estimate; near-miss items above the bound fill
//! remaining slots; if still short, cheapest-by-price items fill the rest.

use crate::{Car, Result};
use async_trait::async_trait;

/// Car inventory query surface
#[async_trait]
pub trait Inventory: Send + Sync + 'static {
    /// Every available car, cheapest first
    async fn all(&self) -> Result<Vec<Car>>;

    /// Up to `limit` cars near a maximum-monthly-payment bound
    async fn query_by_monthly(&self, max_monthly: f64, limit: usize) -> Result<Vec<Car>>;
}
