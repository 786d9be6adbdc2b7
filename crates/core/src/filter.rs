//! Structured inventory filter
//!
//! A sparse set of optional predicates produced by the free-text query
//! translator. Absence of a field means "no constraint", never "exclude
//! all"; the `colors` predicate is the one union-valued field.

use crate::Car;
use serde::{Deserialize, Serialize};

/// Optional predicates used to narrow an inventory list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredFilter {
    /// Model name match (single-valued, last keyword wins)
    pub model: Option<String>,
    /// Fuel type match (single-valued)
    pub fuel_type: Option<String>,
    /// Body type match (single-valued)
    pub body_type: Option<String>,
    /// Any-of color matches (union semantics); empty = unconstrained
    #[serde(default)]
    pub colors: Vec<String>,
    /// Exact seat count
    pub seats: Option<u8>,
    /// Exact model year
    pub year: Option<u16>,
    /// Maximum price in dollars
    pub max_price: Option<f64>,
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl StructuredFilter {
    /// True when no predicate is set
    pub fn is_empty(&self) -> bool {
        self.model.is_none()
            && self.fuel_type.is_none()
            && self.body_type.is_none()
            && self.colors.is_empty()
            && self.seats.is_none()
            && self.year.is_none()
            && self.max_price.is_none()
    }

    /// Check a normalized car record against every set predicate
    pub fn matches(&self, car: &Car) -> bool {
        if let Some(model) = &self.model {
            if !contains_ci(&car.model, model) {
                return false;
            }
        }
        if let Some(fuel) = &self.fuel_type {
            match &car.fuel_type {
                Some(f) if contains_ci(f, fuel) => {}
                _ => return false,
            }
        }
        if let Some(body) = &self.body_type {
            match &car.body_type {
                Some(b) if contains_ci(b, body) => {}
                _ => return false,
            }
        }
        if !self.colors.is_empty() {
            let any = car
                .colors
                .iter()
                .any(|c| self.colors.iter().any(|want| contains_ci(c, want)));
            if !any {
                return false;
            }
        }
        if let Some(seats) = self.seats {
            if car.seats != Some(seats) {
                return false;
            }
        }
        if let Some(year) = self.year {
            if car.year != Some(year) {
                return false;
            }
        }
        if let Some(max_price) = self.max_price {
            if car.price > max_price {
                return false;
            }
        }
        true
    }
}
