//! # Aggregator
//!
//! Holds the four category sums and the services record, and derives the
//! grand total from them:
//!
//! ```text
//! grand_total = wardrobe_wood + wardrobe_accessories
//!             + kitchen_wood + kitchen_accessories
//!             + services.with_gst + services.handling_fee
//!             - services.discount_total
//! ```
//!
//! Setters only store values that differ from the current ones. Each stored
//! change bumps [`AggregateState::revision`], so callers can tell whether a
//! report actually caused a recomputation.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::aggregate::{AggregateState, ServicesTotals};
//! use quote_core::category::Category;
//!
//! let mut state = AggregateState::default();
//! state.set_category_sum(Category::WardrobeWood, 100.0);
//! state.set_category_sum(Category::WardrobeAccessories, 50.0);
//! state.set_category_sum(Category::KitchenWood, 200.0);
//! state.set_services(ServicesTotals {
//!     without_gst: 300.0,
//!     with_gst: 330.0,
//!     discount_total: 30.0,
//!     handling_fee: 20.0,
//! });
//! assert_eq!(state.grand_total(), 670.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::category::{Category, Section};
use crate::numeric::sanitize;

/// Services ("solution") totals supplied from outside the row model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ServicesTotals {
    pub without_gst: f64,
    pub with_gst: f64,
    pub discount_total: f64,
    pub handling_fee: f64,
}

impl ServicesTotals {
    fn sanitized(self) -> Self {
        ServicesTotals {
            without_gst: sanitize(self.without_gst),
            with_gst: sanitize(self.with_gst),
            discount_total: sanitize(self.discount_total),
            handling_fee: sanitize(self.handling_fee),
        }
    }

    /// Contribution to the grand total
    pub fn net(&self) -> f64 {
        self.with_gst + self.handling_fee - self.discount_total
    }
}

/// Current sum of each category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategorySums {
    pub wardrobe_wood: f64,
    pub wardrobe_accessories: f64,
    pub kitchen_wood: f64,
    pub kitchen_accessories: f64,
}

impl CategorySums {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::WardrobeWood => self.wardrobe_wood,
            Category::WardrobeAccessories => self.wardrobe_accessories,
            Category::KitchenWood => self.kitchen_wood,
            Category::KitchenAccessories => self.kitchen_accessories,
        }
    }

    fn slot(&mut self, category: Category) -> &mut f64 {
        match category {
            Category::WardrobeWood => &mut self.wardrobe_wood,
            Category::WardrobeAccessories => &mut self.wardrobe_accessories,
            Category::KitchenWood => &mut self.kitchen_wood,
            Category::KitchenAccessories => &mut self.kitchen_accessories,
        }
    }

    pub fn total(&self) -> f64 {
        Category::ALL.iter().map(|c| self.get(*c)).sum()
    }
}

/// Category sums, services and the derived grand total.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateState {
    sums: CategorySums,
    services: ServicesTotals,
    #[serde(skip)]
    revision: u64,
}

impl AggregateState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category_sum(&self, category: Category) -> f64 {
        self.sums.get(category)
    }

    pub fn sums(&self) -> &CategorySums {
        &self.sums
    }

    pub fn services(&self) -> &ServicesTotals {
        &self.services
    }

    /// Number of stored changes since creation
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Store a category sum. Returns `true` if the value changed.
    pub fn set_category_sum(&mut self, category: Category, sum: f64) -> bool {
        let sum = sanitize(sum);
        let slot = self.sums.slot(category);
        if *slot == sum {
            return false;
        }
        *slot = sum;
        self.revision += 1;
        trace!(%category, sum, revision = self.revision, "category sum stored");
        true
    }

    /// Replace the services record. Returns `true` if any field changed.
    pub fn set_services(&mut self, services: ServicesTotals) -> bool {
        let services = services.sanitized();
        if self.services == services {
            return false;
        }
        self.services = services;
        self.revision += 1;
        trace!(revision = self.revision, "services stored");
        true
    }

    /// Wood plus accessories of one section
    pub fn section_total(&self, section: Section) -> f64 {
        self.category_sum(section.wood()) + self.category_sum(section.accessories())
    }

    pub fn grand_total(&self) -> f64 {
        self.sums.total() + self.services.net()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_state() -> AggregateState {
        let mut state = AggregateState::new();
        state.set_category_sum(Category::WardrobeWood, 100.0);
        state.set_category_sum(Category::WardrobeAccessories, 50.0);
        state.set_category_sum(Category::KitchenWood, 200.0);
        state.set_category_sum(Category::KitchenAccessories, 0.0);
        state.set_services(ServicesTotals {
            without_gst: 300.0,
            with_gst: 330.0,
            discount_total: 30.0,
            handling_fee: 20.0,
        });
        state
    }

    #[test]
    fn test_grand_total() {
        let state = example_state();
        assert_eq!(state.grand_total(), 670.0);
        assert_eq!(state.section_total(Section::Wardrobe), 150.0);
        assert_eq!(state.section_total(Section::Kitchen), 200.0);
    }

    #[test]
    fn test_empty_state_is_zero() {
        let state = AggregateState::new();
        assert_eq!(state.grand_total(), 0.0);
        for cat in Category::ALL {
            assert_eq!(state.category_sum(cat), 0.0);
        }
    }

    #[test]
    fn test_revision_counts_only_changes() {
        let mut state = example_state();
        // Kitchen accessories stayed at its default 0
        assert_eq!(state.revision(), 4);

        assert!(!state.set_category_sum(Category::WardrobeWood, 100.0));
        assert!(!state.set_services(*state.services()));
        assert_eq!(state.revision(), 4);

        assert!(state.set_category_sum(Category::WardrobeWood, 120.0));
        assert_eq!(state.revision(), 5);
        assert_eq!(state.grand_total(), 690.0);
    }

    #[test]
    fn test_non_finite_operands_become_zero() {
        let mut state = AggregateState::new();
        state.set_category_sum(Category::KitchenWood, f64::NAN);
        state.set_services(ServicesTotals {
            with_gst: f64::INFINITY,
            handling_fee: 10.0,
            ..Default::default()
        });
        assert_eq!(state.grand_total(), 10.0);
    }

    #[test]
    fn test_serialization_skips_revision() {
        let state = example_state();
        let json = serde_json::to_string(&state).unwrap();
        assert!(!json.contains("revision"));
        let back: AggregateState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.grand_total(), 670.0);
        assert_eq!(back.revision(), 0);
    }
}
