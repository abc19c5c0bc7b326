//! # Quote
//!
//! The `Quote` struct owns everything a running quote needs: the catalog it
//! prices against, the rows of every category and the aggregate totals.
//! All mutation goes through its methods, which keep the three in step.
//!
//! ## Structure
//!
//! ```text
//! Quote
//! ├── meta: QuoteMetadata (id, customer, timestamps)
//! ├── catalog: Arc<Catalog> (read-only)
//! ├── wardrobe: SectionRows
//! │   ├── wood: RowCollection<DimensionalRow>
//! │   └── accessories: RowCollection<AttributeRow>
//! ├── kitchen: SectionRows (same shape)
//! └── aggregate: AggregateState (category sums, services, grand total)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use quote_core::catalog::Catalog;
//! use quote_core::category::Category;
//! use quote_core::quote::Quote;
//!
//! let mut quote = Quote::new(Catalog::builtin().clone(), "A. Customer");
//! let id = quote.add_row(Category::WardrobeWood);
//!
//! quote
//!     .edit_dimensional(Category::WardrobeWood, id, |row, _| {
//!         row.set_length(6.0);
//!         row.set_height(7.0);
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! // 42 sqft of the first wardrobe finish
//! assert_eq!(quote.aggregate().category_sum(Category::WardrobeWood), 42.0 * 1350.0);
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::aggregate::{AggregateState, ServicesTotals};
use crate::catalog::{Catalog, SectionCatalog};
use crate::category::{Category, RowKind, Section};
use crate::collection::{CategoryTotals, Propagation, RowCollection};
use crate::errors::{QuoteError, QuoteResult};
use crate::rows::{AttributeRow, DimensionalRow, RowId};

/// Quote header information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteMetadata {
    /// Unique quote identifier
    pub id: Uuid,

    /// Customer the quote is prepared for
    pub customer: String,

    /// When the quote was created
    pub created: DateTime<Utc>,

    /// When the quote was last modified
    pub modified: DateTime<Utc>,
}

impl QuoteMetadata {
    fn new(customer: String) -> Self {
        let now = Utc::now();
        QuoteMetadata {
            id: Uuid::new_v4(),
            customer,
            created: now,
            modified: now,
        }
    }
}

/// Wood and accessory rows of one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionRows {
    pub wood: RowCollection<DimensionalRow>,
    pub accessories: RowCollection<AttributeRow>,
}

impl SectionRows {
    fn new(section: Section) -> Self {
        SectionRows {
            wood: RowCollection::new(section.wood()),
            accessories: RowCollection::new(section.accessories()),
        }
    }
}

/// A quote in progress.
#[derive(Debug, Clone)]
pub struct Quote {
    pub meta: QuoteMetadata,
    catalog: Arc<Catalog>,
    wardrobe: SectionRows,
    kitchen: SectionRows,
    aggregate: AggregateState,
}

impl Quote {
    /// Create an empty quote priced against `catalog`.
    pub fn new(catalog: impl Into<Arc<Catalog>>, customer: impl Into<String>) -> Self {
        Quote {
            meta: QuoteMetadata::new(customer.into()),
            catalog: catalog.into(),
            wardrobe: SectionRows::new(Section::Wardrobe),
            kitchen: SectionRows::new(Section::Kitchen),
            aggregate: AggregateState::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn aggregate(&self) -> &AggregateState {
        &self.aggregate
    }

    pub fn grand_total(&self) -> f64 {
        self.aggregate.grand_total()
    }

    pub fn section(&self, section: Section) -> &SectionRows {
        match section {
            Section::Wardrobe => &self.wardrobe,
            Section::Kitchen => &self.kitchen,
        }
    }

    fn section_mut(&mut self, section: Section) -> &mut SectionRows {
        match section {
            Section::Wardrobe => &mut self.wardrobe,
            Section::Kitchen => &mut self.kitchen,
        }
    }

    /// Totals map of one category.
    pub fn category_totals(&self, category: Category) -> &CategoryTotals {
        let rows = self.section(category.section());
        match category.kind() {
            RowKind::Dimensional => rows.wood.totals(),
            RowKind::Attribute => rows.accessories.totals(),
        }
    }

    /// Append a default row to a category. Returns its id.
    pub fn add_row(&mut self, category: Category) -> RowId {
        let section = category.section();
        let catalog = self.catalog.section(section);
        let rows = match section {
            Section::Wardrobe => &mut self.wardrobe,
            Section::Kitchen => &mut self.kitchen,
        };
        let (id, sum) = match category.kind() {
            RowKind::Dimensional => (rows.wood.add(catalog), rows.wood.category_sum()),
            RowKind::Attribute => (rows.accessories.add(catalog), rows.accessories.category_sum()),
        };
        self.store_sum(category, sum);
        id
    }

    /// Remove a row. Returns `false` if no row had that id.
    pub fn remove_row(&mut self, category: Category, id: RowId) -> bool {
        let rows = self.section_mut(category.section());
        let (removed, sum) = match category.kind() {
            RowKind::Dimensional => (rows.wood.remove(id).is_some(), rows.wood.category_sum()),
            RowKind::Attribute => (rows.accessories.remove(id).is_some(), rows.accessories.category_sum()),
        };
        if removed {
            self.store_sum(category, sum);
        }
        removed
    }

    /// Report a row total directly, bypassing the row's own inputs.
    pub fn report_total(&mut self, category: Category, id: RowId, total: f64) -> Propagation {
        let rows = self.section_mut(category.section());
        let propagation = match category.kind() {
            RowKind::Dimensional => rows.wood.report_total(id, total),
            RowKind::Attribute => rows.accessories.report_total(id, total),
        };
        self.apply(category, propagation);
        propagation
    }

    /// Edit a dimension-priced row.
    ///
    /// The closure receives the row and the section catalog. A missing id is
    /// not an error; it yields [`Propagation::NotFound`].
    pub fn edit_dimensional<F>(&mut self, category: Category, id: RowId, edit: F) -> QuoteResult<Propagation>
    where
        F: FnOnce(&mut DimensionalRow, &SectionCatalog) -> QuoteResult<()>,
    {
        ensure_kind(category, RowKind::Dimensional)?;
        let section = category.section();
        let catalog = self.catalog.section(section);
        let rows = match section {
            Section::Wardrobe => &mut self.wardrobe.wood,
            Section::Kitchen => &mut self.kitchen.wood,
        };
        let outcome = rows.edit(id, |row| edit(row, catalog));
        self.finish_edit(category, id, outcome)
    }

    /// Edit an attribute-priced row. See [`Quote::edit_dimensional`].
    pub fn edit_attribute<F>(&mut self, category: Category, id: RowId, edit: F) -> QuoteResult<Propagation>
    where
        F: FnOnce(&mut AttributeRow, &SectionCatalog) -> QuoteResult<()>,
    {
        ensure_kind(category, RowKind::Attribute)?;
        let section = category.section();
        let catalog = self.catalog.section(section);
        let rows = match section {
            Section::Wardrobe => &mut self.wardrobe.accessories,
            Section::Kitchen => &mut self.kitchen.accessories,
        };
        let outcome = rows.edit(id, |row| edit(row, catalog));
        self.finish_edit(category, id, outcome)
    }

    /// Replace the services totals.
    pub fn set_services(&mut self, services: ServicesTotals) -> bool {
        let changed = self.aggregate.set_services(services);
        if changed {
            self.touch();
        }
        changed
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    fn finish_edit(
        &mut self,
        category: Category,
        id: RowId,
        outcome: Option<(QuoteResult<()>, Propagation)>,
    ) -> QuoteResult<Propagation> {
        let Some((result, propagation)) = outcome else {
            debug!(%category, id, "edit ignored, row not found");
            return Ok(Propagation::NotFound);
        };
        self.apply(category, propagation);
        result?;
        Ok(propagation)
    }

    fn apply(&mut self, category: Category, propagation: Propagation) {
        if let Some(sum) = propagation.category_sum() {
            self.store_sum(category, sum);
        }
    }

    fn store_sum(&mut self, category: Category, sum: f64) {
        if self.aggregate.set_category_sum(category, sum) {
            debug!(%category, sum, grand_total = self.aggregate.grand_total(), "category sum changed");
        }
        self.touch();
    }
}

fn ensure_kind(category: Category, expected: RowKind) -> QuoteResult<()> {
    let actual = category.kind();
    if actual == expected {
        Ok(())
    } else {
        Err(QuoteError::wrong_row_kind(category.code(), expected.name(), actual.name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{AccessoryCatalog, Finish, Variant};

    fn catalog() -> Catalog {
        let section = SectionCatalog {
            finishes: vec![Finish::new("Laminate", 10.0), Finish::new("Acrylic", 20.0)],
            accessories: AccessoryCatalog::new()
                .with_item("Handle", vec![Variant::new(Some("A"), Some("S"), 50.0)]),
        };
        Catalog {
            wardrobe: section.clone(),
            kitchen: section,
        }
    }

    fn sized(quote: &mut Quote, category: Category, id: RowId, length: f64, height: f64) -> Propagation {
        quote
            .edit_dimensional(category, id, |row, _| {
                row.set_length(length);
                row.set_height(height);
                Ok(())
            })
            .unwrap()
    }

    #[test]
    fn test_quote_creation() {
        let quote = Quote::new(catalog(), "Jane Customer");
        assert_eq!(quote.meta.customer, "Jane Customer");
        assert_eq!(quote.grand_total(), 0.0);
        assert!(quote.section(Section::Wardrobe).wood.is_empty());
    }

    #[test]
    fn test_edit_flows_into_aggregate() {
        let mut quote = Quote::new(catalog(), "C");
        let a = quote.add_row(Category::WardrobeWood);
        let b = quote.add_row(Category::WardrobeWood);

        sized(&mut quote, Category::WardrobeWood, a, 3.0, 4.0);
        sized(&mut quote, Category::WardrobeWood, b, 1.0, 2.0);
        assert_eq!(quote.aggregate().category_sum(Category::WardrobeWood), 140.0);

        quote
            .edit_dimensional(Category::WardrobeWood, b, |row, catalog| {
                row.select_finish_named(catalog, "Acrylic")
            })
            .unwrap();
        assert_eq!(quote.aggregate().category_sum(Category::WardrobeWood), 160.0);
        assert_eq!(quote.grand_total(), 160.0);
    }

    #[test]
    fn test_remove_updates_sum() {
        let mut quote = Quote::new(catalog(), "C");
        let id = quote.add_row(Category::KitchenWood);
        sized(&mut quote, Category::KitchenWood, id, 3.0, 4.0);
        assert_eq!(quote.aggregate().category_sum(Category::KitchenWood), 120.0);

        assert!(quote.remove_row(Category::KitchenWood, id));
        assert_eq!(quote.aggregate().category_sum(Category::KitchenWood), 0.0);
        assert!(quote.category_totals(Category::KitchenWood).is_empty());
        assert!(!quote.remove_row(Category::KitchenWood, id));
    }

    #[test]
    fn test_duplicate_report_does_not_recompute() {
        let mut quote = Quote::new(catalog(), "C");
        let id = quote.add_row(Category::WardrobeAccessories);

        let first = quote.report_total(Category::WardrobeAccessories, id, 90.0);
        assert_eq!(first, Propagation::Updated { category_sum: 90.0 });
        let revision = quote.aggregate().revision();

        let second = quote.report_total(Category::WardrobeAccessories, id, 90.0);
        assert_eq!(second, Propagation::Unchanged);
        assert_eq!(quote.aggregate().revision(), revision);
        assert_eq!(quote.aggregate().category_sum(Category::WardrobeAccessories), 90.0);
    }

    #[test]
    fn test_non_finite_report_matches_aggregate() {
        let mut quote = Quote::new(catalog(), "C");
        let kept = quote.add_row(Category::WardrobeAccessories);
        let bad = quote.add_row(Category::WardrobeAccessories);
        quote.report_total(Category::WardrobeAccessories, kept, 90.0);
        let revision = quote.aggregate().revision();

        for _ in 0..2 {
            let p = quote.report_total(Category::WardrobeAccessories, bad, f64::NAN);
            assert_eq!(p, Propagation::Unchanged);
        }
        assert_eq!(quote.aggregate().revision(), revision);
        assert_eq!(quote.category_totals(Category::WardrobeAccessories).sum(), 90.0);
        assert_eq!(quote.aggregate().category_sum(Category::WardrobeAccessories), 90.0);
        assert_eq!(quote.grand_total(), 90.0);
    }

    #[test]
    fn test_adding_rows_does_not_recompute() {
        let mut quote = Quote::new(catalog(), "C");
        quote.add_row(Category::WardrobeWood);
        quote.add_row(Category::KitchenAccessories);
        assert_eq!(quote.aggregate().revision(), 0);
    }

    #[test]
    fn test_attribute_edit() {
        let mut quote = Quote::new(catalog(), "C");
        let id = quote.add_row(Category::KitchenAccessories);
        let propagation = quote
            .edit_attribute(Category::KitchenAccessories, id, |row, _| {
                row.set_quantity(3.0);
                Ok(())
            })
            .unwrap();
        assert_eq!(propagation, Propagation::Updated { category_sum: 150.0 });

        let propagation = quote
            .edit_attribute(Category::KitchenAccessories, id, |row, catalog| {
                row.select_brand(catalog, "Z");
                Ok(())
            })
            .unwrap();
        assert_eq!(propagation, Propagation::Updated { category_sum: 0.0 });
        assert_eq!(quote.aggregate().section_total(Section::Kitchen), 0.0);
    }

    #[test]
    fn test_wrong_kind_is_rejected() {
        let mut quote = Quote::new(catalog(), "C");
        let id = quote.add_row(Category::WardrobeWood);
        let err = quote
            .edit_attribute(Category::WardrobeWood, id, |row, _| {
                row.set_quantity(1.0);
                Ok(())
            })
            .unwrap_err();
        assert_eq!(err.error_code(), "WRONG_ROW_KIND");
    }

    #[test]
    fn test_failed_edit_surfaces_error() {
        let mut quote = Quote::new(catalog(), "C");
        let id = quote.add_row(Category::WardrobeWood);
        let err = quote
            .edit_dimensional(Category::WardrobeWood, id, |row, catalog| {
                row.select_finish_named(catalog, "Teak")
            })
            .unwrap_err();
        assert_eq!(err.error_code(), "CATALOG_ITEM_NOT_FOUND");
    }

    #[test]
    fn test_stale_edit_is_noop() {
        let mut quote = Quote::new(catalog(), "C");
        let id = quote.add_row(Category::WardrobeWood);
        quote.remove_row(Category::WardrobeWood, id);
        assert_eq!(sized(&mut quote, Category::WardrobeWood, id, 3.0, 4.0), Propagation::NotFound);
        assert_eq!(
            quote.report_total(Category::WardrobeWood, id, 10.0),
            Propagation::NotFound
        );
        assert_eq!(quote.grand_total(), 0.0);
    }

    #[test]
    fn test_services_in_grand_total() {
        let mut quote = Quote::new(catalog(), "C");
        let id = quote.add_row(Category::WardrobeWood);
        sized(&mut quote, Category::WardrobeWood, id, 3.0, 4.0);
        assert!(quote.set_services(ServicesTotals {
            without_gst: 300.0,
            with_gst: 330.0,
            discount_total: 30.0,
            handling_fee: 20.0,
        }));
        assert_eq!(quote.grand_total(), 120.0 + 330.0 + 20.0 - 30.0);
    }

    #[test]
    fn test_builtin_catalog_quote() {
        let mut quote = Quote::new(Catalog::builtin().clone(), "C");
        let id = quote.add_row(Category::WardrobeAccessories);
        let row = quote.section(Section::Wardrobe).accessories.get(id).unwrap();
        assert_eq!(row.selected_name(), "Handle");
        assert_eq!(row.unit_price(), Some(450.0));
    }
}
