//! # Row Collection
//!
//! Ordered line items of one category plus the category's id -> total map.
//!
//! ## Invariants
//!
//! - The ids in [`CategoryTotals`] are exactly the ids of the present rows.
//!   `add` inserts both, `remove` deletes both.
//! - A new id is `max(existing) + 1`, or 1 for an empty collection.
//! - [`RowCollection::report_total`] stores a total only when it differs
//!   from the stored one, and only then reports a new category sum.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::catalog::Catalog;
//! use quote_core::category::Category;
//! use quote_core::collection::{Propagation, RowCollection};
//! use quote_core::rows::DimensionalRow;
//!
//! let catalog = &Catalog::builtin().wardrobe;
//! let mut rows: RowCollection<DimensionalRow> = RowCollection::new(Category::WardrobeWood);
//!
//! let id = rows.add(catalog);
//! assert_eq!(id, 1);
//!
//! let (_, propagation) = rows
//!     .edit(id, |row| {
//!         row.set_length(2.0);
//!         row.set_height(1.0);
//!     })
//!     .unwrap();
//! assert!(matches!(propagation, Propagation::Updated { .. }));
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::catalog::SectionCatalog;
use crate::category::Category;
use crate::numeric::sanitize;
use crate::rows::{PricedRow, RowId};

/// Last reported total of every row in a category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryTotals(BTreeMap<RowId, f64>);

impl CategoryTotals {
    pub fn get(&self, id: RowId) -> Option<f64> {
        self.0.get(&id).copied()
    }

    pub fn contains(&self, id: RowId) -> bool {
        self.0.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = RowId> + '_ {
        self.0.keys().copied()
    }

    /// Sum of all stored totals, recomputed on every call. An overflowing
    /// sum is `0.0`, matching what the aggregate stores.
    pub fn sum(&self) -> f64 {
        sanitize(self.0.values().sum())
    }
}

/// What a reported total caused downstream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Propagation {
    /// No row with that id (e.g., a callback firing after removal)
    NotFound,
    /// Total equal to the stored or last sent value; nothing recomputed
    Unchanged,
    /// Stored total changed; the category sum was recomputed
    Updated { category_sum: f64 },
}

impl Propagation {
    pub fn category_sum(&self) -> Option<f64> {
        match self {
            Propagation::Updated { category_sum } => Some(*category_sum),
            _ => None,
        }
    }
}

/// One line item with its id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row<R> {
    pub id: RowId,
    pub item: R,
}

/// Ordered line items of a single category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowCollection<R> {
    category: Category,
    rows: Vec<Row<R>>,
    totals: CategoryTotals,
}

impl<R: PricedRow> RowCollection<R> {
    pub fn new(category: Category) -> Self {
        RowCollection {
            category,
            rows: Vec::new(),
            totals: CategoryTotals::default(),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn rows(&self) -> &[Row<R>] {
        &self.rows
    }

    pub fn get(&self, id: RowId) -> Option<&R> {
        self.rows.iter().find(|r| r.id == id).map(|r| &r.item)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn totals(&self) -> &CategoryTotals {
        &self.totals
    }

    /// Sum of the category's stored totals.
    pub fn category_sum(&self) -> f64 {
        self.totals.sum()
    }

    /// Id the next `add` will assign.
    pub fn next_id(&self) -> RowId {
        self.rows.iter().map(|r| r.id).max().map_or(1, |max| max + 1)
    }

    /// Append a row with default inputs and a zero total entry.
    ///
    /// The new row's initial total is reported right away, the way a freshly
    /// shown row would report on first display. Defaults always total 0, so
    /// this never changes the category sum.
    pub fn add(&mut self, catalog: &SectionCatalog) -> RowId {
        let id = self.next_id();
        let mut item = R::with_defaults(catalog);
        let initial = item.take_report();

        self.rows.push(Row { id, item });
        self.totals.0.insert(id, 0.0);
        debug!(category = %self.category, id, "row added");

        if let Some(total) = initial {
            self.report_total(id, total);
        }
        id
    }

    /// Remove a row and its totals entry.
    ///
    /// Returns the removed item, or `None` if the id is not present.
    pub fn remove(&mut self, id: RowId) -> Option<R> {
        let Some(index) = self.rows.iter().position(|r| r.id == id) else {
            debug!(category = %self.category, id, "remove ignored, row not found");
            return None;
        };
        let row = self.rows.remove(index);
        self.totals.0.remove(&id);
        debug!(category = %self.category, id, sum = self.totals.sum(), "row removed");
        Some(row.item)
    }

    /// Store a row's total if it differs from the stored value.
    ///
    /// A non-finite total is stored as `0.0`.
    pub fn report_total(&mut self, id: RowId, total: f64) -> Propagation {
        let total = sanitize(total);
        let Some(stored) = self.totals.0.get_mut(&id) else {
            debug!(category = %self.category, id, total, "report ignored, row not found");
            return Propagation::NotFound;
        };
        if *stored == total {
            trace!(category = %self.category, id, total, "report unchanged");
            return Propagation::Unchanged;
        }
        *stored = total;
        let category_sum = self.totals.sum();
        debug!(category = %self.category, id, total, category_sum, "total updated");
        Propagation::Updated { category_sum }
    }

    /// Apply an edit to one row and propagate its new total.
    ///
    /// Returns `None` when the id is not present, otherwise the edit's own
    /// return value with the propagation result.
    pub fn edit<T, F>(&mut self, id: RowId, edit: F) -> Option<(T, Propagation)>
    where
        F: FnOnce(&mut R) -> T,
    {
        let row = self.rows.iter_mut().find(|r| r.id == id)?;
        let output = edit(&mut row.item);
        let propagation = match row.item.take_report() {
            Some(total) => self.report_total(id, total),
            None => Propagation::Unchanged,
        };
        Some((output, propagation))
    }
}
