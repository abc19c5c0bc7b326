//! Attribute-priced rows (hardware and fittings).

use serde::{Deserialize, Serialize};

use super::{PricedRow, ReportGuard};
use crate::catalog::{SectionCatalog, VariantOptions};
use crate::category::RowKind;
use crate::errors::{QuoteError, QuoteResult};
use crate::numeric::{coerce_input, non_negative, sanitize};

/// A row priced by quantity times a catalog variant's price.
///
/// The unit price is resolved whenever a selection changes. An item whose
/// selections match no variant has no unit price and totals 0.
///
/// # Example
///
/// ```rust
/// use quote_core::catalog::{AccessoryCatalog, SectionCatalog, Variant};
/// use quote_core::rows::{AttributeRow, PricedRow};
///
/// let catalog = SectionCatalog {
///     finishes: vec![],
///     accessories: AccessoryCatalog::new()
///         .with_item("Handle", vec![Variant::new(Some("A"), Some("S"), 50.0)]),
/// };
///
/// let mut row = AttributeRow::with_defaults(&catalog);
/// row.set_quantity(3.0);
/// assert_eq!(row.unit_price(), Some(50.0));
/// assert_eq!(row.total(), 150.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeRow {
    selected_name: String,
    options: VariantOptions,
    selected_brand: Option<String>,
    selected_size: Option<String>,
    quantity: f64,
    unit_price: Option<f64>,
    #[serde(skip)]
    guard: ReportGuard,
}

impl AttributeRow {
    pub fn selected_name(&self) -> &str {
        &self.selected_name
    }

    pub fn brand_options(&self) -> &[String] {
        &self.options.brands
    }

    pub fn size_options(&self) -> &[String] {
        &self.options.sizes
    }

    pub fn selected_brand(&self) -> Option<&str> {
        self.selected_brand.as_deref()
    }

    pub fn selected_size(&self) -> Option<&str> {
        self.selected_size.as_deref()
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn unit_price(&self) -> Option<f64> {
        self.unit_price
    }

    /// Switch to another catalog item.
    ///
    /// Option lists are rebuilt for the new name and both selections reset
    /// to the first option before the price is resolved again.
    pub fn select_name(&mut self, catalog: &SectionCatalog, name: &str) -> QuoteResult<()> {
        if !catalog.accessories.contains(name) {
            return Err(QuoteError::catalog_item_not_found(name));
        }
        self.apply_name(catalog, name);
        Ok(())
    }

    pub fn select_brand(&mut self, catalog: &SectionCatalog, brand: &str) {
        self.selected_brand = Some(brand.to_string());
        self.refresh_price(catalog);
    }

    pub fn select_size(&mut self, catalog: &SectionCatalog, size: &str) {
        self.selected_size = Some(size.to_string());
        self.refresh_price(catalog);
    }

    /// Set quantity, clamped to `>= 0`.
    pub fn set_quantity(&mut self, quantity: f64) {
        self.quantity = non_negative(quantity);
    }

    /// Set quantity from raw text; unparseable text becomes 0.
    pub fn set_quantity_input(&mut self, raw: &str) {
        self.quantity = non_negative(coerce_input(raw));
    }

    fn apply_name(&mut self, catalog: &SectionCatalog, name: &str) {
        self.selected_name = name.to_string();
        self.options = catalog.accessories.options_for(name);
        self.selected_brand = self.options.default_brand();
        self.selected_size = self.options.default_size();
        self.refresh_price(catalog);
    }

    fn refresh_price(&mut self, catalog: &SectionCatalog) {
        self.unit_price = catalog.accessories.resolve_price(
            &self.selected_name,
            self.selected_brand.as_deref(),
            self.selected_size.as_deref(),
        );
    }
}

impl PricedRow for AttributeRow {
    const KIND: RowKind = RowKind::Attribute;

    fn with_defaults(catalog: &SectionCatalog) -> Self {
        let mut row = AttributeRow::default();
        if let Some(first) = catalog.accessories.first_item() {
            row.apply_name(catalog, first);
        }
        row
    }

    fn total(&self) -> f64 {
        sanitize(self.unit_price.unwrap_or(0.0) * self.quantity)
    }

    fn report_guard(&mut self) -> &mut ReportGuard {
        &mut self.guard
    }
}
