//! Dimension-priced rows (wooden carcass and shutter work).

use serde::{Deserialize, Serialize};

use super::{PricedRow, ReportGuard};
use crate::catalog::{Finish, SectionCatalog};
use crate::category::RowKind;
use crate::errors::{QuoteError, QuoteResult};
use crate::numeric::{coerce_input, round_half_up, sanitize};

/// A row priced by area.
///
/// Length and height are stored as entered. Only input that fails to parse
/// (or is not finite) becomes zero; negative values are kept.
///
/// # Example
///
/// ```rust
/// use quote_core::catalog::Finish;
/// use quote_core::rows::{DimensionalRow, PricedRow};
///
/// let mut row = DimensionalRow::default();
/// row.select_finish(&Finish::new("Laminate", 10.0));
/// row.set_length(3.0);
/// row.set_height(4.0);
/// assert_eq!(row.area(), 12.0);
/// assert_eq!(row.total(), 120.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DimensionalRow {
    /// Selected finish name, if any finish has been chosen
    finish: Option<String>,
    /// Cost per square foot
    unit_cost: f64,
    length: f64,
    height: f64,
    #[serde(skip)]
    guard: ReportGuard,
}

impl DimensionalRow {
    pub fn finish(&self) -> Option<&str> {
        self.finish.as_deref()
    }

    pub fn unit_cost(&self) -> f64 {
        self.unit_cost
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Area in square feet, rounded half-up to a whole number
    pub fn area(&self) -> f64 {
        round_half_up(self.length * self.height)
    }

    pub fn select_finish(&mut self, finish: &Finish) {
        self.finish = Some(finish.name.clone());
        self.unit_cost = finish.value;
    }

    /// Select a finish from the section catalog by name.
    pub fn select_finish_named(&mut self, catalog: &SectionCatalog, name: &str) -> QuoteResult<()> {
        let finish = catalog
            .finish(name)
            .ok_or_else(|| QuoteError::catalog_item_not_found(name))?;
        self.select_finish(finish);
        Ok(())
    }

    pub fn set_length(&mut self, length: f64) {
        self.length = sanitize(length);
    }

    pub fn set_height(&mut self, height: f64) {
        self.height = sanitize(height);
    }

    /// Set length from raw text; unparseable text becomes 0.
    pub fn set_length_input(&mut self, raw: &str) {
        self.length = coerce_input(raw);
    }

    /// Set height from raw text; unparseable text becomes 0.
    pub fn set_height_input(&mut self, raw: &str) {
        self.height = coerce_input(raw);
    }
}

impl PricedRow for DimensionalRow {
    const KIND: RowKind = RowKind::Dimensional;

    fn with_defaults(catalog: &SectionCatalog) -> Self {
        let mut row = DimensionalRow::default();
        if let Some(first) = catalog.finishes.first() {
            row.select_finish(first);
        }
        row
    }

    /// Overflowing products (huge dimensions, or infinite area at zero
    /// cost) give `0.0` rather than a non-finite total.
    fn total(&self) -> f64 {
        sanitize(round_half_up(self.area() * self.unit_cost))
    }

    fn report_guard(&mut self) -> &mut ReportGuard {
        &mut self.guard
    }
}
