//! # Line Items
//!
//! A line item owns its local inputs and derives a total from them. Two
//! variants exist:
//!
//! - [`DimensionalRow`] - `round(round(length * height) * unit_cost)`
//! - [`AttributeRow`] - `quantity * catalog price(name, brand?, size?)`
//!
//! ## Reporting
//!
//! After every edit a row offers its total upward through
//! [`PricedRow::take_report`]. The [`ReportGuard`] inside each row swallows
//! the report when the total equals the last value this row sent, so an edit
//! that does not move the total causes no upward traffic at all.
//!
//! ```rust
//! use quote_core::rows::ReportGuard;
//!
//! let mut guard = ReportGuard::default();
//! assert_eq!(guard.observe(120.0), Some(120.0));
//! assert_eq!(guard.observe(120.0), None);
//! assert_eq!(guard.observe(0.0), Some(0.0));
//! ```

pub mod attribute;
pub mod dimensional;

pub use attribute::AttributeRow;
pub use dimensional::DimensionalRow;

use serde::{Deserialize, Serialize};

use crate::catalog::SectionCatalog;
use crate::category::RowKind;

/// Row identifier, unique within one category.
pub type RowId = u32;

/// Remembers the last total a row sent upward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportGuard {
    last_sent: Option<f64>,
}

impl ReportGuard {
    /// Returns `Some(total)` when it differs from the last sent value and
    /// records it as sent; `None` otherwise.
    pub fn observe(&mut self, total: f64) -> Option<f64> {
        if self.last_sent == Some(total) {
            None
        } else {
            self.last_sent = Some(total);
            Some(total)
        }
    }

    pub fn last_sent(&self) -> Option<f64> {
        self.last_sent
    }
}

/// Behaviour shared by both line-item variants.
pub trait PricedRow {
    /// Variant tag, used to reject edits aimed at the wrong category
    const KIND: RowKind;

    /// Row in its initial state: first catalog option, zeroed inputs.
    fn with_defaults(catalog: &SectionCatalog) -> Self;

    /// Derived total from the current inputs.
    fn total(&self) -> f64;

    fn report_guard(&mut self) -> &mut ReportGuard;

    /// Total to send upward, if it changed since the last report.
    fn take_report(&mut self) -> Option<f64> {
        let total = self.total();
        self.report_guard().observe(total)
    }
}
