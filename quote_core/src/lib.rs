//! # quote_core - Furniture Quoting Engine
//!
//! `quote_core` prices wardrobe and kitchen work from a catalog, keeps running
//! totals as rows are added, edited and removed, and exports a summary
//! workbook. All data types are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Owned state**: one [`Quote`] owns rows and totals; no globals
//! - **Bounded propagation**: a row reports upward only when its total moves,
//!   and a category stores a total only when it differs
//! - **Forgiving input**: bad numbers become 0, unknown prices total 0
//! - **Rich Errors**: structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use quote_core::{Catalog, Category, Quote};
//!
//! let mut quote = Quote::new(Catalog::builtin().clone(), "Client");
//! let id = quote.add_row(Category::WardrobeAccessories);
//! quote
//!     .edit_attribute(Category::WardrobeAccessories, id, |row, _| {
//!         row.set_quantity(2.0);
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! let json = serde_json::to_string_pretty(quote.aggregate()).unwrap();
//! assert!(json.contains("wardrobe_accessories"));
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - Finishes, accessory variants and price resolution
//! - [`category`] - Sections and categories
//! - [`rows`] - Dimension- and attribute-priced line items
//! - [`collection`] - Per-category rows and id -> total map
//! - [`aggregate`] - Category sums, services and grand total
//! - [`quote`] - The owning quote object
//! - [`export`] - Summary table and `.xlsx` export
//! - [`numeric`] - Input coercion and rounding
//! - [`errors`] - Structured error types

pub mod aggregate;
pub mod catalog;
pub mod category;
pub mod collection;
pub mod errors;
pub mod export;
pub mod numeric;
pub mod quote;
pub mod rows;

// Re-export commonly used types at crate root for convenience
pub use aggregate::{AggregateState, ServicesTotals};
pub use catalog::Catalog;
pub use category::{Category, Section};
pub use collection::Propagation;
pub use errors::{QuoteError, QuoteResult};
pub use export::{build_summary_table, export_summary, serialize_to_spreadsheet};
pub use quote::Quote;
