//! # Catalog
//!
//! Static priced reference data. Each section (wardrobe, kitchen) carries:
//!
//! - **Finishes**: `[{ name, value }]`, the per-square-foot cost list offered
//!   to dimension-priced rows
//! - **Accessories**: `itemName -> [{ brand?, size?, price }]`, the variant
//!   table offered to attribute-priced rows
//!
//! The catalog is read-only to the rest of the crate. Rows receive it by
//! reference when a selection changes and never hold on to it.
//!
//! ## JSON Format
//!
//! ```json
//! {
//!   "wardrobe": {
//!     "finishes": [{ "name": "Laminate", "value": 1350 }],
//!     "accessories": {
//!       "Handle": [{ "brand": "A", "size": "S", "price": "50" }]
//!     }
//!   },
//!   "kitchen": { "finishes": [], "accessories": {} }
//! }
//! ```
//!
//! Prices may be JSON numbers or numeric strings. Item order in the file is
//! preserved and decides which item a new row starts on.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::catalog::Catalog;
//!
//! let catalog = Catalog::builtin();
//! let handles = catalog.wardrobe.accessories.options_for("Handle");
//! assert!(!handles.brands.is_empty());
//! ```

pub mod accessories;
pub mod builtin;

pub use accessories::{AccessoryCatalog, Variant, VariantOptions};

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::category::Section;
use crate::errors::{QuoteError, QuoteResult};

/// A selectable finish with its cost per unit of area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finish {
    /// Display name (e.g., "Laminate")
    pub name: String,
    /// Cost per square foot
    pub value: f64,
}

impl Finish {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Finish {
            name: name.into(),
            value,
        }
    }
}

/// Price data for one section of a quote.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionCatalog {
    /// Finishes for dimension-priced rows, in display order
    #[serde(default)]
    pub finishes: Vec<Finish>,

    /// Accessory variants for attribute-priced rows
    #[serde(default)]
    pub accessories: AccessoryCatalog,
}

impl SectionCatalog {
    /// Look up a finish by exact name.
    pub fn finish(&self, name: &str) -> Option<&Finish> {
        self.finishes.iter().find(|f| f.name == name)
    }

    /// Cost a new dimension-priced row starts with (first finish, or 0).
    pub fn default_unit_cost(&self) -> f64 {
        self.finishes.first().map(|f| f.value).unwrap_or(0.0)
    }

    fn validate(&self, section: Section) -> QuoteResult<()> {
        for finish in &self.finishes {
            if !finish.value.is_finite() || finish.value < 0.0 {
                return Err(QuoteError::invalid_input(
                    format!("{}.finishes.{}", section.code(), finish.name),
                    finish.value.to_string(),
                    "Finish cost must be a non-negative number",
                ));
            }
        }
        self.accessories.validate(section)
    }
}

/// Complete catalog for all quote sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub wardrobe: SectionCatalog,
    #[serde(default)]
    pub kitchen: SectionCatalog,
}

impl Catalog {
    /// The catalog compiled into the crate.
    pub fn builtin() -> &'static Catalog {
        &builtin::BUILTIN_CATALOG
    }

    /// Price data for one section.
    pub fn section(&self, section: Section) -> &SectionCatalog {
        match section {
            Section::Wardrobe => &self.wardrobe,
            Section::Kitchen => &self.kitchen,
        }
    }

    /// Parse and validate a catalog from JSON text.
    pub fn from_json_str(json: &str) -> QuoteResult<Self> {
        let catalog: Catalog = serde_json::from_str(json).map_err(|e| QuoteError::SerializationError {
            reason: format!("Invalid catalog JSON: {}", e),
        })?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load and validate a catalog file.
    ///
    /// # Returns
    ///
    /// * `Ok(Catalog)` - Successfully loaded catalog
    /// * `Err(QuoteError::FileError)` - I/O error
    /// * `Err(QuoteError::SerializationError)` - Invalid JSON
    /// * `Err(QuoteError::InvalidInput)` - Negative or non-finite price
    pub fn load(path: &Path) -> QuoteResult<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| QuoteError::file_error("read", path.display().to_string(), e.to_string()))?;
        let catalog = Self::from_json_str(&contents)?;
        debug!(
            path = %path.display(),
            wardrobe_items = catalog.wardrobe.accessories.len(),
            kitchen_items = catalog.kitchen.accessories.len(),
            "loaded catalog"
        );
        Ok(catalog)
    }

    /// Reject prices a quote cannot be built from.
    pub fn validate(&self) -> QuoteResult<()> {
        for section in Section::ALL {
            let data = self.section(section);
            data.validate(section)?;
            if data.finishes.is_empty() {
                warn!(section = section.code(), "catalog has no finishes; wood rows will cost 0");
            }
        }
        Ok(())
    }
}
