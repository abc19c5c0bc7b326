//! Accessory variants and price resolution.
//!
//! An accessory name maps to one or more variants. Whether a variant is
//! picked by brand, by size, by both or by neither depends on which of
//! those fields the name's variants define at all.

use indexmap::IndexMap;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::category::Section;
use crate::errors::{QuoteError, QuoteResult};

/// One priced variant of an accessory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// Unit price; accepts a JSON number or a numeric string
    #[serde(deserialize_with = "deserialize_price")]
    pub price: f64,
}

impl Variant {
    pub fn new(brand: Option<&str>, size: Option<&str>, price: f64) -> Self {
        Variant {
            brand: brand.map(str::to_string),
            size: size.map(str::to_string),
            price,
        }
    }
}

fn deserialize_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPrice {
        Number(f64),
        Text(String),
    }

    match RawPrice::deserialize(deserializer)? {
        RawPrice::Number(n) => Ok(n),
        RawPrice::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| de::Error::custom(format!("invalid price '{}'", s))),
    }
}

/// Distinct brand and size values defined among a name's variants.
///
/// Order is first-seen order in the catalog. A list is empty when no
/// variant of the name defines that field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantOptions {
    pub brands: Vec<String>,
    pub sizes: Vec<String>,
}

impl VariantOptions {
    /// Collect options from a variant list.
    pub fn from_variants(variants: &[Variant]) -> Self {
        let mut options = VariantOptions::default();
        for variant in variants {
            if let Some(brand) = &variant.brand {
                if !options.brands.contains(brand) {
                    options.brands.push(brand.clone());
                }
            }
            if let Some(size) = &variant.size {
                if !options.sizes.contains(size) {
                    options.sizes.push(size.clone());
                }
            }
        }
        options
    }

    pub fn default_brand(&self) -> Option<String> {
        self.brands.first().cloned()
    }

    pub fn default_size(&self) -> Option<String> {
        self.sizes.first().cloned()
    }
}

/// Accessory name to variant list, in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessoryCatalog(IndexMap<String, Vec<Variant>>);

impl AccessoryCatalog {
    pub fn new() -> Self {
        AccessoryCatalog(IndexMap::new())
    }

    /// Builder-style insert, used for the built-in data and in tests.
    pub fn with_item(mut self, name: impl Into<String>, variants: Vec<Variant>) -> Self {
        self.0.insert(name.into(), variants);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Item names in catalog order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// The item a new attribute-priced row starts on.
    pub fn first_item(&self) -> Option<&str> {
        self.0.keys().next().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn variants(&self, name: &str) -> Option<&[Variant]> {
        self.0.get(name).map(Vec::as_slice)
    }

    /// Brand and size option lists for an item. Unknown names give empty lists.
    pub fn options_for(&self, name: &str) -> VariantOptions {
        self.variants(name)
            .map(VariantOptions::from_variants)
            .unwrap_or_default()
    }

    /// Resolve the unit price of an item for the given selections.
    ///
    /// | brands defined | sizes defined | rule                                   |
    /// |----------------|---------------|----------------------------------------|
    /// | no             | no            | sole variant's price, else none        |
    /// | yes            | yes           | variant matching brand and size        |
    /// | yes            | no            | variant matching brand                 |
    /// | no             | yes           | variant matching size                  |
    ///
    /// # Example
    ///
    /// ```rust
    /// use quote_core::catalog::{AccessoryCatalog, Variant};
    ///
    /// let catalog = AccessoryCatalog::new()
    ///     .with_item("Handle", vec![Variant::new(Some("A"), Some("S"), 50.0)]);
    ///
    /// assert_eq!(catalog.resolve_price("Handle", Some("A"), Some("S")), Some(50.0));
    /// assert_eq!(catalog.resolve_price("Handle", Some("B"), Some("S")), None);
    /// ```
    pub fn resolve_price(&self, name: &str, brand: Option<&str>, size: Option<&str>) -> Option<f64> {
        let variants = self.variants(name)?;
        let options = VariantOptions::from_variants(variants);

        let matched = match (options.brands.is_empty(), options.sizes.is_empty()) {
            (true, true) => {
                return match variants {
                    [only] => Some(only.price),
                    _ => None,
                };
            }
            (false, false) => variants
                .iter()
                .find(|v| v.brand.as_deref() == brand && v.size.as_deref() == size),
            (false, true) => variants.iter().find(|v| v.brand.as_deref() == brand),
            (true, false) => variants.iter().find(|v| v.size.as_deref() == size),
        };

        matched.map(|v| v.price)
    }

    pub(crate) fn validate(&self, section: Section) -> QuoteResult<()> {
        for (name, variants) in &self.0 {
            for variant in variants {
                if !variant.price.is_finite() || variant.price < 0.0 {
                    return Err(QuoteError::invalid_input(
                        format!("{}.accessories.{}", section.code(), name),
                        variant.price.to_string(),
                        "Price must be a non-negative number",
                    ));
                }
            }
        }
        Ok(())
    }
}
