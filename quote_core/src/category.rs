//! Quote sections and line-item categories.
//!
//! A quote has two sections (wardrobe, kitchen), each with a wooden category
//! priced by area and an accessories category priced by catalog attributes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::QuoteError;

/// Top-level grouping of a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    Wardrobe,
    Kitchen,
}

impl Section {
    pub const ALL: [Section; 2] = [Section::Wardrobe, Section::Kitchen];

    pub fn code(&self) -> &'static str {
        match self {
            Section::Wardrobe => "wardrobe",
            Section::Kitchen => "kitchen",
        }
    }

    /// Label used in summaries and exports
    pub fn label(&self) -> &'static str {
        match self {
            Section::Wardrobe => "Wardrobe",
            Section::Kitchen => "Kitchen",
        }
    }

    pub fn wood(&self) -> Category {
        match self {
            Section::Wardrobe => Category::WardrobeWood,
            Section::Kitchen => Category::KitchenWood,
        }
    }

    pub fn accessories(&self) -> Category {
        match self {
            Section::Wardrobe => Category::WardrobeAccessories,
            Section::Kitchen => Category::KitchenAccessories,
        }
    }
}

/// How rows in a category derive their total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RowKind {
    /// Area (length x height) times a finish cost
    Dimensional,
    /// Quantity times a catalog variant price
    Attribute,
}

impl RowKind {
    pub fn name(&self) -> &'static str {
        match self {
            RowKind::Dimensional => "dimensional",
            RowKind::Attribute => "attribute",
        }
    }
}

/// A group of line items with its own running total.
///
/// # Example
/// ```
/// use quote_core::category::{Category, RowKind, Section};
///
/// let cat: Category = "kitchen-acc".parse().unwrap();
/// assert_eq!(cat, Category::KitchenAccessories);
/// assert_eq!(cat.section(), Section::Kitchen);
/// assert_eq!(cat.kind(), RowKind::Attribute);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    WardrobeWood,
    WardrobeAccessories,
    KitchenWood,
    KitchenAccessories,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::WardrobeWood,
        Category::WardrobeAccessories,
        Category::KitchenWood,
        Category::KitchenAccessories,
    ];

    /// Short token accepted on the command line
    pub fn code(&self) -> &'static str {
        match self {
            Category::WardrobeWood => "wardrobe-wood",
            Category::WardrobeAccessories => "wardrobe-acc",
            Category::KitchenWood => "kitchen-wood",
            Category::KitchenAccessories => "kitchen-acc",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Category::WardrobeWood => "Wardrobe Wooden",
            Category::WardrobeAccessories => "Wardrobe Accessories",
            Category::KitchenWood => "Kitchen Wooden",
            Category::KitchenAccessories => "Kitchen Accessories",
        }
    }

    pub fn section(&self) -> Section {
        match self {
            Category::WardrobeWood | Category::WardrobeAccessories => Section::Wardrobe,
            Category::KitchenWood | Category::KitchenAccessories => Section::Kitchen,
        }
    }

    pub fn kind(&self) -> RowKind {
        match self {
            Category::WardrobeWood | Category::KitchenWood => RowKind::Dimensional,
            Category::WardrobeAccessories | Category::KitchenAccessories => RowKind::Attribute,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Category {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wardrobe-wood" | "wardrobe-wooden" => Ok(Category::WardrobeWood),
            "wardrobe-acc" | "wardrobe-accessories" => Ok(Category::WardrobeAccessories),
            "kitchen-wood" | "kitchen-wooden" => Ok(Category::KitchenWood),
            "kitchen-acc" | "kitchen-accessories" => Ok(Category::KitchenAccessories),
            _ => Err(QuoteError::invalid_input(
                "category",
                s,
                "Expected wardrobe-wood, wardrobe-acc, kitchen-wood or kitchen-acc",
            )),
        }
    }
}
