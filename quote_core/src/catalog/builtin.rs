//! Built-in catalog.
//!
//! Used when no catalog file is configured. Finish values are per square
//! foot; accessory prices are per piece.

use once_cell::sync::Lazy;

use super::{AccessoryCatalog, Catalog, Finish, SectionCatalog, Variant};

pub(crate) static BUILTIN_CATALOG: Lazy<Catalog> = Lazy::new(|| Catalog {
    wardrobe: SectionCatalog {
        finishes: vec![
            Finish::new("Laminate", 1350.0),
            Finish::new("Acrylic", 1850.0),
            Finish::new("Veneer", 1650.0),
            Finish::new("PU Paint", 2200.0),
        ],
        accessories: AccessoryCatalog::new()
            .with_item(
                "Handle",
                vec![
                    Variant::new(Some("Hettich"), Some("96mm"), 450.0),
                    Variant::new(Some("Hettich"), Some("160mm"), 620.0),
                    Variant::new(Some("Hafele"), Some("96mm"), 390.0),
                    Variant::new(Some("Hafele"), Some("160mm"), 540.0),
                ],
            )
            .with_item(
                "Soft-close Hinge",
                vec![
                    Variant::new(Some("Hettich"), None, 310.0),
                    Variant::new(Some("Blum"), None, 480.0),
                    Variant::new(Some("Ebco"), None, 190.0),
                ],
            )
            .with_item(
                "Drawer Channel",
                vec![
                    Variant::new(None, Some("450mm"), 1250.0),
                    Variant::new(None, Some("500mm"), 1400.0),
                ],
            )
            .with_item("Wardrobe Light", vec![Variant::new(None, None, 2400.0)])
            .with_item("Pull-down Hanger", vec![Variant::new(Some("Hafele"), None, 8900.0)]),
    },
    kitchen: SectionCatalog {
        finishes: vec![
            Finish::new("Laminate", 1500.0),
            Finish::new("Acrylic", 2100.0),
            Finish::new("Glass", 2600.0),
        ],
        accessories: AccessoryCatalog::new()
            .with_item(
                "Tandem Box",
                vec![
                    Variant::new(Some("Blum"), Some("450mm"), 7800.0),
                    Variant::new(Some("Blum"), Some("500mm"), 8400.0),
                    Variant::new(Some("Hettich"), Some("450mm"), 6900.0),
                ],
            )
            .with_item(
                "Cutlery Tray",
                vec![
                    Variant::new(None, Some("600mm"), 1800.0),
                    Variant::new(None, Some("900mm"), 2300.0),
                ],
            )
            .with_item(
                "Corner Unit",
                vec![
                    Variant::new(Some("Hafele"), None, 14500.0),
                    Variant::new(Some("Ebco"), None, 9800.0),
                ],
            )
            .with_item("Bottle Pull-out", vec![Variant::new(None, None, 5600.0)]),
    },
});
