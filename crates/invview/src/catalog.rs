#![forbid(unsafe_code)]

//! Static data: the mock inventory batch and the declared category filters.

use std::num::NonZeroU32;

use crate::item::{Item, Rarity};

/// Sentinel filter id that matches every item.
pub const ALL_FILTER: &str = "all";

/// A selectable category filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterDef {
    /// Category id; equals an item's category label, or [`ALL_FILTER`].
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
}

/// Filters offered by the screen, in display order.
pub const FILTERS: &[FilterDef] = &[
    FilterDef {
        id: ALL_FILTER,
        label: "All",
        icon: "▦",
    },
    FilterDef {
        id: "Hat",
        label: "Hats",
        icon: "✦",
    },
    FilterDef {
        id: "Shirt",
        label: "Clothing",
        icon: "◇",
    },
    FilterDef {
        id: "Gear",
        label: "Gear",
        icon: "⚔",
    },
];

/// Whether `id` names one of [`FILTERS`].
pub fn is_declared_filter(id: &str) -> bool {
    position_of(id).is_some()
}

/// Index of `id` in [`FILTERS`].
pub fn position_of(id: &str) -> Option<usize> {
    FILTERS.iter().position(|f| f.id == id)
}

/// The fixed inventory every mock search returns, in display order.
pub fn mock_inventory() -> Vec<Item> {
    const BATCH: [(u32, &str, &str, u32, &str, Rarity); 8] = [
        (1, "Crimson Samurai Helmet", "Hat", 1500, "🎩", Rarity::Legendary),
        (2, "Neon Wings", "Back Accessory", 800, "🪽", Rarity::Epic),
        (3, "Galaxy Sword", "Gear", 2000, "⚔️", Rarity::Legendary),
        (4, "Cool Shades", "Face Accessory", 150, "🕶️", Rarity::Common),
        (5, "Lightning Hair", "Hair", 500, "⚡", Rarity::Rare),
        (6, "Dragon Scale Armor", "Shirt", 1200, "🛡️", Rarity::Epic),
        (7, "Pixel Sneakers", "Pants", 300, "👟", Rarity::Uncommon),
        (8, "Rainbow Cape", "Back Accessory", 900, "🌈", Rarity::Rare),
    ];

    BATCH
        .iter()
        .map(|&(id, name, category, price, glyph, rarity)| {
            Item::new(id, name, category, NonZeroU32::new(price), glyph, rarity)
        })
        .collect()
}
