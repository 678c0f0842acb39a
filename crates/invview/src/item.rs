#![forbid(unsafe_code)]

//! Inventory items and their rarity tiers.

use std::fmt;
use std::num::NonZeroU32;

/// Ordinal quality tier of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// Every tier, lowest first.
    pub const ALL: [Rarity; 5] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
    ];

    /// Lowercase tag, as shown on badges.
    pub const fn tag(self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
        }
    }

    /// Parse a lowercase tag. Returns `None` for anything else.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.tag() == tag)
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A virtual collectible. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    id: u32,
    name: String,
    category: String,
    price: Option<NonZeroU32>,
    thumbnail: String,
    rarity: Rarity,
}

impl Item {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        category: impl Into<String>,
        price: Option<NonZeroU32>,
        thumbnail: impl Into<String>,
        rarity: Rarity,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.into(),
            price,
            thumbnail: thumbnail.into(),
            rarity,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Category label, e.g. `Hat` or `Back Accessory`.
    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn price(&self) -> Option<NonZeroU32> {
        self.price
    }

    /// Glyph standing in for the item thumbnail.
    pub fn thumbnail(&self) -> &str {
        &self.thumbnail
    }

    pub fn rarity(&self) -> Rarity {
        self.rarity
    }

    /// Price formatted for display (`1500R$`), absent when unpriced.
    pub fn price_label(&self) -> Option<String> {
        self.price.map(|p| format!("{p}R$"))
    }
}
