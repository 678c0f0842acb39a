#![forbid(unsafe_code)]

//! Colors, styles, and spacing for the screen.
//!
//! The palette is a dark violet page with a purple→magenta→sky accent ramp.
//! Translucent colors (alpha < 255) are flattened over whatever they are
//! drawn on, so a badge background reads as a tint of the card beneath it.

use invview_render::Style;
use invview_render::cell::PackedRgba;

use crate::item::Rarity;

pub mod palette {
    use invview_render::cell::PackedRgba;

    pub const PAGE_BG: PackedRgba = PackedRgba::rgb(0x1a, 0x1f, 0x2c);
    pub const SURFACE: PackedRgba = PackedRgba::rgba(0xff, 0xff, 0xff, 0x0d);
    pub const SURFACE_BORDER: PackedRgba = PackedRgba::rgba(0xff, 0xff, 0xff, 0x1a);

    pub const ACCENT_PURPLE: PackedRgba = PackedRgba::rgb(0x8b, 0x5c, 0xf6);
    pub const ACCENT_MAGENTA: PackedRgba = PackedRgba::rgb(0xd9, 0x46, 0xef);
    pub const ACCENT_SKY: PackedRgba = PackedRgba::rgb(0x0e, 0xa5, 0xe9);

    pub const TEXT: PackedRgba = PackedRgba::WHITE;
    pub const TEXT_MUTED: PackedRgba = PackedRgba::rgb(0xd1, 0xd5, 0xdb);
    pub const TEXT_SUBTLE: PackedRgba = PackedRgba::rgb(0x9c, 0xa3, 0xaf);
    pub const TEXT_FAINT: PackedRgba = PackedRgba::rgb(0x6b, 0x72, 0x80);

    pub const PRICE: PackedRgba = PackedRgba::rgb(0x34, 0xd3, 0x99);
    pub const SUCCESS: PackedRgba = PackedRgba::rgb(0x22, 0xc5, 0x5e);
    pub const FAILURE: PackedRgba = PackedRgba::rgb(0xef, 0x44, 0x44);
}

/// Named spacing tokens (cells).
pub mod spacing {
    pub const XS: u16 = 1;
    pub const SM: u16 = 2;
    pub const CARD_GAP: u16 = SM;
    pub const SECTION_GAP: u16 = XS;
}

/// Background, foreground, and border colors for one rarity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RarityStyle {
    pub background: PackedRgba,
    pub foreground: PackedRgba,
    pub border: PackedRgba,
}

impl RarityStyle {
    /// Style for the rarity badge text.
    pub fn badge(&self) -> Style {
        Style::new().fg(self.foreground).bg(self.background).bold()
    }

    /// Style for a card border tinted by rarity.
    pub fn frame(&self) -> Style {
        Style::new().fg(self.border)
    }
}

const fn tier(base: (u8, u8, u8), light: (u8, u8, u8)) -> RarityStyle {
    RarityStyle {
        // 20% tint, light text, 30% border.
        background: PackedRgba::rgba(base.0, base.1, base.2, 0x33),
        foreground: PackedRgba::rgb(light.0, light.1, light.2),
        border: PackedRgba::rgba(base.0, base.1, base.2, 0x4d),
    }
}

const COMMON: RarityStyle = tier((0x6b, 0x72, 0x80), (0xd1, 0xd5, 0xdb));
const UNCOMMON: RarityStyle = tier((0x22, 0xc5, 0x5e), (0x86, 0xef, 0xac));
const RARE: RarityStyle = tier((0x3b, 0x82, 0xf6), (0x93, 0xc5, 0xfd));
const EPIC: RarityStyle = tier((0xa8, 0x55, 0xf7), (0xd8, 0xb4, 0xfe));
const LEGENDARY: RarityStyle = tier((0xf5, 0x9e, 0x0b), (0xfc, 0xd3, 0x4d));

impl Rarity {
    pub const fn style(self) -> RarityStyle {
        match self {
            Rarity::Common => COMMON,
            Rarity::Uncommon => UNCOMMON,
            Rarity::Rare => RARE,
            Rarity::Epic => EPIC,
            Rarity::Legendary => LEGENDARY,
        }
    }
}

/// Style triple for a rarity tag; unknown tags get the common style.
pub fn rarity_style(tag: &str) -> RarityStyle {
    Rarity::from_tag(tag).unwrap_or(Rarity::Common).style()
}

pub fn page() -> Style {
    Style::new().bg(palette::PAGE_BG).fg(palette::TEXT)
}

pub fn surface() -> Style {
    Style::new().bg(palette::SURFACE)
}

pub fn surface_border() -> Style {
    Style::new().fg(palette::SURFACE_BORDER)
}

pub fn title() -> Style {
    Style::new().fg(palette::ACCENT_MAGENTA).bold()
}

pub fn muted() -> Style {
    Style::new().fg(palette::TEXT_MUTED)
}

pub fn subtle() -> Style {
    Style::new().fg(palette::TEXT_SUBTLE)
}

pub fn faint() -> Style {
    Style::new().fg(palette::TEXT_FAINT)
}

pub fn strong() -> Style {
    Style::new().fg(palette::TEXT).bold()
}

pub fn price() -> Style {
    Style::new().fg(palette::PRICE).bold()
}

/// Selected chip / primary button.
pub fn accent_fill() -> Style {
    Style::new().bg(palette::ACCENT_PURPLE).fg(palette::TEXT).bold()
}

/// Unselected chip.
pub fn chip() -> Style {
    Style::new().bg(palette::SURFACE_BORDER).fg(palette::TEXT_MUTED)
}

/// Border of the focused control.
pub fn focus_ring() -> Style {
    Style::new().fg(palette::ACCENT_MAGENTA)
}

/// Search icon and other small highlights.
pub fn highlight() -> Style {
    Style::new().fg(palette::ACCENT_SKY)
}
