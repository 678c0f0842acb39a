#![forbid(unsafe_code)]

//! Cell types: the atomic unit of the render grid.
//!
//! A [`Cell`] holds one grapheme (or nothing) plus colors and attributes.
//! Wide graphemes (most emoji) occupy two columns: the head cell carries the
//! grapheme and the cell to its right is a [`CellContent::Continuation`].

/// RGBA color packed into a `u32` (`0xRRGGBBAA`).
///
/// Alpha 0 means "terminal default" when presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PackedRgba(pub u32);

impl PackedRgba {
    /// Fully transparent (alpha = 0).
    pub const TRANSPARENT: Self = Self(0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Create an opaque RGB color (alpha = 255).
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Create an RGBA color with explicit alpha.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | (a as u32))
    }

    /// Red channel.
    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Green channel.
    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Blue channel.
    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Alpha channel.
    #[inline]
    pub const fn a(self) -> u8 {
        self.0 as u8
    }

    /// Composite `self` over an opaque `dst`, returning an opaque color.
    ///
    /// Terminals cannot blend, so translucent theme colors are flattened
    /// against the surface they sit on before presentation.
    pub fn over(self, dst: Self) -> Self {
        let a = self.a() as u32;
        if a == 255 {
            return self;
        }
        if a == 0 {
            return dst;
        }
        let mix = |s: u8, d: u8| -> u8 {
            let v = (s as u32 * a + d as u32 * (255 - a) + 127) / 255;
            v.min(255) as u8
        };
        Self::rgb(
            mix(self.r(), dst.r()),
            mix(self.g(), dst.g()),
            mix(self.b(), dst.b()),
        )
    }
}

bitflags::bitflags! {
    /// 8-bit cell style flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleFlags: u8 {
        /// Bold / increased intensity.
        const BOLD          = 0b0000_0001;
        /// Dim / decreased intensity.
        const DIM           = 0b0000_0010;
        /// Italic text.
        const ITALIC        = 0b0000_0100;
        /// Underlined text.
        const UNDERLINE     = 0b0000_1000;
        /// Reverse video (swap fg/bg).
        const REVERSE       = 0b0010_0000;
    }
}

/// What a cell displays.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CellContent {
    /// Blank (presented as a space).
    #[default]
    Empty,
    /// A single-codepoint grapheme.
    Char(char),
    /// A multi-codepoint grapheme (emoji with variation selectors, ZWJ, ...).
    Grapheme(Box<str>),
    /// Right half of a wide grapheme; never presented on its own.
    Continuation,
}

impl CellContent {
    /// Build content from a grapheme cluster.
    pub fn from_grapheme(g: &str) -> Self {
        let mut chars = g.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Self::Empty,
            (Some(c), None) => Self::Char(c),
            _ => Self::Grapheme(g.into()),
        }
    }

    /// The single char, if this cell holds exactly one.
    pub fn as_char(&self) -> Option<char> {
        match self {
            Self::Char(c) => Some(*c),
            Self::Empty => Some(' '),
            _ => None,
        }
    }

    /// Append this cell's visible text to `out`.
    pub fn push_to(&self, out: &mut String) {
        match self {
            Self::Empty => out.push(' '),
            Self::Char(c) => out.push(*c),
            Self::Grapheme(g) => out.push_str(g),
            Self::Continuation => {}
        }
    }
}

/// One terminal cell.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cell {
    pub content: CellContent,
    pub fg: PackedRgba,
    pub bg: PackedRgba,
    pub attrs: StyleFlags,
}

impl Cell {
    /// A cell holding `c` with default colors.
    pub fn from_char(c: char) -> Self {
        Self {
            content: CellContent::Char(c),
            ..Self::default()
        }
    }

    /// True when the cell is the right half of a wide grapheme.
    #[inline]
    pub fn is_continuation(&self) -> bool {
        matches!(self.content, CellContent::Continuation)
    }
}
