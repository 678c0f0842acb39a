#![forbid(unsafe_code)]

//! Cell styling.

use crate::cell::{Cell, PackedRgba, StyleFlags};

/// Foreground, background, and attribute overrides applied to cells.
///
/// `None` colors leave whatever the cell already has, so a text run can be
/// printed over a card background without repainting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    pub fg: Option<PackedRgba>,
    pub bg: Option<PackedRgba>,
    pub attrs: StyleFlags,
}

impl Style {
    /// Empty style (no overrides).
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            attrs: StyleFlags::empty(),
        }
    }

    #[must_use]
    pub const fn fg(mut self, color: PackedRgba) -> Self {
        self.fg = Some(color);
        self
    }

    #[must_use]
    pub const fn bg(mut self, color: PackedRgba) -> Self {
        self.bg = Some(color);
        self
    }

    #[must_use]
    pub const fn bold(mut self) -> Self {
        self.attrs = self.attrs.union(StyleFlags::BOLD);
        self
    }

    #[must_use]
    pub const fn dim(mut self) -> Self {
        self.attrs = self.attrs.union(StyleFlags::DIM);
        self
    }

    #[must_use]
    pub const fn reverse(mut self) -> Self {
        self.attrs = self.attrs.union(StyleFlags::REVERSE);
        self
    }

    /// Layer `other` on top of `self`: its set fields win.
    #[must_use]
    pub fn patch(self, other: Style) -> Self {
        Self {
            fg: other.fg.or(self.fg),
            bg: other.bg.or(self.bg),
            attrs: self.attrs | other.attrs,
        }
    }

    /// Apply the overrides to a cell.
    ///
    /// Translucent backgrounds are flattened over the cell's current
    /// background.
    pub fn apply(&self, cell: &mut Cell) {
        if let Some(fg) = self.fg {
            cell.fg = fg.over(cell.bg);
        }
        if let Some(bg) = self.bg {
            cell.bg = bg.over(cell.bg);
        }
        cell.attrs |= self.attrs;
    }
}
