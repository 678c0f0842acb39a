#![forbid(unsafe_code)]

//! Buffer grid storage.
//!
//! The `Buffer` is a 2D grid of [`Cell`]s representing the terminal display.
//!
//! # Layout
//!
//! Cells are stored in row-major order: `index = y * width + x`.
//!
//! # Invariants
//!
//! 1. `cells.len() == width * height`
//! 2. Width and height never change after creation
//! 3. A wide grapheme's head is always followed by a `Continuation` cell, and
//!    overwriting either half blanks the other

use crate::cell::{Cell, CellContent};
use invview_core::geometry::Rect;

/// A 2D grid of terminal cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    /// Create a new buffer with the given dimensions.
    ///
    /// Zero dimensions are allowed and produce an empty buffer on which every
    /// write is a no-op.
    pub fn new(width: u16, height: u16) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::default(); size],
        }
    }

    /// Buffer width in cells.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Buffer height in cells.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Bounding rect of the entire buffer.
    #[inline]
    pub const fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Get a cell, or `None` when out of bounds.
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Get a mutable cell, or `None` when out of bounds.
    #[inline]
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.index(x, y).map(move |i| &mut self.cells[i])
    }

    /// Overwrite one cell, repairing any wide grapheme it splits.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        let Some(idx) = self.index(x, y) else {
            return;
        };
        self.break_wide_at(x, y);
        self.cells[idx] = cell;
    }

    /// Write a grapheme of display width `width` (1 or 2) at `(x, y)`.
    ///
    /// Returns the number of columns consumed, or 0 if a wide grapheme would
    /// not fit before `max_x`.
    pub fn set_grapheme(&mut self, x: u16, y: u16, content: CellContent, width: u16, max_x: u16) -> u16 {
        let max_x = max_x.min(self.width);
        if width == 0 || y >= self.height || x >= max_x || x + width > max_x {
            return 0;
        }
        let template = self.get(x, y).cloned().unwrap_or_default();
        self.set(
            x,
            y,
            Cell {
                content,
                ..template.clone()
            },
        );
        if width == 2 {
            self.break_wide_at(x + 1, y);
            if let Some(idx) = self.index(x + 1, y) {
                self.cells[idx] = Cell {
                    content: CellContent::Continuation,
                    ..template
                };
            }
        }
        width
    }

    // Blank the partner of a wide grapheme that the write at (x, y) splits.
    fn break_wide_at(&mut self, x: u16, y: u16) {
        let Some(idx) = self.index(x, y) else {
            return;
        };
        if self.cells[idx].is_continuation() {
            if x > 0 {
                self.cells[idx - 1].content = CellContent::Empty;
            }
        } else if x + 1 < self.width && self.cells[idx + 1].is_continuation() {
            self.cells[idx + 1].content = CellContent::Empty;
        }
    }

    /// Fill a rectangular region with the given cell (clipped to bounds).
    pub fn fill(&mut self, rect: Rect, cell: Cell) {
        let clipped = rect.intersection(&self.bounds());
        for y in clipped.y..clipped.bottom() {
            for x in clipped.x..clipped.right() {
                self.set(x, y, cell.clone());
            }
        }
    }

    /// Reset every cell to the default.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// All cells in row-major order.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cells of a single row (empty slice when out of bounds).
    pub fn row_cells(&self, y: u16) -> &[Cell] {
        if y >= self.height {
            return &[];
        }
        let start = y as usize * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    /// Visible text of a row, trailing blanks trimmed.
    pub fn row_text(&self, y: u16) -> String {
        let mut out = String::with_capacity(self.width as usize);
        for cell in self.row_cells(y) {
            cell.content.push_to(&mut out);
        }
        out.truncate(out.trim_end().len());
        out
    }

    /// Visible text of the whole buffer, one line per row.
    pub fn to_text(&self) -> String {
        (0..self.height)
            .map(|y| self.row_text(y))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sized_buffer_ignores_writes() {
        let mut buf = Buffer::new(0, 0);
        buf.set(0, 0, Cell::from_char('x'));
        assert!(buf.get(0, 0).is_none());
        assert_eq!(buf.to_text(), "");
    }

    #[test]
    fn set_and_get() {
        let mut buf = Buffer::new(4, 2);
        buf.set(1, 1, Cell::from_char('x'));
        assert_eq!(buf.get(1, 1).and_then(|c| c.content.as_char()), Some('x'));
        assert!(buf.get(4, 0).is_none());
    }

    #[test]
    fn wide_grapheme_takes_two_columns() {
        let mut buf = Buffer::new(4, 1);
        let used = buf.set_grapheme(0, 0, CellContent::from_grapheme("🌈"), 2, 4);
        assert_eq!(used, 2);
        assert!(buf.get(1, 0).is_some_and(Cell::is_continuation));
        assert_eq!(buf.row_text(0), "🌈");
    }

    #[test]
    fn wide_grapheme_clipped_at_edge() {
        let mut buf = Buffer::new(3, 1);
        assert_eq!(buf.set_grapheme(2, 0, CellContent::from_grapheme("🌈"), 2, 3), 0);
        assert_eq!(buf.row_text(0), "");
    }

    #[test]
    fn overwriting_continuation_blanks_head() {
        let mut buf = Buffer::new(4, 1);
        buf.set_grapheme(0, 0, CellContent::from_grapheme("🌈"), 2, 4);
        buf.set(1, 0, Cell::from_char('x'));
        assert_eq!(buf.row_text(0), " x");
    }

    #[test]
    fn fill_clips_to_bounds() {
        let mut buf = Buffer::new(3, 2);
        buf.fill(Rect::new(1, 0, 10, 10), Cell::from_char('#'));
        assert_eq!(buf.to_text(), " ##\n ##");
    }
}
