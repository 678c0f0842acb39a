#![forbid(unsafe_code)]

//! Frame: the render target handed to `Model::view()`.
//!
//! A `Frame` owns a [`Buffer`] plus the cursor request for this frame, and
//! offers the handful of drawing primitives the screen is built from: styled
//! text runs, filled regions, and rounded borders. All primitives clip to the
//! buffer and to the area they are given; drawing outside is a no-op.

use unicode_segmentation::UnicodeSegmentation;

use crate::buffer::Buffer;
use crate::cell::{Cell, CellContent};
use crate::style::Style;
use crate::text::grapheme_width;
use invview_core::geometry::Rect;

/// Rounded box-drawing set: corners, horizontal, vertical.
const BORDER_ROUNDED: [char; 6] = ['╭', '╮', '╰', '╯', '─', '│'];

/// The render target for one frame.
#[derive(Debug)]
pub struct Frame {
    /// The cell grid being drawn.
    pub buffer: Buffer,
    cursor: Option<(u16, u16)>,
}

impl Frame {
    /// Create a blank frame.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            buffer: Buffer::new(width, height),
            cursor: None,
        }
    }

    /// Frame width in cells.
    #[inline]
    pub fn width(&self) -> u16 {
        self.buffer.width()
    }

    /// Frame height in cells.
    #[inline]
    pub fn height(&self) -> u16 {
        self.buffer.height()
    }

    /// The full frame area.
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.buffer.bounds()
    }

    /// Request the hardware cursor at a position (or hide it with `None`).
    pub fn set_cursor(&mut self, position: Option<(u16, u16)>) {
        self.cursor = position;
    }

    /// The cursor position requested by the view, if any.
    pub fn cursor(&self) -> Option<(u16, u16)> {
        self.cursor
    }

    /// Print `text` starting at `(x, y)`, stopping at `max_x` (exclusive).
    ///
    /// Returns the column just past the last drawn grapheme.
    pub fn print(&mut self, x: u16, y: u16, text: &str, style: Style, max_x: u16) -> u16 {
        let mut cx = x;
        for g in text.graphemes(true) {
            if g == "\n" || g == "\r\n" {
                break;
            }
            let w = grapheme_width(g) as u16;
            if w == 0 {
                continue;
            }
            let used = self
                .buffer
                .set_grapheme(cx, y, CellContent::from_grapheme(g), w, max_x);
            if used == 0 {
                break;
            }
            for dx in 0..used {
                if let Some(cell) = self.buffer.get_mut(cx + dx, y) {
                    style.apply(cell);
                }
            }
            cx += used;
        }
        cx
    }

    /// Print `text` clipped to `area`'s first row.
    pub fn print_in(&mut self, area: Rect, text: &str, style: Style) -> u16 {
        if area.is_empty() {
            return area.x;
        }
        self.print(area.x, area.y, text, style, area.right())
    }

    /// Blank `area` and apply `style` to every cell in it.
    pub fn fill(&mut self, area: Rect, style: Style) {
        let clipped = area.intersection(&self.bounds());
        for y in clipped.y..clipped.bottom() {
            for x in clipped.x..clipped.right() {
                let blank = blank_keeping_bg(&self.buffer, x, y);
                self.buffer.set(x, y, blank);
                if let Some(cell) = self.buffer.get_mut(x, y) {
                    style.apply(cell);
                }
            }
        }
    }

    /// Apply `style` to every cell in `area` without touching content.
    pub fn restyle(&mut self, area: Rect, style: Style) {
        let clipped = area.intersection(&self.bounds());
        for y in clipped.y..clipped.bottom() {
            for x in clipped.x..clipped.right() {
                if let Some(cell) = self.buffer.get_mut(x, y) {
                    style.apply(cell);
                }
            }
        }
    }

    /// Draw a rounded border along the edge of `area`.
    ///
    /// Areas smaller than 2x2 are left untouched.
    pub fn border(&mut self, area: Rect, style: Style) {
        if area.width < 2 || area.height < 2 {
            return;
        }
        let [tl, tr, bl, br, h, v] = BORDER_ROUNDED;
        let right = area.right() - 1;
        let bottom = area.bottom() - 1;

        self.put(area.x, area.y, tl, style);
        self.put(right, area.y, tr, style);
        self.put(area.x, bottom, bl, style);
        self.put(right, bottom, br, style);
        for x in area.x + 1..right {
            self.put(x, area.y, h, style);
            self.put(x, bottom, h, style);
        }
        for y in area.y + 1..bottom {
            self.put(area.x, y, v, style);
            self.put(right, y, v, style);
        }
    }

    fn put(&mut self, x: u16, y: u16, c: char, style: Style) {
        let max_x = self.width();
        if self.buffer.set_grapheme(x, y, CellContent::Char(c), 1, max_x) == 1
            && let Some(cell) = self.buffer.get_mut(x, y)
        {
            style.apply(cell);
        }
    }
}

// Blank cell that keeps the existing background, so fills layer.
fn blank_keeping_bg(buffer: &Buffer, x: u16, y: u16) -> Cell {
    Cell {
        bg: buffer.get(x, y).map(|c| c.bg).unwrap_or_default(),
        ..Cell::default()
    }
}
