#![forbid(unsafe_code)]

//! Presenter: state-tracked terminal emission.
//!
//! The Presenter turns a [`BufferDiff`] into crossterm commands. It tracks the
//! style last sent to the terminal and only emits color/attribute changes when
//! a cell differs from it.
//!
//! # Design Principles
//!
//! - **State tracking**: skip redundant color and attribute sequences
//! - **Run grouping**: one cursor move per [`ChangeRun`]
//! - **Single write**: everything is queued and flushed once per frame
//! - **Synchronized output**: frames are bracketed with DEC 2026 begin/end

use std::io::{self, Write};

use crossterm::style::{Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::{cursor, queue, terminal};

use crate::buffer::Buffer;
use crate::cell::{Cell, PackedRgba, StyleFlags};
use crate::diff::{BufferDiff, ChangeRun};

/// Cached style state for comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CellStyle {
    fg: PackedRgba,
    bg: PackedRgba,
    attrs: StyleFlags,
}

impl CellStyle {
    fn of(cell: &Cell) -> Self {
        Self {
            fg: cell.fg,
            bg: cell.bg,
            attrs: cell.attrs,
        }
    }
}

/// Writes buffer changes to a terminal-like writer.
pub struct Presenter<W: Write> {
    writer: W,
    current: Option<CellStyle>,
}

impl<W: Write> Presenter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            current: None,
        }
    }

    /// Emit the changes in `diff`, then place (or hide) the cursor.
    pub fn present(
        &mut self,
        buffer: &Buffer,
        diff: &BufferDiff,
        cursor_pos: Option<(u16, u16)>,
    ) -> io::Result<()> {
        #[cfg(feature = "tracing")]
        tracing::trace!(runs = diff.runs().len(), "present");
        queue!(self.writer, terminal::BeginSynchronizedUpdate, cursor::Hide)?;

        for run in diff.runs() {
            self.present_run(buffer, *run)?;
        }

        queue!(self.writer, SetAttribute(Attribute::Reset))?;
        self.current = None;

        if let Some((x, y)) = cursor_pos {
            queue!(self.writer, cursor::MoveTo(x, y), cursor::Show)?;
        }
        queue!(self.writer, terminal::EndSynchronizedUpdate)?;
        self.writer.flush()
    }

    fn present_run(&mut self, buffer: &Buffer, run: ChangeRun) -> io::Result<()> {
        let row = buffer.row_cells(run.y);
        let mut x = run.x_start as usize;
        // A run that starts on the right half of a wide glyph must repaint its head.
        if x > 0 && row.get(x).is_some_and(Cell::is_continuation) {
            x -= 1;
        }
        queue!(self.writer, cursor::MoveTo(x as u16, run.y))?;

        let end = (run.x_end as usize).min(row.len());
        let mut text = String::new();
        while x < end {
            let cell = &row[x];
            x += 1;
            if cell.is_continuation() {
                continue;
            }
            self.apply_style(CellStyle::of(cell))?;
            text.clear();
            cell.content.push_to(&mut text);
            queue!(self.writer, Print(&text))?;
        }
        Ok(())
    }

    fn apply_style(&mut self, style: CellStyle) -> io::Result<()> {
        if self.current == Some(style) {
            return Ok(());
        }
        let attrs_changed = self.current.is_none_or(|c| c.attrs != style.attrs);
        if attrs_changed {
            // Reset clears colors too, so they are re-sent below.
            queue!(self.writer, SetAttribute(Attribute::Reset))?;
            for (flag, attr) in [
                (StyleFlags::BOLD, Attribute::Bold),
                (StyleFlags::DIM, Attribute::Dim),
                (StyleFlags::ITALIC, Attribute::Italic),
                (StyleFlags::UNDERLINE, Attribute::Underlined),
                (StyleFlags::REVERSE, Attribute::Reverse),
            ] {
                if style.attrs.contains(flag) {
                    queue!(self.writer, SetAttribute(attr))?;
                }
            }
        }
        if attrs_changed || self.current.is_none_or(|c| c.fg != style.fg) {
            queue!(self.writer, SetForegroundColor(to_color(style.fg)))?;
        }
        if attrs_changed || self.current.is_none_or(|c| c.bg != style.bg) {
            queue!(self.writer, SetBackgroundColor(to_color(style.bg)))?;
        }
        self.current = Some(style);
        Ok(())
    }

    /// Clear the whole screen and forget the cached style.
    pub fn clear_screen(&mut self) -> io::Result<()> {
        self.current = None;
        queue!(self.writer, terminal::Clear(terminal::ClearType::All))?;
        self.writer.flush()
    }

    /// Consume the presenter, returning the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn to_color(c: PackedRgba) -> Color {
    if c.a() == 0 {
        Color::Reset
    } else {
        Color::Rgb {
            r: c.r(),
            g: c.g(),
            b: c.b(),
        }
    }
}
