#![forbid(unsafe_code)]

//! Buffer diffing.
//!
//! Produces runs of changed cells between the previously presented buffer
//! and the next one, so the presenter only repositions the cursor once per
//! run.

use crate::buffer::Buffer;

/// A horizontal span of changed cells on one row (`x_end` exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeRun {
    pub y: u16,
    pub x_start: u16,
    pub x_end: u16,
}

/// The set of changes needed to turn one buffer into another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferDiff {
    runs: Vec<ChangeRun>,
}

impl BufferDiff {
    /// Compare `old` and `new` cell by cell.
    ///
    /// Buffers of different sizes yield a full repaint of `new`.
    pub fn compute(old: &Buffer, new: &Buffer) -> Self {
        if old.width() != new.width() || old.height() != new.height() {
            return Self::full(new);
        }
        let mut runs = Vec::new();
        for y in 0..new.height() {
            let before = old.row_cells(y);
            let after = new.row_cells(y);
            let mut x = 0usize;
            while x < after.len() {
                if before[x] == after[x] {
                    x += 1;
                    continue;
                }
                let start = x;
                while x < after.len() && before[x] != after[x] {
                    x += 1;
                }
                runs.push(ChangeRun {
                    y,
                    x_start: start as u16,
                    x_end: x as u16,
                });
            }
        }
        Self { runs }
    }

    /// Every row of `buffer` as one run.
    pub fn full(buffer: &Buffer) -> Self {
        let runs = (0..buffer.height())
            .filter(|_| buffer.width() > 0)
            .map(|y| ChangeRun {
                y,
                x_start: 0,
                x_end: buffer.width(),
            })
            .collect();
        Self { runs }
    }

    pub fn runs(&self) -> &[ChangeRun] {
        &self.runs
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}
