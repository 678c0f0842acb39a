#![forbid(unsafe_code)]

//! Render kernel: cells, buffers, frames, styles, diffs, and presentation.
//!
//! Rendering is split into two halves. Models draw into a [`frame::Frame`]
//! (a [`buffer::Buffer`] plus cursor state) without touching the terminal.
//! The [`presenter::Presenter`] then compares consecutive buffers and emits
//! only the changed cells through crossterm.

pub mod buffer;
pub mod cell;
pub mod diff;
pub mod frame;
pub mod presenter;
pub mod style;
pub mod text;

pub use style::Style;
