#![forbid(unsafe_code)]

//! Terminal viewer for a player's profile and item inventory.
//!
//! Type a username, press Enter, and the screen shows a (mocked) profile and
//! the player's items as rarity-tinted cards, filterable by category.
//!
//! The domain lives in [`item`], [`profile`], [`catalog`] and [`filter`].
//! [`state`] holds the pure transition function; [`app`] wires it to the
//! runtime and [`view`] draws it.

pub mod app;
pub mod catalog;
pub mod cli;
pub mod filter;
pub mod input;
pub mod item;
pub mod logging;
pub mod notify;
pub mod profile;
pub mod source;
pub mod state;
pub mod theme;
pub mod view;

pub use app::{AppConfig, AppModel, AppMsg};
pub use source::{FetchError, InventorySource, MockSource};
pub use state::{Variant, ViewEvent, ViewState, transition};
