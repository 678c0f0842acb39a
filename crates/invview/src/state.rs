#![forbid(unsafe_code)]

//! View state and its pure transition function.
//!
//! Everything the screen shows is derived from [`ViewState`]. Changes go
//! through [`transition`], which never performs I/O: it returns the next
//! state plus a list of [`Effect`]s for the caller to carry out. Fetches are
//! tagged with a generation number so a completion that arrives after a newer
//! submit is recognised and dropped.
//!
//! ```text
//! Idle ──submit──▶ Searching ──resolved──▶ Resolved
//!                      ▲                       │
//!                      └────────submit─────────┘
//! ```

use clap::ValueEnum;
use tracing::{debug, info, warn};

use crate::catalog::{ALL_FILTER, FILTERS, position_of};
use crate::filter::filter_items;
use crate::input::{InputEdit, InputField};
use crate::item::Item;
use crate::notify::Notice;
use crate::profile::Profile;
use crate::source::FetchError;

/// Which screen layout is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Variant {
    /// Inventory grid only.
    Inventory,
    /// Profile summary and inventory behind tabs.
    #[default]
    Profile,
}

/// Foreground panel in the profile variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Profile,
    Inventory,
}

impl Tab {
    pub fn toggled(self) -> Self {
        match self {
            Tab::Profile => Tab::Inventory,
            Tab::Inventory => Tab::Profile,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tab::Profile => "Profile",
            Tab::Inventory => "Inventory",
        }
    }
}

/// Control that receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    Filters,
    Tabs,
}

/// Coarse lifecycle of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Searching,
    Resolved,
}

/// What a successful search produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResults {
    /// Trimmed username as submitted.
    pub username: String,
    pub items: Vec<Item>,
    /// Present in the profile variant only.
    pub profile: Option<Profile>,
}

pub type FetchOutcome = Result<SearchResults, FetchError>;

/// A fetch the caller should run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub generation: u64,
    pub username: String,
    pub with_profile: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    Input(InputEdit),
    Submit,
    Resolved { generation: u64, outcome: FetchOutcome },
    SelectFilter(String),
    /// Move the filter selection by this many positions, wrapping.
    CycleFilter(isize),
    SelectTab(Tab),
    ToggleTab,
    FocusNext,
    FocusPrev,
}

/// Side effects requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Notify(Notice),
    Fetch(FetchRequest),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: ViewState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn unchanged(prev: &ViewState) -> Self {
        Self {
            state: prev.clone(),
            effects: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub variant: Variant,
    pub input: InputField,
    pub loading: bool,
    pub results: Option<SearchResults>,
    /// Always one of the ids in [`FILTERS`].
    pub filter: &'static str,
    pub tab: Tab,
    pub focus: Focus,
    /// Generation of the most recent submit.
    pub generation: u64,
}

impl ViewState {
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            input: InputField::new(),
            loading: false,
            results: None,
            filter: ALL_FILTER,
            tab: match variant {
                Variant::Profile => Tab::Profile,
                Variant::Inventory => Tab::Inventory,
            },
            focus: Focus::Search,
            generation: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Searching
        } else if self.results.is_some() {
            Phase::Resolved
        } else {
            Phase::Idle
        }
    }

    /// Items of the current result set that pass the selected filter.
    pub fn visible_items(&self) -> Vec<&Item> {
        self.results
            .as_ref()
            .map(|r| filter_items(&r.items, self.filter))
            .unwrap_or_default()
    }

    pub fn has_tabs(&self) -> bool {
        self.variant == Variant::Profile
    }

    /// True while the item grid is the body, which is when filter chips
    /// apply. The profile summary replaces it on the profile tab.
    pub fn shows_grid(&self) -> bool {
        match &self.results {
            Some(results) => {
                !(self.has_tabs() && self.tab == Tab::Profile && results.profile.is_some())
            }
            None => false,
        }
    }

    /// Focus targets currently reachable, in cycle order.
    fn focus_ring(&self) -> Vec<Focus> {
        let mut ring = vec![Focus::Search];
        if self.shows_grid() {
            ring.push(Focus::Filters);
        }
        if self.results.is_some() && self.has_tabs() {
            ring.push(Focus::Tabs);
        }
        ring
    }

    fn shift_focus(&mut self, delta: isize) {
        let ring = self.focus_ring();
        let at = ring.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = ring[wrap(at, delta, ring.len())];
    }

    /// Move focus off a section that is no longer drawn.
    fn settle_focus(&mut self) {
        let ring = self.focus_ring();
        if !ring.contains(&self.focus) {
            self.focus = ring.last().copied().unwrap_or(Focus::Search);
        }
    }
}

fn wrap(index: usize, delta: isize, len: usize) -> usize {
    let len = len as isize;
    (index as isize + delta).rem_euclid(len) as usize
}

/// Compute the state that follows `event`.
pub fn transition(prev: &ViewState, event: ViewEvent) -> Transition {
    let mut state = prev.clone();
    let mut effects = Vec::new();

    match event {
        ViewEvent::Input(edit) => {
            if !state.input.apply(&edit) && state.input == prev.input {
                return Transition::unchanged(prev);
            }
        }
        ViewEvent::Submit => {
            let username = state.input.text().trim();
            if username.is_empty() {
                return Transition {
                    state,
                    effects: vec![Effect::Notify(Notice::empty_username())],
                };
            }
            let request = FetchRequest {
                generation: state.generation.wrapping_add(1),
                username: username.to_owned(),
                with_profile: state.variant == Variant::Profile,
            };
            if state.loading {
                debug!(
                    target: "invview.state",
                    superseded = state.generation,
                    "search resubmitted while loading"
                );
            }
            info!(
                target: "invview.state",
                generation = request.generation,
                username = %request.username,
                "search submitted"
            );
            state.generation = request.generation;
            state.loading = true;
            effects.push(Effect::Fetch(request));
        }
        ViewEvent::Resolved {
            generation,
            outcome,
        } => {
            if generation != state.generation || !state.loading {
                debug!(
                    target: "invview.state",
                    generation,
                    current = state.generation,
                    "dropping stale search result"
                );
                return Transition::unchanged(prev);
            }
            state.loading = false;
            match outcome {
                Ok(results) => {
                    info!(
                        target: "invview.state",
                        generation,
                        items = results.items.len(),
                        "search resolved"
                    );
                    effects.push(Effect::Notify(Notice::loaded(
                        results.items.len(),
                        &results.username,
                    )));
                    state.results = Some(results);
                }
                Err(err) => {
                    warn!(target: "invview.state", generation, error = %err, "search failed");
                    effects.push(Effect::Notify(Notice::fetch_failed(&err)));
                }
            }
        }
        ViewEvent::SelectFilter(id) => match position_of(&id) {
            Some(i) => state.filter = FILTERS[i].id,
            None => {
                warn!(target: "invview.state", filter = %id, "ignoring undeclared filter");
                return Transition::unchanged(prev);
            }
        },
        ViewEvent::CycleFilter(delta) => {
            let at = position_of(state.filter).unwrap_or(0);
            state.filter = FILTERS[wrap(at, delta, FILTERS.len())].id;
        }
        ViewEvent::SelectTab(tab) => {
            if state.has_tabs() {
                state.tab = tab;
            }
        }
        ViewEvent::ToggleTab => {
            if state.has_tabs() {
                state.tab = state.tab.toggled();
            }
        }
        ViewEvent::FocusNext => state.shift_focus(1),
        ViewEvent::FocusPrev => state.shift_focus(-1),
    }

    state.settle_focus();
    Transition { state, effects }
}
