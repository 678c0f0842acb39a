#![forbid(unsafe_code)]

//! The screen model: key handling, effect dispatch, and ticks.

use std::sync::Arc;
use std::time::Duration;

use invview_core::event::{Event, KeyCode, KeyEvent};
use invview_render::frame::Frame;
use invview_runtime::{Cmd, Model};
use tracing::debug;

use crate::catalog::FILTERS;
use crate::input::InputEdit;
use crate::notify::ToastStack;
use crate::source::{InventorySource, resolve};
use crate::state::{Effect, Focus, Transition, Variant, ViewEvent, ViewState, transition};
use crate::view;

/// Braille spinner frames shown while a search is in flight.
pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Settings for [`AppModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppConfig {
    pub variant: Variant,
    /// Interval between `Event::Tick`s.
    pub tick: Duration,
    /// How many ticks a notification stays up.
    pub toast_ticks: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Profile,
            tick: Duration::from_millis(100),
            toast_ticks: 40,
        }
    }
}

impl AppConfig {
    /// Ticks covering `duration` at the configured tick interval, at least one.
    pub fn ticks_for(tick: Duration, duration: Duration) -> u32 {
        let tick_ms = tick.as_millis().max(1);
        let ticks = duration.as_millis().div_ceil(tick_ms);
        u32::try_from(ticks).unwrap_or(u32::MAX).max(1)
    }
}

#[derive(Debug)]
pub enum AppMsg {
    /// A raw terminal event, interpreted against the current focus.
    ScreenEvent(Event),
    /// A view event, from key handling or a finished fetch.
    View(ViewEvent),
}

impl From<Event> for AppMsg {
    fn from(event: Event) -> Self {
        Self::ScreenEvent(event)
    }
}

impl From<ViewEvent> for AppMsg {
    fn from(event: ViewEvent) -> Self {
        Self::View(event)
    }
}

/// Top-level application state.
pub struct AppModel {
    state: ViewState,
    source: Arc<dyn InventorySource>,
    toasts: ToastStack,
    spinner: usize,
    config: AppConfig,
}

impl AppModel {
    pub fn new(config: AppConfig, source: Arc<dyn InventorySource>) -> Self {
        Self {
            state: ViewState::new(config.variant),
            source,
            toasts: ToastStack::new(config.toast_ticks),
            spinner: 0,
            config,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn toasts(&self) -> &ToastStack {
        &self.toasts
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn spinner_frame(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner % SPINNER_FRAMES.len()]
    }

    fn apply(&mut self, event: ViewEvent) -> Cmd<AppMsg> {
        let Transition { state, effects } = transition(&self.state, event);
        self.state = state;

        let mut cmds = Vec::new();
        for effect in effects {
            match effect {
                Effect::Notify(notice) => self.toasts.push(notice),
                Effect::Fetch(request) => {
                    let source = Arc::clone(&self.source);
                    cmds.push(Cmd::task_named("fetch", move || {
                        let outcome = resolve(source.as_ref(), &request);
                        AppMsg::View(ViewEvent::Resolved {
                            generation: request.generation,
                            outcome,
                        })
                    }));
                }
            }
        }
        Cmd::batch(cmds)
    }

    fn on_tick(&mut self) -> Cmd<AppMsg> {
        if self.state.loading {
            self.spinner = self.spinner.wrapping_add(1);
        }
        if self.toasts.tick() {
            debug!(target: "invview.app", remaining = self.toasts.len(), "notification expired");
        }
        Cmd::none()
    }

    /// Map a key to a view event given the current focus.
    fn key_to_event(&self, key: KeyEvent) -> Option<ViewEvent> {
        match key.code {
            KeyCode::Tab => return Some(ViewEvent::FocusNext),
            KeyCode::BackTab => return Some(ViewEvent::FocusPrev),
            _ => {}
        }
        match self.state.focus {
            Focus::Search => search_key(key).map(ViewEvent::Input).or_else(|| {
                (key.code == KeyCode::Enter).then_some(ViewEvent::Submit)
            }),
            Focus::Filters => match key.code {
                KeyCode::Left => Some(ViewEvent::CycleFilter(-1)),
                KeyCode::Right => Some(ViewEvent::CycleFilter(1)),
                KeyCode::Char(c @ '1'..='9') => {
                    let index = c as usize - '1' as usize;
                    FILTERS
                        .get(index)
                        .map(|f| ViewEvent::SelectFilter(f.id.to_owned()))
                }
                _ => None,
            },
            Focus::Tabs => match key.code {
                KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') => Some(ViewEvent::ToggleTab),
                _ => None,
            },
        }
    }

    fn handle_event(&mut self, event: Event) -> Cmd<AppMsg> {
        match event {
            Event::Key(key) if !key.is_press() => Cmd::none(),
            Event::Key(key) if is_quit(key) => Cmd::quit(),
            Event::Key(key) => match self.key_to_event(key) {
                Some(ev) => self.apply(ev),
                None => Cmd::none(),
            },
            Event::Paste(text) if self.state.focus == Focus::Search => {
                self.apply(ViewEvent::Input(InputEdit::InsertStr(text)))
            }
            Event::Tick => self.on_tick(),
            Event::Paste(_) | Event::Resize { .. } => Cmd::none(),
        }
    }
}

fn is_quit(key: KeyEvent) -> bool {
    key.code == KeyCode::Escape || (key.ctrl() && key.is_char('c'))
}

fn search_key(key: KeyEvent) -> Option<InputEdit> {
    if key.ctrl() {
        return key.is_char('u').then_some(InputEdit::Clear);
    }
    Some(match key.code {
        KeyCode::Char(c) if !key.alt() => InputEdit::Insert(c),
        KeyCode::Backspace => InputEdit::Backspace,
        KeyCode::Delete => InputEdit::Delete,
        KeyCode::Left => InputEdit::Left,
        KeyCode::Right => InputEdit::Right,
        KeyCode::Home => InputEdit::Home,
        KeyCode::End => InputEdit::End,
        _ => return None,
    })
}

impl Model for AppModel {
    type Message = AppMsg;

    fn init(&mut self) -> Cmd<Self::Message> {
        Cmd::tick(self.config.tick)
    }

    fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message> {
        match msg {
            AppMsg::ScreenEvent(event) => self.handle_event(event),
            AppMsg::View(event) => self.apply(event),
        }
    }

    fn view(&self, frame: &mut Frame) {
        view::render(self, frame);
    }
}
