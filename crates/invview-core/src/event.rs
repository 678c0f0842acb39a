#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! Every event the screen reacts to is expressed here, independent of the
//! terminal backend. Backend events without a mapping are dropped.

use bitflags::bitflags;
use crossterm::event as cte;

/// Canonical input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),

    /// Terminal was resized.
    Resize {
        /// New terminal width in columns.
        width: u16,
        /// New terminal height in rows.
        height: u16,
    },

    /// Text delivered through bracketed paste.
    Paste(String),

    /// A tick event from the runtime.
    ///
    /// Fired when the scheduled tick interval elapses. The screen uses it to
    /// advance the spinner and expire notifications.
    Tick,
}

impl Event {
    /// Convert a Crossterm event into an invview [`Event`].
    ///
    /// Returns `None` for events the application does not consume.
    #[must_use]
    pub fn from_crossterm(event: cte::Event) -> Option<Self> {
        match event {
            cte::Event::Key(key) => map_key_event(key).map(Event::Key),
            cte::Event::Resize(width, height) => Some(Event::Resize { width, height }),
            cte::Event::Paste(text) => Some(Event::Paste(text)),
            _ => None,
        }
    }
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// The type of key event (press, repeat, or release).
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event with default modifiers and Press kind.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Check if this is a specific character key.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.code, KeyCode::Char(ch) if ch == c)
    }

    /// Check if Ctrl modifier is held.
    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    /// Check if Alt modifier is held.
    #[must_use]
    pub const fn alt(&self) -> bool {
        self.modifiers.contains(Modifiers::ALT)
    }

    /// True for presses and auto-repeats; false for releases.
    #[must_use]
    pub const fn is_press(&self) -> bool {
        !matches!(self.kind, KeyEventKind::Release)
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),
    Enter,
    Escape,
    Backspace,
    Tab,
    /// Shift+Tab (back-tab).
    BackTab,
    Delete,
    Home,
    End,
    Left,
    Right,
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,

    /// Key is being held (repeat event).
    Repeat,

    /// Key was released.
    Release,
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const NONE  = 0b0000;
        const SHIFT = 0b0001;
        const ALT   = 0b0010;
        const CTRL  = 0b0100;
        /// Super, Hyper, and Meta all fold into this flag.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

fn map_key_event(event: cte::KeyEvent) -> Option<KeyEvent> {
    let code = map_key_code(event.code)?;
    Some(KeyEvent {
        code,
        modifiers: map_modifiers(event.modifiers),
        kind: map_key_kind(event.kind),
    })
}

fn map_key_kind(kind: cte::KeyEventKind) -> KeyEventKind {
    match kind {
        cte::KeyEventKind::Press => KeyEventKind::Press,
        cte::KeyEventKind::Repeat => KeyEventKind::Repeat,
        cte::KeyEventKind::Release => KeyEventKind::Release,
    }
}

fn map_key_code(code: cte::KeyCode) -> Option<KeyCode> {
    match code {
        cte::KeyCode::Backspace => Some(KeyCode::Backspace),
        cte::KeyCode::Enter => Some(KeyCode::Enter),
        cte::KeyCode::Left => Some(KeyCode::Left),
        cte::KeyCode::Right => Some(KeyCode::Right),
        cte::KeyCode::Home => Some(KeyCode::Home),
        cte::KeyCode::End => Some(KeyCode::End),
        cte::KeyCode::Tab => Some(KeyCode::Tab),
        cte::KeyCode::BackTab => Some(KeyCode::BackTab),
        cte::KeyCode::Delete => Some(KeyCode::Delete),
        cte::KeyCode::Char(c) => Some(KeyCode::Char(c)),
        cte::KeyCode::Esc => Some(KeyCode::Escape),
        _ => None,
    }
}

fn map_modifiers(modifiers: cte::KeyModifiers) -> Modifiers {
    let mut mapped = Modifiers::NONE;
    if modifiers.contains(cte::KeyModifiers::SHIFT) {
        mapped |= Modifiers::SHIFT;
    }
    if modifiers.contains(cte::KeyModifiers::ALT) {
        mapped |= Modifiers::ALT;
    }
    if modifiers.contains(cte::KeyModifiers::CONTROL) {
        mapped |= Modifiers::CTRL;
    }
    if modifiers.contains(cte::KeyModifiers::SUPER)
        || modifiers.contains(cte::KeyModifiers::HYPER)
        || modifiers.contains(cte::KeyModifiers::META)
    {
        mapped |= Modifiers::SUPER;
    }
    mapped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event as ct_event;

    #[test]
    fn key_event_is_char() {
        let event = KeyEvent::new(KeyCode::Char('q'));
        assert!(event.is_char('q'));
        assert!(!event.is_char('x'));
    }

    #[test]
    fn release_is_not_press() {
        let event = KeyEvent::new(KeyCode::Enter).with_kind(KeyEventKind::Release);
        assert!(!event.is_press());
        assert!(KeyEvent::new(KeyCode::Enter).is_press());
    }

    #[test]
    fn map_crossterm_key_with_ctrl() {
        let ct = ct_event::Event::Key(ct_event::KeyEvent::new(
            ct_event::KeyCode::Char('c'),
            ct_event::KeyModifiers::CONTROL,
        ));
        let mapped = Event::from_crossterm(ct).expect("should map");
        match mapped {
            Event::Key(k) => {
                assert!(k.is_char('c'));
                assert!(k.ctrl());
                assert!(!k.alt());
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn map_crossterm_escape() {
        let ct = ct_event::Event::Key(ct_event::KeyEvent::new(
            ct_event::KeyCode::Esc,
            ct_event::KeyModifiers::NONE,
        ));
        assert_eq!(
            Event::from_crossterm(ct),
            Some(Event::Key(KeyEvent::new(KeyCode::Escape)))
        );
    }

    #[test]
    fn map_crossterm_resize_and_paste() {
        assert_eq!(
            Event::from_crossterm(ct_event::Event::Resize(120, 40)),
            Some(Event::Resize {
                width: 120,
                height: 40
            })
        );
        assert_eq!(
            Event::from_crossterm(ct_event::Event::Paste("Roblox123".into())),
            Some(Event::Paste("Roblox123".into()))
        );
    }

    #[test]
    fn unsupported_keys_are_dropped() {
        for code in [
            ct_event::KeyCode::CapsLock,
            ct_event::KeyCode::Up,
            ct_event::KeyCode::Down,
            ct_event::KeyCode::F(5),
        ] {
            let ct = ct_event::Event::Key(ct_event::KeyEvent::new(
                code,
                ct_event::KeyModifiers::NONE,
            ));
            assert_eq!(Event::from_crossterm(ct), None, "{code:?}");
        }
    }

    #[test]
    fn focus_changes_are_dropped() {
        assert_eq!(Event::from_crossterm(ct_event::Event::FocusGained), None);
        assert_eq!(Event::from_crossterm(ct_event::Event::FocusLost), None);
    }
}
