//! Keyboard Module - Key event model and routing
//!
//! Bridges crossterm's event system with the entry controller. The host
//! reads terminal events, converts them with [`convert_key_event`], and
//! routes them into a [`CodeEntry`](crate::CodeEntry) with [`handle_key`].
//!
//! # API
//!
//! - `KeyboardEvent` / `Modifiers` / `KeyState` - key event model
//! - `convert_key_event` - convert a crossterm KeyEvent
//! - `handle_key` - map a key event onto an entry operation
//!
//! # Example
//!
//! ```ignore
//! use codepin::{CodeEntry, EntryOptions, keyboard};
//! use crossterm::event::{read, Event};
//!
//! let mut entry = CodeEntry::new(EntryOptions::default());
//! let mut focused = 0;
//!
//! loop {
//!     if let Ok(Event::Key(key)) = read() {
//!         let event = keyboard::convert_key_event(key);
//!         if let Some(transition) = keyboard::handle_key(&mut entry, &event, focused) {
//!             // apply transition.directives to `focused`, redraw
//!         }
//!     }
//! }
//! ```

use crossterm::event::{
    KeyCode, KeyEvent as CrosstermKeyEvent, KeyEventKind, KeyModifiers,
};

use crate::entry::{CodeEntry, Transition};

// =============================================================================
// TYPES
// =============================================================================

/// Keyboard modifier state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Create empty modifiers
    pub fn none() -> Self {
        Self::default()
    }

    /// Create modifiers with ctrl
    pub fn ctrl() -> Self {
        Self { ctrl: true, ..Self::default() }
    }
}

/// Key event state (press, repeat, release)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyState {
    #[default]
    Press,
    Repeat,
    Release,
}

/// Keyboard event
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyboardEvent {
    /// The key that was pressed (e.g., "7", "Backspace", "Enter")
    pub key: String,
    /// Modifier keys state
    pub modifiers: Modifiers,
    /// Press/repeat/release state
    pub state: KeyState,
}

impl KeyboardEvent {
    /// Create a simple key press event
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            modifiers: Modifiers::default(),
            state: KeyState::Press,
        }
    }

    /// Create a key press with modifiers
    pub fn with_modifiers(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
            state: KeyState::Press,
        }
    }

    /// Check if this is a press event
    pub fn is_press(&self) -> bool {
        self.state == KeyState::Press
    }
}

// =============================================================================
// KEY EVENT CONVERSION
// =============================================================================

/// Convert a crossterm KeyEvent to our KeyboardEvent
pub fn convert_key_event(event: CrosstermKeyEvent) -> KeyboardEvent {
    let key = match event.code {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::Esc => "Escape".to_string(),
        KeyCode::Left => "ArrowLeft".to_string(),
        KeyCode::Right => "ArrowRight".to_string(),
        _ => String::new(),
    };

    let state = match event.kind {
        KeyEventKind::Press => KeyState::Press,
        KeyEventKind::Repeat => KeyState::Repeat,
        KeyEventKind::Release => KeyState::Release,
    };

    KeyboardEvent {
        key,
        modifiers: convert_modifiers(event.modifiers),
        state,
    }
}

/// Convert crossterm KeyModifiers to our Modifiers
fn convert_modifiers(mods: KeyModifiers) -> Modifiers {
    Modifiers {
        ctrl: mods.contains(KeyModifiers::CONTROL),
        alt: mods.contains(KeyModifiers::ALT),
        shift: mods.contains(KeyModifiers::SHIFT),
        meta: false, // Not exposed by crossterm
    }
}

// =============================================================================
// KEY ROUTING
// =============================================================================

/// Route a key event onto the entry operation it stands for.
///
/// `slot` is the slot the key landed in (the focused slot). Returns the
/// resulting transition, or `None` when the event is not consumed:
///
/// - a printable, unmodified character commits into `slot`;
/// - Backspace on an empty slot retreats into the previous one;
/// - Backspace on a filled slot clears it in place (the single-char
///   deletion the original control left to the platform text field),
///   which is the same clearing a focus request on that slot performs;
/// - repeat/release events and everything else are not consumed.
pub fn handle_key(
    entry: &mut CodeEntry,
    event: &KeyboardEvent,
    slot: usize,
) -> Option<Transition> {
    if !event.is_press() {
        return None;
    }

    match event.key.as_str() {
        "Backspace" => {
            if entry.snapshot().slot(slot).is_some() {
                Some(entry.focus_slot(slot))
            } else {
                Some(entry.backspace(slot))
            }
        }
        key => {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None)
                    if !event.modifiers.ctrl
                        && !event.modifiers.alt
                        && !event.modifiers.meta =>
                {
                    Some(entry.commit_char(ch, slot))
                }
                _ => None,
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
