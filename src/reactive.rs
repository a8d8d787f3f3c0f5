//! Reactive Module - Signal-backed host binding
//!
//! Wraps [`CodeEntry`] so hosts can bind the joined code, the error
//! message, and the focused slot as reactive signals, and receive
//! `on_change` / `on_success` callbacks. The focused-slot signal uses
//! the framework convention of -1 for "no slot focused".
//!
//! # Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use codepin::{EntryCallbacks, EntryOptions, ReactiveEntry};
//!
//! let done = Rc::new(Cell::new(false));
//! let done_clone = done.clone();
//!
//! let mut entry = ReactiveEntry::new(
//!     EntryOptions::default(),
//!     EntryCallbacks {
//!         on_success: Some(Rc::new(move || done_clone.set(true))),
//!         ..Default::default()
//!     },
//! );
//!
//! for (i, ch) in "1234".chars().enumerate() {
//!     entry.commit_char(ch, i);
//! }
//! assert!(done.get());
//! assert_eq!(entry.code().get(), "1234");
//! ```

use std::rc::Rc;

use spark_signals::{signal, Signal};

use crate::entry::{CodeEntry, EntryEvent, EntrySnapshot, FocusDirective, Transition};
use crate::keyboard::{self, KeyboardEvent};
use crate::types::EntryOptions;

// =============================================================================
// CALLBACKS
// =============================================================================

/// Host callbacks fired as transitions emit events.
///
/// `Rc<dyn Fn>` so callbacks can be cloned into closures without
/// ownership issues, as elsewhere in the crate's event surface.
#[derive(Clone, Default)]
pub struct EntryCallbacks {
    /// Fired whenever the joined buffer contents change meaningfully.
    pub on_change: Option<Rc<dyn Fn(&str)>>,
    /// Fired exactly once per successful completion of the final slot.
    pub on_success: Option<Rc<dyn Fn()>>,
}

// =============================================================================
// REACTIVE ENTRY
// =============================================================================

/// A [`CodeEntry`] with reactive bindings.
///
/// Every operation applies the resulting transition to the signals,
/// runs the matching callbacks, and returns the transition so the host
/// can still consume events and directives directly.
pub struct ReactiveEntry {
    entry: CodeEntry,
    code: Signal<String>,
    error: Signal<Option<String>>,
    focused: Signal<i32>,
    callbacks: EntryCallbacks,
}

impl ReactiveEntry {
    /// Construct from options and callbacks. The control starts with
    /// slot 0 focused.
    pub fn new(options: EntryOptions, callbacks: EntryCallbacks) -> Self {
        let entry = CodeEntry::new(options);
        let code = signal(entry.snapshot().code());
        let error = signal(entry.snapshot().error().map(str::to_string));
        let focused = signal(0);
        Self {
            entry,
            code,
            error,
            focused,
            callbacks,
        }
    }

    /// The joined buffer contents as a signal.
    pub fn code(&self) -> Signal<String> {
        self.code.clone()
    }

    /// The validation error message as a signal.
    pub fn error(&self) -> Signal<Option<String>> {
        self.error.clone()
    }

    /// The focused slot as a signal (-1 if no slot is focused).
    pub fn focused(&self) -> Signal<i32> {
        self.focused.clone()
    }

    /// The current state snapshot.
    pub fn snapshot(&self) -> &EntrySnapshot {
        self.entry.snapshot()
    }

    // =========================================================================
    // OPERATIONS
    // =========================================================================

    /// See [`CodeEntry::focus_slot`]. Also records the reported focus.
    pub fn focus_slot(&mut self, index: usize) -> Transition {
        let transition = self.entry.focus_slot(index);
        if index < self.entry.snapshot().slot_count() {
            self.focused.set(index as i32);
        }
        self.apply(&transition);
        transition
    }

    /// Host-driven blur: no slot focused. Entry state is untouched.
    pub fn blur(&mut self) {
        self.focused.set(-1);
    }

    /// See [`CodeEntry::commit_char`].
    pub fn commit_char(&mut self, ch: char, index: usize) -> Transition {
        let transition = self.entry.commit_char(ch, index);
        self.apply(&transition);
        transition
    }

    /// See [`CodeEntry::backspace`].
    pub fn backspace(&mut self, index: usize) -> Transition {
        let transition = self.entry.backspace(index);
        self.apply(&transition);
        transition
    }

    /// See [`CodeEntry::reset`].
    pub fn reset(&mut self) -> Transition {
        let transition = self.entry.reset();
        self.apply(&transition);
        transition
    }

    /// Route a keyboard event into the currently focused slot.
    ///
    /// Returns `None` when no slot is focused or the event is not
    /// consumed.
    pub fn handle_key(&mut self, event: &KeyboardEvent) -> Option<Transition> {
        let focused = self.focused.get();
        if focused < 0 {
            return None;
        }
        let transition = keyboard::handle_key(&mut self.entry, event, focused as usize)?;
        self.apply(&transition);
        Some(transition)
    }

    // =========================================================================
    // TRANSITION APPLICATION
    // =========================================================================

    fn apply(&mut self, transition: &Transition) {
        for directive in &transition.directives {
            match directive {
                FocusDirective::Focus(index) => self.focused.set(*index as i32),
                FocusDirective::Blur(_) => self.focused.set(-1),
            };
        }

        self.code.set(self.entry.snapshot().code());
        self.error.set(self.entry.snapshot().error().map(str::to_string));

        for event in &transition.events {
            match event {
                EntryEvent::Changed(code) => {
                    if let Some(ref on_change) = self.callbacks.on_change {
                        on_change(code);
                    }
                }
                EntryEvent::Completed => {
                    if let Some(ref on_success) = self.callbacks.on_success {
                        on_success();
                    }
                }
                EntryEvent::Rejected(_) => {}
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
