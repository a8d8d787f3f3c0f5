//! # codepin
//!
//! Segmented code-entry (PIN) control for terminal UIs.
//!
//! A fixed number of single-character slots form a short code. Typing
//! commits a character and advances focus, backspacing past an empty
//! slot retreats into the previous one, and committing the final slot
//! optionally validates the assembled code against an expected one.
//!
//! ## Architecture
//!
//! One component owns all state: the [`CodeEntry`] controller. Every
//! operation replaces its snapshot wholesale and returns a pure
//! [`Transition`] value:
//!
//! ```text
//! input event → CodeEntry transition → events (host) + directives (renderer)
//! ```
//!
//! The rendering layer is a stateless derivation of the snapshot
//! ([`render`]), and the reactive layer ([`ReactiveEntry`]) exposes the
//! snapshot through signals for hosts that bind rather than poll.
//!
//! ## Example
//!
//! ```
//! use codepin::{CodeEntry, EntryEvent, EntryOptions, FocusDirective};
//!
//! let mut entry = CodeEntry::new(EntryOptions {
//!     expected_code: Some("1234".to_string()),
//!     numeric: true,
//!     ..Default::default()
//! });
//!
//! for (i, ch) in "123".chars().enumerate() {
//!     entry.commit_char(ch, i);
//! }
//!
//! let transition = entry.commit_char('4', 3);
//! assert!(transition.events.contains(&EntryEvent::Completed));
//! assert_eq!(transition.directives, vec![FocusDirective::Blur(3)]);
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Options, defaults, slot attributes
//! - [`entry`] - The code entry state machine (the core)
//! - [`keyboard`] - Key event model, crossterm bridge, key routing
//! - [`render`] - Stateless snapshot views and plain-text rendering
//! - [`reactive`] - Signal-backed host binding

pub mod entry;
pub mod keyboard;
pub mod reactive;
pub mod render;
pub mod types;

// Re-export commonly used items
pub use types::{EntryOptions, SlotAttr, DEFAULT_ERROR_TEXT, DEFAULT_SLOTS};

pub use entry::{CodeEntry, EntryEvent, EntrySnapshot, FocusDirective, Transition};

pub use keyboard::{
    convert_key_event, handle_key, KeyState, KeyboardEvent, Modifiers,
};

pub use render::{
    render_line, render_lines, view, EntryView, RenderOptions, SlotView,
};

pub use reactive::{EntryCallbacks, ReactiveEntry};
