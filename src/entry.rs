//! Entry Module - The code entry state machine
//!
//! `CodeEntry` owns the slot buffer and active index, validates completed
//! entries, and drives focus. It is the only stateful unit in the crate;
//! rendering and host bindings are derived from its snapshot.
//!
//! Every operation replaces the snapshot wholesale and returns a
//! [`Transition`] describing what happened:
//!
//! - [`EntryEvent`] values the host consumes (`Changed`, `Completed`,
//!   `Rejected`).
//! - [`FocusDirective`] values the presentation layer consumes
//!   (`Focus(i)`, `Blur(i)`).
//!
//! # Example
//!
//! ```
//! use codepin::{CodeEntry, EntryOptions, EntryEvent};
//!
//! let mut entry = CodeEntry::new(EntryOptions::default());
//!
//! let transition = entry.commit_char('7', 0);
//! assert_eq!(
//!     transition.events,
//!     vec![EntryEvent::Changed("7".to_string())]
//! );
//! assert_eq!(entry.snapshot().active_index(), 1);
//! ```

use crate::types::EntryOptions;

// =============================================================================
// SNAPSHOT
// =============================================================================

/// One atomic value of entry state: slot buffer, active index, error.
///
/// The buffer always holds exactly `slot_count()` slots. Slots at or
/// after the active index are not yet committed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntrySnapshot {
    slots: Vec<Option<char>>,
    active: usize,
    error: Option<String>,
}

impl EntrySnapshot {
    /// All-empty snapshot with the active index at slot 0.
    fn empty(slot_count: usize) -> Self {
        Self {
            slots: vec![None; slot_count],
            active: 0,
            error: None,
        }
    }

    /// Snapshot seeded from a default code.
    ///
    /// The buffer is normalized to exactly `slot_count` slots: extra
    /// characters are dropped, missing ones stay empty.
    fn seeded(slot_count: usize, code: &str) -> Self {
        let mut slots = vec![None; slot_count];
        for (slot, ch) in slots.iter_mut().zip(code.chars()) {
            *slot = Some(ch);
        }
        Self {
            slots,
            active: 0,
            error: None,
        }
    }

    /// Number of slots (fixed at construction).
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// The character in slot `index`, if any.
    pub fn slot(&self, index: usize) -> Option<char> {
        self.slots.get(index).copied().flatten()
    }

    /// All slots in order.
    pub fn slots(&self) -> &[Option<char>] {
        &self.slots
    }

    /// The slot currently eligible for input.
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// The validation error message, if the last completed entry failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The joined buffer contents. Empty slots contribute nothing.
    pub fn code(&self) -> String {
        self.slots.iter().flatten().collect()
    }

    /// Whether every slot holds a character.
    pub fn is_full(&self) -> bool {
        self.slots.iter().all(|slot| slot.is_some())
    }
}

// =============================================================================
// EVENTS & DIRECTIVES
// =============================================================================

/// Domain event emitted by a transition. Hosts consume these.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntryEvent {
    /// The joined buffer contents changed meaningfully.
    Changed(String),
    /// The final slot was committed and the entry passed validation
    /// (or no expected code is configured). Fires once per completion.
    Completed,
    /// The final slot was committed but the entry failed validation.
    /// Carries the configured error text.
    Rejected(String),
}

/// Presentation directive emitted by a transition. The rendering layer
/// consumes these instead of the controller touching widgets directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusDirective {
    /// Move focus to the given slot.
    Focus(usize),
    /// Remove focus from the given slot.
    Blur(usize),
}

/// The result of one entry operation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Transition {
    /// Events for the host, in emission order.
    pub events: Vec<EntryEvent>,
    /// Directives for the presentation layer, in emission order.
    pub directives: Vec<FocusDirective>,
}

impl Transition {
    /// A transition that emitted nothing (silent no-op).
    pub fn none() -> Self {
        Self::default()
    }

    /// Whether the transition emitted nothing.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.directives.is_empty()
    }
}

// =============================================================================
// CONTROLLER
// =============================================================================

/// The code entry controller.
///
/// Invoked synchronously, once per discrete input event, on the host's
/// event dispatch thread. No operation raises a fault: validation
/// failure is a normal terminal state surfaced via [`EntryEvent::Rejected`]
/// and the snapshot's error message; anomalous inputs are silent no-ops.
pub struct CodeEntry {
    options: EntryOptions,
    state: EntrySnapshot,
}

impl CodeEntry {
    /// Construct a controller from options.
    ///
    /// The buffer is seeded from `default_code` if supplied, else
    /// all-empty. The active index starts at 0.
    pub fn new(options: EntryOptions) -> Self {
        let state = match options.default_code {
            Some(ref code) => EntrySnapshot::seeded(options.slots, code),
            None => EntrySnapshot::empty(options.slots),
        };
        Self { options, state }
    }

    /// The current state snapshot.
    pub fn snapshot(&self) -> &EntrySnapshot {
        &self.state
    }

    /// The configuration this controller was constructed with.
    pub fn options(&self) -> &EntryOptions {
        &self.options
    }

    /// The presentation layer reported that slot `index` gained focus.
    ///
    /// Focusing a slot out of sequence means the user wants to re-enter
    /// from that point, so every slot at or after `index` is cleared and
    /// the active index moves there. Emits `Changed` only when the
    /// clearing actually changed the buffer contents. Out-of-range
    /// indices are silent no-ops.
    pub fn focus_slot(&mut self, index: usize) -> Transition {
        if index >= self.state.slot_count() {
            return Transition::none();
        }

        let mut slots = self.state.slots.clone();
        let mut changed = false;
        for slot in slots.iter_mut().skip(index) {
            if slot.take().is_some() {
                changed = true;
            }
        }

        self.state = EntrySnapshot {
            slots,
            active: index,
            error: self.state.error.clone(),
        };

        let mut transition = Transition::none();
        if changed {
            transition.events.push(EntryEvent::Changed(self.state.code()));
        }
        transition
    }

    /// A character was typed into slot `index`.
    ///
    /// Committing the final slot validates the assembled code against
    /// the expected code (when configured): a mismatch resets the buffer,
    /// sets the error message, and sends focus back to slot 0; a match
    /// (or no expected code) blurs the final slot and completes the
    /// entry. Committing any earlier slot advances focus by one.
    pub fn commit_char(&mut self, ch: char, index: usize) -> Transition {
        if index >= self.state.slot_count() {
            return Transition::none();
        }

        // Numeric mode rejects non-digits without touching the buffer.
        if self.options.numeric && !ch.is_ascii_digit() {
            return Transition::none();
        }

        let last = self.state.slot_count() - 1;
        let mut slots = self.state.slots.clone();
        slots[index] = Some(ch);

        if index == last {
            let code: String = slots.iter().flatten().collect();

            if let Some(ref expected) = self.options.expected_code {
                if *expected != code {
                    self.state = EntrySnapshot {
                        slots: vec![None; self.state.slot_count()],
                        active: 0,
                        error: Some(self.options.error_text.clone()),
                    };
                    return Transition {
                        events: vec![EntryEvent::Rejected(self.options.error_text.clone())],
                        directives: vec![FocusDirective::Focus(0)],
                    };
                }
            }

            self.state = EntrySnapshot {
                slots,
                active: self.state.active,
                error: None,
            };
            return Transition {
                events: vec![EntryEvent::Changed(code), EntryEvent::Completed],
                directives: vec![FocusDirective::Blur(index)],
            };
        }

        let next = (self.state.active + 1).min(last);
        self.state = EntrySnapshot {
            slots,
            active: next,
            error: None,
        };
        Transition {
            events: vec![EntryEvent::Changed(self.state.code())],
            directives: vec![FocusDirective::Focus(next)],
        }
    }

    /// Backspace was pressed while slot `index` is already empty.
    ///
    /// Clears the previous slot and retreats the active index by one.
    /// A no-op at slot 0 or when slot `index` still holds a character
    /// (the in-place deletion of that character is the presentation
    /// layer's edit, routed through [`focus_slot`](Self::focus_slot) or
    /// the keyboard layer).
    pub fn backspace(&mut self, index: usize) -> Transition {
        if index == 0
            || index >= self.state.slot_count()
            || self.state.slot(index).is_some()
        {
            return Transition::none();
        }

        let mut slots = self.state.slots.clone();
        slots[index - 1] = None;
        let previous = self.state.active.saturating_sub(1);

        self.state = EntrySnapshot {
            slots,
            active: previous,
            error: None,
        };
        Transition {
            events: Vec::new(),
            directives: vec![FocusDirective::Focus(previous)],
        }
    }

    /// Clear every slot and return to the initial state.
    ///
    /// Sends focus back to slot 0. No events fire.
    pub fn reset(&mut self) -> Transition {
        self.state = EntrySnapshot::empty(self.state.slot_count());
        Transition {
            events: Vec::new(),
            directives: vec![FocusDirective::Focus(0)],
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> CodeEntry {
        CodeEntry::new(EntryOptions::default())
    }

    fn changed_values(transitions: &[Transition]) -> Vec<String> {
        transitions
            .iter()
            .flat_map(|t| &t.events)
            .filter_map(|e| match e {
                EntryEvent::Changed(code) => Some(code.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_initial_state() {
        let entry = entry();
        let snapshot = entry.snapshot();
        assert_eq!(snapshot.slot_count(), 4);
        assert_eq!(snapshot.active_index(), 0);
        assert_eq!(snapshot.code(), "");
        assert!(snapshot.error().is_none());
        assert!(!snapshot.is_full());
    }

    #[test]
    fn test_default_code_seeding() {
        let entry = CodeEntry::new(EntryOptions {
            default_code: Some("12".to_string()),
            ..Default::default()
        });
        let snapshot = entry.snapshot();
        assert_eq!(snapshot.slot(0), Some('1'));
        assert_eq!(snapshot.slot(1), Some('2'));
        assert_eq!(snapshot.slot(2), None);
        assert_eq!(snapshot.code(), "12");
        assert_eq!(snapshot.active_index(), 0);
    }

    #[test]
    fn test_default_code_normalized_to_slot_count() {
        // Longer than the buffer: extra characters are dropped.
        let entry = CodeEntry::new(EntryOptions {
            slots: 3,
            default_code: Some("123456".to_string()),
            ..Default::default()
        });
        assert_eq!(entry.snapshot().slot_count(), 3);
        assert_eq!(entry.snapshot().code(), "123");
    }

    #[test]
    fn test_commit_advances_focus() {
        let mut entry = entry();
        let transition = entry.commit_char('a', 0);

        assert_eq!(
            transition.events,
            vec![EntryEvent::Changed("a".to_string())]
        );
        assert_eq!(transition.directives, vec![FocusDirective::Focus(1)]);
        assert_eq!(entry.snapshot().active_index(), 1);
        assert_eq!(entry.snapshot().slot(0), Some('a'));
    }

    #[test]
    fn test_round_trip_completion() {
        let mut entry = entry();
        let transitions: Vec<Transition> = "abcd"
            .chars()
            .enumerate()
            .map(|(i, ch)| entry.commit_char(ch, i))
            .collect();

        assert_eq!(changed_values(&transitions), vec!["a", "ab", "abc", "abcd"]);

        let completed: usize = transitions
            .iter()
            .flat_map(|t| &t.events)
            .filter(|e| matches!(e, EntryEvent::Completed))
            .count();
        assert_eq!(completed, 1);

        let last = transitions.last().unwrap();
        assert_eq!(last.directives, vec![FocusDirective::Blur(3)]);
        assert_eq!(entry.snapshot().code(), "abcd");
        assert!(entry.snapshot().is_full());
        assert!(entry.snapshot().error().is_none());
    }

    #[test]
    fn test_completion_without_expected_code_always_succeeds() {
        let mut entry = entry();
        for (i, ch) in "zzzz".chars().enumerate() {
            entry.commit_char(ch, i);
        }
        assert_eq!(entry.snapshot().code(), "zzzz");
        assert!(entry.snapshot().error().is_none());
    }

    #[test]
    fn test_validation_failure_resets() {
        let mut entry = CodeEntry::new(EntryOptions {
            expected_code: Some("1234".to_string()),
            numeric: true,
            ..Default::default()
        });

        for (i, ch) in "123".chars().enumerate() {
            entry.commit_char(ch, i);
        }
        let transition = entry.commit_char('9', 3);

        assert_eq!(
            transition.events,
            vec![EntryEvent::Rejected("Bad pin code.".to_string())]
        );
        assert_eq!(transition.directives, vec![FocusDirective::Focus(0)]);

        let snapshot = entry.snapshot();
        assert_eq!(snapshot.code(), "");
        assert_eq!(snapshot.active_index(), 0);
        assert_eq!(snapshot.error(), Some("Bad pin code."));
    }

    #[test]
    fn test_validation_success() {
        let mut entry = CodeEntry::new(EntryOptions {
            expected_code: Some("1234".to_string()),
            numeric: true,
            ..Default::default()
        });

        let mut transitions = Vec::new();
        for (i, ch) in "1234".chars().enumerate() {
            transitions.push(entry.commit_char(ch, i));
        }

        let last = transitions.last().unwrap();
        assert_eq!(
            last.events,
            vec![
                EntryEvent::Changed("1234".to_string()),
                EntryEvent::Completed,
            ]
        );
        assert_eq!(last.directives, vec![FocusDirective::Blur(3)]);
        assert!(entry.snapshot().error().is_none());
    }

    #[test]
    fn test_error_cleared_on_next_commit() {
        let mut entry = CodeEntry::new(EntryOptions {
            expected_code: Some("1234".to_string()),
            numeric: true,
            ..Default::default()
        });

        for (i, ch) in "1239".chars().enumerate() {
            entry.commit_char(ch, i);
        }
        assert!(entry.snapshot().error().is_some());

        entry.commit_char('1', 0);
        assert!(entry.snapshot().error().is_none());
    }

    #[test]
    fn test_numeric_filter_rejects_silently() {
        let mut entry = CodeEntry::new(EntryOptions {
            numeric: true,
            ..Default::default()
        });
        entry.commit_char('1', 0);

        let transition = entry.commit_char('x', 1);

        assert!(transition.is_empty());
        assert_eq!(entry.snapshot().slot(0), Some('1'));
        assert_eq!(entry.snapshot().slot(1), None);
        assert_eq!(entry.snapshot().active_index(), 1);
    }

    #[test]
    fn test_non_numeric_mode_accepts_any_char() {
        let mut entry = entry();
        let transition = entry.commit_char('x', 0);
        assert_eq!(
            transition.events,
            vec![EntryEvent::Changed("x".to_string())]
        );
    }

    #[test]
    fn test_backspace_retreats() {
        let mut entry = entry();
        entry.commit_char('1', 0);
        entry.commit_char('2', 1);
        assert_eq!(entry.snapshot().active_index(), 2);

        let transition = entry.backspace(2);

        assert!(transition.events.is_empty());
        assert_eq!(transition.directives, vec![FocusDirective::Focus(1)]);
        assert_eq!(entry.snapshot().slot(1), None);
        assert_eq!(entry.snapshot().slot(0), Some('1'));
        assert_eq!(entry.snapshot().active_index(), 1);
    }

    #[test]
    fn test_backspace_at_slot_zero_is_noop() {
        let mut entry = entry();
        let transition = entry.backspace(0);
        assert!(transition.is_empty());
        assert_eq!(entry.snapshot().active_index(), 0);
    }

    #[test]
    fn test_backspace_on_filled_slot_is_noop() {
        let mut entry = CodeEntry::new(EntryOptions {
            default_code: Some("12".to_string()),
            ..Default::default()
        });
        let transition = entry.backspace(1);
        assert!(transition.is_empty());
        assert_eq!(entry.snapshot().slot(1), Some('2'));
    }

    #[test]
    fn test_backspace_clears_error() {
        let mut entry = CodeEntry::new(EntryOptions {
            expected_code: Some("1234".to_string()),
            numeric: true,
            ..Default::default()
        });
        for (i, ch) in "1239".chars().enumerate() {
            entry.commit_char(ch, i);
        }
        assert!(entry.snapshot().error().is_some());

        // Tapping slot 1 leaves the error up; backspacing clears it.
        entry.focus_slot(1);
        assert!(entry.snapshot().error().is_some());

        let transition = entry.backspace(1);
        assert_eq!(transition.directives, vec![FocusDirective::Focus(0)]);
        assert!(entry.snapshot().error().is_none());
    }

    #[test]
    fn test_focus_slot_clears_downstream() {
        let mut entry = entry();
        entry.commit_char('1', 0);
        entry.commit_char('2', 1);
        entry.commit_char('3', 2);

        let transition = entry.focus_slot(1);

        assert_eq!(
            transition.events,
            vec![EntryEvent::Changed("1".to_string())]
        );
        assert!(transition.directives.is_empty());

        let snapshot = entry.snapshot();
        assert_eq!(snapshot.slot(0), Some('1'));
        assert_eq!(snapshot.slot(1), None);
        assert_eq!(snapshot.slot(2), None);
        assert_eq!(snapshot.active_index(), 1);
    }

    #[test]
    fn test_focus_slot_without_content_change_is_silent() {
        let mut entry = entry();
        entry.commit_char('1', 0);

        // Slots >= 1 are already empty, so nothing changed.
        let transition = entry.focus_slot(1);
        assert!(transition.events.is_empty());
        assert_eq!(entry.snapshot().active_index(), 1);
    }

    #[test]
    fn test_focus_slot_out_of_range_is_noop() {
        let mut entry = entry();
        entry.commit_char('1', 0);
        let transition = entry.focus_slot(9);
        assert!(transition.is_empty());
        assert_eq!(entry.snapshot().active_index(), 1);
        assert_eq!(entry.snapshot().code(), "1");
    }

    #[test]
    fn test_reset() {
        let mut entry = entry();
        entry.commit_char('1', 0);
        entry.commit_char('2', 1);

        let transition = entry.reset();

        assert!(transition.events.is_empty());
        assert_eq!(transition.directives, vec![FocusDirective::Focus(0)]);
        assert_eq!(entry.snapshot().code(), "");
        assert_eq!(entry.snapshot().active_index(), 0);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut entry = entry();
        entry.commit_char('1', 0);

        entry.reset();
        let first = entry.snapshot().clone();
        entry.reset();
        assert_eq!(*entry.snapshot(), first);
    }

    #[test]
    fn test_slot_count_invariant() {
        let mut entry = entry();
        entry.commit_char('a', 0);
        entry.commit_char('b', 1);
        entry.backspace(2);
        entry.focus_slot(0);
        entry.commit_char('c', 0);
        entry.reset();
        for (i, ch) in "wxyz".chars().enumerate() {
            entry.commit_char(ch, i);
        }
        assert_eq!(entry.snapshot().slot_count(), 4);
    }

    #[test]
    fn test_single_slot_entry() {
        let mut entry = CodeEntry::new(EntryOptions {
            slots: 1,
            expected_code: Some("7".to_string()),
            ..Default::default()
        });

        let transition = entry.commit_char('7', 0);
        assert_eq!(
            transition.events,
            vec![
                EntryEvent::Changed("7".to_string()),
                EntryEvent::Completed,
            ]
        );
        assert_eq!(transition.directives, vec![FocusDirective::Blur(0)]);
    }

    #[test]
    fn test_custom_error_text() {
        let mut entry = CodeEntry::new(EntryOptions {
            slots: 2,
            expected_code: Some("12".to_string()),
            error_text: "Nope.".to_string(),
            ..Default::default()
        });
        entry.commit_char('9', 0);
        let transition = entry.commit_char('9', 1);
        assert_eq!(
            transition.events,
            vec![EntryEvent::Rejected("Nope.".to_string())]
        );
        assert_eq!(entry.snapshot().error(), Some("Nope."));
    }
}
