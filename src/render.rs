//! Render Module - Stateless snapshot views
//!
//! Pure derivation from the controller's snapshot: no state of its own,
//! no terminal calls. The host (or a TUI framework) takes the returned
//! values and draws them; masking and placeholder choices live here,
//! never in the controller.

use crate::entry::EntrySnapshot;
use crate::types::SlotAttr;

// =============================================================================
// VIEW TYPES
// =============================================================================

/// One slot as the presentation layer should show it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotView {
    /// The committed character, if any.
    pub ch: Option<char>,
    /// Display attributes (active, filled, error).
    pub attrs: SlotAttr,
}

/// The whole control as the presentation layer should show it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryView {
    /// Slots in order.
    pub slots: Vec<SlotView>,
    /// Error text to display below the slots, if any.
    pub error: Option<String>,
}

/// Display options for the plain-text renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Mask committed characters (PIN entry) with this character.
    pub mask_char: Option<char>,
    /// Shown in empty slots.
    pub placeholder: char,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            mask_char: None,
            placeholder: '_',
        }
    }
}

// =============================================================================
// VIEW DERIVATION
// =============================================================================

/// Derive the display view from a snapshot.
///
/// The active slot gets `ACTIVE`, filled slots get `FILLED`, and every
/// slot carries `ERROR` while a validation error is showing.
pub fn view(snapshot: &EntrySnapshot) -> EntryView {
    let error_attr = if snapshot.error().is_some() {
        SlotAttr::ERROR
    } else {
        SlotAttr::NONE
    };

    let slots = snapshot
        .slots()
        .iter()
        .enumerate()
        .map(|(i, slot)| {
            let mut attrs = error_attr;
            if i == snapshot.active_index() {
                attrs |= SlotAttr::ACTIVE;
            }
            if slot.is_some() {
                attrs |= SlotAttr::FILLED;
            }
            SlotView { ch: *slot, attrs }
        })
        .collect();

    EntryView {
        slots,
        error: snapshot.error().map(str::to_string),
    }
}

// =============================================================================
// PLAIN-TEXT RENDERING
// =============================================================================

/// Render the slot row as a plain-text line, e.g. `[1] [2] [_] [_]`.
pub fn render_line(view: &EntryView, options: &RenderOptions) -> String {
    let mut line = String::with_capacity(view.slots.len() * 4);
    for (i, slot) in view.slots.iter().enumerate() {
        if i > 0 {
            line.push(' ');
        }
        let shown = match slot.ch {
            Some(ch) => options.mask_char.unwrap_or(ch),
            None => options.placeholder,
        };
        line.push('[');
        line.push(shown);
        line.push(']');
    }
    line
}

/// Render the full control: the slot row, then the error line if one is
/// showing.
pub fn render_lines(view: &EntryView, options: &RenderOptions) -> Vec<String> {
    let mut lines = vec![render_line(view, options)];
    if let Some(ref error) = view.error {
        lines.push(error.clone());
    }
    lines
}

// =============================================================================
// TESTS
// =============================================================================
