//! Core types - Options, defaults, and slot attributes.
//!
//! Shared by the controller, keyboard, renderer, and reactive layers.

use bitflags::bitflags;

// =============================================================================
// Defaults
// =============================================================================

/// Default slot count.
pub const DEFAULT_SLOTS: usize = 4;

/// Default validation failure message.
pub const DEFAULT_ERROR_TEXT: &str = "Bad pin code.";

// =============================================================================
// Entry Options
// =============================================================================

/// Configuration for a code entry control.
///
/// Immutable for the controller's lifetime. Construct with struct-update
/// syntax:
///
/// ```
/// use codepin::EntryOptions;
///
/// let options = EntryOptions {
///     slots: 6,
///     numeric: true,
///     ..Default::default()
/// };
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryOptions {
    /// Number of slots (N).
    pub slots: usize,

    /// Pre-fills the buffer at construction.
    pub default_code: Option<String>,

    /// Enables validation of the completed entry. Should match `slots`
    /// in length; an expected code of a different length simply never
    /// matches.
    pub expected_code: Option<String>,

    /// Restrict accepted characters to decimal digits.
    pub numeric: bool,

    /// Message surfaced when validation fails.
    pub error_text: String,
}

impl Default for EntryOptions {
    fn default() -> Self {
        Self {
            slots: DEFAULT_SLOTS,
            default_code: None,
            expected_code: None,
            numeric: false,
            error_text: DEFAULT_ERROR_TEXT.to_string(),
        }
    }
}

// =============================================================================
// Slot Attributes (bitflags)
// =============================================================================

bitflags! {
    /// Per-slot display attributes as a bitfield.
    ///
    /// Combine with bitwise OR: `SlotAttr::ACTIVE | SlotAttr::FILLED`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct SlotAttr: u8 {
        const NONE = 0;
        const ACTIVE = 1 << 0;
        const FILLED = 1 << 1;
        const ERROR = 1 << 2;
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = EntryOptions::default();
        assert_eq!(options.slots, 4);
        assert!(options.default_code.is_none());
        assert!(options.expected_code.is_none());
        assert!(!options.numeric);
        assert_eq!(options.error_text, "Bad pin code.");
    }

    #[test]
    fn test_slot_attr_combination() {
        let attrs = SlotAttr::ACTIVE | SlotAttr::FILLED;
        assert!(attrs.contains(SlotAttr::ACTIVE));
        assert!(attrs.contains(SlotAttr::FILLED));
        assert!(!attrs.contains(SlotAttr::ERROR));
    }
}
