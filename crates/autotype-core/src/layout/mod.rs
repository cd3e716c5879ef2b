//! Built-in keyboard layout tables.
//!
//! A layout table maps a single Unicode character to the ordered sequence of
//! physical key taps (with modifiers) that produces it. Four layouts are
//! built in:
//!
//! - `us` — standard US QWERTY.
//! - `en-in` — English (India); identical to `us`.
//! - `fr-azerty` — classic French AZERTY, including the unshifted top-row
//!   symbols, shifted digits, and AltGr-gated developer symbols.
//! - `ovh` — the OVH KVM console quirk layout: AZERTY letter positions,
//!   US symbols with console-specific remaps, and keypad-only digits.
//!
//! Tables are plain values built once per run and handed to the resolver;
//! there is no global mutable state. Key references are symbolic names
//! (`"KEY_A"`) that stay unvalidated until resolution against a sink's
//! [`KeySpace`](crate::keymap::KeySpace).

mod fr_azerty;
mod ovh;
mod us;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Keypad key names for digits `0..9`, shared by the `ovh` table and the
/// numpad digit policy.
pub const KEYPAD_DIGIT_KEYS: [&str; 10] = [
    "KEY_KP0", "KEY_KP1", "KEY_KP2", "KEY_KP3", "KEY_KP4", "KEY_KP5", "KEY_KP6", "KEY_KP7",
    "KEY_KP8", "KEY_KP9",
];

/// One physical key tap plus the modifiers held while it is tapped.
///
/// A character maps to one or more `KeyStep`s; every built-in layout uses
/// exactly one step per character today, but the hex-fallback path and
/// future layouts require sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyStep {
    /// Symbolic evdev key name (e.g. `"KEY_A"`). Not validated here.
    pub key_name: String,
    /// Hold Shift while tapping.
    pub shift: bool,
    /// Hold AltGr while tapping.
    pub altgr: bool,
}

impl KeyStep {
    /// An unmodified tap.
    pub fn plain(key_name: impl Into<String>) -> Self {
        Self {
            key_name: key_name.into(),
            shift: false,
            altgr: false,
        }
    }

    /// A tap with Shift held.
    pub fn shifted(key_name: impl Into<String>) -> Self {
        Self {
            key_name: key_name.into(),
            shift: true,
            altgr: false,
        }
    }

    /// A tap with AltGr held, optionally with Shift.
    pub fn altgr(key_name: impl Into<String>, shift: bool) -> Self {
        Self {
            key_name: key_name.into(),
            shift,
            altgr: true,
        }
    }
}

/// The four built-in layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    Us,
    EnIn,
    FrAzerty,
    Ovh,
}

impl Layout {
    /// All selectable layouts, in the order they are documented.
    pub const ALL: &'static [Layout] = &[Layout::Us, Layout::EnIn, Layout::FrAzerty, Layout::Ovh];

    /// The CLI name of the layout.
    pub fn as_str(self) -> &'static str {
        match self {
            Layout::Us => "us",
            Layout::EnIn => "en-in",
            Layout::FrAzerty => "fr-azerty",
            Layout::Ovh => "ovh",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a layout name is not recognised.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown layout {0:?} (expected one of: us, en-in, fr-azerty, ovh)")]
pub struct UnknownLayout(pub String);

impl FromStr for Layout {
    type Err = UnknownLayout;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "us" => Ok(Layout::Us),
            "en-in" => Ok(Layout::EnIn),
            "fr-azerty" => Ok(Layout::FrAzerty),
            "ovh" => Ok(Layout::Ovh),
            other => Err(UnknownLayout(other.to_string())),
        }
    }
}

/// Immutable character → key-step-sequence mapping for one layout.
///
/// Backed by a `BTreeMap` so iteration is always in Unicode code-point
/// order, which the diagnostic dump relies on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutTable {
    entries: BTreeMap<char, Vec<KeyStep>>,
}

impl LayoutTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `ch` to a single-step chord, replacing any previous entry.
    pub fn set(&mut self, ch: char, step: KeyStep) {
        self.entries.insert(ch, vec![step]);
    }

    /// Sets `ch` to a multi-step sequence, replacing any previous entry.
    ///
    /// Empty sequences are ignored; every entry keeps at least one step.
    pub fn set_steps(&mut self, ch: char, steps: Vec<KeyStep>) {
        if !steps.is_empty() {
            self.entries.insert(ch, steps);
        }
    }

    /// Returns the step sequence for `ch`, if mapped.
    pub fn get(&self, ch: char) -> Option<&[KeyStep]> {
        self.entries.get(&ch).map(Vec::as_slice)
    }

    /// Returns `true` if `ch` has an entry.
    pub fn contains(&self, ch: char) -> bool {
        self.entries.contains_key(&ch)
    }

    /// Iterates entries in code-point order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &[KeyStep])> {
        self.entries.iter().map(|(ch, steps)| (*ch, steps.as_slice()))
    }

    /// Iterates the mapped characters in code-point order.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.entries.keys().copied()
    }

    /// Number of mapped characters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no characters are mapped.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builds the table for a layout. Pure and deterministic; no I/O.
pub fn build_layout(layout: Layout) -> LayoutTable {
    match layout {
        // en-in is an alias of us
        Layout::Us | Layout::EnIn => us::build(),
        Layout::FrAzerty => fr_azerty::build(),
        Layout::Ovh => ovh::build(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_from_str_accepts_all_documented_names() {
        assert_eq!("us".parse(), Ok(Layout::Us));
        assert_eq!("en-in".parse(), Ok(Layout::EnIn));
        assert_eq!("fr-azerty".parse(), Ok(Layout::FrAzerty));
        assert_eq!("ovh".parse(), Ok(Layout::Ovh));
    }

    #[test]
    fn test_layout_from_str_rejects_unknown_name() {
        let err = "qwertz".parse::<Layout>().unwrap_err();
        assert_eq!(err, UnknownLayout("qwertz".to_string()));
    }

    #[test]
    fn test_en_in_is_identical_to_us() {
        assert_eq!(build_layout(Layout::Us), build_layout(Layout::EnIn));
    }

    #[test]
    fn test_every_layout_covers_letters_digits_and_whitespace() {
        for layout in Layout::ALL {
            let table = build_layout(*layout);
            for ch in ('a'..='z').chain('A'..='Z').chain('0'..='9') {
                assert!(table.contains(ch), "{layout}: missing {ch:?}");
            }
            for ch in [' ', '\t', '\n'] {
                assert!(table.contains(ch), "{layout}: missing {ch:?}");
            }
        }
    }

    #[test]
    fn test_every_layout_covers_us_punctuation_set() {
        for layout in Layout::ALL {
            let table = build_layout(*layout);
            for ch in "-_=+[]{}\\|;:'\",.<>/?`~".chars() {
                assert!(table.contains(ch), "{layout}: missing {ch:?}");
            }
        }
    }

    #[test]
    fn test_every_entry_has_at_least_one_step() {
        for layout in Layout::ALL {
            let table = build_layout(*layout);
            for (ch, steps) in table.iter() {
                assert!(!steps.is_empty(), "{layout}: empty steps for {ch:?}");
            }
        }
    }

    #[test]
    fn test_us_letters_map_to_matching_keys() {
        let table = build_layout(Layout::Us);
        assert_eq!(table.get('a'), Some(&[KeyStep::plain("KEY_A")][..]));
        assert_eq!(table.get('A'), Some(&[KeyStep::shifted("KEY_A")][..]));
    }

    #[test]
    fn test_us_shifted_digit_symbols() {
        let table = build_layout(Layout::Us);
        assert_eq!(table.get('!'), Some(&[KeyStep::shifted("KEY_1")][..]));
        assert_eq!(table.get('('), Some(&[KeyStep::shifted("KEY_9")][..]));
        assert_eq!(table.get(')'), Some(&[KeyStep::shifted("KEY_0")][..]));
    }

    #[test]
    fn test_fr_azerty_physical_letter_positions() {
        let table = build_layout(Layout::FrAzerty);
        // 'a' sits on the physical Q key, 'm' on the semicolon key
        assert_eq!(table.get('a'), Some(&[KeyStep::plain("KEY_Q")][..]));
        assert_eq!(table.get('m'), Some(&[KeyStep::plain("KEY_SEMICOLON")][..]));
        assert_eq!(table.get('M'), Some(&[KeyStep::shifted("KEY_SEMICOLON")][..]));
    }

    #[test]
    fn test_fr_azerty_digits_require_shift_and_top_row_symbols_do_not() {
        let table = build_layout(Layout::FrAzerty);
        assert_eq!(table.get('1'), Some(&[KeyStep::shifted("KEY_1")][..]));
        assert_eq!(table.get('é'), Some(&[KeyStep::plain("KEY_2")][..]));
        assert_eq!(table.get('à'), Some(&[KeyStep::plain("KEY_0")][..]));
    }

    #[test]
    fn test_fr_azerty_altgr_symbols() {
        let table = build_layout(Layout::FrAzerty);
        assert_eq!(table.get('~'), Some(&[KeyStep::altgr("KEY_2", false)][..]));
        assert_eq!(table.get('{'), Some(&[KeyStep::altgr("KEY_8", true)][..]));
        assert_eq!(table.get('@'), Some(&[KeyStep::altgr("KEY_0", false)][..]));
    }

    #[test]
    fn test_fr_azerty_punctuation_block() {
        let table = build_layout(Layout::FrAzerty);
        assert_eq!(table.get(','), Some(&[KeyStep::plain("KEY_SEMICOLON")][..]));
        assert_eq!(table.get('?'), Some(&[KeyStep::shifted("KEY_SEMICOLON")][..]));
        assert_eq!(table.get(';'), Some(&[KeyStep::plain("KEY_COMMA")][..]));
        assert_eq!(table.get('.'), Some(&[KeyStep::shifted("KEY_COMMA")][..]));
        assert_eq!(table.get(':'), Some(&[KeyStep::plain("KEY_DOT")][..]));
        assert_eq!(table.get('/'), Some(&[KeyStep::shifted("KEY_DOT")][..]));
    }

    #[test]
    fn test_ovh_letters_use_azerty_positions() {
        let table = build_layout(Layout::Ovh);
        assert_eq!(table.get('a'), Some(&[KeyStep::plain("KEY_Q")][..]));
        assert_eq!(table.get('w'), Some(&[KeyStep::plain("KEY_Z")][..]));
        assert_eq!(table.get('M'), Some(&[KeyStep::shifted("KEY_SEMICOLON")][..]));
    }

    #[test]
    fn test_ovh_digits_and_arithmetic_use_keypad() {
        let table = build_layout(Layout::Ovh);
        assert_eq!(table.get('0'), Some(&[KeyStep::plain("KEY_KP0")][..]));
        assert_eq!(table.get('9'), Some(&[KeyStep::plain("KEY_KP9")][..]));
        assert_eq!(table.get('/'), Some(&[KeyStep::plain("KEY_KPSLASH")][..]));
        assert_eq!(table.get('-'), Some(&[KeyStep::plain("KEY_KPMINUS")][..]));
    }

    #[test]
    fn test_ovh_console_quirk_remaps() {
        let table = build_layout(Layout::Ovh);
        // '>' acts like FR '.', '<' like FR '?', '.' like FR ';'
        assert_eq!(table.get('>'), Some(&[KeyStep::shifted("KEY_COMMA")][..]));
        assert_eq!(table.get('<'), Some(&[KeyStep::shifted("KEY_SEMICOLON")][..]));
        assert_eq!(table.get('.'), Some(&[KeyStep::plain("KEY_COMMA")][..]));
        // '|' lives on the ISO <> key next to Left Shift
        assert_eq!(table.get('|'), Some(&[KeyStep::shifted("KEY_102ND")][..]));
        assert_eq!(table.get('_'), Some(&[KeyStep::shifted("KEY_MINUS")][..]));
    }
}
