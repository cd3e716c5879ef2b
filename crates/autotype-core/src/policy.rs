//! Per-run typing policies: digit key selection and Unicode-fallback routing.
//!
//! Both policies are small value types decided once from the CLI flags and
//! the chosen layout, then consulted by the resolver (digits) and the
//! synthesis engine (fallback).

use std::collections::BTreeSet;

use crate::layout::{KeyStep, Layout, LayoutTable, KEYPAD_DIGIT_KEYS};

/// Which physical keys type the digit characters `0..9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigitKeys {
    /// The layout's native top-row digit chords.
    TopRow,
    /// The numeric keypad, unmodified.
    Keypad,
}

/// Decides the digit key source for a layout.
///
/// `ovh` always types digits through the keypad; the user flag is ignored
/// there because the console firmware only accepts keypad digits. Every
/// other layout follows the flag.
pub fn digit_keys_for(layout: Layout, use_numpad: bool) -> DigitKeys {
    if layout == Layout::Ovh || use_numpad {
        DigitKeys::Keypad
    } else {
        DigitKeys::TopRow
    }
}

/// Rewrites the digit entries of `table` according to the policy.
///
/// Applied after base-layout construction and before the override merge, so
/// an explicit override for a digit character always wins over this policy.
pub fn apply_digit_policy(table: &mut LayoutTable, digits: DigitKeys) {
    if digits == DigitKeys::TopRow {
        return;
    }
    for (digit, key) in ('0'..='9').zip(KEYPAD_DIGIT_KEYS) {
        table.set(digit, KeyStep::plain(key));
    }
}

/// Per-character routing between the direct chord path and the
/// Ctrl+Shift+U hex-input fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackPolicy {
    enabled: bool,
    prefer: BTreeSet<char>,
}

impl FallbackPolicy {
    /// Characters the layout prefers to type via the fallback even though a
    /// direct chord exists. Only `fr-azerty` carries a default set: its
    /// AltGr developer symbols are unreliable across FR variants.
    pub fn default_prefer_set(layout: Layout) -> BTreeSet<char> {
        match layout {
            Layout::FrAzerty => "`{}[]|\\^@".chars().collect(),
            Layout::Us | Layout::EnIn | Layout::Ovh => BTreeSet::new(),
        }
    }

    /// Builds the effective policy.
    ///
    /// An explicit `only` set replaces the layout default entirely;
    /// otherwise the default minus the `except` set applies.
    pub fn new(
        layout: Layout,
        enabled: bool,
        only: Option<BTreeSet<char>>,
        except: Option<BTreeSet<char>>,
    ) -> Self {
        let prefer = match only {
            Some(set) => set,
            None => {
                let mut set = Self::default_prefer_set(layout);
                if let Some(except) = except {
                    set.retain(|ch| !except.contains(ch));
                }
                set
            }
        };
        Self { enabled, prefer }
    }

    /// A policy with fallback switched off entirely.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            prefer: BTreeSet::new(),
        }
    }

    /// Whether the fallback mechanism is available at all.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Decides the path for one character occurrence.
    ///
    /// With fallback disabled the answer is always `false` (an unresolved
    /// character is dropped instead). With fallback enabled, a character is
    /// routed to the fallback when it has no direct resolved chord or when
    /// it is a member of the preference set.
    pub fn should_use_fallback(&self, ch: char, has_direct_mapping: bool) -> bool {
        self.enabled && (!has_direct_mapping || self.prefer.contains(&ch))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
