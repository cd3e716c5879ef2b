//! Compiles a layout, overrides, and the digit policy into the final
//! character → resolved-chord table used by the synthesis engine.
//!
//! Resolution never fails hard. A key name the sink does not recognise
//! drops that single step; a character whose steps all drop simply has no
//! resolved entry and is left to the fallback/drop decision at synthesis
//! time. The mapping is built once per run, consumed read-only by the
//! engine, and discarded afterwards.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::keymap::{KeyName, KeySpace};
use crate::layout::{build_layout, Layout};
use crate::overrides::{apply_overrides, OverrideMap};
use crate::policy::{apply_digit_policy, DigitKeys};

/// One resolved physical tap: a key the sink recognises plus modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedStep {
    pub key: KeyName,
    pub shift: bool,
    pub altgr: bool,
}

/// A line of the diagnostic dump: a character and its primary chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DumpEntry {
    pub ch: char,
    pub key: KeyName,
    pub shift: bool,
    pub altgr: bool,
}

/// The compiled character → chord-sequence table for one typing run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedMapping {
    entries: BTreeMap<char, Vec<ResolvedStep>>,
}

impl ResolvedMapping {
    /// Returns the resolved steps for `ch`, if any survived resolution.
    pub fn get(&self, ch: char) -> Option<&[ResolvedStep]> {
        self.entries.get(&ch).map(Vec::as_slice)
    }

    /// Returns `true` if `ch` has a resolved entry.
    pub fn contains(&self, ch: char) -> bool {
        self.entries.contains_key(&ch)
    }

    /// Iterates resolved characters in code-point order.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.entries.keys().copied()
    }

    /// Number of resolved characters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing resolved.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every physical key referenced by at least one resolved step. Sinks
    /// that register keys at device creation take this set plus the
    /// engine's service keys.
    pub fn keys(&self) -> BTreeSet<KeyName> {
        self.entries
            .values()
            .flatten()
            .map(|step| step.key)
            .collect()
    }

    /// Diagnostic view: every resolved character in code-point order with
    /// its first step's key and modifier flags. Purely informational; it
    /// has no effect on the typing run.
    pub fn dump(&self) -> impl Iterator<Item = DumpEntry> + '_ {
        self.entries.iter().map(|(ch, steps)| {
            // set_steps / resolution guarantee at least one step per entry
            let first = steps[0];
            DumpEntry {
                ch: *ch,
                key: first.key,
                shift: first.shift,
                altgr: first.altgr,
            }
        })
    }

    /// Pre-flight listing of characters in `text` that would be dropped.
    ///
    /// Informational only: this deliberately ignores the fallback preference
    /// set and reports nothing when the fallback is enabled, so the actual
    /// per-character decision inside the typing loop remains authoritative.
    pub fn unsupported_chars(&self, text: &str, fallback_enabled: bool) -> Vec<char> {
        if fallback_enabled {
            return Vec::new();
        }
        let mut chars: Vec<char> = text
            .chars()
            .filter(|ch| *ch != '\n' && !self.contains(*ch))
            .collect();
        chars.sort_unstable();
        chars.dedup();
        chars
    }
}

/// Builds the resolved mapping for one run.
///
/// Pipeline: base layout table → digit policy → override merge → key-name
/// resolution against `key_space`. Overrides are merged after the digit
/// policy so an explicit override on a digit character beats the policy.
pub fn resolve(
    layout: Layout,
    overrides: &OverrideMap,
    digits: DigitKeys,
    key_space: &KeySpace,
) -> ResolvedMapping {
    let mut table = build_layout(layout);
    apply_digit_policy(&mut table, digits);
    apply_overrides(&mut table, overrides);

    let mut entries: BTreeMap<char, Vec<ResolvedStep>> = BTreeMap::new();
    for (ch, steps) in table.iter() {
        let resolved: Vec<ResolvedStep> = steps
            .iter()
            .filter_map(|step| match key_space.lookup(&step.key_name) {
                Some(key) => Some(ResolvedStep {
                    key,
                    shift: step.shift,
                    altgr: step.altgr,
                }),
                None => {
                    debug!(
                        key_name = %step.key_name,
                        character = ?ch,
                        "dropping step: key not in sink key space"
                    );
                    None
                }
            })
            .collect();
        if !resolved.is_empty() {
            entries.insert(ch, resolved);
        }
    }

    ResolvedMapping { entries }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overrides::parse_overrides;
    use crate::policy::digit_keys_for;

    fn resolve_plain(layout: Layout) -> ResolvedMapping {
        resolve(
            layout,
            &OverrideMap::new(),
            digit_keys_for(layout, false),
            &KeySpace::full(),
        )
    }

    #[test]
    fn test_full_key_space_resolves_every_layout_character() {
        for layout in Layout::ALL {
            let table = build_layout(*layout);
            let resolved = resolve(
                *layout,
                &OverrideMap::new(),
                DigitKeys::TopRow,
                &KeySpace::full(),
            );
            let expected: Vec<char> = table.chars().collect();
            let got: Vec<char> = resolved.chars().collect();
            assert_eq!(got, expected, "{layout}: resolved set must match layout set");
        }
    }

    #[test]
    fn test_resolved_steps_carry_codes_and_flags() {
        let resolved = resolve_plain(Layout::Us);
        let steps = resolved.get('A').unwrap();
        assert_eq!(
            steps,
            &[ResolvedStep {
                key: KeyName::KeyA,
                shift: true,
                altgr: false
            }]
        );
    }

    #[test]
    fn test_missing_key_makes_character_unresolved() {
        // A key space without the keypad cannot type ovh digits
        let space = KeySpace::from_keys(
            KeyName::ALL
                .iter()
                .copied()
                .filter(|k| !k.name().starts_with("KEY_KP")),
        );
        let resolved = resolve(
            Layout::Ovh,
            &OverrideMap::new(),
            digit_keys_for(Layout::Ovh, false),
            &space,
        );
        assert!(!resolved.contains('5'));
        assert!(resolved.contains('a'), "letters are unaffected");
    }

    #[test]
    fn test_override_with_unknown_key_name_degrades_to_unresolved() {
        let overrides = parse_overrides(r#"{"a": "KEY_NOPE"}"#).unwrap();
        let resolved = resolve(
            Layout::Us,
            &overrides,
            DigitKeys::TopRow,
            &KeySpace::full(),
        );
        assert!(!resolved.contains('a'));
        assert!(resolved.contains('b'));
    }

    #[test]
    fn test_numpad_policy_remaps_digits_for_non_ovh_layout() {
        let resolved = resolve(
            Layout::Us,
            &OverrideMap::new(),
            digit_keys_for(Layout::Us, true),
            &KeySpace::full(),
        );
        let steps = resolved.get('5').unwrap();
        assert_eq!(steps[0].key, KeyName::Numpad5);
        assert!(!steps[0].shift);
    }

    #[test]
    fn test_top_row_flag_preserves_native_digit_chords() {
        let resolved = resolve(
            Layout::FrAzerty,
            &OverrideMap::new(),
            digit_keys_for(Layout::FrAzerty, false),
            &KeySpace::full(),
        );
        let steps = resolved.get('5').unwrap();
        assert_eq!(steps[0].key, KeyName::Digit5);
        assert!(steps[0].shift, "FR digits require Shift");
    }

    #[test]
    fn test_ovh_digits_resolve_to_keypad_for_any_flag_value() {
        for use_numpad in [true, false] {
            let resolved = resolve(
                Layout::Ovh,
                &OverrideMap::new(),
                digit_keys_for(Layout::Ovh, use_numpad),
                &KeySpace::full(),
            );
            for (digit, key) in ('0'..='9').zip([
                KeyName::Numpad0,
                KeyName::Numpad1,
                KeyName::Numpad2,
                KeyName::Numpad3,
                KeyName::Numpad4,
                KeyName::Numpad5,
                KeyName::Numpad6,
                KeyName::Numpad7,
                KeyName::Numpad8,
                KeyName::Numpad9,
            ]) {
                assert_eq!(resolved.get(digit).unwrap()[0].key, key);
            }
        }
    }

    #[test]
    fn test_digit_override_beats_numpad_policy() {
        let overrides = parse_overrides(r#"{"5": "KEY_5+shift"}"#).unwrap();
        let resolved = resolve(
            Layout::Us,
            &overrides,
            digit_keys_for(Layout::Us, true),
            &KeySpace::full(),
        );
        let steps = resolved.get('5').unwrap();
        assert_eq!(steps[0].key, KeyName::Digit5);
        assert!(steps[0].shift);
    }

    #[test]
    fn test_keys_collects_every_referenced_key() {
        let resolved = resolve(
            Layout::Us,
            &OverrideMap::new(),
            digit_keys_for(Layout::Us, true),
            &KeySpace::full(),
        );
        let keys = resolved.keys();
        assert!(keys.contains(&KeyName::KeyA));
        assert!(keys.contains(&KeyName::Numpad5), "numpad policy keys included");
        assert!(
            !keys.contains(&KeyName::NumpadDivide),
            "keys no chord references stay out"
        );
    }

    #[test]
    fn test_dump_is_code_point_ordered() {
        let resolved = resolve_plain(Layout::Us);
        let dumped: Vec<char> = resolved.dump().map(|entry| entry.ch).collect();
        let mut sorted = dumped.clone();
        sorted.sort_unstable();
        assert_eq!(dumped, sorted);
    }

    #[test]
    fn test_unsupported_chars_lists_unresolved_only_when_fallback_disabled() {
        let resolved = resolve_plain(Layout::Us);
        assert_eq!(resolved.unsupported_chars("héllo\n", false), vec!['é']);
        assert!(resolved.unsupported_chars("héllo\n", true).is_empty());
    }

    #[test]
    fn test_unsupported_chars_deduplicates_and_sorts() {
        let resolved = resolve_plain(Layout::Us);
        assert_eq!(resolved.unsupported_chars("ßéß", false), vec!['ß', 'é']);
    }
}
