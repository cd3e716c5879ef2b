//! OVH KVM console quirk layout.
//!
//! The OVH out-of-band KVM interprets keystrokes with a mix of conventions:
//! letters land on AZERTY physical positions, symbols mostly follow
//! US/QWERTY, and digits are only reliable through the numeric keypad.
//! The symbol remaps below were established against the actual console
//! firmware and must be kept literal.

use super::{us, KeyStep, LayoutTable, KEYPAD_DIGIT_KEYS};

pub(super) fn build() -> LayoutTable {
    // Start from US symbols
    let mut table = us::build();

    // Letters: AZERTY physical positions
    let fr_letters: [(char, &str); 26] = [
        ('a', "KEY_Q"),
        ('z', "KEY_W"),
        ('e', "KEY_E"),
        ('r', "KEY_R"),
        ('t', "KEY_T"),
        ('y', "KEY_Y"),
        ('u', "KEY_U"),
        ('i', "KEY_I"),
        ('o', "KEY_O"),
        ('p', "KEY_P"),
        ('q', "KEY_A"),
        ('s', "KEY_S"),
        ('d', "KEY_D"),
        ('f', "KEY_F"),
        ('g', "KEY_G"),
        ('h', "KEY_H"),
        ('j', "KEY_J"),
        ('k', "KEY_K"),
        ('l', "KEY_L"),
        ('m', "KEY_SEMICOLON"),
        ('w', "KEY_Z"),
        ('x', "KEY_X"),
        ('c', "KEY_C"),
        ('v', "KEY_V"),
        ('b', "KEY_B"),
        ('n', "KEY_N"),
    ];
    for (ch, key) in fr_letters {
        table.set(ch, KeyStep::plain(key));
        table.set(ch.to_ascii_uppercase(), KeyStep::shifted(key));
    }

    // Digits and arithmetic: keypad only
    for (digit, key) in ('0'..='9').zip(KEYPAD_DIGIT_KEYS) {
        table.set(digit, KeyStep::plain(key));
    }
    table.set('/', KeyStep::plain("KEY_KPSLASH"));
    table.set('-', KeyStep::plain("KEY_KPMINUS"));

    // Console-specific symbol quirks:
    // '>' acts like FR '.'  -> Shift + COMMA
    table.set('>', KeyStep::shifted("KEY_COMMA"));
    // '<' acts like FR '?'  -> Shift + M (evdev KEY_SEMICOLON)
    table.set('<', KeyStep::shifted("KEY_SEMICOLON"));
    // '.' acts like FR ';'  -> COMMA, no shift
    table.set('.', KeyStep::plain("KEY_COMMA"));
    // '|' is Shift + the ISO <> key next to Left Shift
    table.set('|', KeyStep::shifted("KEY_102ND"));
    // underscore is not on the keypad; use the US chord
    table.set('_', KeyStep::shifted("KEY_MINUS"));

    table
}
