//! Classic French AZERTY layout table.
//!
//! Key points of the classic (non-AFNOR) French layout:
//! - Digits 1..0 require Shift; the unshifted top row produces
//!   `& é " ' ( - è _ ç à`.
//! - The US minus key produces `)` unshifted and `°` shifted; `²` sits on
//!   the key above Tab.
//! - The `, . / : ; ?` block differs entirely from QWERTY (`?` is Shift+M).
//! - Developer symbols (`~ [ ] { } | \ # @`) are AltGr-gated on the digit row.

use super::{KeyStep, LayoutTable};

/// Unshifted top-row symbols in key order `KEY_1..KEY_0`.
const TOP_ROW_UNSHIFTED: [char; 10] = ['&', 'é', '"', '\'', '(', '-', 'è', '_', 'ç', 'à'];

pub(super) fn build() -> LayoutTable {
    let mut table = LayoutTable::new();

    // Letters at their physical AZERTY positions
    let letters: [(char, &str); 26] = [
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
    for (ch, key) in letters {
        table.set(ch, KeyStep::plain(key));
        table.set(ch.to_ascii_uppercase(), KeyStep::shifted(key));
    }

    // Digits need Shift
    for ch in "1234567890".chars() {
        table.set(ch, KeyStep::shifted(format!("KEY_{ch}")));
    }

    // Unshifted top-row symbols
    for (idx, sym) in TOP_ROW_UNSHIFTED.into_iter().enumerate() {
        let key = if idx == 9 {
            "KEY_0".to_string()
        } else {
            format!("KEY_{}", idx + 1)
        };
        table.set(sym, KeyStep::plain(key));
    }

    // Whitespace / control
    table.set(' ', KeyStep::plain("KEY_SPACE"));
    table.set('\t', KeyStep::plain("KEY_TAB"));
    table.set('\n', KeyStep::plain("KEY_ENTER"));

    // Dedicated positions
    table.set(')', KeyStep::plain("KEY_MINUS"));
    table.set('°', KeyStep::shifted("KEY_MINUS"));
    table.set('²', KeyStep::plain("KEY_GRAVE"));
    table.set('~', KeyStep::altgr("KEY_2", false));

    // Punctuation block (classic FR)
    table.set(',', KeyStep::plain("KEY_SEMICOLON"));
    table.set('?', KeyStep::shifted("KEY_SEMICOLON"));
    table.set(';', KeyStep::plain("KEY_COMMA"));
    table.set('.', KeyStep::shifted("KEY_COMMA"));
    table.set(':', KeyStep::plain("KEY_DOT"));
    table.set('/', KeyStep::shifted("KEY_DOT"));

    // AltGr developer symbols (position varies between FR variants)
    table.set('[', KeyStep::altgr("KEY_8", false));
    table.set('{', KeyStep::altgr("KEY_8", true));
    table.set(']', KeyStep::altgr("KEY_9", false));
    table.set('}', KeyStep::altgr("KEY_9", true));
    table.set('|', KeyStep::altgr("KEY_6", false));
    table.set('\\', KeyStep::altgr("KEY_8", false));
    table.set('#', KeyStep::altgr("KEY_3", false));
    table.set('@', KeyStep::altgr("KEY_0", false));
    table.set('`', KeyStep::altgr("KEY_7", false));
    table.set('^', KeyStep::altgr("KEY_9", false));

    // Dedicated keys with no AltGr involvement
    table.set('=', KeyStep::plain("KEY_EQUAL"));
    table.set('+', KeyStep::shifted("KEY_EQUAL"));
    table.set('*', KeyStep::plain("KEY_BACKSLASH"));
    table.set('!', KeyStep::plain("KEY_SLASH"));
    table.set('<', KeyStep::plain("KEY_102ND"));
    table.set('>', KeyStep::shifted("KEY_102ND"));

    table
}
