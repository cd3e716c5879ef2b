//! US QWERTY layout table (also serves `en-in`).

use super::{KeyStep, LayoutTable};

/// Shifted symbols of the digit row, in `1..9,0` order.
const SHIFTED_DIGIT_ROW: [char; 10] = ['!', '@', '#', '$', '%', '^', '&', '*', '(', ')'];

pub(super) fn build() -> LayoutTable {
    let mut table = LayoutTable::new();

    // Letters
    for ch in 'a'..='z' {
        let key = format!("KEY_{}", ch.to_ascii_uppercase());
        table.set(ch, KeyStep::plain(key.clone()));
        table.set(ch.to_ascii_uppercase(), KeyStep::shifted(key));
    }

    // Digit row and its shifted symbols
    for (i, ch) in "1234567890".chars().enumerate() {
        let key = format!("KEY_{ch}");
        table.set(ch, KeyStep::plain(key.clone()));
        table.set(SHIFTED_DIGIT_ROW[i], KeyStep::shifted(key));
    }

    // Whitespace / control
    table.set(' ', KeyStep::plain("KEY_SPACE"));
    table.set('\t', KeyStep::plain("KEY_TAB"));
    table.set('\n', KeyStep::plain("KEY_ENTER"));

    // Punctuation
    table.set('-', KeyStep::plain("KEY_MINUS"));
    table.set('_', KeyStep::shifted("KEY_MINUS"));
    table.set('=', KeyStep::plain("KEY_EQUAL"));
    table.set('+', KeyStep::shifted("KEY_EQUAL"));
    table.set('[', KeyStep::plain("KEY_LEFTBRACE"));
    table.set('{', KeyStep::shifted("KEY_LEFTBRACE"));
    table.set(']', KeyStep::plain("KEY_RIGHTBRACE"));
    table.set('}', KeyStep::shifted("KEY_RIGHTBRACE"));
    table.set('\\', KeyStep::plain("KEY_BACKSLASH"));
    table.set('|', KeyStep::shifted("KEY_BACKSLASH"));
    table.set(';', KeyStep::plain("KEY_SEMICOLON"));
    table.set(':', KeyStep::shifted("KEY_SEMICOLON"));
    table.set('\'', KeyStep::plain("KEY_APOSTROPHE"));
    table.set('"', KeyStep::shifted("KEY_APOSTROPHE"));
    table.set(',', KeyStep::plain("KEY_COMMA"));
    table.set('<', KeyStep::shifted("KEY_COMMA"));
    table.set('.', KeyStep::plain("KEY_DOT"));
    table.set('>', KeyStep::shifted("KEY_DOT"));
    table.set('/', KeyStep::plain("KEY_SLASH"));
    table.set('?', KeyStep::shifted("KEY_SLASH"));
    table.set('`', KeyStep::plain("KEY_GRAVE"));
    table.set('~', KeyStep::shifted("KEY_GRAVE"));

    table
}
