//! The symbolic key-name space shared by the resolver and the event sinks.
//!
//! The canonical representation is [`KeyName`], a statically enumerated table
//! of the keys this engine can reference. Each variant's discriminant is the
//! Linux input-event code for that key (`include/uapi/linux/input-event-codes.h`),
//! so the uinput sink can transmit the value directly, while other sinks only
//! need the symbolic name.
//!
//! Layout tables and user overrides refer to keys by their symbolic evdev
//! name (`"KEY_A"`, `"KEY_KP5"`, `"KEY_102ND"`, …). Those strings are looked
//! up against a [`KeySpace`] — the subset of names a particular sink
//! supports — at resolution time, never earlier. A name absent from the
//! sink's space makes the referencing step unresolvable; it is not an error.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A physical key, identified by its Linux input-event code.
///
/// The numeric value of each variant is the evdev `KEY_*` constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u16)]
pub enum KeyName {
    // Digit row (KEY_1..KEY_0)
    Digit1 = 2,
    Digit2 = 3,
    Digit3 = 4,
    Digit4 = 5,
    Digit5 = 6,
    Digit6 = 7,
    Digit7 = 8,
    Digit8 = 9,
    Digit9 = 10,
    Digit0 = 11,

    Minus = 12,
    Equal = 13,
    Tab = 15,

    // Letters (QWERTY physical positions)
    KeyQ = 16,
    KeyW = 17,
    KeyE = 18,
    KeyR = 19,
    KeyT = 20,
    KeyY = 21,
    KeyU = 22,
    KeyI = 23,
    KeyO = 24,
    KeyP = 25,
    BracketLeft = 26,
    BracketRight = 27,
    Enter = 28,
    ControlLeft = 29,
    KeyA = 30,
    KeyS = 31,
    KeyD = 32,
    KeyF = 33,
    KeyG = 34,
    KeyH = 35,
    KeyJ = 36,
    KeyK = 37,
    KeyL = 38,
    Semicolon = 39,
    Quote = 40,
    Backquote = 41,
    ShiftLeft = 42,
    Backslash = 43,
    KeyZ = 44,
    KeyX = 45,
    KeyC = 46,
    KeyV = 47,
    KeyB = 48,
    KeyN = 49,
    KeyM = 50,
    Comma = 51,
    Period = 52,
    Slash = 53,
    Space = 57,

    // Keypad
    Numpad7 = 71,
    Numpad8 = 72,
    Numpad9 = 73,
    NumpadSubtract = 74,
    Numpad4 = 75,
    Numpad5 = 76,
    Numpad6 = 77,
    NumpadAdd = 78,
    Numpad1 = 79,
    Numpad2 = 80,
    Numpad3 = 81,
    Numpad0 = 82,

    // The <> key next to Left Shift on ISO keyboards
    Key102nd = 86,
    NumpadDivide = 98,
    AltRight = 100,
}

impl KeyName {
    /// Every key in the table, in evdev code order.
    pub const ALL: &'static [KeyName] = &[
        KeyName::Digit1,
        KeyName::Digit2,
        KeyName::Digit3,
        KeyName::Digit4,
        KeyName::Digit5,
        KeyName::Digit6,
        KeyName::Digit7,
        KeyName::Digit8,
        KeyName::Digit9,
        KeyName::Digit0,
        KeyName::Minus,
        KeyName::Equal,
        KeyName::Tab,
        KeyName::KeyQ,
        KeyName::KeyW,
        KeyName::KeyE,
        KeyName::KeyR,
        KeyName::KeyT,
        KeyName::KeyY,
        KeyName::KeyU,
        KeyName::KeyI,
        KeyName::KeyO,
        KeyName::KeyP,
        KeyName::BracketLeft,
        KeyName::BracketRight,
        KeyName::Enter,
        KeyName::ControlLeft,
        KeyName::KeyA,
        KeyName::KeyS,
        KeyName::KeyD,
        KeyName::KeyF,
        KeyName::KeyG,
        KeyName::KeyH,
        KeyName::KeyJ,
        KeyName::KeyK,
        KeyName::KeyL,
        KeyName::Semicolon,
        KeyName::Quote,
        KeyName::Backquote,
        KeyName::ShiftLeft,
        KeyName::Backslash,
        KeyName::KeyZ,
        KeyName::KeyX,
        KeyName::KeyC,
        KeyName::KeyV,
        KeyName::KeyB,
        KeyName::KeyN,
        KeyName::KeyM,
        KeyName::Comma,
        KeyName::Period,
        KeyName::Slash,
        KeyName::Space,
        KeyName::Numpad7,
        KeyName::Numpad8,
        KeyName::Numpad9,
        KeyName::NumpadSubtract,
        KeyName::Numpad4,
        KeyName::Numpad5,
        KeyName::Numpad6,
        KeyName::NumpadAdd,
        KeyName::Numpad1,
        KeyName::Numpad2,
        KeyName::Numpad3,
        KeyName::Numpad0,
        KeyName::Key102nd,
        KeyName::NumpadDivide,
        KeyName::AltRight,
    ];

    /// Returns the Linux input-event code for this key.
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Returns the symbolic evdev name (`"KEY_A"`, `"KEY_KP5"`, …).
    pub fn name(self) -> &'static str {
        match self {
            KeyName::Digit1 => "KEY_1",
            KeyName::Digit2 => "KEY_2",
            KeyName::Digit3 => "KEY_3",
            KeyName::Digit4 => "KEY_4",
            KeyName::Digit5 => "KEY_5",
            KeyName::Digit6 => "KEY_6",
            KeyName::Digit7 => "KEY_7",
            KeyName::Digit8 => "KEY_8",
            KeyName::Digit9 => "KEY_9",
            KeyName::Digit0 => "KEY_0",
            KeyName::Minus => "KEY_MINUS",
            KeyName::Equal => "KEY_EQUAL",
            KeyName::Tab => "KEY_TAB",
            KeyName::KeyQ => "KEY_Q",
            KeyName::KeyW => "KEY_W",
            KeyName::KeyE => "KEY_E",
            KeyName::KeyR => "KEY_R",
            KeyName::KeyT => "KEY_T",
            KeyName::KeyY => "KEY_Y",
            KeyName::KeyU => "KEY_U",
            KeyName::KeyI => "KEY_I",
            KeyName::KeyO => "KEY_O",
            KeyName::KeyP => "KEY_P",
            KeyName::BracketLeft => "KEY_LEFTBRACE",
            KeyName::BracketRight => "KEY_RIGHTBRACE",
            KeyName::Enter => "KEY_ENTER",
            KeyName::ControlLeft => "KEY_LEFTCTRL",
            KeyName::KeyA => "KEY_A",
            KeyName::KeyS => "KEY_S",
            KeyName::KeyD => "KEY_D",
            KeyName::KeyF => "KEY_F",
            KeyName::KeyG => "KEY_G",
            KeyName::KeyH => "KEY_H",
            KeyName::KeyJ => "KEY_J",
            KeyName::KeyK => "KEY_K",
            KeyName::KeyL => "KEY_L",
            KeyName::Semicolon => "KEY_SEMICOLON",
            KeyName::Quote => "KEY_APOSTROPHE",
            KeyName::Backquote => "KEY_GRAVE",
            KeyName::ShiftLeft => "KEY_LEFTSHIFT",
            KeyName::Backslash => "KEY_BACKSLASH",
            KeyName::KeyZ => "KEY_Z",
            KeyName::KeyX => "KEY_X",
            KeyName::KeyC => "KEY_C",
            KeyName::KeyV => "KEY_V",
            KeyName::KeyB => "KEY_B",
            KeyName::KeyN => "KEY_N",
            KeyName::KeyM => "KEY_M",
            KeyName::Comma => "KEY_COMMA",
            KeyName::Period => "KEY_DOT",
            KeyName::Slash => "KEY_SLASH",
            KeyName::Space => "KEY_SPACE",
            KeyName::Numpad7 => "KEY_KP7",
            KeyName::Numpad8 => "KEY_KP8",
            KeyName::Numpad9 => "KEY_KP9",
            KeyName::NumpadSubtract => "KEY_KPMINUS",
            KeyName::Numpad4 => "KEY_KP4",
            KeyName::Numpad5 => "KEY_KP5",
            KeyName::Numpad6 => "KEY_KP6",
            KeyName::NumpadAdd => "KEY_KPPLUS",
            KeyName::Numpad1 => "KEY_KP1",
            KeyName::Numpad2 => "KEY_KP2",
            KeyName::Numpad3 => "KEY_KP3",
            KeyName::Numpad0 => "KEY_KP0",
            KeyName::Key102nd => "KEY_102ND",
            KeyName::NumpadDivide => "KEY_KPSLASH",
            KeyName::AltRight => "KEY_RIGHTALT",
        }
    }

    /// Looks up a key by its symbolic evdev name.
    ///
    /// Names are matched exactly (the evdev convention is uppercase).
    /// Returns `None` for any name outside the table.
    pub fn from_name(name: &str) -> Option<KeyName> {
        KeyName::ALL.iter().copied().find(|k| k.name() == name)
    }
}

/// The set of key names a particular event sink recognises.
///
/// The resolver consults this to decide which [`KeyName`] references are
/// deliverable. Sinks derive their space from the keys they registered at
/// device creation; tests can construct arbitrary subsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySpace {
    keys: BTreeSet<KeyName>,
}

impl KeySpace {
    /// A space containing every key in the static table.
    pub fn full() -> Self {
        Self {
            keys: KeyName::ALL.iter().copied().collect(),
        }
    }

    /// Builds a space from an explicit set of keys.
    pub fn from_keys<I: IntoIterator<Item = KeyName>>(keys: I) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    /// Returns `true` if the sink supports `key`.
    pub fn contains(&self, key: KeyName) -> bool {
        self.keys.contains(&key)
    }

    /// Resolves a symbolic name to a key supported by this space.
    ///
    /// Returns `None` when the name is unknown or the sink does not carry it.
    pub fn lookup(&self, name: &str) -> Option<KeyName> {
        KeyName::from_name(name).filter(|k| self.contains(*k))
    }

    /// Iterates over the keys in this space in evdev code order.
    pub fn iter(&self) -> impl Iterator<Item = KeyName> + '_ {
        self.keys.iter().copied()
    }

    /// Number of keys in the space.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if the space is empty.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
