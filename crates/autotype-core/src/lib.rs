//! # autotype-core
//!
//! Layout resolution and keystroke synthesis for typing text (typically a
//! secret) into whatever window currently has input focus, without going
//! through a clipboard.
//!
//! The crate is pure logic: it knows nothing about uinput, X11, or any
//! other delivery mechanism. Delivery backends implement the
//! [`engine::EventSink`] trait and live with the applications that own the
//! OS handles.
//!
//! The pipeline:
//!
//! - **`layout`** – built-in tables mapping characters to symbolic
//!   key-chords (`us`, `en-in`, `fr-azerty`, `ovh`).
//! - **`overrides`** – user-supplied per-character chord replacements,
//!   parsed from JSON.
//! - **`policy`** – the digit/numpad substitution and the per-character
//!   Unicode-fallback routing decision.
//! - **`resolver`** – compiles layout + overrides + digit policy against a
//!   sink's key space into the final character → chord table, degrading
//!   unresolvable entries softly.
//! - **`engine`** – walks the text and drives the sink with ordered, timed
//!   press/release events, including the Ctrl+Shift+U hex fallback.
//! - **`keymap`** – the statically enumerated key-name table shared by the
//!   resolver and the sinks.

pub mod engine;
pub mod keymap;
pub mod layout;
pub mod overrides;
pub mod policy;
pub mod resolver;

pub use engine::{type_text, EventSink, SinkError, TypingError, TypingOptions};
pub use keymap::{KeyName, KeySpace};
pub use layout::{build_layout, KeyStep, Layout, LayoutTable, UnknownLayout};
pub use overrides::{parse_overrides, OverrideError, OverrideMap};
pub use policy::{digit_keys_for, DigitKeys, FallbackPolicy};
pub use resolver::{resolve, DumpEntry, ResolvedMapping, ResolvedStep};
