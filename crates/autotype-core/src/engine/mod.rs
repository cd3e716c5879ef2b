//! Keystroke synthesis: walks the input text against a resolved mapping and
//! drives an [`EventSink`] with ordered, timed press/release events.
//!
//! Timing is a contract, not an optimisation target. Remote KVM consoles and
//! compositors drop events delivered too fast to a freshly created synthetic
//! device, so each tap is followed by half the configured inter-key delay
//! and each character by the full delay. Execution is strictly sequential:
//! one character is fully emitted (events plus delay) before the next
//! begins, and the sink is exclusively owned for the duration of the run.
//!
//! Per-character failures (no resolved chord, unresolvable fallback digit)
//! degrade softly: the character is skipped and the run continues. Only
//! sink transport failures abort the run, and any modifier still held at
//! that point is released before the error propagates.

pub mod mock;

use std::io;
use std::thread;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, trace};

use crate::keymap::{KeyName, KeySpace};
use crate::policy::FallbackPolicy;
use crate::resolver::ResolvedMapping;

/// Minimum settle time after opening a Ctrl+Shift+U hex entry; IME frontends
/// need a beat before they accept the hex digits.
const UNICODE_SETTLE_MIN: Duration = Duration::from_millis(50);

/// Keys the engine emits on its own behalf, beyond the resolved mapping:
/// modifiers, the fallback chord keys, and the newline/priming keys.
/// Sinks must register these in addition to the mapping's key set.
pub const SERVICE_KEYS: &[KeyName] = &[
    KeyName::ShiftLeft,
    KeyName::AltRight,
    KeyName::ControlLeft,
    KeyName::Enter,
    KeyName::Space,
    KeyName::Tab,
    KeyName::KeyU,
];

/// Error raised by an event sink.
///
/// `DeviceUnavailable` and `PermissionDenied` occur while acquiring the
/// sink, before any typing begins. `Transport` is a mid-run write failure
/// and aborts the remaining characters.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The underlying device could not be opened or created.
    #[error("virtual input device unavailable: {0}")]
    DeviceUnavailable(String),

    /// Write access to the underlying device was refused.
    #[error("permission denied on input device: {0}")]
    PermissionDenied(String),

    /// An event write failed after the device was acquired.
    #[error("input event transport failed: {0}")]
    Transport(#[from] io::Error),
}

/// Error raised by a typing run.
#[derive(Debug, Error)]
pub enum TypingError {
    /// The sink failed mid-run; the run was aborted with modifiers released.
    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Destination for synthesized key events.
///
/// `press` and `release` are single atomic event emissions. The sink also
/// exposes the key-name space it supports, which the resolver consults and
/// the hex fallback uses for raw digit lookups.
pub trait EventSink {
    /// Emits a key-down event.
    fn press(&mut self, key: KeyName) -> Result<(), SinkError>;

    /// Emits a key-up event.
    fn release(&mut self, key: KeyName) -> Result<(), SinkError>;

    /// The key names this sink can deliver.
    fn key_space(&self) -> &KeySpace;
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn press(&mut self, key: KeyName) -> Result<(), SinkError> {
        (**self).press(key)
    }

    fn release(&mut self, key: KeyName) -> Result<(), SinkError> {
        (**self).release(key)
    }

    fn key_space(&self) -> &KeySpace {
        (**self).key_space()
    }
}

/// Knobs for one typing run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingOptions {
    /// Delay between characters; taps within a chord use half of it.
    pub rate: Duration,
    /// Tap Enter once after the full text has been typed.
    pub press_enter: bool,
    /// Send a harmless Shift tap before the first real character, so
    /// consumers that swallow the first event after device creation drop
    /// the primer instead of the secret's first character.
    pub prime: bool,
    /// Settle time before and after the priming tap.
    pub prime_delay: Duration,
}

impl Default for TypingOptions {
    fn default() -> Self {
        Self {
            rate: Duration::from_millis(60),
            press_enter: false,
            prime: true,
            prime_delay: Duration::from_millis(250),
        }
    }
}

/// Types `text` into `sink` using the resolved mapping and fallback policy.
///
/// # Errors
///
/// Returns [`TypingError::Sink`] when the sink's transport fails; the run
/// stops at that character with all held modifiers released. Unresolved
/// characters never error — they are skipped.
pub fn type_text<S: EventSink>(
    sink: &mut S,
    mapping: &ResolvedMapping,
    policy: &FallbackPolicy,
    text: &str,
    options: &TypingOptions,
) -> Result<(), TypingError> {
    let mut run = Run {
        sink,
        mapping,
        policy,
        held: Vec::new(),
    };
    match run.execute(text, options) {
        Ok(()) => Ok(()),
        Err(err) => {
            run.release_all_held();
            Err(TypingError::Sink(err))
        }
    }
}

/// State of one typing run: the sink plus the modifiers currently held.
struct Run<'a, S: EventSink> {
    sink: &'a mut S,
    mapping: &'a ResolvedMapping,
    policy: &'a FallbackPolicy,
    held: Vec<KeyName>,
}

impl<S: EventSink> Run<'_, S> {
    fn execute(&mut self, text: &str, options: &TypingOptions) -> Result<(), SinkError> {
        // Let the freshly created device settle before the first event.
        sleep(options.prime_delay);
        if options.prime {
            trace!("priming virtual keyboard with a Shift tap");
            self.tap(KeyName::ShiftLeft)?;
            sleep(options.prime_delay);
        }

        for ch in text.chars() {
            // Newline bypasses the mapping and the fallback decision.
            if ch == '\n' {
                self.tap(KeyName::Enter)?;
                sleep(options.rate);
                continue;
            }

            let use_fallback = self.policy.should_use_fallback(ch, self.mapping.contains(ch));
            let sent = if use_fallback {
                self.type_fallback(ch, options.rate)?
            } else {
                self.type_direct(ch, options.rate)?
            };

            if !sent {
                // Direct path came up empty: retry via the fallback when it
                // is enabled, otherwise drop the character and continue.
                if self.policy.enabled() && !use_fallback {
                    if !self.type_fallback(ch, options.rate)? {
                        debug!("dropping character: hex fallback digit unresolvable");
                    }
                } else {
                    debug!("dropping character: no deliverable chord");
                }
            }
        }

        if options.press_enter {
            self.tap(KeyName::Enter)?;
        }
        Ok(())
    }

    /// Emits the resolved chord sequence for `ch`.
    ///
    /// Returns `Ok(false)` when the character has no resolved entry.
    /// Modifiers are acquired AltGr-then-Shift and released in strictly
    /// reverse order.
    fn type_direct(&mut self, ch: char, delay: Duration) -> Result<bool, SinkError> {
        let Some(steps) = self.mapping.get(ch) else {
            return Ok(false);
        };
        for step in steps {
            if step.altgr {
                self.press_held(KeyName::AltRight)?;
            }
            if step.shift {
                self.press_held(KeyName::ShiftLeft)?;
            }
            self.tap(step.key)?;
            if step.shift {
                self.release_held(KeyName::ShiftLeft)?;
            }
            if step.altgr {
                self.release_held(KeyName::AltRight)?;
            }
            sleep(delay / 2);
        }
        sleep(delay);
        Ok(true)
    }

    /// Emits the Ctrl+Shift+U hex-entry sequence for `ch`.
    ///
    /// Each hex digit of the code point is typed through its own resolved
    /// chord, falling back to a raw `KEY_<digit>` lookup in the sink's key
    /// space. Returns `Ok(false)` when a digit cannot be delivered either
    /// way; the Space terminator is then withheld and the character counts
    /// as dropped.
    fn type_fallback(&mut self, ch: char, delay: Duration) -> Result<bool, SinkError> {
        self.press_held(KeyName::ControlLeft)?;
        self.press_held(KeyName::ShiftLeft)?;
        self.tap(KeyName::KeyU)?;
        self.release_held(KeyName::ShiftLeft)?;
        self.release_held(KeyName::ControlLeft)?;
        sleep(UNICODE_SETTLE_MIN.max(delay));

        let hex = format!("{:x}", ch as u32);
        for digit in hex.chars() {
            if !self.type_direct(digit, delay / 2)? {
                let raw_name = format!("KEY_{}", digit.to_ascii_uppercase());
                let Some(key) = self.sink.key_space().lookup(&raw_name) else {
                    return Ok(false);
                };
                self.tap(key)?;
            }
        }

        self.tap(KeyName::Space)?;
        sleep(delay);
        Ok(true)
    }

    fn tap(&mut self, key: KeyName) -> Result<(), SinkError> {
        self.sink.press(key)?;
        self.sink.release(key)
    }

    fn press_held(&mut self, key: KeyName) -> Result<(), SinkError> {
        self.sink.press(key)?;
        self.held.push(key);
        Ok(())
    }

    fn release_held(&mut self, key: KeyName) -> Result<(), SinkError> {
        self.sink.release(key)?;
        if let Some(pos) = self.held.iter().rposition(|held| *held == key) {
            self.held.remove(pos);
        }
        Ok(())
    }

    /// Best-effort release of every modifier still held. Used on the fatal
    /// error path so the run never leaves a stuck Shift/AltGr/Ctrl behind;
    /// secondary release failures are ignored.
    fn release_all_held(&mut self) {
        while let Some(key) = self.held.pop() {
            let _ = self.sink.release(key);
        }
    }
}

fn sleep(duration: Duration) {
    if !duration.is_zero() {
        thread::sleep(duration);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
