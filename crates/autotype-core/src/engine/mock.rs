//! Recording event sink for tests and benches.
//!
//! The real sinks inject events into the OS; tests instead record every
//! emission in order so assertions can inspect the exact press/release
//! stream. A one-shot transport failure can be injected to exercise the
//! abort path without a broken device.

use std::io;

use crate::keymap::{KeyName, KeySpace};

use super::{EventSink, SinkError};

/// One recorded emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkEvent {
    Press(KeyName),
    Release(KeyName),
}

/// An in-memory sink that records all events instead of injecting them.
#[derive(Debug)]
pub struct MockSink {
    /// Every emission, in order.
    pub events: Vec<SinkEvent>,
    key_space: KeySpace,
    fail_at: Option<usize>,
}

impl MockSink {
    /// A sink supporting the full key table.
    pub fn new() -> Self {
        Self::with_key_space(KeySpace::full())
    }

    /// A sink supporting only the given key space.
    pub fn with_key_space(key_space: KeySpace) -> Self {
        Self {
            events: Vec::new(),
            key_space,
            fail_at: None,
        }
    }

    /// Makes the sink fail exactly once: the first emission attempted after
    /// `n` events have been recorded returns a transport error. Later
    /// emissions succeed again, so best-effort cleanup stays observable.
    pub fn failing_after(mut self, n: usize) -> Self {
        self.fail_at = Some(n);
        self
    }

    /// The keys that were pressed, in order (releases filtered out).
    pub fn pressed_keys(&self) -> Vec<KeyName> {
        self.events
            .iter()
            .filter_map(|event| match event {
                SinkEvent::Press(key) => Some(*key),
                SinkEvent::Release(_) => None,
            })
            .collect()
    }

    fn record(&mut self, event: SinkEvent) -> Result<(), SinkError> {
        if self.fail_at == Some(self.events.len()) {
            self.fail_at = None;
            return Err(SinkError::Transport(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "injected transport failure",
            )));
        }
        self.events.push(event);
        Ok(())
    }
}

impl Default for MockSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for MockSink {
    fn press(&mut self, key: KeyName) -> Result<(), SinkError> {
        self.record(SinkEvent::Press(key))
    }

    fn release(&mut self, key: KeyName) -> Result<(), SinkError> {
        self.record(SinkEvent::Release(key))
    }

    fn key_space(&self) -> &KeySpace {
        &self.key_space
    }
}
