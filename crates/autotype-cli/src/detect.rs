//! Keyboard-layout auto-detection.
//!
//! A pure lookup on the POSIX locale variables. No X11/Wayland
//! introspection: the process locale is the only signal that is available
//! on a headless console as well as a desktop.

use autotype_core::Layout;
use tracing::debug;

/// Best-effort layout guess from `LC_ALL` / `LANG`.
///
/// Falls back to [`Layout::Us`] when neither variable is set or the locale
/// matches no built-in layout.
pub fn detect_layout() -> Layout {
    let locale = std::env::var("LC_ALL")
        .or_else(|_| std::env::var("LANG"))
        .unwrap_or_default();
    let layout = layout_for_locale(&locale);
    debug!(%locale, %layout, "auto-detected keyboard layout");
    layout
}

/// Maps a POSIX locale string to the closest built-in layout.
pub fn layout_for_locale(locale: &str) -> Layout {
    let lower = locale.to_ascii_lowercase();
    if lower.starts_with("fr") {
        Layout::FrAzerty
    } else if lower.starts_with("en_in") || lower.starts_with("en-in") {
        Layout::EnIn
    } else {
        Layout::Us
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
