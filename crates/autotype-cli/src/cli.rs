//! Command-line argument surface.
//!
//! All flags are decided here once and converted into the value types the
//! core crate consumes (`Duration`s, policy structs, layout choice). Nothing
//! in this module touches a device.

use std::str::FromStr;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use autotype_core::{Layout, UnknownLayout};

/// Event delivery backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// Pick the best backend for the current platform.
    Auto,
    /// Linux virtual keyboard via `/dev/uinput`.
    Uinput,
}

/// `--layout` accepts the built-in layout names plus `auto`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutArg {
    Auto,
    Fixed(Layout),
}

impl FromStr for LayoutArg {
    type Err = UnknownLayout;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("auto") {
            Ok(LayoutArg::Auto)
        } else {
            Layout::from_str(s).map(LayoutArg::Fixed)
        }
    }
}

/// Type a secret into the focused window through a virtual keyboard.
///
/// The secret is read from a hidden prompt, never from the command line or
/// the clipboard.
#[derive(Debug, Parser)]
#[command(name = "autotype", version, about)]
pub struct Args {
    /// Seconds to wait after the prompt before typing starts.
    #[arg(short = 'w', long, default_value_t = 5.0)]
    pub wait: f64,

    /// Press Enter after the last character.
    #[arg(short = 'e', long)]
    pub enter: bool,

    /// Seconds between characters.
    #[arg(short = 'r', long, default_value_t = 0.06)]
    pub rate: f64,

    /// Keyboard layout of the target system (us, en-in, fr-azerty, ovh),
    /// or `auto` to guess from the locale.
    #[arg(long, default_value = "auto")]
    pub layout: LayoutArg,

    /// Event delivery backend.
    #[arg(long, value_enum, default_value_t = Backend::Auto)]
    pub backend: Backend,

    /// JSON object remapping single characters to chords,
    /// e.g. '{"a": "KEY_Q", "#": {"key": "KEY_3", "shift": true}}'.
    #[arg(long = "override", value_name = "JSON")]
    pub override_spec: Option<String>,

    /// Print the effective character mapping and exit without typing.
    #[arg(long)]
    pub dump_layout: bool,

    /// Warn about secret characters the layout cannot produce before the
    /// countdown starts.
    #[arg(long)]
    pub show_unsupported: bool,

    /// Skip the priming Shift tap before the first character.
    #[arg(long)]
    pub no_prime: bool,

    /// Seconds to sleep before the priming tap, giving the desktop time to
    /// register the new virtual device.
    #[arg(long, default_value_t = 0.25)]
    pub prime_delay: f64,

    /// Disable the Ctrl+Shift+U hex input fallback; characters without a
    /// direct chord are dropped instead.
    #[arg(long)]
    pub no_unicode_fallback: bool,

    /// Characters to always type through the hex fallback, replacing the
    /// layout's default preference set.
    #[arg(long, value_name = "CHARS")]
    pub unicode_only: Option<String>,

    /// Characters to remove from the layout's default fallback preference
    /// set.
    #[arg(long, value_name = "CHARS")]
    pub unicode_except: Option<String>,

    /// Type digits on the top row instead of the numeric keypad.
    /// Ignored for `ovh`, which only accepts keypad digits.
    #[arg(long)]
    pub no_numpad: bool,
}

impl Args {
    /// Keypad digits are the default; `--no-numpad` restores the top row.
    pub fn use_numpad(&self) -> bool {
        !self.no_numpad
    }

    pub fn wait_duration(&self) -> Duration {
        Duration::from_secs_f64(self.wait.max(0.0))
    }

    pub fn rate_duration(&self) -> Duration {
        Duration::from_secs_f64(self.rate.max(0.0))
    }

    pub fn prime_delay_duration(&self) -> Duration {
        Duration::from_secs_f64(self.prime_delay.max(0.0))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("autotype").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults_match_documented_behaviour() {
        let args = parse(&[]);
        assert_eq!(args.wait, 5.0);
        assert_eq!(args.rate, 0.06);
        assert_eq!(args.layout, LayoutArg::Auto);
        assert_eq!(args.backend, Backend::Auto);
        assert!(!args.enter);
        assert!(!args.no_prime);
        assert!(!args.no_unicode_fallback);
        assert!(args.use_numpad(), "keypad digits are the default");
    }

    #[test]
    fn test_no_numpad_selects_top_row_digits() {
        let args = parse(&["--no-numpad"]);
        assert!(!args.use_numpad());
        assert_eq!(
            autotype_core::digit_keys_for(Layout::Us, args.use_numpad()),
            autotype_core::DigitKeys::TopRow
        );
    }

    #[test]
    fn test_default_digit_policy_is_keypad_for_every_layout() {
        let args = parse(&[]);
        for layout in Layout::ALL {
            assert_eq!(
                autotype_core::digit_keys_for(*layout, args.use_numpad()),
                autotype_core::DigitKeys::Keypad
            );
        }
    }

    #[test]
    fn test_layout_flag_accepts_every_builtin_name() {
        for layout in Layout::ALL {
            let args = parse(&["--layout", layout.as_str()]);
            assert_eq!(args.layout, LayoutArg::Fixed(*layout));
        }
    }

    #[test]
    fn test_unknown_layout_is_rejected_at_parse_time() {
        let result =
            Args::try_parse_from(["autotype", "--layout", "dvorak"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_negative_timings_clamp_to_zero() {
        let args = parse(&["--wait=-3", "--rate=-1", "--prime-delay=-0.5"]);
        assert_eq!(args.wait_duration(), Duration::ZERO);
        assert_eq!(args.rate_duration(), Duration::ZERO);
        assert_eq!(args.prime_delay_duration(), Duration::ZERO);
    }

    #[test]
    fn test_override_flag_keeps_raw_json() {
        let args = parse(&["--override", r#"{"a": "KEY_Q"}"#]);
        assert_eq!(args.override_spec.as_deref(), Some(r#"{"a": "KEY_Q"}"#));
    }
}
