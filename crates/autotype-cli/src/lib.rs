//! Support library for the `autotype` binary.
//!
//! The binary itself only wires these pieces together:
//!
//! - [`cli`] – clap argument surface and flag-to-policy conversions.
//! - [`detect`] – locale-based keyboard-layout auto-detection.
//! - [`sink`] – the OS event-delivery backends (uinput on Linux).

pub mod cli;
pub mod detect;
pub mod sink;
