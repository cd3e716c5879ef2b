//! `autotype` entry point.
//!
//! Reads a secret from a hidden prompt, waits for the user to focus the
//! target window, then types the secret through a virtual keyboard.
//!
//! ```text
//! main()
//!  └─ Args::parse()         -- flag surface (cli.rs)
//!  └─ detect / parse layout -- locale lookup or explicit --layout
//!  └─ resolve()             -- layout + overrides + digit policy → chords
//!  └─ create_sink()         -- uinput virtual keyboard
//!  └─ type_text()           -- timed press/release synthesis
//! ```
//!
//! Exit codes: `0` success, `1` empty secret, `2` any failure (bad
//! override JSON, device errors, mid-run transport failures).

use std::process::ExitCode;
use std::thread;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use autotype_cli::cli::{Args, LayoutArg};
use autotype_cli::{detect, sink};
use autotype_core::engine::SERVICE_KEYS;
use autotype_core::{
    digit_keys_for, parse_overrides, resolve, type_text, FallbackPolicy, KeySpace, Layout,
    OverrideMap, ResolvedMapping, TypingOptions,
};

fn main() -> ExitCode {
    // Initialise structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(code) => code,
        Err(err) => {
            error!("{err:#}");
            ExitCode::from(2)
        }
    }
}

fn run(args: Args) -> anyhow::Result<ExitCode> {
    let layout = match args.layout {
        LayoutArg::Auto => detect::detect_layout(),
        LayoutArg::Fixed(layout) => layout,
    };
    info!(%layout, "using keyboard layout");

    let overrides = match &args.override_spec {
        Some(json) => parse_overrides(json).context("invalid --override")?,
        None => OverrideMap::new(),
    };
    let digits = digit_keys_for(layout, args.use_numpad());
    let fallback = if args.no_unicode_fallback {
        FallbackPolicy::disabled()
    } else {
        FallbackPolicy::new(
            layout,
            true,
            args.unicode_only.as_deref().map(|s| s.chars().collect()),
            args.unicode_except.as_deref().map(|s| s.chars().collect()),
        )
    };

    // Resolution happens against the full static table; the device is only
    // created afterwards, from the keys the mapping actually references.
    let mapping = resolve(layout, &overrides, digits, &KeySpace::full());

    if args.dump_layout {
        dump_mapping(layout, &mapping);
        return Ok(ExitCode::SUCCESS);
    }

    let secret = rpassword::prompt_password("Secret (hidden): ")?;
    if secret.is_empty() {
        eprintln!("Empty secret, nothing to type.");
        return Ok(ExitCode::from(1));
    }

    let device_keys = KeySpace::from_keys(
        mapping
            .keys()
            .into_iter()
            .chain(SERVICE_KEYS.iter().copied()),
    );
    let mut sink = sink::create_sink(args.backend, &device_keys)?;

    if args.show_unsupported {
        let unsupported = mapping.unsupported_chars(&secret, !args.no_unicode_fallback);
        if !unsupported.is_empty() {
            warn!(
                ?unsupported,
                "these characters have no chord on {layout} and will be skipped"
            );
        }
    }

    let wait = args.wait_duration();
    eprintln!(
        "Typing starts in {:.1}s; focus the target window now.",
        wait.as_secs_f64()
    );
    thread::sleep(wait);

    let options = TypingOptions {
        rate: args.rate_duration(),
        press_enter: args.enter,
        prime: !args.no_prime,
        prime_delay: args.prime_delay_duration(),
    };
    type_text(&mut sink, &mapping, &fallback, &secret, &options)?;

    info!(chars = secret.chars().count(), "typing complete");
    Ok(ExitCode::SUCCESS)
}

fn dump_mapping(layout: Layout, mapping: &ResolvedMapping) {
    println!("=== Effective mapping for {layout} ({} characters) ===", mapping.len());
    for entry in mapping.dump() {
        let mut mods = String::new();
        if entry.shift {
            mods.push_str(" +shift");
        }
        if entry.altgr {
            mods.push_str(" +altgr");
        }
        println!(
            "{:?} -> {} (code {}){}",
            entry.ch,
            entry.key.name(),
            entry.key.code(),
            mods
        );
    }
}
