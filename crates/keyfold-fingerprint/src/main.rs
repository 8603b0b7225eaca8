//! Fingerprint conformance binary.
//!
//! Reads an armored OpenPGP public key, derives its canonical keyfold
//! fingerprint, and prints it to stdout followed by a newline. The point
//! is cross-implementation conformance: any system that derives these
//! fingerprints can be checked against this binary byte for byte.
//!
//! # Usage
//!
//! ```bash
//! # From stdin
//! keyfold-fingerprint < alice.pub.asc
//!
//! # From a file
//! keyfold-fingerprint --input alice.pub.asc
//! ```
//!
//! Exit codes: `0` success, `1` empty or unreadable input, `2` input that
//! does not parse as a public key. Diagnostics go to stderr.

use std::io::{Read as _, Write as _};
use std::path::PathBuf;
use std::process::ExitCode;
use std::{fs, io};

use clap::Parser;
use keyfold_core::{armor, is_canonical_fingerprint};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Canonical fingerprint derivation for armored public keys
#[derive(Parser, Debug)]
#[command(name = "keyfold-fingerprint")]
#[command(about = "Derives the canonical keyfold fingerprint of an armored public key")]
#[command(version)]
struct Args {
    /// Read the armored key from a file instead of stdin
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    run(&args)
}

fn run(args: &Args) -> ExitCode {
    let input = match read_input(args) {
        Ok(input) => input,
        Err(err) => {
            tracing::error!("Cannot read input: {}", err);
            return ExitCode::from(1);
        }
    };

    let normalized = armor::normalize(&input);
    if normalized.is_empty() {
        tracing::error!("Input is empty");
        return ExitCode::from(1);
    }

    let cert = match keyfold_pgp::parse_cert(&normalized) {
        Ok(cert) => cert,
        Err(err) => {
            tracing::error!("Input does not parse as a public key: {}", err);
            return ExitCode::from(2);
        }
    };
    tracing::debug!(
        "Key capabilities: encryption subkey {}, signing subkey {}",
        keyfold_pgp::has_encryption_subkey(&cert),
        keyfold_pgp::has_signing_subkey(&cert)
    );

    let fingerprint = keyfold_pgp::canonical_fingerprint(&cert);
    if !is_canonical_fingerprint(&fingerprint) {
        tracing::error!("Derived fingerprint {:?} is not canonical", fingerprint);
        return ExitCode::from(2);
    }

    match write_fingerprint(&fingerprint) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("Cannot write to stdout: {}", err);
            ExitCode::from(1)
        }
    }
}

fn read_input(args: &Args) -> io::Result<String> {
    match &args.input {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// Stdout carries exactly the fingerprint and a trailing newline.
fn write_fingerprint(fingerprint: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{fingerprint}")?;
    stdout.flush()
}
