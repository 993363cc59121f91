//! `digo-check`: validate a JSON document against field annotations.
//!
//! Usage:
//!   digo-check [--strict] '<annotation>'...
//!
//! The document is read from stdin. On success the decoded fields are
//! printed as a JSON object; on failure the error is printed to stderr and
//! the exit code is 1. `--strict` rejects unknown constraints.

use digo::{check_document, DecodeOptions, UnknownConstraintPolicy};
use std::io::{self, Read, Write};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: digo-check [--strict] '<annotation>'...";

fn main() {
    init_tracing();

    let mut options = DecodeOptions::new();
    let mut annotations = Vec::new();
    for arg in std::env::args().skip(1) {
        if arg == "--strict" {
            options = options.with_unknown_constraints(UnknownConstraintPolicy::Reject);
        } else {
            annotations.push(arg);
        }
    }
    if annotations.is_empty() {
        eprintln!("{USAGE}");
        std::process::exit(1);
    }

    let mut buf = Vec::new();
    if let Err(e) = io::stdin().read_to_end(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match check_document(&buf, &annotations, options) {
        Ok(value) => {
            io::stdout().write_all(value.to_string().as_bytes()).unwrap();
            io::stdout().write_all(b"\n").unwrap();
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}
