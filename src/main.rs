use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dht_bencode::{decode_with, encode_ordered, prettify, DecodeOptions, ErrorKind, KeyOrder, SyntaxError};

/// Decode a bencoded message, print it, and print its re-encoding.
#[derive(Parser)]
#[command(name = "dht-bencode", version)]
struct Cli {
    /// Input file (reads from stdin if omitted)
    input: Option<PathBuf>,
    /// Re-encode with dictionary keys sorted by raw bytes
    #[arg(long)]
    canonical: bool,
    /// Fail if bytes remain after the first value
    #[arg(long)]
    strict: bool,
    /// Accept negative integers such as i-3e
    #[arg(long)]
    allow_negative: bool,
    /// Maximum container nesting depth
    #[arg(long, default_value_t = dht_bencode::DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let inp = read_input(cli.input.as_ref())?;

    let options = DecodeOptions {
        max_depth: cli.max_depth,
        allow_negative: cli.allow_negative,
    };
    let (decoded, consumed) = decode_with(&inp, options).context("failed to decode input")?;
    if cli.strict && consumed != inp.len() {
        let err = SyntaxError {
            offset: consumed,
            kind: ErrorKind::TrailingData(inp.len() - consumed),
        };
        return Err(err).context("failed to decode input");
    }
    info!(consumed, total = inp.len(), "decoded input");

    let order = if cli.canonical {
        KeyOrder::Canonical
    } else {
        KeyOrder::Insertion
    };
    let encoded = encode_ordered(&decoded, order);

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "Decoded => {}", prettify(&decoded))?;
    writeln!(stdout, "Reencoded => {}", String::from_utf8_lossy(&encoded))?;
    Ok(())
}

fn read_input(path: Option<&PathBuf>) -> Result<Vec<u8>> {
    match path {
        Some(path) => fs::read(path).with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}
