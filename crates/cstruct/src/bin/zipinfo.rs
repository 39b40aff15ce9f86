//! Lists the local file entries of a zip archive as JSON.
//!
//! Usage: `cstruct-zipinfo [PATH]` (reads stdin when no path is given).
//! Log verbosity follows `RUST_LOG`. Built only with the `cli` feature.

use std::fs::File;
use std::io::{self, Read};

use anyhow::{Context, Result};
use cstruct::zip;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(io::stderr)
        .init();

    let mut input: Box<dyn Read> = match std::env::args_os().nth(1) {
        Some(path) => Box::new(
            File::open(&path).with_context(|| format!("opening {}", path.to_string_lossy()))?,
        ),
        None => Box::new(io::stdin().lock()),
    };

    let summary = zip::scan(|n| read_up_to(&mut input, n)).context("scanning archive")?;

    println!("{}", serde_json::to_string(&summary.to_json())?);
    tracing::info!(
        files = summary.files(),
        compressed = summary.compressed,
        uncompressed = summary.uncompressed,
        ratio = summary.ratio().unwrap_or(0.0),
        "scanned archive"
    );
    Ok(())
}

/// Reads `n` bytes, or everything left when the input ends first.
fn read_up_to(input: &mut impl Read, n: usize) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    input.take(n as u64).read_to_end(&mut buf)?;
    Ok(buf)
}
