//! # CLI
//!
//! The command line version of the library. Given a replay path, it reads the whole file into
//! memory, inflates it (unless told the file is already inflated), and decodes it. The replay
//! metadata is written to stdout as JSON, optionally followed by the events or the per lap data.
use anyhow::{Context, Result};
use clap::Parser;
use rf2vcr::laps::aggregate;
use serde::Serialize;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "rf2vcr", about = "Decodes an rFactor 2 replay and outputs JSON")]
struct Opt {
    /// Input is already inflated
    #[arg(long)]
    raw: bool,

    /// Output every decoded event as a JSON line after the replay
    #[arg(long, conflicts_with = "laps")]
    events: bool,

    /// Output telemetry and checkpoints grouped by driver and lap
    #[arg(long)]
    laps: bool,

    /// Pretty print JSON
    #[arg(long)]
    pretty: bool,

    /// rFactor 2 replay file
    input: PathBuf,
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

fn run() -> Result<()> {
    let opt = Opt::parse();
    let contents =
        fs::read(&opt.input).with_context(|| format!("unable to read {}", opt.input.display()))?;

    let data = if opt.raw {
        contents
    } else {
        rf2vcr::decompress(&contents)?
    };

    let replay = rf2vcr::decode(&data)?;
    info!(
        drivers = replay.drivers.len(),
        slices = replay.slice_count,
        "decoded {}",
        opt.input.display()
    );

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_json(&mut out, &replay, opt.pretty)?;

    if opt.events {
        for event in replay.events() {
            serde_json::to_writer(&mut out, &event?)?;
            writeln!(out)?;
        }
    } else if opt.laps {
        let laps = aggregate(replay.events())?;
        write_json(&mut out, &laps, opt.pretty)?;
    }

    out.flush()?;
    Ok(())
}

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    if let Err(e) = run() {
        eprintln!("{:?}", e);
        std::process::exit(1);
    }
}
