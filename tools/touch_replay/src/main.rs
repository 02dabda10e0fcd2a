use std::{path::PathBuf, process};

use anyhow::{bail, Result};
use clap::Parser;
use gesturekit::GestureConfig;
use touch_replay::{
    format_event, load_config, parse_expected_kinds, parse_trace, replay, EVENT_HEADER,
};

#[derive(Debug, Parser)]
#[command(name = "touch_replay")]
#[command(about = "Replay a recorded contact trace through the gesture recognizer")]
struct Cli {
    /// CSV trace with `contact,ms,phase,id,x,y` rows.
    trace: PathBuf,
    /// File listing the expected event kinds, one per line.
    #[arg(long)]
    expect: Option<PathBuf>,
    /// TOML gesture profile; built-in defaults when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    if let Err(err) = run(Cli::parse()) {
        eprintln!("error: {err:?}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GestureConfig::default(),
    };
    let rows = parse_trace(&cli.trace)?;
    log::info!("replaying {} rows from {}", rows.len(), cli.trace.display());

    let events = replay(config, &rows);
    println!("{EVENT_HEADER}");
    for emitted in &events {
        println!("{}", format_event(emitted));
    }

    if let Some(expect_path) = cli.expect {
        let expected = parse_expected_kinds(&expect_path)?;
        let actual: Vec<&'static str> = events.iter().map(|e| e.event.name()).collect();
        if actual != expected {
            eprintln!("expected kinds: {}", expected.join(","));
            eprintln!("actual kinds:   {}", actual.join(","));
            bail!("event sequence mismatch");
        }
    }

    Ok(())
}
