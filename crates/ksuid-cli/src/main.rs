#![doc = include_str!("../README.md")]

mod config;
mod format;
mod telemetry;

use clap::Parser;
use config::{CliArgs, Config, Source};
use format::write_id;
use ksuid::KsuidGenerator;
use std::io::{self, BufWriter, Write};
use telemetry::init_tracing;

fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    init_tracing();
    let config = Config::try_from(args)?;

    tracing::debug!(?config, "starting");

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match &config.source {
        Source::Generate(count) => {
            let generator: KsuidGenerator = KsuidGenerator::default();
            for _ in 0..*count {
                write_id(&mut out, &generator.next_id(), config.format, config.verbose)?;
            }
        }
        Source::Parsed(ids) => {
            for id in ids {
                write_id(&mut out, id, config.format, config.verbose)?;
            }
        }
    }

    out.flush()?;
    Ok(())
}
