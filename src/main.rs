//! Command-line matching engine.
//!
//! Reads commands line by line from stdin (or `CROSSBOOK_INPUT`) and writes
//! trades and book snapshots to stdout. Logs go to stderr via `RUST_LOG`.

use crossbook::{Dispatcher, EngineConfig};
use log::info;
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::process::ExitCode;

fn main() -> ExitCode {
    let _ = env_logger::try_init();
    let config = match EngineConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {}", err);
            return ExitCode::FAILURE;
        }
    };
    match serve(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("i/o error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn serve(config: &EngineConfig) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut dispatcher = Dispatcher::new(config.output);
    let summary = match &config.input {
        Some(path) => dispatcher.run(BufReader::new(File::open(path)?), &mut out)?,
        None => dispatcher.run(io::stdin().lock(), &mut out)?,
    };
    info!(
        "input exhausted processed={} ignored={} trades={} resting={}",
        summary.processed,
        summary.ignored,
        summary.trades,
        dispatcher.engine().order_count()
    );
    Ok(())
}
