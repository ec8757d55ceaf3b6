//! Line-oriented command loop: read, parse, execute, render.
//!
//! Malformed lines and rejected orders produce no output; they are only logged.

use crate::command::parse_command;
use crate::engine::MatchingEngine;
use crate::error::CommandError;
use crate::execution::EngineEvent;
use crate::render::{render_event, OutputFormat};
use log::debug;
use std::io::{self, BufRead, Write};

/// Counters for one run over an input stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Lines parsed into a command and executed.
    pub processed: usize,
    /// Lines dropped as malformed or carrying invalid order values.
    pub ignored: usize,
    pub trades: usize,
}

/// Feeds text commands into an engine it owns and writes the resulting events.
#[derive(Debug, Default)]
pub struct Dispatcher {
    engine: MatchingEngine,
    format: OutputFormat,
    summary: RunSummary,
}

impl Dispatcher {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            engine: MatchingEngine::new(),
            format,
            summary: RunSummary::default(),
        }
    }

    /// Handles one raw line. Only I/O errors from `out` are returned.
    pub fn handle_line(&mut self, line: &str, out: &mut impl Write) -> io::Result<()> {
        let command = match parse_command(line) {
            Ok(command) => command,
            Err(CommandError::Empty) => return Ok(()),
            Err(err) => {
                debug!("ignoring line {:?}: {}", line, err);
                self.summary.ignored += 1;
                return Ok(());
            }
        };
        self.summary.processed += 1;
        for event in self.engine.execute(command) {
            if matches!(event, EngineEvent::Trade(_)) {
                self.summary.trades += 1;
            }
            render_event(out, &event, self.format)?;
        }
        Ok(())
    }

    /// Handles every line of `input` and flushes `out` at the end.
    pub fn run(&mut self, input: impl BufRead, out: &mut impl Write) -> io::Result<RunSummary> {
        for line in input.lines() {
            self.handle_line(&line?, out)?;
        }
        out.flush()?;
        Ok(self.summary)
    }

    pub fn engine(&self) -> &MatchingEngine {
        &self.engine
    }

    pub fn summary(&self) -> RunSummary {
        self.summary
    }
}

/// Runs a whole command stream through a fresh engine.
pub fn run(input: impl BufRead, out: &mut impl Write, format: OutputFormat) -> io::Result<RunSummary> {
    Dispatcher::new(format).run(input, out)
}
