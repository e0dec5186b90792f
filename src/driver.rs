//! Line-oriented process driver.
//!
//! Reads one s-expression message per line, feeds it to the engine and
//! hands the resulting actions to an `ActionSink` before the response.
//! Blank lines and lines starting with `;` are skipped.  At end of input
//! the engine is reset so a held button is always released.

use std::io::{self, BufRead, Write};

use anyhow::Context;
use tracing::{debug, info};

use crate::gesture::{PointerAction, PointerEngine};
use crate::ipc::{action_event, handle_message};

/// Receives pointer actions in emission order.
pub trait ActionSink {
    fn apply(&mut self, action: &PointerAction) -> io::Result<()>;

    /// Protocol response for the message that produced the last actions.
    fn respond(&mut self, _response: &str) -> io::Result<()> {
        Ok(())
    }
}

/// Writes actions as event lines followed by the response line.
pub struct EventWriter<W: Write> {
    out: W,
    trace: bool,
}

impl<W: Write> EventWriter<W> {
    pub fn new(out: W, trace: bool) -> Self {
        Self { out, trace }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ActionSink for EventWriter<W> {
    fn apply(&mut self, action: &PointerAction) -> io::Result<()> {
        let event = action_event(action);
        if self.trace {
            info!(">> {}", event);
        }
        writeln!(self.out, "{}", event)
    }

    fn respond(&mut self, response: &str) -> io::Result<()> {
        if self.trace {
            info!(">> {}", response);
        }
        writeln!(self.out, "{}", response)?;
        self.out.flush()
    }
}

/// Counters for one driver run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub messages: u64,
    pub actions: u64,
    pub errors: u64,
}

/// Drive `engine` from `input` until EOF.
pub fn run<R: BufRead, S: ActionSink>(
    engine: &mut PointerEngine,
    input: R,
    sink: &mut S,
    trace: bool,
) -> anyhow::Result<RunSummary> {
    let mut summary = RunSummary::default();

    for line in input.lines() {
        let line = line.context("failed to read input")?;
        let msg = line.trim();
        if msg.is_empty() || msg.starts_with(';') {
            continue;
        }
        if trace {
            info!("<< {}", msg);
        }

        let reply = handle_message(engine, msg);
        summary.messages += 1;
        if reply.is_error {
            summary.errors += 1;
            debug!(response = %reply.response, "message rejected");
        }
        for action in &reply.actions {
            sink.apply(action).context("failed to write action")?;
        }
        summary.actions += reply.actions.len() as u64;
        sink.respond(&reply.response)
            .context("failed to write response")?;
    }

    let released = engine.reset();
    for action in &released {
        sink.apply(action).context("failed to write action")?;
    }
    summary.actions += released.len() as u64;

    info!(
        messages = summary.messages,
        actions = summary.actions,
        errors = summary.errors,
        "input closed"
    );
    Ok(summary)
}
