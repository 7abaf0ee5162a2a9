//! Read-eval loop driving the dispatcher over line-oriented streams.
//!
//! The loop reads one line at a time, trims it, and either stops on the
//! `quit` sentinel or turns it into exactly one response line. Lines that
//! cannot be decoded or encoded produce a diagnostic instead and the loop
//! carries on. Failures of the streams themselves end the loop with an error.

mod lines;

use std::io::{BufRead, Write};

use tracing::{debug, info};

use crate::dispatch::{Delivery, DispatchError, Dispatcher, ResponseWriter, decode_line};

use self::lines::{Line, read_line};

/// Input line that ends the loop without producing a response.
pub const SENTINEL: &str = "quit";

/// Tracing target for session lifecycle events.
pub(crate) const SESSION_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::session");

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The sentinel line was read.
    Sentinel,
    /// The input stream ended.
    EndOfStream,
}

/// Counters reported when the loop ends cleanly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    /// Response lines written to the output stream.
    pub responses: usize,
    /// Diagnostics written to the diagnostic stream.
    pub diagnostics: usize,
    /// How the loop ended.
    pub termination: Termination,
}

/// Sequential request loop over a reader, a response stream and a
/// diagnostic stream.
#[derive(Debug)]
pub struct RequestLoop<'a> {
    dispatcher: &'a Dispatcher,
    max_request_bytes: usize,
}

impl<'a> RequestLoop<'a> {
    /// Creates a loop serving `dispatcher`, rejecting lines longer than
    /// `max_request_bytes`.
    #[must_use]
    pub const fn new(dispatcher: &'a Dispatcher, max_request_bytes: usize) -> Self {
        Self {
            dispatcher,
            max_request_bytes,
        }
    }

    /// Runs until the sentinel line or end-of-stream.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::StreamRead` when the input stream fails and
    /// `DispatchError::Write` when a response cannot be written. Both are
    /// fatal; every other failure is reported on `diagnostics` and skipped.
    pub fn run<R, W, E>(
        &self,
        input: &mut R,
        output: W,
        diagnostics: &mut E,
    ) -> Result<SessionSummary, DispatchError>
    where
        R: BufRead,
        W: Write,
        E: Write,
    {
        info!(target: SESSION_TARGET, "request loop started");

        let mut writer = ResponseWriter::new(output);
        let mut responses = 0_usize;
        let mut reported = 0_usize;

        let termination = loop {
            let outcome = match read_line(input, self.max_request_bytes) {
                Ok(Line::EndOfStream) => break Termination::EndOfStream,
                Ok(Line::Oversized { size }) => {
                    Err(DispatchError::request_too_large(size, self.max_request_bytes))
                }
                Ok(Line::Complete(bytes)) => match decode_line(&bytes) {
                    Ok(SENTINEL) => {
                        debug!(target: SESSION_TARGET, "sentinel received");
                        break Termination::Sentinel;
                    }
                    Ok(text) => self.dispatcher.dispatch_line(text.as_bytes()),
                    Err(error) => Err(error),
                },
                Err(error) => {
                    debug!(target: SESSION_TARGET, %error, "input stream failed");
                    return Err(DispatchError::StreamRead(error));
                }
            };

            match outcome {
                Ok(line) => {
                    writer.write_line(&line)?;
                    responses += 1;
                }
                Err(error) if error.delivery() == Delivery::Fatal => return Err(error),
                Err(error) => {
                    debug!(target: SESSION_TARGET, %error, "request rejected");
                    report(diagnostics, &error);
                    reported += 1;
                }
            }
        };

        let summary = SessionSummary {
            responses,
            diagnostics: reported,
            termination,
        };
        info!(
            target: SESSION_TARGET,
            responses = summary.responses,
            diagnostics = summary.diagnostics,
            termination = ?summary.termination,
            "request loop finished"
        );
        Ok(summary)
    }
}

/// Writes a one-line diagnostic for `error`.
///
/// The diagnostic stream is best effort; a failure to write it is ignored.
pub(crate) fn report(diagnostics: &mut impl Write, error: &DispatchError) {
    writeln!(diagnostics, "error: {error}").ok();
    diagnostics.flush().ok();
}
