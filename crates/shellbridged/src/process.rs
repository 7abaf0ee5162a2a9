//! Process entry point wiring start-up, the dispatcher and the request loop.

use std::ffi::OsString;
use std::io::{BufRead, Write};
use std::process::ExitCode;

use tracing::debug;

use crate::bootstrap::{ConfigLoader, SystemConfigLoader, bootstrap_with};
use crate::dispatch::Dispatcher;
use crate::session::{RequestLoop, SESSION_TARGET, report};

/// Runs the command processor over the given streams.
///
/// Returns success after the sentinel line or a clean end-of-stream, and a
/// failure status when start-up fails or either stream breaks.
pub fn run<I, R, W, E>(args: I, input: &mut R, output: &mut W, diagnostics: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    R: BufRead,
    W: Write,
    E: Write,
{
    run_with_loader(args, &SystemConfigLoader, input, output, diagnostics)
}

/// Runs the command processor using a caller-supplied configuration loader.
pub fn run_with_loader<I, R, W, E>(
    args: I,
    loader: &dyn ConfigLoader,
    input: &mut R,
    output: &mut W,
    diagnostics: &mut E,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    R: BufRead,
    W: Write,
    E: Write,
{
    let argv: Vec<OsString> = args.into_iter().collect();
    let bootstrapped = match bootstrap_with(loader, &argv) {
        Ok(bootstrapped) => bootstrapped,
        Err(error) => {
            writeln!(diagnostics, "error: {error}").ok();
            return ExitCode::from(error.exit_status());
        }
    };

    let dispatcher = Dispatcher::with_builtin_commands();
    debug!(target: SESSION_TARGET, ?dispatcher, "dispatcher ready");

    let request_loop = RequestLoop::new(&dispatcher, bootstrapped.config().max_request_bytes());
    match request_loop.run(input, output, diagnostics) {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            report(diagnostics, &error);
            ExitCode::from(error.exit_status())
        }
    }
}
