//! Binary entrypoint for the shellbridge command processor.

use std::io::{self, StderrLock, StdinLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdin: StdinLock<'static> = io::stdin().lock();
    let mut stdout: StdoutLock<'static> = io::stdout().lock();
    let mut stderr: StderrLock<'static> = io::stderr().lock();
    shellbridged::run(std::env::args_os(), &mut stdin, &mut stdout, &mut stderr)
}
