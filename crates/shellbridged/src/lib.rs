//! Line-oriented JSON command processor for a supervising parent process.
//!
//! The parent writes one request object per line to stdin and reads one
//! response object per line from stdout. Requests are routed by command name
//! through the [`dispatch::Dispatcher`]; lines that cannot be decoded are
//! reported on stderr and skipped, and the line `quit` ends the session.
//!
//! Start-up loads configuration through [`shellbridge_config`] and installs
//! `tracing` telemetry on stderr before the [`session::RequestLoop`] begins
//! reading.

mod bootstrap;
pub mod dispatch;
mod process;
pub mod session;
mod telemetry;

pub use bootstrap::{
    BootstrapError, Bootstrapped, ConfigLoader, StaticConfigLoader, SystemConfigLoader,
    bootstrap_with,
};
pub use process::{run, run_with_loader};
pub use telemetry::TelemetryError;

#[cfg(test)]
mod tests;
