//! Shared configuration for the shellbridge command processor.
//!
//! Configuration is layered by [`ortho_config`]: built-in defaults, an
//! optional `.shellbridge.toml` file, `SHELLBRIDGE_*` environment variables and
//! long command-line flags, in increasing order of precedence. None of the
//! layers are required; a bare invocation runs with the defaults.

mod defaults;
mod logging;

use std::ffi::OsString;
use std::sync::Arc;

use ortho_config::{OrthoConfig, OrthoError};
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_LOG_FILTER, DEFAULT_MAX_REQUEST_BYTES, default_log_filter_string, default_log_format,
    default_max_request_bytes,
};
pub use logging::LogFormat;

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "SHELLBRIDGE")]
pub struct Config {
    /// `tracing` filter expression applied to diagnostic logging.
    #[ortho_config(default = default_log_filter_string())]
    #[serde(default = "default_log_filter_string")]
    pub log_filter: String,
    /// Output format for diagnostic logging.
    #[ortho_config(default = default_log_format())]
    #[serde(default = "default_log_format")]
    pub log_format: LogFormat,
    /// Upper bound on the size of a single request line.
    #[ortho_config(default = default_max_request_bytes())]
    #[serde(default = "default_max_request_bytes")]
    pub max_request_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            max_request_bytes: default_max_request_bytes(),
        }
    }
}

impl Config {
    /// Returns the logging filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_str()
    }

    /// Returns the logging output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Returns the request line size limit in bytes.
    #[must_use]
    pub const fn max_request_bytes(&self) -> usize {
        self.max_request_bytes
    }

    /// Loads configuration from an explicit argument list.
    ///
    /// The first element is the program name, matching [`std::env::args_os`].
    ///
    /// # Errors
    ///
    /// Returns the loader error when a layer cannot be read or parsed.
    pub fn load_from_args<I, T>(args: I) -> Result<Self, Arc<OrthoError>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::load_from_iter(args)
    }
}
