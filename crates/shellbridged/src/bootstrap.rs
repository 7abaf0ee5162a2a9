//! Start-up orchestration: configuration, then telemetry.

use std::ffi::OsString;
use std::sync::Arc;

use ortho_config::OrthoError;
use thiserror::Error;

use shellbridge_config::Config;

use crate::telemetry::{self, TelemetryError};

/// Trait abstracting configuration loading for testability.
pub trait ConfigLoader {
    /// Loads the configuration from the given process arguments.
    ///
    /// # Errors
    ///
    /// Returns the loader error when any configuration layer is invalid.
    fn load(&self, args: &[OsString]) -> Result<Config, Arc<OrthoError>>;
}

/// Loader that layers defaults, file, environment and flags.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemConfigLoader;

impl ConfigLoader for SystemConfigLoader {
    fn load(&self, args: &[OsString]) -> Result<Config, Arc<OrthoError>> {
        Config::load_from_args(args.iter().cloned())
    }
}

/// Loader returning a fixed configuration.
#[derive(Debug, Default, Clone)]
pub struct StaticConfigLoader {
    config: Config,
}

impl StaticConfigLoader {
    /// Creates a loader that always yields `config`.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self, _args: &[OsString]) -> Result<Config, Arc<OrthoError>> {
        Ok(self.config.clone())
    }
}

/// Errors surfaced during start-up.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Configuration failed to load.
    #[error("failed to load configuration: {source}")]
    Configuration {
        /// Underlying loader error.
        #[source]
        source: Arc<OrthoError>,
    },
    /// Telemetry initialisation failed.
    #[error("failed to initialise telemetry: {source}")]
    Telemetry {
        /// Underlying telemetry error.
        #[source]
        source: TelemetryError,
    },
}

impl BootstrapError {
    /// Process exit status for start-up failures.
    #[must_use]
    pub const fn exit_status(&self) -> u8 {
        2
    }
}

/// Resolved start-up state.
#[derive(Debug)]
pub struct Bootstrapped {
    config: Config,
}

impl Bootstrapped {
    /// Accessor for the resolved configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }
}

/// Loads configuration and installs telemetry.
///
/// # Errors
///
/// Returns `BootstrapError` if either step fails.
pub fn bootstrap_with(
    loader: &dyn ConfigLoader,
    args: &[OsString],
) -> Result<Bootstrapped, BootstrapError> {
    let config = loader
        .load(args)
        .map_err(|source| BootstrapError::Configuration { source })?;
    telemetry::initialise(&config).map_err(|source| BootstrapError::Telemetry { source })?;
    Ok(Bootstrapped { config })
}
