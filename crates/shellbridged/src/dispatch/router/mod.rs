//! Command routing for request dispatch.
//!
//! The dispatcher owns a table from command name to [`CommandHandler`].
//! Lookup is an exact, case-sensitive match on the request's `command`
//! field. Every request yields a [`Response`]; unknown commands and handler
//! parameter errors become `status = error` responses.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use super::commands::{CommandHandler, ECHO, Echo, GET_HELLO_MESSAGE, HelloMessage};
use super::errors::DispatchError;
use super::request::Request;
use super::response::Response;

/// Tracing target for dispatch operations.
pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

/// Routes requests to registered command handlers.
pub struct Dispatcher {
    commands: HashMap<String, Box<dyn CommandHandler>>,
}

impl Dispatcher {
    /// Creates a dispatcher with an empty command table.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Creates a dispatcher serving `get-hello-message` and `echo`.
    #[must_use]
    pub fn with_builtin_commands() -> Self {
        let mut dispatcher = Self::empty();
        dispatcher.register(GET_HELLO_MESSAGE, HelloMessage);
        dispatcher.register(ECHO, Echo);
        dispatcher
    }

    /// Registers a handler under `name`, replacing any previous handler.
    pub fn register<H>(&mut self, name: impl Into<String>, handler: H) -> &mut Self
    where
        H: CommandHandler + 'static,
    {
        self.commands.insert(name.into(), Box::new(handler));
        self
    }

    /// Returns `true` when a handler is registered under `name`.
    #[must_use]
    pub fn is_registered(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Returns the registered command names in sorted order.
    #[must_use]
    pub fn command_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Dispatches a request and returns its response.
    ///
    /// The response id always equals the request id.
    #[must_use]
    pub fn dispatch(&self, request: &Request) -> Response {
        debug!(
            target: DISPATCH_TARGET,
            id = request.id(),
            command = request.command(),
            "routing command"
        );

        match self.route(request) {
            Ok(data) => Response::success(request.id(), data),
            Err(error) => {
                debug!(target: DISPATCH_TARGET, id = request.id(), %error, "command failed");
                Response::error(request.id(), error.to_string())
            }
        }
    }

    /// Decodes a request line, dispatches it, and encodes the response.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::MalformedRequest` when the line does not decode
    /// and `DispatchError::EncodingFailure` when the response cannot be
    /// encoded. Neither produces a response line.
    pub fn dispatch_line(&self, line: &[u8]) -> Result<String, DispatchError> {
        let request = Request::parse(line)?;
        self.dispatch(&request).encode()
    }

    fn route(&self, request: &Request) -> Result<serde_json::Value, DispatchError> {
        let handler = self
            .commands
            .get(request.command())
            .ok_or_else(|| DispatchError::unknown_command(request.command()))?;
        handler.handle(request.params())
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::with_builtin_commands()
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("commands", &self.command_names())
            .finish()
    }
}
