//! Command handlers and the built-in command set.

use serde_json::{Value, json};

use super::errors::DispatchError;
use super::request::Params;

/// Command name answered with a fixed greeting.
pub const GET_HELLO_MESSAGE: &str = "get-hello-message";

/// Command name that echoes `params.text` back to the caller.
pub const ECHO: &str = "echo";

/// A single command implementation.
///
/// Handlers receive the request parameters and return either the success
/// payload or a parameter validation error. Any other failure mode must be
/// folded into one of those two outcomes.
pub trait CommandHandler {
    /// Executes the command.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::InvalidParameter` when a required parameter is
    /// missing or has the wrong type.
    fn handle(&self, params: &Params) -> Result<Value, DispatchError>;
}

impl<F> CommandHandler for F
where
    F: Fn(&Params) -> Result<Value, DispatchError>,
{
    fn handle(&self, params: &Params) -> Result<Value, DispatchError> {
        self(params)
    }
}

/// Replies with `{"message": "Hello World"}` regardless of parameters.
#[derive(Debug, Default, Clone, Copy)]
pub struct HelloMessage;

impl CommandHandler for HelloMessage {
    fn handle(&self, _params: &Params) -> Result<Value, DispatchError> {
        Ok(json!({ "message": "Hello World" }))
    }
}

/// Replies with `{"echo": <text>}` using the unmodified `text` parameter.
#[derive(Debug, Default, Clone, Copy)]
pub struct Echo;

impl CommandHandler for Echo {
    fn handle(&self, params: &Params) -> Result<Value, DispatchError> {
        let text = params.required_str("text")?;
        Ok(json!({ "echo": text }))
    }
}
