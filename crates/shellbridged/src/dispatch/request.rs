//! Request decoding for the dispatch loop.
//!
//! A request line is a JSON object carrying a correlation `id`, a `command`
//! name, and an optional `params` object. Lines either decode completely or
//! are rejected; only `params` has a default.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::errors::DispatchError;

/// Decoded command request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Request {
    id: String,
    command: String,
    #[serde(default)]
    params: Params,
}

impl Request {
    /// Creates a request from its parts.
    pub fn new(id: impl Into<String>, command: impl Into<String>, params: Params) -> Self {
        Self {
            id: id.into(),
            command: command.into(),
            params,
        }
    }

    /// Parses a request line.
    ///
    /// Leading and trailing Unicode whitespace (including the newline
    /// delimiter) is ignored.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::MalformedRequest` if the line is not UTF-8, is
    /// blank, is not valid JSON, is not an object, or does not match the
    /// request schema.
    pub fn parse(line: &[u8]) -> Result<Self, DispatchError> {
        let text = decode_line(line)?;
        if text.is_empty() {
            return Err(DispatchError::malformed("empty request line"));
        }

        serde_json::from_str(text).map_err(DispatchError::from_json_error)
    }

    /// Returns the correlation id.
    #[must_use]
    pub const fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Returns the command name exactly as sent.
    #[must_use]
    pub const fn command(&self) -> &str {
        self.command.as_str()
    }

    /// Returns the request parameters.
    #[must_use]
    pub const fn params(&self) -> &Params {
        &self.params
    }
}

/// Decodes a raw input line as UTF-8 and trims surrounding whitespace.
///
/// Whitespace is the Unicode `White_Space` set, so vertical tabs and
/// no-break spaces are trimmed along with spaces, tabs and line endings.
///
/// # Errors
///
/// Returns `DispatchError::MalformedRequest` when the line is not UTF-8.
pub fn decode_line(line: &[u8]) -> Result<&str, DispatchError> {
    std::str::from_utf8(line)
        .map(str::trim)
        .map_err(|error| DispatchError::malformed(format!("invalid UTF-8: {error}")))
}

/// Untyped request parameters.
///
/// Handlers pull the keys they need through the typed accessors and ignore
/// everything else. An absent or `null` `params` field decodes as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Params {
    values: Map<String, Value>,
}

impl Params {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter, replacing any previous value under `key`.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Returns the raw value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Returns the string stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::InvalidParameter` when the key is absent or the
    /// value is not a JSON string. No coercion is attempted.
    pub fn required_str(&self, key: &str) -> Result<&str, DispatchError> {
        self.get(key)
            .and_then(Value::as_str)
            .ok_or_else(|| DispatchError::invalid_parameter(key))
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when no parameters were supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Map<String, Value>> for Params {
    fn from(values: Map<String, Value>) -> Self {
        Self { values }
    }
}

impl<'de> Deserialize<'de> for Params {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let values = Option::<Map<String, Value>>::deserialize(deserializer)?;
        Ok(Self::from(values.unwrap_or_default()))
    }
}
