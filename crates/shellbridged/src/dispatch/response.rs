//! Response model and JSONL serialization.
//!
//! A [`Response`] echoes the request id and carries exactly one of a success
//! payload or an error message, selected by the `status` tag. The pairing is
//! enforced by [`Outcome`], so no response can hold both or neither.

use std::io::Write;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::DispatchError;

/// Result of dispatching one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    id: String,
    #[serde(flatten)]
    outcome: Outcome,
}

/// Status-tagged response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// The handler completed and produced a payload.
    Success {
        /// Handler-defined payload.
        data: Value,
    },
    /// The request was understood but could not be fulfilled.
    Error {
        /// Human-readable failure message.
        error: String,
    },
}

impl Response {
    /// Creates a success response.
    pub fn success(id: impl Into<String>, data: Value) -> Self {
        Self {
            id: id.into(),
            outcome: Outcome::Success { data },
        }
    }

    /// Creates an error response.
    pub fn error(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            outcome: Outcome::Error {
                error: message.into(),
            },
        }
    }

    /// Returns the correlation id.
    #[must_use]
    pub const fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Returns the response body.
    #[must_use]
    pub const fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Returns `true` for `status = success`.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success { .. })
    }

    /// Returns the success payload, if any.
    #[must_use]
    pub const fn data(&self) -> Option<&Value> {
        match &self.outcome {
            Outcome::Success { data } => Some(data),
            Outcome::Error { .. } => None,
        }
    }

    /// Returns the error message, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Success { .. } => None,
            Outcome::Error { error } => Some(error.as_str()),
        }
    }

    /// Encodes the response as a single line of compact JSON.
    ///
    /// The output never contains a line terminator.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::EncodingFailure` if serialization fails.
    pub fn encode(&self) -> Result<String, DispatchError> {
        serde_json::to_string(self).map_err(DispatchError::EncodingFailure)
    }
}

/// Writer that frames encoded responses as JSONL.
pub struct ResponseWriter<W> {
    writer: W,
}

impl<W: Write> ResponseWriter<W> {
    /// Creates a new response writer wrapping the given output stream.
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Writes one encoded response line and flushes it.
    ///
    /// The parent process reads replies as they arrive, so every line is
    /// flushed immediately.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::Write` if writing or flushing fails.
    pub fn write_line(&mut self, line: &str) -> Result<(), DispatchError> {
        self.writer
            .write_all(line.as_bytes())
            .and_then(|()| self.writer.write_all(b"\n"))
            .and_then(|()| self.writer.flush())
            .map_err(DispatchError::Write)
    }
}
