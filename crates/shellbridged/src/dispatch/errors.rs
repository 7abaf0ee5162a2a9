//! Error types for request decoding, dispatch and response delivery.
//!
//! Each variant falls into one of three delivery classes. Reply-level errors
//! are business outcomes and travel back to the caller inside an error
//! [`Response`](super::Response). Line-level errors are reported on the
//! diagnostic stream and the loop moves on. Fatal errors stop the loop and
//! end the process with a non-zero status.

use std::io;

use thiserror::Error;

/// Errors surfaced while handling a single request line.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The line is not a JSON object matching the request schema.
    #[error("malformed request: {message}")]
    MalformedRequest {
        /// Human-readable parse failure.
        message: String,
        /// Parser error, when one was raised.
        #[source]
        source: Option<serde_json::Error>,
    },

    /// No handler is registered under the requested command name.
    #[error("unknown command: {command}")]
    UnknownCommand {
        /// Command name exactly as sent by the caller.
        command: String,
    },

    /// A required parameter is absent or has the wrong type.
    #[error("parameter '{name}' missing or wrong type")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: String,
    },

    /// The request line exceeds the configured size limit.
    #[error("request too large: {size} bytes exceeds {max_size} byte limit")]
    RequestTooLarge {
        /// Bytes read before the line ended.
        size: usize,
        /// Configured limit.
        max_size: usize,
    },

    /// The response could not be serialized.
    #[error("failed to encode response: {0}")]
    EncodingFailure(#[source] serde_json::Error),

    /// The input stream failed for a reason other than end-of-stream.
    #[error("failed to read input: {0}")]
    StreamRead(#[source] io::Error),

    /// Writing or flushing the response stream failed.
    #[error("failed to write response: {0}")]
    Write(#[source] io::Error),
}

/// How an error is delivered to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Returned to the caller as an error response.
    Reply,
    /// Written to the diagnostic stream; the loop continues.
    Diagnostic,
    /// Written to the diagnostic stream; the loop stops.
    Fatal,
}

impl DispatchError {
    /// Classifies how this error reaches the caller.
    #[must_use]
    pub const fn delivery(&self) -> Delivery {
        match self {
            Self::UnknownCommand { .. } | Self::InvalidParameter { .. } => Delivery::Reply,
            Self::MalformedRequest { .. }
            | Self::RequestTooLarge { .. }
            | Self::EncodingFailure(_) => Delivery::Diagnostic,
            Self::StreamRead(_) | Self::Write(_) => Delivery::Fatal,
        }
    }

    /// Returns the process exit status for a fatal error.
    ///
    /// Non-fatal errors map to `0` because they never end the process.
    #[must_use]
    pub const fn exit_status(&self) -> u8 {
        match self.delivery() {
            Delivery::Fatal => 1,
            Delivery::Reply | Delivery::Diagnostic => 0,
        }
    }

    /// Creates a malformed request error from a serde error.
    #[must_use]
    pub fn from_json_error(source: serde_json::Error) -> Self {
        Self::MalformedRequest {
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// Creates a malformed request error with a custom message.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedRequest {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an unknown command error.
    pub fn unknown_command(command: impl Into<String>) -> Self {
        Self::UnknownCommand {
            command: command.into(),
        }
    }

    /// Creates an invalid parameter error.
    pub fn invalid_parameter(name: impl Into<String>) -> Self {
        Self::InvalidParameter { name: name.into() }
    }

    /// Creates a request too large error.
    #[must_use]
    pub const fn request_too_large(size: usize, max_size: usize) -> Self {
        Self::RequestTooLarge { size, max_size }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::unknown(DispatchError::unknown_command("nope"), "unknown command: nope")]
    #[case::unknown_empty(DispatchError::unknown_command(""), "unknown command: ")]
    #[case::parameter(
        DispatchError::invalid_parameter("text"),
        "parameter 'text' missing or wrong type"
    )]
    #[case::too_large(
        DispatchError::request_too_large(12, 8),
        "request too large: 12 bytes exceeds 8 byte limit"
    )]
    fn messages_match_the_wire_contract(#[case] error: DispatchError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::unknown(DispatchError::unknown_command("x"), Delivery::Reply)]
    #[case::parameter(DispatchError::invalid_parameter("text"), Delivery::Reply)]
    #[case::malformed(DispatchError::malformed("empty request line"), Delivery::Diagnostic)]
    #[case::too_large(DispatchError::request_too_large(2, 1), Delivery::Diagnostic)]
    #[case::read(
        DispatchError::StreamRead(io::Error::other("boom")),
        Delivery::Fatal
    )]
    #[case::write(
        DispatchError::Write(io::Error::from(io::ErrorKind::BrokenPipe)),
        Delivery::Fatal
    )]
    fn classifies_delivery(#[case] error: DispatchError, #[case] expected: Delivery) {
        assert_eq!(error.delivery(), expected);
    }

    #[test]
    fn only_fatal_errors_carry_a_failure_status() {
        assert_eq!(DispatchError::StreamRead(io::Error::other("boom")).exit_status(), 1);
        assert_eq!(DispatchError::malformed("bad").exit_status(), 0);
    }
}
