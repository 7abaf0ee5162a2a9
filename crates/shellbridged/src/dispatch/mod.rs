//! JSONL request dispatch.
//!
//! This module turns request lines into response lines without touching any
//! stream. A [`Dispatcher`] holds the command table; [`Request`] and
//! [`Response`] define the wire model.
//!
//! ## Protocol
//!
//! Callers send one request object per line:
//!
//! ```json
//! {"id":"2","command":"echo","params":{"text":"hi"}}
//! ```
//!
//! and receive one response object per line, tagged by `status`:
//!
//! ```json
//! {"id":"2","status":"success","data":{"echo":"hi"}}
//! {"id":"3","status":"error","error":"unknown command: nope"}
//! ```
//!
//! # Examples
//!
//! ```
//! use shellbridged::dispatch::{Dispatcher, Request};
//!
//! let dispatcher = Dispatcher::with_builtin_commands();
//! let request = Request::parse(br#"{"id":"1","command":"get-hello-message"}"#)?;
//! let response = dispatcher.dispatch(&request);
//! assert!(response.is_success());
//! assert_eq!(response.id(), "1");
//! # Ok::<(), shellbridged::dispatch::DispatchError>(())
//! ```

mod commands;
mod errors;
mod request;
mod response;
mod router;

pub use self::commands::{CommandHandler, ECHO, Echo, GET_HELLO_MESSAGE, HelloMessage};
pub use self::errors::{Delivery, DispatchError};
pub use self::request::{Params, Request, decode_line};
pub use self::response::{Outcome, Response, ResponseWriter};
pub use self::router::Dispatcher;
