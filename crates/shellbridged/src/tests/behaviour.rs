//! Behavioural tests for the request loop.

use std::cell::RefCell;
use std::io::Cursor;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::{Value, json};

use crate::dispatch::{DispatchError, Dispatcher, Response};
use crate::session::{RequestLoop, SENTINEL, SessionSummary, Termination};

const LIMIT: usize = 64 * 1024;

#[derive(Default)]
struct LoopWorld {
    input: String,
    summary: Option<Result<SessionSummary, DispatchError>>,
    responses: Vec<Response>,
    diagnostics: Vec<String>,
}

impl LoopWorld {
    fn push_line(&mut self, line: &str) {
        self.input.push_str(line);
        self.input.push('\n');
    }

    fn push_request(&mut self, id: &str, command: &str, params: Value) {
        let line = json!({ "id": id, "command": command, "params": params });
        self.push_line(&line.to_string());
    }

    fn run(&mut self) {
        if self.summary.is_some() {
            return;
        }
        let dispatcher = Dispatcher::with_builtin_commands();
        let mut input = Cursor::new(self.input.clone().into_bytes());
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let summary = RequestLoop::new(&dispatcher, LIMIT).run(&mut input, &mut stdout, &mut stderr);

        self.responses = String::from_utf8(stdout)
            .expect("stdout utf8")
            .lines()
            .map(|line| serde_json::from_str(line).expect("response line decodes"))
            .collect();
        self.diagnostics = String::from_utf8(stderr)
            .expect("stderr utf8")
            .lines()
            .map(str::to_owned)
            .collect();
        self.summary = Some(summary);
    }

    fn response(&mut self, id: &str) -> &Response {
        self.run();
        self.responses
            .iter()
            .find(|response| response.id() == id)
            .unwrap_or_else(|| panic!("no response for id {id}: {:?}", self.responses))
    }
}

#[fixture]
fn world() -> RefCell<LoopWorld> {
    RefCell::new(LoopWorld::default())
}

#[given("a session reading from the caller")]
fn given_session(world: &RefCell<LoopWorld>) {
    assert!(world.borrow().input.is_empty());
}

#[when("the caller sends a hello request with id {id}")]
fn when_hello(world: &RefCell<LoopWorld>, id: String) {
    world
        .borrow_mut()
        .push_request(&id, "get-hello-message", json!({}));
}

#[when(r#"the caller sends an echo request with id {id} and text "{text}""#)]
fn when_echo(world: &RefCell<LoopWorld>, id: String, text: String) {
    world
        .borrow_mut()
        .push_request(&id, "echo", json!({ "text": strip_quotes(&text) }));
}

#[when(r#"the caller sends a "{command}" request with id {id}"#)]
fn when_command(world: &RefCell<LoopWorld>, command: String, id: String) {
    world
        .borrow_mut()
        .push_request(&id, strip_quotes(&command), json!({}));
}

#[when(r#"the caller sends the raw line "{line}""#)]
fn when_raw_line(world: &RefCell<LoopWorld>, line: String) {
    world.borrow_mut().push_line(strip_quotes(&line));
}

#[when("the caller closes the input")]
fn when_closed(world: &RefCell<LoopWorld>) {
    world.borrow_mut().run();
}

#[then("{count} response lines are written")]
fn then_response_count(world: &RefCell<LoopWorld>, count: usize) {
    let mut state = world.borrow_mut();
    state.run();
    assert_eq!(state.responses.len(), count, "{:?}", state.responses);
}

#[then("{count} diagnostic lines are written")]
fn then_diagnostic_count(world: &RefCell<LoopWorld>, count: usize) {
    let mut state = world.borrow_mut();
    state.run();
    assert_eq!(state.diagnostics.len(), count, "{:?}", state.diagnostics);
}

#[then("no diagnostics are written")]
fn then_no_diagnostics(world: &RefCell<LoopWorld>) {
    let mut state = world.borrow_mut();
    state.run();
    assert!(state.diagnostics.is_empty(), "{:?}", state.diagnostics);
}

#[then(r#"the response for id "{id}" has status "{status}""#)]
fn then_status(world: &RefCell<LoopWorld>, id: String, status: String) {
    let mut state = world.borrow_mut();
    let response = state.response(strip_quotes(&id));
    let expected = strip_quotes(&status) == "success";
    assert_eq!(response.is_success(), expected, "{response:?}");
}

#[then(r#"the response for id "{id}" echoes "{text}""#)]
fn then_echoes(world: &RefCell<LoopWorld>, id: String, text: String) {
    let mut state = world.borrow_mut();
    let response = state.response(strip_quotes(&id));
    assert_eq!(
        response.data(),
        Some(&json!({ "echo": strip_quotes(&text) }))
    );
}

#[then(r#"the response for id "{id}" has error "{message}""#)]
fn then_error(world: &RefCell<LoopWorld>, id: String, message: String) {
    let mut state = world.borrow_mut();
    let response = state.response(strip_quotes(&id));
    assert_eq!(response.error_message(), Some(strip_quotes(&message)));
}

#[then("the session ended on the sentinel")]
fn then_sentinel(world: &RefCell<LoopWorld>) {
    let mut state = world.borrow_mut();
    state.run();
    let summary = match state.summary.as_ref() {
        Some(Ok(summary)) => *summary,
        other => panic!("expected a clean session, got {other:?}"),
    };
    assert_eq!(summary.termination, Termination::Sentinel);
    assert!(state.input.contains(SENTINEL));
}

/// Strips surrounding double quotes from a string if present.
fn strip_quotes(s: &str) -> &str {
    s.trim_matches('"')
}

#[scenario(path = "tests/features/request_loop.feature")]
fn request_loop(#[from(world)] world: RefCell<LoopWorld>) {
    drop(world);
}
