//! Test suites for the shellbridge command processor.

mod behaviour;
