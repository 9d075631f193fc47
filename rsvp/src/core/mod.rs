//! Deterministic, pure logic shared by the RSVP core.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! data structures and return deterministic outputs suitable for tests.

pub mod deadline;
pub mod expand;
pub mod session;
pub mod types;
pub mod validator;
