//! Deadline-aware RSVP collection core.
//!
//! This crate accepts RSVP submissions for an event, enforces a submission
//! deadline with warning and grace windows, and appends the accepted
//! responses to a CSV table. The architecture keeps a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (deadline classification,
//!   validation, record expansion, form session state). No I/O.
//! - **[`io`]**: Side-effecting operations (settings file, record table).
//!   Isolated behind the [`io::record_store::RecordStore`] trait so tests can
//!   swap the backend.
//!
//! [`pipeline`] coordinates core logic with storage for one submission
//! attempt; [`status`] renders the deadline banner shown above the form.

pub mod core;
pub mod error;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod pipeline;
pub mod status;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
