//! Stable exit codes for rsvp CLI commands.

/// Command succeeded or the submission was persisted.
pub const OK: i32 = 0;
/// Command failed due to an invalid invocation, settings file, or input document.
pub const INVALID: i32 = 1;
/// `rsvp submit` was refused because the deadline and grace period have passed.
pub const REJECTED_DEADLINE: i32 = 2;
/// `rsvp submit` was refused because required fields are missing.
pub const REJECTED_VALIDATION: i32 = 3;
/// `rsvp submit` could not write the record table.
pub const REJECTED_STORAGE: i32 = 4;
