//! Shared deterministic types for the RSVP core.
//!
//! These types define stable contracts between the resolver, the validator,
//! the pipeline and the record store. Field names of [`RsvpRecord`] are the
//! persisted column names, in column order.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where "now" falls relative to the configured deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeState {
    /// Before the warning window opens.
    Normal,
    /// Inside the warning window, up to and including the deadline itself.
    Warning,
    /// After the deadline, up to and including the end of the grace period.
    Grace,
    /// After the grace period. Submissions are refused.
    Closed,
}

impl TimeState {
    pub fn label(self) -> &'static str {
        match self {
            TimeState::Normal => "normal",
            TimeState::Warning => "warning",
            TimeState::Grace => "grace",
            TimeState::Closed => "closed",
        }
    }
}

impl fmt::Display for TimeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One guest's details and menu choices, as gathered by the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GuestEntry {
    pub first_name: String,
    pub last_name: String,
    pub starter: String,
    pub main: String,
    pub dessert: String,
    pub dietary_notes: String,
}

/// Raw RSVP submission handed to the pipeline by the caller.
///
/// `guests` only matters when `attending` is true.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RsvpSubmission {
    pub contact_name: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub attending: bool,
    pub comments: String,
    pub guests: Vec<GuestEntry>,
}

/// Persisted attendance flag (`Yes` / `No` in the table).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Attendance {
    Yes,
    No,
}

/// One row of the record table: a single guest, or a single non-attendance.
///
/// `contact_phone` is text for every row so leading `+` and `0` survive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsvpRecord {
    /// Creation time, `YYYY-MM-DD HH:MM:SS` local time.
    pub timestamp: String,
    pub contact_name: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub attending: Attendance,
    pub guest_first_name: String,
    pub guest_last_name: String,
    pub starter_choice: String,
    pub main_choice: String,
    pub dessert_choice: String,
    pub dietary_requirements: String,
    pub comments: String,
}

/// Column names of the record table, in order.
pub const RECORD_COLUMNS: [&str; 12] = [
    "timestamp",
    "contact_name",
    "contact_email",
    "contact_phone",
    "attending",
    "guest_first_name",
    "guest_last_name",
    "starter_choice",
    "main_choice",
    "dessert_choice",
    "dietary_requirements",
    "comments",
];

/// Form field a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    ContactName,
    Guests,
    FirstName,
    LastName,
    Starter,
    Main,
    Dessert,
}

impl Field {
    /// Human wording used in error messages.
    fn describe(self) -> &'static str {
        match self {
            Field::ContactName => "Primary contact name",
            Field::Guests => "At least one guest",
            Field::FirstName => "first name",
            Field::LastName => "last name",
            Field::Starter => "starter choice",
            Field::Main => "main course choice",
            Field::Dessert => "dessert choice",
        }
    }
}

/// A single failed required-field rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// 1-based guest number; `None` for submission-level fields.
    pub guest: Option<usize>,
    pub field: Field,
    pub message: String,
}

impl FieldError {
    pub fn required(field: Field) -> Self {
        Self {
            guest: None,
            field,
            message: format!("{} is required", field.describe()),
        }
    }

    pub fn guest_required(guest: usize, field: Field) -> Self {
        Self {
            guest: Some(guest),
            field,
            message: format!("Guest {} {} is required", guest, field.describe()),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
