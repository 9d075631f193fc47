//! Caller-owned form state for one RSVP form.
//!
//! The UI keeps one [`FormSession`] per visitor and hands it to
//! [`crate::pipeline::SubmissionPipeline::submit_session`]. The core itself
//! holds no session state.

use serde::{Deserialize, Serialize};

use crate::core::types::{GuestEntry, RsvpSubmission};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSession {
    pub contact_name: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub attending: bool,
    pub comments: String,
    /// Always holds at least one entry.
    pub guests: Vec<GuestEntry>,
    /// Set while an attempt is running; guest list edits are refused.
    pub submission_in_progress: bool,
    /// Set once an attempt has been persisted.
    pub submitted: bool,
}

impl Default for FormSession {
    fn default() -> Self {
        Self {
            contact_name: String::new(),
            contact_email: String::new(),
            contact_phone: String::new(),
            attending: true,
            comments: String::new(),
            guests: vec![GuestEntry::default()],
            submission_in_progress: false,
            submitted: false,
        }
    }
}

impl FormSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a blank guest. Returns false while a submission is in progress.
    pub fn add_guest(&mut self) -> bool {
        if self.submission_in_progress {
            return false;
        }
        self.guests.push(GuestEntry::default());
        true
    }

    /// Remove the guest at `index`.
    ///
    /// Refused (returns false) when it is the only guest, when the index is
    /// out of range, or while a submission is in progress.
    pub fn remove_guest(&mut self, index: usize) -> bool {
        if self.submission_in_progress || self.guests.len() <= 1 || index >= self.guests.len() {
            return false;
        }
        self.guests.remove(index);
        true
    }

    /// Return to the initial state: one blank guest, no flags.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Snapshot the current form values.
    pub fn to_submission(&self) -> RsvpSubmission {
        RsvpSubmission {
            contact_name: self.contact_name.clone(),
            contact_email: self.contact_email.clone(),
            contact_phone: self.contact_phone.clone(),
            attending: self.attending,
            comments: self.comments.clone(),
            guests: self.guests.clone(),
        }
    }
}
