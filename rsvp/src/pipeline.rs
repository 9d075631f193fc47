//! Orchestration for a single RSVP submission attempt.
//!
//! One attempt moves `IDLE -> SUBMITTED` when handed to
//! [`SubmissionPipeline::submit`], then ends in exactly one terminal state:
//!
//! - `REJECTED_DEADLINE`: deadline and grace period have passed. Nothing is
//!   validated or stored.
//! - `REJECTED_VALIDATION`: required fields are missing. Nothing is stored.
//! - `REJECTED_STORAGE`: the record table could not be rewritten.
//! - `PERSISTED`: every record of the submission landed in one rewrite.
//!
//! There is no retry inside the pipeline; the caller may resubmit.

use std::fmt::Display;

use chrono::{DateTime, TimeZone};
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};

use crate::core::deadline::{DeadlineConfig, format_time_remaining, resolve_or_normal, time_until};
use crate::core::expand::{expand_records, format_timestamp};
use crate::core::session::FormSession;
use crate::core::types::{FieldError, RsvpSubmission, TimeState};
use crate::core::validator::validate;
use crate::exit_codes;
use crate::io::record_store::RecordStore;

/// User-facing message for submissions after the grace period.
pub const DEADLINE_CLOSED_MESSAGE: &str = "RSVP deadline has passed. Submissions are no longer accepted. \
     Please contact the hosts directly if you need to make changes to your RSVP.";

/// Notice attached to a successful submission made close to or after the deadline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    /// Submitted after the deadline, inside the grace period.
    GracePeriod,
    /// Submitted inside the warning window; carries the formatted countdown.
    TimeRemaining { remaining: String },
    /// Submitted at the exact deadline instant.
    AtDeadline,
}

impl Advisory {
    pub fn message(&self) -> String {
        match self {
            Advisory::GracePeriod => "Submitting during grace period - deadline has passed \
                 but submissions are still being accepted."
                .to_string(),
            Advisory::TimeRemaining { remaining } => {
                format!("Submitting close to deadline - {remaining} remaining!")
            }
            Advisory::AtDeadline => "Submitting at the deadline - this is the last moment \
                 before the grace period starts."
                .to_string(),
        }
    }
}

/// Terminal state of one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionOutcome {
    Persisted {
        /// Number of rows written (guests, or 1 for a declined invitation).
        records: usize,
        advisory: Option<Advisory>,
    },
    RejectedDeadline {
        message: String,
    },
    RejectedValidation {
        /// Every failing rule, in form order.
        errors: Vec<FieldError>,
    },
    RejectedStorage {
        message: String,
    },
}

impl SubmissionOutcome {
    pub fn is_persisted(&self) -> bool {
        matches!(self, SubmissionOutcome::Persisted { .. })
    }

    /// Stable CLI exit code for this outcome.
    pub fn exit_code(&self) -> i32 {
        match self {
            SubmissionOutcome::Persisted { .. } => exit_codes::OK,
            SubmissionOutcome::RejectedDeadline { .. } => exit_codes::REJECTED_DEADLINE,
            SubmissionOutcome::RejectedValidation { .. } => exit_codes::REJECTED_VALIDATION,
            SubmissionOutcome::RejectedStorage { .. } => exit_codes::REJECTED_STORAGE,
        }
    }
}

/// Deadline-aware submission pipeline over an injected record store.
///
/// A `None` deadline never blocks and never produces an advisory.
pub struct SubmissionPipeline<S: RecordStore> {
    deadline: Option<DeadlineConfig>,
    store: S,
}

impl<S: RecordStore> SubmissionPipeline<S> {
    pub fn new(deadline: Option<DeadlineConfig>, store: S) -> Self {
        Self { deadline, store }
    }

    pub fn deadline(&self) -> Option<&DeadlineConfig> {
        self.deadline.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run one attempt: resolve deadline state, validate, expand, persist.
    ///
    /// Records are stamped with `now` as wall-clock time in its own zone.
    #[instrument(skip_all, fields(attending = submission.attending, guests = submission.guests.len()))]
    pub fn submit<T>(&self, submission: &RsvpSubmission, now: &DateTime<T>) -> SubmissionOutcome
    where
        T: TimeZone,
        T::Offset: Display,
    {
        let state = resolve_or_normal(self.deadline.as_ref(), now);
        debug!(%state, "deadline state resolved");

        let advisory = match state {
            TimeState::Closed => {
                warn!("submission refused: deadline and grace period have passed");
                return SubmissionOutcome::RejectedDeadline {
                    message: DEADLINE_CLOSED_MESSAGE.to_string(),
                };
            }
            TimeState::Grace => Some(Advisory::GracePeriod),
            TimeState::Warning => self.deadline.as_ref().map(|config| {
                let remaining = time_until(config, now);
                if remaining.is_zero() {
                    Advisory::AtDeadline
                } else {
                    Advisory::TimeRemaining {
                        remaining: format_time_remaining(remaining),
                    }
                }
            }),
            TimeState::Normal => None,
        };

        let errors = validate(submission);
        if !errors.is_empty() {
            info!(errors = errors.len(), "submission failed validation");
            return SubmissionOutcome::RejectedValidation { errors };
        }

        let timestamp = format_timestamp(now);
        let records = expand_records(submission, &timestamp);
        match self.store.append_many(&records) {
            Ok(()) => {
                info!(records = records.len(), %timestamp, "submission persisted");
                SubmissionOutcome::Persisted {
                    records: records.len(),
                    advisory,
                }
            }
            Err(err) => {
                error!(error = %err, "failed to persist submission");
                SubmissionOutcome::RejectedStorage {
                    message: err.to_string(),
                }
            }
        }
    }

    /// Run one attempt from a caller-owned form session.
    ///
    /// The session is flagged in progress for the duration of the attempt and
    /// marked `submitted` once persisted.
    pub fn submit_session<T>(&self, session: &mut FormSession, now: &DateTime<T>) -> SubmissionOutcome
    where
        T: TimeZone,
        T::Offset: Display,
    {
        session.submission_in_progress = true;
        let outcome = self.submit(&session.to_submission(), now);
        session.submission_in_progress = false;
        if outcome.is_persisted() {
            session.submitted = true;
        }
        outcome
    }
}
