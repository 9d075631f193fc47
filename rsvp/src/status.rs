//! Deadline banner shown above the RSVP form.

use std::fmt;

use chrono::{DateTime, TimeZone};
use serde::Serialize;

use crate::core::deadline::{
    DeadlineConfig, format_deadline, format_time_remaining, resolve, time_until,
};
use crate::core::types::TimeState;

/// Rendered deadline notice for the current instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeadlineBanner {
    pub state: TimeState,
    /// Whether the form should still be offered.
    pub accepting: bool,
    pub headline: String,
    pub details: Vec<String>,
}

impl DeadlineBanner {
    /// Build the banner for `now`, or `None` when no deadline is configured.
    pub fn for_deadline<T: TimeZone>(
        config: Option<&DeadlineConfig>,
        now: &DateTime<T>,
    ) -> Option<Self> {
        config.map(|config| Self::for_state(config, now))
    }

    pub fn for_state<T: TimeZone>(config: &DeadlineConfig, now: &DateTime<T>) -> Self {
        let state = resolve(config, now);
        let deadline = format_deadline(&config.deadline);
        let left = time_until(config, now);
        let remaining = format_time_remaining(left);

        let (headline, details) = match state {
            TimeState::Normal => (format!("RSVP Deadline: {deadline} ({remaining} remaining)"), vec![]),
            TimeState::Warning if left.is_zero() => (
                "RSVP Deadline Approaching!".to_string(),
                vec![format!("The deadline is now: {deadline}")],
            ),
            TimeState::Warning => (
                "RSVP Deadline Approaching!".to_string(),
                vec![
                    format!("Time Remaining: {remaining}"),
                    format!("Deadline: {deadline}"),
                ],
            ),
            TimeState::Grace => (
                "RSVP deadline has passed, but submissions are still being accepted for a limited time."
                    .to_string(),
                config
                    .grace_ends_at()
                    .map(|end| format!("Grace period ends: {}", format_deadline(&end)))
                    .into_iter()
                    .collect(),
            ),
            TimeState::Closed => (
                "RSVP deadline has passed. New submissions are no longer accepted.".to_string(),
                vec![
                    "Please contact the hosts directly if you need to make changes to your RSVP."
                        .to_string(),
                ],
            ),
        };

        Self {
            state,
            accepting: state != TimeState::Closed,
            headline,
            details,
        }
    }
}

impl fmt::Display for DeadlineBanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.headline)?;
        for line in &self.details {
            write!(f, "\n{line}")?;
        }
        Ok(())
    }
}
