//! Expansion of a validated submission into persisted rows.

use chrono::{DateTime, TimeZone};
use std::fmt::Display;

use crate::core::types::{Attendance, GuestEntry, RsvpRecord, RsvpSubmission};

/// Format of the `timestamp` column.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a creation time for the `timestamp` column (second precision).
pub fn format_timestamp<T>(now: &DateTime<T>) -> String
where
    T: TimeZone,
    T::Offset: Display,
{
    now.format(TIMESTAMP_FORMAT).to_string()
}

/// Expand a submission into records sharing one `timestamp`.
///
/// Attending submissions yield one record per guest, in guest order.
/// Declining submissions yield exactly one record with empty guest and menu
/// fields, whatever the guest list holds. All text is trimmed.
pub fn expand_records(submission: &RsvpSubmission, timestamp: &str) -> Vec<RsvpRecord> {
    if !submission.attending {
        return vec![record(submission, timestamp, Attendance::No, &GuestEntry::default())];
    }
    submission
        .guests
        .iter()
        .map(|guest| record(submission, timestamp, Attendance::Yes, guest))
        .collect()
}

fn record(
    submission: &RsvpSubmission,
    timestamp: &str,
    attending: Attendance,
    guest: &GuestEntry,
) -> RsvpRecord {
    RsvpRecord {
        timestamp: timestamp.to_string(),
        contact_name: trimmed(&submission.contact_name),
        contact_email: trimmed(&submission.contact_email),
        contact_phone: trimmed(&submission.contact_phone),
        attending,
        guest_first_name: trimmed(&guest.first_name),
        guest_last_name: trimmed(&guest.last_name),
        starter_choice: trimmed(&guest.starter),
        main_choice: trimmed(&guest.main),
        dessert_choice: trimmed(&guest.dessert),
        dietary_requirements: trimmed(&guest.dietary_notes),
        comments: trimmed(&submission.comments),
    }
}

fn trimmed(value: &str) -> String {
    value.trim().to_string()
}
