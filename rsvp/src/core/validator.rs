//! Required-field validation for RSVP submissions.
//!
//! - The primary contact name is always required.
//! - Attending submissions need at least one guest, and every guest needs a
//!   first name, last name, starter, main and dessert.
//! - Declining submissions skip guest validation entirely.

use crate::core::types::{Field, FieldError, GuestEntry, RsvpSubmission};

/// Validate a submission.
///
/// Returns every failing rule in form order (empty on success). Never
/// short-circuits.
pub fn validate(submission: &RsvpSubmission) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if is_blank(&submission.contact_name) {
        errors.push(FieldError::required(Field::ContactName));
    }

    if !submission.attending {
        return errors;
    }

    if submission.guests.is_empty() {
        errors.push(FieldError::required(Field::Guests));
    }

    for (index, guest) in submission.guests.iter().enumerate() {
        validate_guest(index + 1, guest, &mut errors);
    }

    errors
}

fn validate_guest(number: usize, guest: &GuestEntry, errors: &mut Vec<FieldError>) {
    let required = [
        (Field::FirstName, &guest.first_name),
        (Field::LastName, &guest.last_name),
        (Field::Starter, &guest.starter),
        (Field::Main, &guest.main),
        (Field::Dessert, &guest.dessert),
    ];
    for (field, value) in required {
        if is_blank(value) {
            errors.push(FieldError::guest_required(number, field));
        }
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
