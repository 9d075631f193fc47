//! End-to-end pipeline tests against the CSV record store.
//!
//! These tests drive `SubmissionPipeline` through several attempts across the
//! deadline windows and read the table back from disk to verify what landed.

use std::fs;

use chrono::{DateTime, TimeDelta, Utc};
use rsvp::core::session::FormSession;
use rsvp::core::types::{Attendance, TimeState};
use rsvp::io::config::load_config;
use rsvp::io::record_store::{CsvRecordStore, RecordStore};
use rsvp::pipeline::{Advisory, SubmissionOutcome, SubmissionPipeline};
use rsvp::test_support::{TestDir, attending, deadline_utc, declining, guest};

const DEADLINE: &str = "2026-06-01 12:00";

fn at(offset: TimeDelta) -> DateTime<Utc> {
    deadline_utc(DEADLINE).deadline.with_timezone(&Utc) + offset
}

/// Full event lifecycle: early reply, last-minute reply, late reply, refused reply.
///
/// 1. 30 days out: family of three attends (3 rows, no advisory).
/// 2. 2 hours before: one guest declines (1 row, countdown advisory).
/// 3. 3 hours after: a couple attends (2 rows, grace advisory).
/// 4. 2 days after: refused, table unchanged.
#[test]
fn lifecycle_across_deadline_windows() {
    let dir = TestDir::new().expect("dir");
    let pipeline = SubmissionPipeline::new(
        Some(deadline_utc(DEADLINE)),
        CsvRecordStore::new(dir.csv_path()),
    );

    let family = attending(
        "Kari Nordmann",
        vec![guest("Kari", "Nordmann"), guest("Ola", "Nordmann"), guest("Per", "Nordmann")],
    );
    let outcome = pipeline.submit(&family, &at(TimeDelta::days(-30)));
    assert_eq!(
        outcome,
        SubmissionOutcome::Persisted {
            records: 3,
            advisory: None
        }
    );

    let outcome = pipeline.submit(&declining("Jane Doe"), &at(TimeDelta::hours(-2)));
    assert_eq!(
        outcome,
        SubmissionOutcome::Persisted {
            records: 1,
            advisory: Some(Advisory::TimeRemaining {
                remaining: "2 hours, 0 minutes".to_string()
            })
        }
    );

    let couple = attending("John Smith", vec![guest("John", "Smith"), guest("Mary", "Smith")]);
    let outcome = pipeline.submit(&couple, &at(TimeDelta::hours(3)));
    assert_eq!(
        outcome,
        SubmissionOutcome::Persisted {
            records: 2,
            advisory: Some(Advisory::GracePeriod)
        }
    );

    let before = fs::read_to_string(dir.csv_path()).expect("read table");
    let outcome = pipeline.submit(&declining("Too Late"), &at(TimeDelta::days(2)));
    assert!(matches!(outcome, SubmissionOutcome::RejectedDeadline { .. }));
    assert_eq!(fs::read_to_string(dir.csv_path()).expect("read table"), before);

    let rows = pipeline.store().load().expect("load");
    let summary: Vec<(&str, Attendance, &str)> = rows
        .iter()
        .map(|row| {
            (
                row.contact_name.as_str(),
                row.attending,
                row.guest_first_name.as_str(),
            )
        })
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Kari Nordmann", Attendance::Yes, "Kari"),
            ("Kari Nordmann", Attendance::Yes, "Ola"),
            ("Kari Nordmann", Attendance::Yes, "Per"),
            ("Jane Doe", Attendance::No, ""),
            ("John Smith", Attendance::Yes, "John"),
            ("John Smith", Attendance::Yes, "Mary"),
        ]
    );
    assert_eq!(rows[0].timestamp, "2026-05-02 12:00:00");
    assert_eq!(rows[4].timestamp, "2026-06-01 15:00:00");
}

/// Rows of one submission share a timestamp and keep text phone numbers.
#[test]
fn multi_guest_rows_share_timestamp_and_phone() {
    let dir = TestDir::new().expect("dir");
    let pipeline = SubmissionPipeline::new(None, CsvRecordStore::new(dir.csv_path()));

    let mut submission = attending("Jane Doe", vec![guest("Jane", "Doe"), guest("John", "Doe")]);
    submission.contact_phone = "004790000000".to_string();
    submission.guests[1].dietary_notes = "Nut allergy, \"severe\"".to_string();
    submission.comments = "Line one\nLine two".to_string();

    let outcome = pipeline.submit(&submission, &at(TimeDelta::days(-60)));
    assert!(outcome.is_persisted());

    let rows = CsvRecordStore::new(dir.csv_path()).load().expect("load");
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|row| row.timestamp == rows[0].timestamp));
    assert!(rows.iter().all(|row| row.contact_phone == "004790000000"));
    assert_eq!(rows[1].dietary_requirements, "Nut allergy, \"severe\"");
    assert_eq!(rows[0].comments, "Line one\nLine two");
}

#[test]
fn invalid_submission_leaves_no_table() {
    let dir = TestDir::new().expect("dir");
    let pipeline = SubmissionPipeline::new(None, CsvRecordStore::new(dir.csv_path()));

    let mut second = guest("John", "Doe");
    second.main = "  ".to_string();
    let submission = attending("Jane Doe", vec![guest("Jane", "Doe"), second]);

    let outcome = pipeline.submit(&submission, &at(TimeDelta::zero()));
    let SubmissionOutcome::RejectedValidation { errors } = outcome else {
        panic!("expected validation rejection");
    };
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "Guest 2 main course choice is required");
    assert!(!dir.csv_path().exists());
}

/// Form session flow as the UI drives it: build, submit, reset.
#[test]
fn form_session_round_trip() {
    let dir = TestDir::new().expect("dir");
    dir.write_config(Some(DEADLINE)).expect("config");
    let cfg = load_config(&dir.config_path()).expect("load config");
    let deadline = cfg.deadline_config().expect("deadline");
    assert_eq!(
        rsvp::core::deadline::resolve(&deadline, &at(TimeDelta::days(-1))),
        TimeState::Warning
    );

    let pipeline = SubmissionPipeline::new(Some(deadline), CsvRecordStore::new(&cfg.files.csv_file));
    let mut session = FormSession::new();
    session.contact_name = "Jane Doe".to_string();
    session.guests[0] = guest("Jane", "Doe");
    assert!(session.add_guest());
    session.guests[1] = guest("John", "Doe");
    assert!(session.add_guest());
    assert!(session.remove_guest(2));

    let outcome = pipeline.submit_session(&mut session, &at(TimeDelta::days(-1)));
    assert!(matches!(
        outcome,
        SubmissionOutcome::Persisted {
            records: 2,
            advisory: Some(Advisory::TimeRemaining { .. })
        }
    ));
    assert!(session.submitted);

    session.reset();
    assert_eq!(session, FormSession::default());
    assert_eq!(pipeline.store().load().expect("load").len(), 2);
}
