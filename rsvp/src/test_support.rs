//! Test-only helpers for constructing submissions, records and stores.

use std::cell::Cell;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::deadline::{DeadlineConfig, DeadlineSettings};
use crate::core::types::{Attendance, GuestEntry, RsvpRecord, RsvpSubmission};
use crate::error::StorageError;
use crate::io::record_store::{RecordStore, Table};

/// Create a guest with every required menu choice filled in.
pub fn guest(first_name: &str, last_name: &str) -> GuestEntry {
    GuestEntry {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        starter: "Soup".to_string(),
        main: "Salmon".to_string(),
        dessert: "Cake".to_string(),
        dietary_notes: String::new(),
    }
}

/// Create an attending submission with the given guests.
pub fn attending(contact_name: &str, guests: Vec<GuestEntry>) -> RsvpSubmission {
    RsvpSubmission {
        contact_name: contact_name.to_string(),
        contact_email: "jane@example.com".to_string(),
        contact_phone: "+4712345678".to_string(),
        attending: true,
        comments: String::new(),
        guests,
    }
}

/// Create a declining submission with no guests.
pub fn declining(contact_name: &str) -> RsvpSubmission {
    RsvpSubmission {
        contact_name: contact_name.to_string(),
        attending: false,
        ..RsvpSubmission::default()
    }
}

/// Create an attending record for one guest with deterministic defaults.
pub fn record(contact_name: &str, guest_first_name: &str) -> RsvpRecord {
    RsvpRecord {
        timestamp: "2026-05-01 10:00:00".to_string(),
        contact_name: contact_name.to_string(),
        contact_email: "jane@example.com".to_string(),
        contact_phone: "+4712345678".to_string(),
        attending: Attendance::Yes,
        guest_first_name: guest_first_name.to_string(),
        guest_last_name: "Doe".to_string(),
        starter_choice: "Soup".to_string(),
        main_choice: "Salmon".to_string(),
        dessert_choice: "Cake".to_string(),
        dietary_requirements: String::new(),
        comments: String::new(),
    }
}

/// Resolve a UTC deadline with the default 24h grace and 7 day warning.
///
/// Panics on malformed input; test fixtures are fixed strings.
pub fn deadline_utc(deadline_datetime: &str) -> DeadlineConfig {
    DeadlineConfig::from_settings(&DeadlineSettings {
        deadline_datetime: deadline_datetime.to_string(),
        ..DeadlineSettings::default()
    })
    .expect("test deadline")
}

/// Store whose every operation fails, counting how often it was touched.
#[derive(Debug, Default)]
pub struct FailingStore {
    calls: Cell<usize>,
}

impl FailingStore {
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    fn fail(&self, action: &'static str) -> StorageError {
        self.calls.set(self.calls.get() + 1);
        StorageError::Io {
            action,
            path: PathBuf::from("rsvps.csv"),
            source: io::Error::other("disk unplugged"),
        }
    }
}

impl RecordStore for FailingStore {
    fn load(&self) -> Result<Table, StorageError> {
        Err(self.fail("read table"))
    }

    fn replace(&self, _table: &[RsvpRecord]) -> Result<(), StorageError> {
        Err(self.fail("replace table"))
    }
}

/// Scratch directory holding a settings file and a record table.
pub struct TestDir {
    dir: tempfile::TempDir,
}

impl TestDir {
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create temp dir")?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.path().join("rsvp.toml")
    }

    pub fn csv_path(&self) -> PathBuf {
        self.path().join("rsvps.csv")
    }

    /// Write `rsvp.toml` with the given deadline (UTC) or none.
    pub fn write_config(&self, deadline_datetime: Option<&str>) -> Result<()> {
        let mut contents = String::new();
        if let Some(deadline) = deadline_datetime {
            contents.push_str(&format!(
                "[deadline]\ndeadline_datetime = \"{deadline}\"\ntimezone = \"UTC\"\n\n"
            ));
        }
        contents.push_str("[files]\ncsv_file = \"rsvps.csv\"\n");
        std::fs::write(self.config_path(), contents)
            .with_context(|| format!("write {}", self.config_path().display()))
    }

    /// Write a submission document as JSON and return its path.
    pub fn write_submission(&self, name: &str, submission: &RsvpSubmission) -> Result<PathBuf> {
        let path = self.path().join(name);
        let payload = serde_json::to_string_pretty(submission).context("serialize submission")?;
        std::fs::write(&path, payload).with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }
}
