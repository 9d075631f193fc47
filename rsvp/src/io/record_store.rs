//! Record table storage.
//!
//! The [`RecordStore`] trait exposes the table as a whole (`load` /
//! `replace`) so the pipeline never touches files directly and a different
//! backend can slot in. [`CsvRecordStore`] keeps the table in one CSV file and
//! rewrites it atomically (temp file + rename) on every save.
//!
//! Single writer only: nothing here coordinates concurrent processes
//! appending to the same file. Two writers racing on read-modify-write can
//! lose each other's rows.

use std::cell::RefCell;
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::core::types::{RECORD_COLUMNS, RsvpRecord};
use crate::error::StorageError;

/// The whole record table, in insertion order.
pub type Table = Vec<RsvpRecord>;

/// Abstraction over record table backends.
pub trait RecordStore {
    /// Read the full table. Missing or unreadable-as-table data reads as empty.
    fn load(&self) -> Result<Table, StorageError>;

    /// Replace the full table. Readers see either the old or the new table.
    fn replace(&self, table: &[RsvpRecord]) -> Result<(), StorageError>;

    /// Append `records` after the existing rows in a single rewrite.
    ///
    /// Either every record lands or none does.
    fn append_many(&self, records: &[RsvpRecord]) -> Result<(), StorageError> {
        let mut table = self.load()?;
        table.extend_from_slice(records);
        self.replace(&table)
    }

    fn append(&self, record: &RsvpRecord) -> Result<(), StorageError> {
        self.append_many(std::slice::from_ref(record))
    }
}

impl<T: RecordStore + ?Sized> RecordStore for &T {
    fn load(&self) -> Result<Table, StorageError> {
        (**self).load()
    }

    fn replace(&self, table: &[RsvpRecord]) -> Result<(), StorageError> {
        (**self).replace(table)
    }

    fn append_many(&self, records: &[RsvpRecord]) -> Result<(), StorageError> {
        (**self).append_many(records)
    }
}

/// Record table stored as a CSV file with a fixed header row.
#[derive(Debug, Clone)]
pub struct CsvRecordStore {
    path: PathBuf,
}

enum TableRead {
    Missing,
    Parsed(Table),
    Corrupt(String),
}

impl CsvRecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where an unparseable table is copied before it gets overwritten.
    ///
    /// Generation 0 is `<file>.corrupt`, later ones `<file>.corrupt.<n>`.
    pub fn corrupt_backup_path(&self, generation: u32) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".corrupt");
        if generation > 0 {
            name.push(format!(".{generation}"));
        }
        PathBuf::from(name)
    }

    /// Copy the current file to the first unused backup path.
    ///
    /// Existing backups are never overwritten.
    fn back_up_corrupt(&self) -> Result<PathBuf, StorageError> {
        let mut generation = 0;
        loop {
            let backup = self.corrupt_backup_path(generation);
            match OpenOptions::new().write(true).create_new(true).open(&backup) {
                Ok(mut file) => {
                    let mut source = File::open(&self.path)
                        .map_err(|err| StorageError::io("read corrupt table", &self.path, err))?;
                    io::copy(&mut source, &mut file)
                        .and_then(|_| file.sync_all())
                        .map_err(|err| StorageError::io("back up corrupt table", &backup, err))?;
                    return Ok(backup);
                }
                Err(err) if err.kind() == io::ErrorKind::AlreadyExists && generation < u32::MAX => {
                    generation += 1;
                }
                Err(err) => return Err(StorageError::io("back up corrupt table", &backup, err)),
            }
        }
    }

    fn read(&self) -> Result<TableRead, StorageError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(TableRead::Missing),
            Err(err) => return Err(StorageError::io("read table", &self.path, err)),
        };
        match parse_rows(&bytes) {
            Ok(rows) => Ok(TableRead::Parsed(rows)),
            Err(err) => Ok(TableRead::Corrupt(err.to_string())),
        }
    }
}

impl RecordStore for CsvRecordStore {
    fn load(&self) -> Result<Table, StorageError> {
        let table = match self.read()? {
            TableRead::Missing => {
                debug!(path = %self.path.display(), "record table missing, starting empty");
                Table::new()
            }
            TableRead::Parsed(rows) => rows,
            TableRead::Corrupt(reason) => {
                warn!(path = %self.path.display(), %reason, "record table unreadable, treating as empty");
                Table::new()
            }
        };
        debug!(path = %self.path.display(), rows = table.len(), "record table loaded");
        Ok(table)
    }

    fn replace(&self, table: &[RsvpRecord]) -> Result<(), StorageError> {
        debug!(path = %self.path.display(), rows = table.len(), "writing record table");
        let buf = serialize_rows(&self.path, table)?;
        write_atomic(&self.path, &buf)
    }

    fn append_many(&self, records: &[RsvpRecord]) -> Result<(), StorageError> {
        let mut table = match self.read()? {
            TableRead::Missing => Table::new(),
            TableRead::Parsed(rows) => rows,
            TableRead::Corrupt(reason) => {
                let backup = self.back_up_corrupt()?;
                warn!(
                    path = %self.path.display(),
                    backup = %backup.display(),
                    %reason,
                    "record table unreadable, preserved copy before rewrite"
                );
                Table::new()
            }
        };
        let existing = table.len();
        table.extend_from_slice(records);
        self.replace(&table)?;
        info!(
            path = %self.path.display(),
            appended = records.len(),
            total = existing + records.len(),
            "records appended"
        );
        Ok(())
    }
}

fn parse_rows(bytes: &[u8]) -> Result<Table, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(bytes);
    reader.deserialize::<RsvpRecord>().collect()
}

fn serialize_rows(path: &Path, rows: &[RsvpRecord]) -> Result<Vec<u8>, StorageError> {
    // Header is written explicitly so an empty table still carries it.
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer
        .write_record(RECORD_COLUMNS)
        .map_err(|err| StorageError::csv("serialize header", path, err))?;
    for row in rows {
        writer
            .serialize(row)
            .map_err(|err| StorageError::csv("serialize record", path, err))?;
    }
    writer
        .into_inner()
        .map_err(|err| StorageError::io("serialize table", path, err.into_error()))
}

fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), StorageError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| StorageError::io("create directory", parent, err))?;
    }
    let tmp_path = path.with_extension("csv.tmp");
    if let Err(err) = write_synced(&tmp_path, contents) {
        let _ = fs::remove_file(&tmp_path);
        return Err(StorageError::io("write temp table", &tmp_path, err));
    }
    fs::rename(&tmp_path, path).map_err(|err| {
        let _ = fs::remove_file(&tmp_path);
        StorageError::io("replace table", path, err)
    })
}

fn write_synced(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(contents)?;
    file.sync_all()
}

/// In-memory record table for tests and embedders without a filesystem.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    rows: RefCell<Table>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> Table {
        self.rows.borrow().clone()
    }
}

impl RecordStore for MemoryRecordStore {
    fn load(&self) -> Result<Table, StorageError> {
        Ok(self.rows())
    }

    fn replace(&self, table: &[RsvpRecord]) -> Result<(), StorageError> {
        *self.rows.borrow_mut() = table.to_vec();
        Ok(())
    }
}
