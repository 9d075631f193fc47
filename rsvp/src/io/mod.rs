//! I/O helpers for rsvp commands.

pub mod config;
pub mod record_store;
