//! Deadline resolution and countdown formatting.
//!
//! Classifies an instant into a [`TimeState`] relative to the configured
//! deadline:
//! - `Closed` if `now > deadline + grace_period`.
//! - `Grace` if `deadline < now <= deadline + grace_period`.
//! - `Warning` if `deadline - warning_period <= now <= deadline`.
//! - `Normal` otherwise.
//!
//! The deadline-passed checks run first, so `now == deadline` is `Warning`.

use std::fmt::Display;

use chrono::{DateTime, NaiveDateTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::core::types::TimeState;
use crate::error::ConfigurationError;

/// Input format of `deadline_datetime`.
pub const DEADLINE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Display format for deadline and grace-end instants.
pub const DISPLAY_FORMAT: &str = "%B %d, %Y at %I:%M %p %Z";

const MAX_GRACE_HOURS: i64 = 24 * 366;
const MAX_WARNING_DAYS: i64 = 366;

/// Deadline section of the settings file, before resolution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DeadlineSettings {
    /// Local wall-clock deadline, `YYYY-MM-DD HH:MM`.
    pub deadline_datetime: String,

    /// IANA timezone the deadline is expressed in.
    pub timezone: String,

    /// Hours after the deadline during which submissions are still accepted.
    pub grace_period_hours: i64,

    /// Days before the deadline during which the countdown warning shows.
    pub warning_days: i64,
}

impl Default for DeadlineSettings {
    fn default() -> Self {
        Self {
            deadline_datetime: String::new(),
            timezone: "UTC".to_string(),
            grace_period_hours: 24,
            warning_days: 7,
        }
    }
}

/// Resolved, timezone-aware deadline with its surrounding windows.
#[derive(Debug, Clone, PartialEq)]
pub struct DeadlineConfig {
    pub deadline: DateTime<Tz>,
    pub grace_period: TimeDelta,
    pub warning_period: TimeDelta,
}

impl DeadlineConfig {
    pub fn new(deadline: DateTime<Tz>, grace_period: TimeDelta, warning_period: TimeDelta) -> Self {
        Self {
            deadline,
            grace_period,
            warning_period,
        }
    }

    /// Resolve settings into a deadline instant.
    ///
    /// Ambiguous local times (DST fold) resolve to the earlier instant.
    pub fn from_settings(settings: &DeadlineSettings) -> Result<Self, ConfigurationError> {
        let value = settings.deadline_datetime.trim();
        let naive = NaiveDateTime::parse_from_str(value, DEADLINE_FORMAT).map_err(|source| {
            ConfigurationError::InvalidDeadline {
                value: value.to_string(),
                source,
            }
        })?;

        let timezone = settings.timezone.trim();
        let tz: Tz = timezone
            .parse()
            .map_err(|_| ConfigurationError::UnknownTimezone(timezone.to_string()))?;

        let deadline = tz.from_local_datetime(&naive).earliest().ok_or_else(|| {
            ConfigurationError::NonexistentLocalTime {
                value: value.to_string(),
                timezone: timezone.to_string(),
            }
        })?;

        let grace_hours = bounded(
            "grace_period_hours",
            settings.grace_period_hours,
            MAX_GRACE_HOURS,
        )?;
        let warning_days = bounded("warning_days", settings.warning_days, MAX_WARNING_DAYS)?;

        let config = Self::new(
            deadline,
            TimeDelta::hours(grace_hours),
            TimeDelta::days(warning_days),
        );
        if config.grace_ends_at().is_none() || config.warning_starts_at().is_none() {
            return Err(ConfigurationError::DeadlineOutOfRange {
                value: value.to_string(),
            });
        }
        Ok(config)
    }

    /// Last instant at which a late submission is still accepted.
    ///
    /// `None` when the grace end falls outside the representable range.
    pub fn grace_ends_at(&self) -> Option<DateTime<Tz>> {
        self.deadline.checked_add_signed(self.grace_period)
    }

    /// First instant of the countdown warning window.
    ///
    /// `None` when the window start falls outside the representable range.
    pub fn warning_starts_at(&self) -> Option<DateTime<Tz>> {
        self.deadline.checked_sub_signed(self.warning_period)
    }
}

fn bounded(field: &'static str, value: i64, max: i64) -> Result<i64, ConfigurationError> {
    if !(0..=max).contains(&value) {
        return Err(ConfigurationError::WindowOutOfRange { field, value, max });
    }
    Ok(value)
}

/// Classify `now` against the deadline windows.
///
/// A window edge past the end of the calendar range is never reached.
pub fn resolve<T: TimeZone>(config: &DeadlineConfig, now: &DateTime<T>) -> TimeState {
    let now = now.with_timezone(&Utc);
    let deadline = config.deadline.with_timezone(&Utc);

    if config.grace_ends_at().is_some_and(|end| now > end) {
        TimeState::Closed
    } else if now > deadline {
        TimeState::Grace
    } else if config.warning_starts_at().is_none_or(|start| now >= start) {
        TimeState::Warning
    } else {
        TimeState::Normal
    }
}

/// Like [`resolve`], but an unset deadline always reads as `Normal`.
pub fn resolve_or_normal<T: TimeZone>(
    config: Option<&DeadlineConfig>,
    now: &DateTime<T>,
) -> TimeState {
    config.map_or(TimeState::Normal, |config| resolve(config, now))
}

/// Time left until the deadline, clamped to zero once it has passed.
pub fn time_until<T: TimeZone>(config: &DeadlineConfig, now: &DateTime<T>) -> TimeDelta {
    let remaining = config.deadline.with_timezone(&Utc) - now.with_timezone(&Utc);
    remaining.max(TimeDelta::zero())
}

/// Human-readable countdown.
///
/// - `>= 1 day`: "N day(s), H hour(s)"
/// - `>= 1 hour`: "H hour(s), M minute(s)"
/// - otherwise: "M minute(s)"
/// - non-positive: "Deadline has passed"
pub fn format_time_remaining(remaining: TimeDelta) -> String {
    if remaining <= TimeDelta::zero() {
        return "Deadline has passed".to_string();
    }

    let total = remaining.num_seconds();
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;

    if days > 0 {
        format!("{}, {}", plural(days, "day"), plural(hours, "hour"))
    } else if hours > 0 {
        format!("{}, {}", plural(hours, "hour"), plural(minutes, "minute"))
    } else {
        plural(minutes, "minute")
    }
}

/// Format an instant as e.g. "June 01, 2026 at 11:59 PM CEST".
pub fn format_deadline<T>(instant: &DateTime<T>) -> String
where
    T: TimeZone,
    T::Offset: Display,
{
    instant.format(DISPLAY_FORMAT).to_string()
}

fn plural(count: i64, unit: &str) -> String {
    let suffix = if count == 1 { "" } else { "s" };
    format!("{count} {unit}{suffix}")
}
