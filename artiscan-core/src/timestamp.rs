//! Timestamp normalization
//!
//! Each application stores time differently. Chrome counts ticks (10,000,000
//! per second), WhatsApp counts milliseconds and Skype counts seconds, all
//! from the Unix epoch. Everything here converts into `DateTime<Utc>` and
//! never fails: anything that cannot be represented becomes `None`, which
//! renders as [`NOT_APPLICABLE`].

use crate::error::{Error, Result};
use crate::value::{self, NOT_APPLICABLE};
use chrono::{DateTime, Local, TimeZone, Utc};
use rusqlite::types::Value;

/// Format used for every timestamp cell. Cells are rendered in UTC.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Sentinel for end times that were never reached.
pub const IN_PROGRESS: &str = "in progress / interrupted";

/// Ticks per second in Chrome's history, cookie and login stores.
pub const CHROME_TICKS_PER_SECOND: i64 = 10_000_000;

/// Native time encoding of a source column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Epoch {
    /// Integer ticks since the Unix epoch, `per_second` ticks to the second
    Ticks { per_second: i64 },
    /// Milliseconds since the Unix epoch
    UnixMillis,
    /// Seconds since the Unix epoch
    UnixSeconds,
}

impl Epoch {
    pub const CHROME: Epoch = Epoch::Ticks {
        per_second: CHROME_TICKS_PER_SECOND,
    };

    /// Native units per second
    pub fn units_per_second(&self) -> i64 {
        match self {
            Epoch::Ticks { per_second } => (*per_second).max(1),
            Epoch::UnixMillis => 1_000,
            Epoch::UnixSeconds => 1,
        }
    }

    /// Convert Unix seconds into this epoch's native units, saturating.
    pub fn from_unix_seconds(&self, secs: i64) -> i64 {
        secs.saturating_mul(self.units_per_second())
    }
}

/// Convert a raw column value into a point in time.
pub fn normalize(raw: &Value, epoch: Epoch) -> Option<DateTime<Utc>> {
    let per = epoch.units_per_second();
    match raw {
        Value::Integer(units) => from_units(*units, per),
        Value::Real(units) => from_real_units(*units, per),
        Value::Text(s) => {
            let s = s.trim();
            match s.parse::<i64>() {
                Ok(units) => from_units(units, per),
                Err(_) => from_real_units(s.parse::<f64>().ok()?, per),
            }
        }
        Value::Null | Value::Blob(_) => None,
    }
}

fn from_units(units: i64, per: i64) -> Option<DateTime<Utc>> {
    if units < 0 {
        return None;
    }
    let secs = units / per;
    let nanos = (i128::from(units % per) * 1_000_000_000 / i128::from(per)) as u32;
    DateTime::<Utc>::from_timestamp(secs, nanos)
}

fn from_real_units(units: f64, per: i64) -> Option<DateTime<Utc>> {
    if !units.is_finite() || units < 0.0 {
        return None;
    }
    let secs_f = units / per as f64;
    if secs_f > i64::MAX as f64 {
        return None;
    }
    let secs = secs_f.trunc();
    let nanos = ((secs_f - secs) * 1e9).round().min(999_999_999.0) as u32;
    DateTime::<Utc>::from_timestamp(secs as i64, nanos)
}

/// Render an optional point in time as a report cell.
pub fn format_time(ts: Option<DateTime<Utc>>) -> String {
    match ts {
        Some(ts) => ts.format(TIME_FORMAT).to_string(),
        None => NOT_APPLICABLE.to_string(),
    }
}

/// Normalize and render in one step.
pub fn time_cell(raw: &Value, epoch: Epoch) -> String {
    format_time(normalize(raw, epoch))
}

/// Render an end time; zero, negative or missing means the activity never finished.
pub fn end_time_cell(raw: &Value, epoch: Epoch) -> String {
    match value::real(raw) {
        Some(units) if units > 0.0 => time_cell(raw, epoch),
        _ => IN_PROGRESS.to_string(),
    }
}

/// Parse a `YYYY_MM_DD_HH_MM_SS` local time into Unix seconds.
pub fn parse_time_arg(arg: &str) -> Result<i64> {
    let invalid = || Error::InvalidTimeArgument(arg.to_string());

    let parts = arg
        .trim()
        .split('_')
        .map(|p| p.parse::<u32>().map_err(|_| invalid()))
        .collect::<Result<Vec<_>>>()?;
    let [year, month, day, hour, minute, second] = parts[..] else {
        return Err(invalid());
    };

    Local
        .with_ymd_and_hms(year as i32, month, day, hour, minute, second)
        .earliest()
        .map(|dt| dt.timestamp())
        .ok_or_else(invalid)
}
