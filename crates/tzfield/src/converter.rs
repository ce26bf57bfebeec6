//! Conversion between naive local wall-clock times and naive UTC instants.
//!
//! Both directions take an already-resolved [`Tz`]; looking names up is the
//! job of [`crate::timezone`]. Local → UTC goes through [`crate::dst`] so
//! times inside a transition window follow the fixed tie-break. UTC → local
//! is always well-defined. Either direction fails only for datetimes within
//! a couple of days of chrono's representable limits.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::dst;
use crate::error::{Result, TzFieldError};

/// Format used for naive datetimes at text boundaries (CLI, config, logs).
pub const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Convert a naive local time in `tz` to a naive UTC time.
///
/// # Errors
/// Returns [`TzFieldError::InvalidDatetime`] if `local` is outside the
/// convertible range.
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDateTime;
/// use tzfield::converter::to_utc;
///
/// let local = NaiveDateTime::parse_from_str("2023-11-05T01:30:00", "%Y-%m-%dT%H:%M:%S").unwrap();
/// // 01:30 happens twice in Chicago that night; the CDT (UTC-5) reading wins.
/// let utc = to_utc(&local, &chrono_tz::America::Chicago).unwrap();
/// assert_eq!(utc.to_string(), "2023-11-05 06:30:00");
/// ```
pub fn to_utc(local: &NaiveDateTime, tz: &Tz) -> Result<NaiveDateTime> {
    Ok(dst::resolve_local(local, tz)?.naive_utc())
}

/// Convert a naive UTC time to the naive wall-clock time shown in `tz`.
///
/// # Errors
/// Returns [`TzFieldError::InvalidDatetime`] if `utc` is outside the
/// convertible range.
pub fn to_local(utc: &NaiveDateTime, tz: &Tz) -> Result<NaiveDateTime> {
    dst::check_range(utc)?;
    Ok(utc_offset_aware(utc).with_timezone(tz).naive_local())
}

/// Attach the UTC offset to a naive UTC time.
pub fn utc_offset_aware(utc: &NaiveDateTime) -> DateTime<Utc> {
    Utc.from_utc_datetime(utc)
}

/// The instant `utc` as seen in `tz`, with its offset attached.
pub fn local_offset_aware(utc: &NaiveDateTime, tz: &Tz) -> DateTime<Tz> {
    utc_offset_aware(utc).with_timezone(tz)
}

/// Parse a naive datetime in [`NAIVE_FORMAT`], also accepting a trailing
/// fractional second.
pub fn parse_naive(s: &str) -> Result<NaiveDateTime> {
    let trimmed = s.trim();
    NaiveDateTime::parse_from_str(trimmed, NAIVE_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f"))
        .map_err(|e| TzFieldError::InvalidDatetime(format!("'{}': {}", s, e)))
}

/// Format a naive datetime in [`NAIVE_FORMAT`].
pub fn format_naive(dt: &NaiveDateTime) -> String {
    dt.format(NAIVE_FORMAT).to_string()
}
