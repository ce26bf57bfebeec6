//! DST transition handling for wall-clock times.
//!
//! A naive local time maps to zero, one, or two instants in a zone with
//! daylight-saving rules. The tie-break applied here is fixed:
//!
//! - **Fall-back** (the wall clock repeats an hour): the pre-transition, i.e.
//!   earlier, instant wins. `01:30` on the night Chicago leaves CDT is read as
//!   `01:30 CDT`.
//! - **Spring-forward** (the wall clock skips an hour): the time is shifted
//!   forward by the transition delta. `02:30` on the night Chicago enters CDT
//!   is read as `03:30 CDT`.
//!
//! Stored timestamps have been interpreted with this policy, so it must not
//! change.

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{Result, TzFieldError};

/// Distance kept from either end of the representable range. Offsets and
/// the gap lookups below never reach further than this.
const RANGE_MARGIN_DAYS: i64 = 2;

/// How a naive local time maps onto a timezone's instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalTimeKind {
    /// Exactly one instant shows this wall-clock time.
    Unique,
    /// Two instants show this wall-clock time (fall-back overlap).
    Ambiguous,
    /// No instant shows this wall-clock time (spring-forward gap).
    Nonexistent,
}

/// Reject datetimes too close to the ends of chrono's range to convert.
///
/// # Errors
/// Returns [`TzFieldError::InvalidDatetime`] naming `dt`.
pub fn check_range(dt: &NaiveDateTime) -> Result<()> {
    let margin = Duration::days(RANGE_MARGIN_DAYS);
    match (dt.checked_sub_signed(margin), dt.checked_add_signed(margin)) {
        (Some(_), Some(_)) => Ok(()),
        _ => Err(TzFieldError::InvalidDatetime(format!(
            "'{}' is outside the convertible range",
            dt
        ))),
    }
}

/// Classify `local` against the transitions of `tz`.
pub fn classify_local(local: &NaiveDateTime, tz: &Tz) -> Result<LocalTimeKind> {
    check_range(local)?;
    Ok(match tz.from_local_datetime(local) {
        LocalResult::Single(_) => LocalTimeKind::Unique,
        LocalResult::Ambiguous(_, _) => LocalTimeKind::Ambiguous,
        LocalResult::None => LocalTimeKind::Nonexistent,
    })
}

/// Attach `tz` to `local`, applying the transition tie-break.
///
/// Ambiguity is resolved here and never surfaced; the only error is a
/// datetime outside the convertible range.
pub fn resolve_local(local: &NaiveDateTime, tz: &Tz) -> Result<DateTime<Tz>> {
    check_range(local)?;
    match tz.from_local_datetime(local) {
        LocalResult::Single(dt) => Ok(dt),
        LocalResult::Ambiguous(earliest, latest) => {
            tracing::debug!(
                %local,
                timezone = %tz,
                chosen = %earliest,
                skipped = %latest,
                "ambiguous local time, using pre-transition instant"
            );
            Ok(earliest)
        }
        LocalResult::None => shift_past_gap(local, tz),
    }
}

/// Resolve a wall-clock time that falls inside a spring-forward gap.
///
/// The time is read with the offset in force before the gap, which is the
/// same instant as moving the wall clock forward by the gap width.
fn shift_past_gap(local: &NaiveDateTime, tz: &Tz) -> Result<DateTime<Tz>> {
    let out_of_range = || {
        TzFieldError::InvalidDatetime(format!("'{}' is outside the convertible range", local))
    };

    // Transitions are never closer than a few weeks, so a day either side of
    // the gap lands on the two offsets that bound it.
    let day = Duration::days(1);
    let day_before = local.checked_sub_signed(day).ok_or_else(out_of_range)?;
    let day_after = local.checked_add_signed(day).ok_or_else(out_of_range)?;
    let before = tz.offset_from_utc_datetime(&day_before).fix();
    let after = tz.offset_from_utc_datetime(&day_after).fix();

    let utc = local
        .checked_sub_signed(Duration::seconds(i64::from(before.local_minus_utc())))
        .ok_or_else(out_of_range)?;
    let resolved = Utc.from_utc_datetime(&utc).with_timezone(tz);

    tracing::debug!(
        %local,
        timezone = %tz,
        offset_before = %before,
        offset_after = %after,
        resolved = %resolved,
        "nonexistent local time, shifting past the gap"
    );

    Ok(resolved)
}
