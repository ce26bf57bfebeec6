//! Timezone name lookup.
//!
//! The synchronizer never parses zone names itself; it asks a
//! [`TimezoneDatabase`]. [`ChronoTzDatabase`] is the stock implementation,
//! backed by the IANA data compiled into `chrono-tz`.

use chrono_tz::{Tz, TZ_VARIANTS};

use crate::error::{Result, TzFieldError};

/// Width of the persisted timezone-name column.
pub const TZ_NAME_MAX_LEN: usize = 38;

/// Name of the zone substituted when a stored name cannot be resolved.
pub const UTC_NAME: &str = "UTC";

/// Source of timezone rules, keyed by IANA name.
pub trait TimezoneDatabase {
    /// Resolve `name` to its rule set.
    ///
    /// # Errors
    /// Returns [`TzFieldError::UnknownTimezone`] carrying `name` when the
    /// database has no such entry.
    fn resolve(&self, name: &str) -> Result<Tz>;

    /// Every name the database knows, in a stable order.
    fn all_names(&self) -> Vec<&'static str>;
}

/// [`TimezoneDatabase`] over the `chrono-tz` compiled tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChronoTzDatabase;

impl TimezoneDatabase for ChronoTzDatabase {
    fn resolve(&self, name: &str) -> Result<Tz> {
        name.parse::<Tz>()
            .map_err(|_| TzFieldError::UnknownTimezone(name.to_string()))
    }

    fn all_names(&self) -> Vec<&'static str> {
        TZ_VARIANTS.iter().map(|tz| tz.name()).collect()
    }
}

/// `(value, label)` pairs for a form or column choice constraint.
pub fn timezone_choices(db: &impl TimezoneDatabase) -> Vec<(&'static str, &'static str)> {
    db.all_names().into_iter().map(|name| (name, name)).collect()
}
