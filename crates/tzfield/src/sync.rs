//! Commit-time reconciliation of a [`TemporalRecord`].
//!
//! The host persistence layer calls the three lifecycle entry points
//! directly:
//!
//! 1. [`Synchronizer::on_load`] when a record is materialized,
//! 2. [`Synchronizer::before_commit`] right before it is written,
//! 3. [`Synchronizer::after_commit`] once the write went through.
//!
//! `before_commit` compares the current triple with the record's baseline to
//! find the field the caller edited, then recomputes the others from it. It
//! never fails: an unusable default or an unknown zone is replaced by a
//! fallback, a datetime too extreme to convert leaves the fields untouched,
//! and each case is reported in [`SyncReport::warnings`] (and logged at
//! `warn`).
//!
//! The reconciled values are staged on the record and only become the
//! snapshot in `after_commit`. Until then, running `before_commit` again sees
//! nothing changed, so a retried commit is safe.

use chrono_tz::Tz;
use tracing::warn;

use crate::config::SyncConfig;
use crate::converter::{to_local, to_utc};
use crate::default_tz::DefaultTimezone;
use crate::error::TzFieldError;
use crate::record::TemporalOwner;
use crate::timezone::{ChronoTzDatabase, TimezoneDatabase, UTC_NAME};

/// Which way a commit propagated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncDirection {
    /// Neither a local nor a UTC time is set; nothing was touched.
    Unset,
    /// The UTC time was recomputed from the local time.
    LocalToUtc,
    /// The local time was recomputed from the UTC time.
    UtcToLocal,
    /// Both times were already present and nothing relevant changed, or the
    /// conversion failed and the fields were left alone.
    Unchanged,
}

/// Outcome of [`Synchronizer::before_commit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub direction: SyncDirection,
    /// Problems recovered from during this commit, in the order they hit.
    pub warnings: Vec<TzFieldError>,
}

impl SyncReport {
    /// No fallback had to be taken.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Keeps the local/UTC/timezone triple of records consistent across commits.
#[derive(Debug, Clone)]
pub struct Synchronizer<D = ChronoTzDatabase> {
    db: D,
    default_tz: DefaultTimezone,
    config: SyncConfig,
}

impl Default for Synchronizer {
    fn default() -> Self {
        Self::new(SyncConfig::default())
    }
}

impl Synchronizer {
    /// A synchronizer over the `chrono-tz` database.
    pub fn new(config: SyncConfig) -> Self {
        Self::with_database(ChronoTzDatabase, config)
    }
}

impl<D: TimezoneDatabase> Synchronizer<D> {
    pub fn with_database(db: D, config: SyncConfig) -> Self {
        Self {
            db,
            default_tz: DefaultTimezone::Fallback,
            config,
        }
    }

    /// Set where records without a stored zone get one from.
    pub fn with_default(mut self, default_tz: DefaultTimezone) -> Self {
        self.default_tz = default_tz;
        self
    }

    pub fn database(&self) -> &D {
        &self.db
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Capture the snapshot of a freshly materialized record.
    pub fn on_load<O: TemporalOwner + ?Sized>(&self, owner: &mut O) {
        owner.temporal_mut().commit_snapshot();
    }

    /// Reconcile the record ahead of a write.
    pub fn before_commit<O: TemporalOwner + ?Sized>(&self, owner: &mut O) -> SyncReport {
        let mut warnings = Vec::new();

        if owner.temporal().is_unset() {
            return SyncReport {
                direction: SyncDirection::Unset,
                warnings,
            };
        }

        if owner.temporal().tz().trim().is_empty() {
            let (name, failure) = self.default_tz.resolve(&*owner, &self.config);
            if let Some(e) = failure {
                warn!(error = %e, fallback = %name, "cannot use default timezone");
                warnings.push(e);
            }
            owner.temporal_mut().set_tz(name);
        }

        let record = owner.temporal_mut();
        let tz = match self.db.resolve(record.tz()) {
            Ok(tz) => tz,
            Err(e) => {
                warn!(error = %e, "replacing unknown timezone with {}", UTC_NAME);
                warnings.push(e);
                record.set_tz(UTC_NAME);
                Tz::UTC
            }
        };

        let baseline = record.baseline();
        let (local0, utc0) = (baseline.local(), baseline.utc());
        let tz_changed = record.tz() != baseline.tz();

        let direction = match (record.local(), record.utc()) {
            (Some(local), _) if Some(local) != local0 => SyncDirection::LocalToUtc,
            (_, Some(utc)) if Some(utc) != utc0 || tz_changed => SyncDirection::UtcToLocal,
            (None, Some(_)) => SyncDirection::UtcToLocal,
            (Some(_), None) => SyncDirection::LocalToUtc,
            _ => SyncDirection::Unchanged,
        };

        let converted = match (direction, record.local(), record.utc()) {
            (SyncDirection::LocalToUtc, Some(local), _) => {
                to_utc(&local, &tz).map(|utc| record.set_utc(Some(utc)))
            }
            (SyncDirection::UtcToLocal, _, Some(utc)) => {
                to_local(&utc, &tz).map(|local| record.set_local(Some(local)))
            }
            _ => Ok(()),
        };
        let direction = match converted {
            Ok(()) => direction,
            Err(e) => {
                warn!(error = %e, "leaving record fields as they are");
                warnings.push(e);
                SyncDirection::Unchanged
            }
        };
        record.stage_snapshot();

        tracing::debug!(?direction, timezone = %record.tz(), "record synchronized");

        SyncReport {
            direction,
            warnings,
        }
    }

    /// Make the just-written values the baseline for the next commit.
    pub fn after_commit<O: TemporalOwner + ?Sized>(&self, owner: &mut O) {
        owner.temporal_mut().commit_snapshot();
    }
}
