//! The local/UTC/timezone triple and its last-committed snapshot.

use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::converter;
use crate::default_tz::AttributeValue;
use crate::error::Result;
use crate::timezone::TimezoneDatabase;

/// The triple as it stood after the last commit (or at load).
///
/// Never edited in place: a commit builds a new one and swaps it in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    local: Option<NaiveDateTime>,
    utc: Option<NaiveDateTime>,
    tz: String,
}

impl Snapshot {
    pub fn new(local: Option<NaiveDateTime>, utc: Option<NaiveDateTime>, tz: impl Into<String>) -> Self {
        Self {
            local,
            utc,
            tz: tz.into(),
        }
    }

    pub fn local(&self) -> Option<NaiveDateTime> {
        self.local
    }

    pub fn utc(&self) -> Option<NaiveDateTime> {
        self.utc
    }

    pub fn tz(&self) -> &str {
        &self.tz
    }
}

/// A local wall-clock time, the matching UTC time, and the zone tying them.
///
/// Owning code edits any of the three through the setters; the
/// [`Synchronizer`](crate::sync::Synchronizer) works out on commit which one
/// moved by comparing against [`TemporalRecord::baseline`].
///
/// Reconciled values are staged until the commit is confirmed, so a
/// reconciliation repeated before confirmation compares against what it
/// already wrote rather than against the last committed state.
///
/// Deserializing a record counts as loading it: when the input carries no
/// `snapshot`, one is captured from the values just read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredRecord")]
pub struct TemporalRecord {
    local: Option<NaiveDateTime>,
    utc: Option<NaiveDateTime>,
    tz: String,
    snapshot: Snapshot,
    #[serde(skip_serializing)]
    staged: Option<Snapshot>,
}

#[derive(Deserialize)]
struct StoredRecord {
    #[serde(default)]
    local: Option<NaiveDateTime>,
    #[serde(default)]
    utc: Option<NaiveDateTime>,
    #[serde(default)]
    tz: String,
    #[serde(default)]
    snapshot: Option<Snapshot>,
}

impl From<StoredRecord> for TemporalRecord {
    fn from(stored: StoredRecord) -> Self {
        let mut record = TemporalRecord::load(stored.local, stored.utc, stored.tz);
        if let Some(snapshot) = stored.snapshot {
            record.snapshot = snapshot;
        }
        record
    }
}

impl TemporalRecord {
    /// Materialize a record from stored values and capture its snapshot.
    pub fn load(local: Option<NaiveDateTime>, utc: Option<NaiveDateTime>, tz: impl Into<String>) -> Self {
        let tz = tz.into();
        Self {
            snapshot: Snapshot::new(local, utc, tz.clone()),
            staged: None,
            local,
            utc,
            tz,
        }
    }

    pub fn local(&self) -> Option<NaiveDateTime> {
        self.local
    }

    pub fn utc(&self) -> Option<NaiveDateTime> {
        self.utc
    }

    pub fn tz(&self) -> &str {
        &self.tz
    }

    /// The values as of the last confirmed commit (or load).
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Values reconciled by a commit that has not been confirmed yet.
    pub fn staged(&self) -> Option<&Snapshot> {
        self.staged.as_ref()
    }

    /// What edits are detected against: the staged values if a commit is in
    /// flight, the snapshot otherwise.
    pub fn baseline(&self) -> &Snapshot {
        self.staged.as_ref().unwrap_or(&self.snapshot)
    }

    pub fn set_local(&mut self, local: Option<NaiveDateTime>) {
        self.local = local;
    }

    pub fn set_utc(&mut self, utc: Option<NaiveDateTime>) {
        self.utc = utc;
    }

    pub fn set_tz(&mut self, tz: impl Into<String>) {
        self.tz = tz.into();
    }

    /// Neither a local nor a UTC time is set.
    pub fn is_unset(&self) -> bool {
        self.local.is_none() && self.utc.is_none()
    }

    fn current(&self) -> Snapshot {
        Snapshot::new(self.local, self.utc, self.tz.clone())
    }

    /// Record the current values as reconciled but not yet committed.
    pub(crate) fn stage_snapshot(&mut self) {
        self.staged = Some(self.current());
    }

    /// Replace the snapshot with the current values and drop any staged ones.
    pub(crate) fn commit_snapshot(&mut self) {
        self.snapshot = self.current();
        self.staged = None;
    }

    /// Resolve the stored zone name.
    ///
    /// # Errors
    /// Returns [`TzFieldError::UnknownTimezone`](crate::TzFieldError::UnknownTimezone)
    /// if the name is not in `db`.
    pub fn timezone(&self, db: &impl TimezoneDatabase) -> Result<Tz> {
        db.resolve(&self.tz)
    }

    /// The UTC time with its offset attached.
    pub fn utc_offset_aware(&self) -> Option<DateTime<Utc>> {
        self.utc.as_ref().map(converter::utc_offset_aware)
    }

    /// The UTC time as seen in the record's zone, with offset attached.
    pub fn offset_aware(&self, db: &impl TimezoneDatabase) -> Result<Option<DateTime<Tz>>> {
        let tz = self.timezone(db)?;
        Ok(self
            .utc
            .as_ref()
            .map(|utc| converter::local_offset_aware(utc, &tz)))
    }
}

/// A host value that owns a [`TemporalRecord`].
///
/// `attribute` backs [`DefaultTimezone::Attribute`](crate::DefaultTimezone::Attribute):
/// the default zone can live on another field of the owner.
pub trait TemporalOwner {
    fn temporal(&self) -> &TemporalRecord;

    fn temporal_mut(&mut self) -> &mut TemporalRecord;

    /// Look up a named attribute on the owner. Owners without dynamic
    /// attributes keep the default.
    fn attribute(&self, _name: &str) -> Option<AttributeValue> {
        None
    }
}

impl TemporalOwner for TemporalRecord {
    fn temporal(&self) -> &TemporalRecord {
        self
    }

    fn temporal_mut(&mut self) -> &mut TemporalRecord {
        self
    }
}
