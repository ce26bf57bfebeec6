//! # tzfield
//!
//! A datetime field stored three ways: the naive local wall-clock time, the
//! naive UTC time, and the IANA timezone name relating them.
//!
//! Owning code may edit any of the three. On commit the [`Synchronizer`]
//! decides which one moved since the last commit and recomputes the others,
//! so the stored local and UTC times always describe the same instant. Local
//! times falling in a DST transition are resolved by a fixed tie-break (see
//! [`dst`]).
//!
//! ## Quick start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use tzfield::{Synchronizer, SyncConfig, SyncDirection, TemporalRecord};
//!
//! let sync = Synchronizer::new(SyncConfig::default());
//! let mut record = TemporalRecord::load(None, None, "America/Chicago");
//!
//! let local = NaiveDate::from_ymd_opt(2026, 7, 4).unwrap().and_hms_opt(12, 0, 0).unwrap();
//! record.set_local(Some(local));
//!
//! let report = sync.before_commit(&mut record);
//! assert_eq!(report.direction, SyncDirection::LocalToUtc);
//! assert_eq!(record.utc().unwrap().to_string(), "2026-07-04 17:00:00");
//! sync.after_commit(&mut record);
//! ```
//!
//! ## Modules
//!
//! - [`converter`] — local ↔ UTC conversion for a resolved zone
//! - [`dst`] — fall-back / spring-forward tie-break
//! - [`timezone`] — zone name lookup
//! - [`record`] — the field triple and its snapshot
//! - [`default_tz`] — default zone sources for records stored without one
//! - [`sync`] — lifecycle entry points and the reconciliation policy
//! - [`config`] — process-wide settings
//! - [`error`] — Error types

pub mod config;
pub mod converter;
pub mod default_tz;
pub mod dst;
pub mod error;
pub mod record;
pub mod sync;
pub mod timezone;

pub use config::SyncConfig;
pub use converter::{to_local, to_utc};
pub use default_tz::{AttributeValue, DefaultTimezone};
pub use dst::LocalTimeKind;
pub use error::TzFieldError;
pub use record::{Snapshot, TemporalOwner, TemporalRecord};
pub use sync::{SyncDirection, SyncReport, Synchronizer};
pub use timezone::{ChronoTzDatabase, TimezoneDatabase};
