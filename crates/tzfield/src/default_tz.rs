//! Where a record's timezone comes from when none was stored.

use std::fmt;
use std::sync::Arc;

use crate::config::SyncConfig;
use crate::error::TzFieldError;
use crate::record::TemporalOwner;

/// Zero-argument function yielding a zone name.
pub type TimezoneProvider = Arc<dyn Fn() -> Option<String> + Send + Sync>;

/// A value read off the owning record for [`DefaultTimezone::Attribute`].
#[derive(Clone)]
pub enum AttributeValue {
    /// Used directly as the zone name.
    Text(String),
    /// Called to obtain the zone name.
    Provider(TimezoneProvider),
    /// Anything else; not usable as a default.
    Other(String),
}

impl fmt::Debug for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Text(s) => f.debug_tuple("Text").field(s).finish(),
            AttributeValue::Provider(_) => f.write_str("Provider(..)"),
            AttributeValue::Other(s) => f.debug_tuple("Other").field(s).finish(),
        }
    }
}

/// Default zone for records stored without one.
#[derive(Clone, Default)]
pub enum DefaultTimezone {
    /// A fixed zone name.
    Literal(String),
    /// Name of an attribute on the owning record holding the zone (or a
    /// provider for it).
    Attribute(String),
    /// Called at each commit that needs a default.
    Provider(TimezoneProvider),
    /// The configured default from [`SyncConfig`].
    #[default]
    Fallback,
}

impl fmt::Debug for DefaultTimezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultTimezone::Literal(s) => f.debug_tuple("Literal").field(s).finish(),
            DefaultTimezone::Attribute(s) => f.debug_tuple("Attribute").field(s).finish(),
            DefaultTimezone::Provider(_) => f.write_str("Provider(..)"),
            DefaultTimezone::Fallback => f.write_str("Fallback"),
        }
    }
}

impl DefaultTimezone {
    pub fn provider<F>(f: F) -> Self
    where
        F: Fn() -> Option<String> + Send + Sync + 'static,
    {
        DefaultTimezone::Provider(Arc::new(f))
    }

    /// Produce a zone name for `owner`.
    ///
    /// A source that yields nothing usable falls back to the configured
    /// default; the failure is returned alongside so the caller can warn.
    /// The returned name is not validated against a database.
    pub fn resolve<O>(&self, owner: &O, config: &SyncConfig) -> (String, Option<TzFieldError>)
    where
        O: TemporalOwner + ?Sized,
    {
        let candidate = match self {
            DefaultTimezone::Fallback => return (config.default_timezone().to_string(), None),
            DefaultTimezone::Literal(name) => Ok(Some(name.clone())),
            DefaultTimezone::Provider(provider) => Ok(provider()),
            DefaultTimezone::Attribute(attr) => match owner.attribute(attr) {
                Some(AttributeValue::Text(name)) => Ok(Some(name)),
                Some(AttributeValue::Provider(provider)) => Ok(provider()),
                Some(AttributeValue::Other(repr)) => Err(TzFieldError::InvalidDefaultProvider(
                    format!("attribute '{}' holds {}", attr, repr),
                )),
                None => Err(TzFieldError::InvalidDefaultProvider(format!(
                    "owner has no attribute '{}'",
                    attr
                ))),
            },
        };

        match candidate {
            Ok(Some(name)) if !name.trim().is_empty() => (name, None),
            Ok(_) => (
                config.default_timezone().to_string(),
                Some(TzFieldError::InvalidDefaultProvider(format!(
                    "{:?} yielded no timezone",
                    self
                ))),
            ),
            Err(e) => (config.default_timezone().to_string(), Some(e)),
        }
    }
}
