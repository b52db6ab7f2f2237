//! Timeout data model and error definitions.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reserved key under which encoded timeouts are stored in a diff's metadata.
///
/// Part of the wire contract between planning and execution. Never change it.
pub const TIMEOUT_KEY: &str = "e2bfb730-ecaa-11e6-8f88-34363bc7c4c0";

/// Name of the configuration sub-block carrying user timeout overrides.
pub const TIMEOUT_BLOCK: &str = "timeout";

/// Wrap a duration as a schema-declared default.
///
/// ```
/// use std::time::Duration;
/// use resource_timeouts::timeouts::{default_timeout, TimeoutSet};
///
/// let schema = TimeoutSet {
///     delete: default_timeout(Duration::from_secs(300)),
///     ..TimeoutSet::default()
/// };
/// assert!(schema.delete.is_some());
/// ```
pub const fn default_timeout(d: Duration) -> Option<Duration> {
    Some(d)
}

/// Whether `d` is representable as a signed 64-bit nanosecond count.
pub(crate) fn fits_nanos(d: Duration) -> bool {
    i64::try_from(d.as_nanos()).is_ok()
}

/// A timeout-carrying slot of a [`TimeoutSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
    /// Catch-all applied to lifecycle operations without their own value.
    Default,
}

impl Operation {
    /// Every recognized key.
    pub const ALL: [Operation; 5] = [
        Operation::Create,
        Operation::Read,
        Operation::Update,
        Operation::Delete,
        Operation::Default,
    ];

    /// Lifecycle operations, in the order `default` is fanned out to them.
    pub const LIFECYCLE: [Operation; 4] = [
        Operation::Create,
        Operation::Update,
        Operation::Read,
        Operation::Delete,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Read => "read",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::Default => "default",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = TimeoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| TimeoutError::UnsupportedKey(s.to_string()))
    }
}

/// Optional timeout per lifecycle operation plus a catch-all default.
///
/// Declared once per resource type, where a present field marks the
/// operation as supporting a configurable timeout. Resolved fresh per
/// instance on every planning pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TimeoutSet {
    #[serde(default, skip_serializing_if = "Option::is_none", with = "humantime_option")]
    pub create: Option<Duration>,

    #[serde(default, skip_serializing_if = "Option::is_none", with = "humantime_option")]
    pub read: Option<Duration>,

    #[serde(default, skip_serializing_if = "Option::is_none", with = "humantime_option")]
    pub update: Option<Duration>,

    #[serde(default, skip_serializing_if = "Option::is_none", with = "humantime_option")]
    pub delete: Option<Duration>,

    #[serde(default, skip_serializing_if = "Option::is_none", with = "humantime_option")]
    pub default: Option<Duration>,
}

impl TimeoutSet {
    pub fn get(&self, op: Operation) -> Option<Duration> {
        match op {
            Operation::Create => self.create,
            Operation::Read => self.read,
            Operation::Update => self.update,
            Operation::Delete => self.delete,
            Operation::Default => self.default,
        }
    }

    pub fn set(&mut self, op: Operation, value: Duration) {
        let slot = match op {
            Operation::Create => &mut self.create,
            Operation::Read => &mut self.read,
            Operation::Update => &mut self.update,
            Operation::Delete => &mut self.delete,
            Operation::Default => &mut self.default,
        };
        *slot = Some(value);
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, op: Operation, value: Duration) -> Self {
        self.set(op, value);
        self
    }

    /// True when no field is present.
    pub fn is_empty(&self) -> bool {
        Operation::ALL.iter().all(|op| self.get(*op).is_none())
    }

    /// Reject any present field too large to encode.
    pub fn check_range(&self) -> TimeoutResult<()> {
        match Operation::ALL
            .into_iter()
            .find(|op| self.get(*op).is_some_and(|d| !fits_nanos(d)))
        {
            Some(key) => Err(TimeoutError::OutOfRange { key }),
            None => Ok(()),
        }
    }
}

/// Errors produced while resolving user timeout overrides.
#[derive(Debug, Error)]
pub enum TimeoutError {
    /// Key is not one of the recognized operation names.
    #[error("unsupported timeout key found ({0})")]
    UnsupportedKey(String),

    /// Resource type did not opt in to a timeout for this operation.
    #[error("timeout ({0}) is not supported")]
    Unsupported(Operation),

    /// Value is not a valid duration string.
    #[error("error parsing timeout for ({key}): {source}")]
    Parse {
        key: Operation,
        #[source]
        source: humantime::DurationError,
    },

    /// Duration does not fit in a signed 64-bit nanosecond count.
    #[error("timeout for ({key}) is out of range")]
    OutOfRange { key: Operation },
}

impl TimeoutError {
    /// Whether the error came from a malformed or unrepresentable value.
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, TimeoutError::Parse { .. } | TimeoutError::OutOfRange { .. })
    }
}

/// Result type for timeout resolution.
pub type TimeoutResult<T> = Result<T, TimeoutError>;

/// Serde adapter for `Option<Duration>` as human-readable strings ("10m").
mod humantime_option {
    use std::time::Duration;

    use super::fits_nanos;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(d) => serializer.serialize_some(&humantime::format_duration(*d).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(s) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };
        let d = humantime::parse_duration(&s).map_err(D::Error::custom)?;
        if !fits_nanos(d) {
            return Err(D::Error::custom(format!("duration {s} is out of range")));
        }
        Ok(Some(d))
    }
}
