//! Merging schema defaults with user overrides.
//!
//! # Responsibilities
//! - Copy the schema-declared TimeoutSet into an owned result
//! - Whitelist override keys against the five recognized names
//! - Reject overrides for operations the schema did not opt in to
//! - Parse human-readable durations ("10m", "1h30m", "500ms")
//!
//! # Design Decisions
//! - First error aborts the whole resolution; no partial result escapes
//! - Capability checks consult the schema, never the in-progress result
//! - `default` is always accepted

use std::fmt;
use std::time::Duration;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::plan::{Resource, ResourceConfig};
use crate::timeouts::types::{fits_nanos, Operation, TimeoutError, TimeoutResult, TimeoutSet};

/// One user `timeout` block: raw key/value pairs in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeoutBlock {
    entries: Vec<(String, String)>,
}

impl TimeoutBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push((key.into(), value.into()));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for TimeoutBlock
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl<'de> Deserialize<'de> for TimeoutBlock {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct BlockVisitor;

        impl<'de> Visitor<'de> for BlockVisitor {
            type Value = TimeoutBlock;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a table of operation names to duration strings")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut block = TimeoutBlock::new();
                while let Some((key, value)) = map.next_entry::<String, String>()? {
                    block.insert(key, value);
                }
                Ok(block)
            }
        }

        deserializer.deserialize_map(BlockVisitor)
    }
}

impl TimeoutSet {
    /// Resolve the effective timeouts for one resource instance.
    ///
    /// `schema` is the resource type's declared set, or `None` when the type
    /// supports no timeouts. Blocks are applied in order; later values
    /// overwrite earlier ones. The schema value is only read.
    pub fn resolve(schema: Option<&TimeoutSet>, blocks: &[TimeoutBlock]) -> TimeoutResult<Self> {
        let capabilities = schema.cloned().unwrap_or_default();
        capabilities.check_range()?;
        let mut resolved = capabilities.clone();

        tracing::debug!(schema = ?schema, blocks = blocks.len(), "Resolving timeouts");

        for block in blocks {
            for (key, value) in block.iter() {
                let op: Operation = key.parse()?;

                if op != Operation::Default && capabilities.get(op).is_none() {
                    return Err(TimeoutError::Unsupported(op));
                }

                let timeout = parse_timeout(op, value)?;
                tracing::debug!(operation = %op, timeout = value, "Overriding timeout");
                resolved.set(op, timeout);
            }
        }

        Ok(resolved)
    }

    /// Resolve `config`'s timeout blocks against `resource`'s schema into `self`.
    ///
    /// On error `self` is left untouched.
    pub fn config_decode(&mut self, resource: &Resource, config: &ResourceConfig) -> TimeoutResult<()> {
        *self = Self::resolve(resource.timeouts.as_ref(), config.timeout_blocks())?;
        Ok(())
    }
}

fn parse_timeout(op: Operation, value: &str) -> TimeoutResult<Duration> {
    let timeout = humantime::parse_duration(value)
        .map_err(|source| TimeoutError::Parse { key: op, source })?;

    // Encoded as signed nanoseconds downstream.
    if !fits_nanos(timeout) {
        return Err(TimeoutError::OutOfRange { key: op });
    }

    Ok(timeout)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(pairs: &[(&str, &str)]) -> TimeoutBlock {
        pairs.iter().copied().collect()
    }

    fn mins(m: u64) -> Duration {
        Duration::from_secs(m * 60)
    }

    #[test]
    fn test_override_supported_operation() {
        let schema = TimeoutSet {
            delete: Some(mins(5)),
            ..TimeoutSet::default()
        };

        let t = TimeoutSet::resolve(Some(&schema), &[block(&[("delete", "10m")])]).unwrap();
        assert_eq!(
            t,
            TimeoutSet {
                delete: Some(mins(10)),
                ..TimeoutSet::default()
            }
        );
    }

    #[test]
    fn test_schema_defaults_without_overrides() {
        let schema = TimeoutSet::default()
            .with(Operation::Create, mins(20))
            .with(Operation::Read, Duration::ZERO);

        let t = TimeoutSet::resolve(Some(&schema), &[]).unwrap();
        assert_eq!(t, schema);
    }

    #[test]
    fn test_unsupported_operation() {
        let schema = TimeoutSet {
            delete: Some(mins(5)),
            ..TimeoutSet::default()
        };

        let err = TimeoutSet::resolve(Some(&schema), &[block(&[("create", "1h")])]).unwrap_err();
        assert!(matches!(err, TimeoutError::Unsupported(Operation::Create)));

        let err = TimeoutSet::resolve(None, &[block(&[("delete", "1h")])]).unwrap_err();
        assert!(matches!(err, TimeoutError::Unsupported(Operation::Delete)));
    }

    #[test]
    fn test_unsupported_key() {
        let everything = Operation::ALL
            .into_iter()
            .fold(TimeoutSet::default(), |t, op| t.with(op, mins(1)));

        for schema in [None, Some(&everything)] {
            let err = TimeoutSet::resolve(schema, &[block(&[("foo", "1h")])]).unwrap_err();
            assert!(matches!(err, TimeoutError::UnsupportedKey(ref k) if k == "foo"));
        }
    }

    #[test]
    fn test_parse_failure() {
        let schema = TimeoutSet::default().with(Operation::Delete, mins(5));

        let err = TimeoutSet::resolve(Some(&schema), &[block(&[("delete", "banana")])]).unwrap_err();
        assert!(matches!(err, TimeoutError::Parse { key: Operation::Delete, .. }));
        assert!(err.is_parse_failure());
        assert!(err.to_string().starts_with("error parsing timeout for (delete)"));
    }

    #[test]
    fn test_out_of_range() {
        let schema = TimeoutSet::default().with(Operation::Read, mins(5));

        let err = TimeoutSet::resolve(Some(&schema), &[block(&[("read", "1000years")])]).unwrap_err();
        assert!(matches!(err, TimeoutError::OutOfRange { key: Operation::Read }));
    }

    #[test]
    fn test_oversized_schema_default_rejected() {
        let schema = TimeoutSet::default()
            .with(Operation::Create, mins(5))
            .with(Operation::Delete, Duration::from_secs(u64::MAX));

        let err = TimeoutSet::resolve(Some(&schema), &[]).unwrap_err();
        assert!(matches!(err, TimeoutError::OutOfRange { key: Operation::Delete }));

        // Still rejected when the user overrides a different operation.
        let err = TimeoutSet::resolve(Some(&schema), &[block(&[("create", "1m")])]).unwrap_err();
        assert!(err.is_parse_failure());
    }

    #[test]
    fn test_default_always_permitted() {
        let t = TimeoutSet::resolve(None, &[block(&[("default", "45s")])]).unwrap();
        assert_eq!(t.default, Some(Duration::from_secs(45)));
        assert!(t.create.is_none());
        assert!(t.delete.is_none());
    }

    #[test]
    fn test_blocks_accumulate_in_order() {
        let schema = TimeoutSet::default()
            .with(Operation::Create, mins(5))
            .with(Operation::Update, mins(5));

        let blocks = [
            block(&[("create", "10m"), ("update", "1h30m")]),
            block(&[("create", "2h")]),
        ];
        let t = TimeoutSet::resolve(Some(&schema), &blocks).unwrap();
        assert_eq!(t.create, Some(mins(120)));
        assert_eq!(t.update, Some(mins(90)));
    }

    #[test]
    fn test_error_in_later_block_aborts() {
        let schema = TimeoutSet::default().with(Operation::Create, mins(5));

        let blocks = [block(&[("create", "10m")]), block(&[("bogus", "1m"), ("create", "nope")])];
        let err = TimeoutSet::resolve(Some(&schema), &blocks).unwrap_err();
        assert!(matches!(err, TimeoutError::UnsupportedKey(_)));
    }

    #[test]
    fn test_schema_not_mutated() {
        let schema = TimeoutSet::default()
            .with(Operation::Create, mins(5))
            .with(Operation::Delete, mins(5));
        let before = schema.clone();

        let t = TimeoutSet::resolve(
            Some(&schema),
            &[block(&[("create", "1h"), ("delete", "2h"), ("default", "3h")])],
        )
        .unwrap();

        assert_ne!(t, before);
        assert_eq!(schema.create, before.create);
        assert_eq!(schema.read, before.read);
        assert_eq!(schema.update, before.update);
        assert_eq!(schema.delete, before.delete);
        assert_eq!(schema.default, before.default);
    }

    #[test]
    fn test_block_keeps_document_order() {
        let b: TimeoutBlock = toml::from_str("update = \"1m\"\ncreate = \"2m\"\ndefault = \"3m\"").unwrap();
        let keys: Vec<&str> = b.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["update", "create", "default"]);
        assert_eq!(b.len(), 3);
    }

    #[test]
    fn test_block_rejects_non_string_values() {
        assert!(toml::from_str::<TimeoutBlock>("create = 10").is_err());
    }
}
