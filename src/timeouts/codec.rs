//! Carrying resolved timeouts from plan to apply.
//!
//! Encoded form is a flat table of operation name to nanoseconds, stored in
//! the diff metadata under [`TIMEOUT_KEY`]. When `default` is present, every
//! lifecycle operation without its own entry receives the default's value.

use std::collections::BTreeMap;
use std::time::Duration;

use serde_json::Value;

use crate::plan::InstanceDiff;
use crate::timeouts::types::{Operation, TimeoutSet, TIMEOUT_KEY};

impl TimeoutSet {
    /// Encode into `operation -> nanoseconds`, backfilling from `default`.
    ///
    /// Does not modify `self`.
    pub fn encode(&self) -> BTreeMap<String, i64> {
        let mut encoded = BTreeMap::new();

        for op in Operation::ALL {
            if let Some(timeout) = self.get(op) {
                encoded.insert(op.as_str().to_string(), nanos(timeout));
            }
        }

        if let Some(default) = self.default {
            for op in Operation::LIFECYCLE {
                encoded
                    .entry(op.as_str().to_string())
                    .or_insert_with(|| nanos(default));
            }
        }

        encoded
    }

    /// Attach the encoded timeouts to `diff`'s metadata.
    ///
    /// Nothing is written when no timeout is present.
    pub fn meta_encode(&self, diff: &mut InstanceDiff) {
        let encoded = self.encode();
        if encoded.is_empty() {
            return;
        }

        tracing::trace!(entries = encoded.len(), "Attaching timeouts to diff");

        let value = Value::Object(
            encoded
                .into_iter()
                .map(|(op, ns)| (op, Value::from(ns)))
                .collect(),
        );
        diff.meta
            .get_or_insert_with(BTreeMap::new)
            .insert(TIMEOUT_KEY.to_string(), value);
    }

    /// Counterpart of [`meta_encode`](Self::meta_encode). Does nothing.
    ///
    /// Executors read the encoded table from `diff.meta[TIMEOUT_KEY]` directly.
    pub fn meta_decode(&mut self, _diff: &InstanceDiff) {}
}

// Values produced by `resolve` always fit; anything larger saturates.
fn nanos(d: Duration) -> i64 {
    i64::try_from(d.as_nanos()).unwrap_or(i64::MAX)
}
