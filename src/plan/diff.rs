//! Instance diff as handed from plan to apply.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Planning output for one resource instance.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct InstanceDiff {
    /// Auxiliary data for the apply stage, keyed by reserved identifiers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<BTreeMap<String, Value>>,
}

impl InstanceDiff {
    pub fn new() -> Self {
        Self::default()
    }

    /// Metadata bag, created on first use.
    pub fn meta_mut(&mut self) -> &mut BTreeMap<String, Value> {
        self.meta.get_or_insert_with(BTreeMap::new)
    }

    pub fn meta_value(&self, key: &str) -> Option<&Value> {
        self.meta.as_ref()?.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_lazily_created() {
        let mut diff = InstanceDiff::new();
        assert!(diff.meta.is_none());
        assert!(diff.meta_value("k").is_none());

        diff.meta_mut().insert("k".into(), Value::from("v"));
        assert_eq!(diff.meta_value("k"), Some(&Value::from("v")));
    }

    #[test]
    fn test_empty_meta_not_serialized() {
        let json = serde_json::to_string(&InstanceDiff::new()).unwrap();
        assert_eq!(json, "{}");
    }
}
