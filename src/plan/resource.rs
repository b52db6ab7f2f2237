//! Resource schema and raw user configuration.

use serde::{Deserialize, Serialize};

use crate::timeouts::{TimeoutBlock, TimeoutSet, TIMEOUT_BLOCK};

/// Resource type definition, as far as timeouts are concerned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Resource {
    /// Operations supporting a configurable timeout, with their defaults.
    /// `None` when the type supports none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeouts: Option<TimeoutSet>,
}

impl Resource {
    pub fn new(timeouts: Option<TimeoutSet>) -> Self {
        Self { timeouts }
    }
}

/// User configuration for one resource instance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceConfig {
    raw: toml::Table,
    timeout_blocks: Vec<TimeoutBlock>,
}

impl ResourceConfig {
    /// Build from already-extracted timeout blocks.
    pub fn new(timeout_blocks: Vec<TimeoutBlock>) -> Self {
        Self {
            raw: toml::Table::new(),
            timeout_blocks,
        }
    }

    /// Build from raw attributes, extracting the `timeout` blocks.
    ///
    /// The blocks must be an array of tables with string values.
    pub fn from_raw(raw: toml::Table) -> Result<Self, toml::de::Error> {
        let timeout_blocks = match raw.get(TIMEOUT_BLOCK) {
            Some(value) => Vec::<TimeoutBlock>::deserialize(value.clone())?,
            None => Vec::new(),
        };
        Ok(Self { raw, timeout_blocks })
    }

    pub fn raw(&self) -> &toml::Table {
        &self.raw
    }

    pub fn timeout_blocks(&self) -> &[TimeoutBlock] {
        &self.timeout_blocks
    }
}
