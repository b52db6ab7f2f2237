//! Plan document schema definitions.
//!
//! ```toml
//! [resources.disk.timeouts]
//! create = "10m"
//! delete = "5m"
//!
//! [[instances]]
//! name = "data"
//! type = "disk"
//!
//! [[instances.timeout]]
//! delete = "20m"
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::plan::{Planner, Resource, ResourceConfig};

/// Root of a plan document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlanDocument {
    /// Resource type definitions keyed by type name.
    pub resources: BTreeMap<String, Resource>,

    /// Resource instances to plan, in document order.
    pub instances: Vec<InstanceConfig>,
}

impl PlanDocument {
    /// Planner over this document's resource types.
    pub fn planner(&self) -> Planner {
        Planner::new(self.resources.clone())
    }
}

/// One declared resource instance.
#[derive(Debug, Clone, Deserialize)]
pub struct InstanceConfig {
    /// Instance identifier, unique within the document.
    pub name: String,

    /// Resource type name, a key of [`PlanDocument::resources`].
    #[serde(rename = "type")]
    pub resource_type: String,

    /// Remaining attributes, including `timeout` blocks.
    #[serde(flatten)]
    pub attributes: toml::Table,
}

impl InstanceConfig {
    pub fn resource_config(&self) -> Result<ResourceConfig, toml::de::Error> {
        ResourceConfig::from_raw(self.attributes.clone())
    }
}
