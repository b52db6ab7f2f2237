//! Per-instance planning: resolve timeouts and attach them to the diff.

use std::collections::BTreeMap;
use std::sync::Arc;

use thiserror::Error;

use crate::plan::{InstanceDiff, Resource, ResourceConfig};
use crate::timeouts::{TimeoutError, TimeoutSet};

/// Errors that fail the plan of a single instance.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("unknown resource type: {0}")]
    UnknownResourceType(String),

    #[error(transparent)]
    Timeout(#[from] TimeoutError),
}

/// Plans instances against a fixed set of resource type definitions.
///
/// Resource definitions are shared read-only between all plans.
#[derive(Debug, Clone, Default)]
pub struct Planner {
    resources: Arc<BTreeMap<String, Resource>>,
}

impl Planner {
    pub fn new(resources: BTreeMap<String, Resource>) -> Self {
        Self {
            resources: Arc::new(resources),
        }
    }

    pub fn resource(&self, resource_type: &str) -> Option<&Resource> {
        self.resources.get(resource_type)
    }

    /// Produce the diff for one instance of `resource_type`.
    pub fn plan(&self, resource_type: &str, config: &ResourceConfig) -> Result<InstanceDiff, PlanError> {
        let resource = self
            .resource(resource_type)
            .ok_or_else(|| PlanError::UnknownResourceType(resource_type.to_string()))?;

        let mut timeouts = TimeoutSet::default();
        timeouts.config_decode(resource, config)?;

        let mut diff = InstanceDiff::new();
        timeouts.meta_encode(&mut diff);

        tracing::debug!(
            resource_type,
            timeouts_attached = diff.meta.is_some(),
            "Planned instance"
        );

        Ok(diff)
    }

    /// Plan several instances, keeping their order. Failures are reported
    /// per instance.
    pub fn plan_all<'a, I>(&self, instances: I) -> Vec<(String, Result<InstanceDiff, PlanError>)>
    where
        I: IntoIterator<Item = (&'a str, &'a str, &'a ResourceConfig)>,
    {
        instances
            .into_iter()
            .map(|(name, resource_type, config)| {
                let result = self.plan(resource_type, config);
                if let Err(e) = &result {
                    tracing::warn!(instance = name, error = %e, "Plan failed");
                }
                (name.to_string(), result)
            })
            .collect()
    }
}
