//! Per-operation timeout resolution for managed resources.
//!
//! Resource types declare which lifecycle operations accept a configurable
//! timeout; instances override them in a `timeout` block. The resolved
//! values travel from plan to apply inside the instance diff's metadata.

pub mod config;
pub mod observability;
pub mod plan;
pub mod timeouts;

pub use config::PlanDocument;
pub use plan::{InstanceDiff, Planner, Resource, ResourceConfig};
pub use timeouts::{Operation, TimeoutError, TimeoutSet, TIMEOUT_KEY};
