//! Planning-stage collaborators of the timeout core.
//!
//! # Data Flow
//! ```text
//! Resource (schema, shared)      ResourceConfig (user input)
//!          \                      /
//!           → planner.rs (resolve + encode per instance)
//!           → InstanceDiff (meta carries encoded timeouts to apply)
//! ```
//!
//! # Design Decisions
//! - Only the shapes the timeout core touches are modelled here
//! - A failing instance does not abort planning of its siblings

pub mod diff;
pub mod planner;
pub mod resource;

pub use diff::InstanceDiff;
pub use planner::{PlanError, Planner};
pub use resource::{Resource, ResourceConfig};
