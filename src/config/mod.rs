//! Plan document loading.
//!
//! # Data Flow
//! ```text
//! plan file (TOML)
//!     → loader.rs (read & deserialize)
//!     → validation.rs (semantic checks)
//!     → PlanDocument (validated)
//!     → Planner + per-instance ResourceConfig
//! ```
//!
//! # Design Decisions
//! - Resource types declare timeouts as human-readable durations
//! - Instance attributes other than `name` and `type` are kept raw
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_config_str, ConfigError};
pub use schema::{InstanceConfig, PlanDocument};
pub use validation::{validate_config, ValidationError};
