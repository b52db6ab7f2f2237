//! Per-operation timeout resolution and transport.
//!
//! # Data Flow
//! ```text
//! Planning:
//!     Resource schema (shared TimeoutSet, read-only)
//!     + user `timeout` blocks
//!     → resolver.rs (copy schema, whitelist keys, parse durations)
//!     → TimeoutSet (owned, per instance)
//!     → codec.rs (encode with default backfill)
//!     → InstanceDiff.meta[TIMEOUT_KEY]
//!
//! Execution:
//!     InstanceDiff.meta[TIMEOUT_KEY] is read directly by the executor
//! ```
//!
//! # Design Decisions
//! - The schema TimeoutSet doubles as a capability map: a present field means
//!   the operation accepts a configurable timeout
//! - Resolution never touches the schema value; it works on an owned copy
//! - `default` is recorded as given by the user; it only fans out to the
//!   lifecycle operations at encode time
//! - Decoding is intentionally inert

pub mod codec;
pub mod resolver;
pub mod types;

pub use resolver::TimeoutBlock;
pub use types::{
    default_timeout, Operation, TimeoutError, TimeoutResult, TimeoutSet, TIMEOUT_BLOCK,
    TIMEOUT_KEY,
};
