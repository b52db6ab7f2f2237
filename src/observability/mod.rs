//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! timeouts / plan / config produce:
//!     → tracing events (debug: resolution steps, warn: failed plans)
//!     → logging.rs (subscriber, stderr)
//! ```
//!
//! # Design Decisions
//! - The library only emits events; the binary installs the subscriber
//! - Log level from RUST_LOG, falling back to a caller-supplied directive

pub mod logging;

pub use logging::init_logging;
