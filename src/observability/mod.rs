//! Observability of the diagnostics layer itself.
//!
//! # Data Flow
//! ```text
//! resolver/, logging/ produce:
//!     → logging.rs (tracing subscriber for the crate's own events)
//!     → metrics.rs (counters)
//! ```
//!
//! # Design Decisions
//! - The crate's own events go to `tracing`, never back through `Logger`,
//!   so resolving the debug flag cannot recurse into itself
//! - Metrics are cheap (atomic increments)

pub mod logging;
pub mod metrics;
