//! Leveled logging with a debug downgrade policy.
//!
//! # Data Flow
//! ```text
//! Logger::log(level, tag, message[, cause])
//!     → level == DEBUG? consult DebugFlagResolver
//!         enabled          → DEBUG
//!         backend pending  → INFO (downgrade)
//!         disabled         → DisabledDebugPolicy (suppress or downgrade)
//!     → LogSink::write(record)
//! ```
//!
//! # Design Decisions
//! - Only DEBUG records ever touch the resolver
//! - Logging never fails from the caller's point of view
//! - The sink is the host's concern; TracingSink is the default

pub mod level;
pub mod logger;
pub mod sink;

pub use level::{Level, ParseLevelError};
pub use logger::Logger;
pub use sink::{LogRecord, LogSink, MemorySink, TracingSink};
