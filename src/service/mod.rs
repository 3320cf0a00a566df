//! The diagnostics service.
//!
//! # Data Flow
//! ```text
//! DiagnosticsBuilder (backend, metadata, sink, config)
//!     → Diagnostics (built once, shared via Arc)
//!         ├── DebugFlagResolver ◀── Logger
//!         ├── OwnerIdResolver
//!         └── Logger → LogSink
//! ```
//!
//! # Design Decisions
//! - One explicit service object instead of process-wide statics
//! - Config reloads only touch logger settings; resolved values are never reset

pub mod diagnostics;
pub mod module_info;

pub use diagnostics::{Diagnostics, DiagnosticsBuilder, DiagnosticsSnapshot};
pub use module_info::{module_info, ModuleInfo};
