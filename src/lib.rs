//! Host diagnostics: leveled logging gated by a lazily resolved debug flag,
//! and owner-user detection from process metadata.

pub mod backend;
pub mod config;
pub mod logging;
pub mod observability;
pub mod resolver;
pub mod service;

pub use config::DiagnosticsConfig;
pub use logging::{Level, Logger};
pub use service::{module_info, Diagnostics};
