//! Backend service boundary.
//!
//! # Data Flow
//! ```text
//! DebugFlagResolver
//!     → BackendProvider::instance(create_if_missing)
//!     → Option<Arc<dyn BackendQuery>>
//!     → is_service_ready() / is_debug_enabled()
//! ```
//!
//! # Design Decisions
//! - The backend owns the debug preference; this crate only reads it
//! - An absent instance is indistinguishable from "not ready"
//! - Providers are cheap to call repeatedly; resolution retries until ready

pub mod local;
pub mod query;

pub use local::LocalBackend;
pub use query::{BackendProvider, BackendQuery, Unavailable};
