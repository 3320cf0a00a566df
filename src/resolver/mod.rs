//! Lazy, memoized resolvers.
//!
//! # Data Flow
//! ```text
//! debug_flag.rs:
//!     Unknown ──CAS──▶ Resolving ──backend ready──▶ Enabled | Disabled
//!                          │
//!                          └──not ready / absent──▶ Unknown (retry next call)
//!
//! owner.rs:
//!     metadata.rs (data dir) → parent segment → user id → cached forever
//! ```
//!
//! # Design Decisions
//! - Both caches are single atomics; no lock is ever held across a call out
//! - Concurrent callers during resolution get the conservative answer instead of waiting
//! - Only definitive answers are cached; "not ready yet" and I/O failures are retried

pub mod debug_flag;
pub mod metadata;
pub mod owner;

pub use debug_flag::{DebugFlagResolver, DebugFlagState};
pub use metadata::{FixedDataDir, MetadataError, NoDataDir, ProcessMetadata};
pub use owner::OwnerIdResolver;
