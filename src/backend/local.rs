//! In-process backend.
//!
//! # Responsibilities
//! - Hold the debug preference for hosts that run the store in-process
//! - Report readiness once the host marks it ready
//! - Count queries so callers can observe how often it was contacted

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::backend::BackendQuery;

/// Backend backed by two atomic flags.
#[derive(Debug, Default)]
pub struct LocalBackend {
    ready: AtomicBool,
    debug_enabled: AtomicBool,
    queries: AtomicUsize,
}

impl LocalBackend {
    /// Create a backend that is not ready and has debug off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend that is already ready with the given preference.
    pub fn ready_with(debug_enabled: bool) -> Self {
        let backend = Self::new();
        backend.set_debug_enabled(debug_enabled);
        backend.mark_ready();
        backend
    }

    /// Mark the service as initialized.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Update the stored debug preference.
    pub fn set_debug_enabled(&self, enabled: bool) {
        self.debug_enabled.store(enabled, Ordering::Release);
    }

    /// Number of readiness checks served so far.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::Relaxed)
    }
}

impl BackendQuery for LocalBackend {
    fn is_service_ready(&self) -> bool {
        self.queries.fetch_add(1, Ordering::Relaxed);
        self.ready.load(Ordering::Acquire)
    }

    fn is_debug_enabled(&self) -> bool {
        self.debug_enabled.load(Ordering::Acquire)
    }
}
