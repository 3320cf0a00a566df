//! Traits describing the backend service as seen from diagnostics.

use std::sync::Arc;

/// Read-only view of the backend service that owns the debug preference.
pub trait BackendQuery: Send + Sync {
    /// Whether the service finished initializing and can answer queries.
    fn is_service_ready(&self) -> bool;

    /// The stored debug preference. Only meaningful once the service is ready.
    fn is_debug_enabled(&self) -> bool;
}

/// Hands out the backend instance, if one exists yet.
pub trait BackendProvider: Send + Sync {
    /// Get the backend instance, asking the host to create it when
    /// `create_if_missing` is set. `None` means the backend is unavailable.
    fn instance(&self, create_if_missing: bool) -> Option<Arc<dyn BackendQuery>>;
}

impl<B> BackendProvider for Arc<B>
where
    B: BackendQuery + 'static,
{
    fn instance(&self, _create_if_missing: bool) -> Option<Arc<dyn BackendQuery>> {
        Some(self.clone() as Arc<dyn BackendQuery>)
    }
}

/// Provider for hosts where the backend never comes up.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unavailable;

impl BackendProvider for Unavailable {
    fn instance(&self, _create_if_missing: bool) -> Option<Arc<dyn BackendQuery>> {
        None
    }
}
