//! Debug-enabled flag resolution.
//!
//! # States
//! - Unknown: never resolved, or the backend was not ready last time
//! - Resolving: one caller is talking to the backend right now
//! - Enabled: backend said yes; permanent
//! - Disabled: backend said no; permanent
//!
//! # State Transitions
//! ```text
//! Unknown → Resolving: compare-and-set by exactly one caller
//! Resolving → Enabled | Disabled: backend ready, preference read
//! Resolving → Unknown: backend absent, not ready, or the query panicked
//! ```
//!
//! Reentrant calls made by the backend while it is being queried observe
//! `Resolving` and return `false` without recursing.

use std::sync::atomic::{AtomicU8, Ordering};

use serde::Serialize;

use crate::backend::BackendProvider;
use crate::observability::metrics;

/// Cached debug flag state.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DebugFlagState {
    Unknown = 0,
    Resolving = 1,
    Enabled = 2,
    Disabled = 3,
}

impl From<u8> for DebugFlagState {
    fn from(val: u8) -> Self {
        match val {
            1 => DebugFlagState::Resolving,
            2 => DebugFlagState::Enabled,
            3 => DebugFlagState::Disabled,
            _ => DebugFlagState::Unknown,
        }
    }
}

impl DebugFlagState {
    /// True once the backend has given a definitive answer.
    pub fn is_settled(self) -> bool {
        matches!(self, DebugFlagState::Enabled | DebugFlagState::Disabled)
    }
}

/// Memoizes the backend's debug preference.
pub struct DebugFlagResolver {
    provider: Box<dyn BackendProvider>,
    state: AtomicU8,
}

impl std::fmt::Debug for DebugFlagResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DebugFlagResolver")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl DebugFlagResolver {
    /// Create a resolver in the `Unknown` state.
    pub fn new(provider: impl BackendProvider + 'static) -> Self {
        Self::from_boxed(Box::new(provider))
    }

    pub fn from_boxed(provider: Box<dyn BackendProvider>) -> Self {
        Self {
            provider,
            state: AtomicU8::new(DebugFlagState::Unknown as u8),
        }
    }

    /// Current cached state, without resolving.
    pub fn state(&self) -> DebugFlagState {
        self.state.load(Ordering::Acquire).into()
    }

    /// Whether debug output is enabled, resolving against the backend if needed.
    pub fn is_enabled(&self) -> bool {
        match self.state() {
            DebugFlagState::Enabled => return true,
            DebugFlagState::Disabled | DebugFlagState::Resolving => return false,
            DebugFlagState::Unknown => {}
        }

        let Some(guard) = ResolvingGuard::acquire(&self.state) else {
            // Another caller won the race; report whatever it has settled on so far.
            return self.state() == DebugFlagState::Enabled;
        };

        let resolved = self.query_backend();
        guard.finish(resolved);
        resolved == DebugFlagState::Enabled
    }

    fn query_backend(&self) -> DebugFlagState {
        metrics::record_backend_query();

        let Some(backend) = self.provider.instance(true) else {
            tracing::trace!("Backend unavailable, debug flag stays unresolved");
            return DebugFlagState::Unknown;
        };

        if !backend.is_service_ready() {
            tracing::trace!("Backend not ready, debug flag stays unresolved");
            return DebugFlagState::Unknown;
        }

        let resolved = if backend.is_debug_enabled() {
            DebugFlagState::Enabled
        } else {
            DebugFlagState::Disabled
        };
        tracing::debug!(state = ?resolved, "Debug flag resolved");
        resolved
    }
}

/// Holds the `Resolving` state and puts the flag back to `Unknown` if
/// dropped without a result.
struct ResolvingGuard<'a> {
    state: &'a AtomicU8,
    armed: bool,
}

impl<'a> ResolvingGuard<'a> {
    fn acquire(state: &'a AtomicU8) -> Option<Self> {
        state
            .compare_exchange(
                DebugFlagState::Unknown as u8,
                DebugFlagState::Resolving as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .ok()
            .map(|_| Self { state, armed: true })
    }

    fn finish(mut self, resolved: DebugFlagState) {
        self.state.store(resolved as u8, Ordering::Release);
        self.armed = false;
    }
}

impl Drop for ResolvingGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.state
                .store(DebugFlagState::Unknown as u8, Ordering::Release);
        }
    }
}
