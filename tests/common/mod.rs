//! Shared utilities for integration tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use host_diag::backend::BackendQuery;
use host_diag::logging::MemorySink;
use host_diag::{Diagnostics, DiagnosticsConfig};

/// Backend that counts contacts and can stall to widen race windows.
#[derive(Default)]
pub struct SlowBackend {
    pub ready: AtomicBool,
    pub debug_enabled: AtomicBool,
    pub contacts: AtomicUsize,
    pub stall: Duration,
}

impl SlowBackend {
    pub fn ready_with(debug_enabled: bool, stall: Duration) -> Self {
        Self {
            ready: AtomicBool::new(true),
            debug_enabled: AtomicBool::new(debug_enabled),
            contacts: AtomicUsize::new(0),
            stall,
        }
    }

    pub fn contacts(&self) -> usize {
        self.contacts.load(Ordering::SeqCst)
    }
}

impl BackendQuery for SlowBackend {
    fn is_service_ready(&self) -> bool {
        self.contacts.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(self.stall);
        self.ready.load(Ordering::SeqCst)
    }

    fn is_debug_enabled(&self) -> bool {
        self.debug_enabled.load(Ordering::SeqCst)
    }
}

/// Diagnostics wired to the given backend and an in-memory sink.
#[allow(dead_code)]
pub fn diagnostics_with<B>(
    backend: Arc<B>,
    config: DiagnosticsConfig,
) -> (Diagnostics, Arc<MemorySink>)
where
    B: BackendQuery + 'static,
{
    let sink = Arc::new(MemorySink::new());
    let diagnostics = Diagnostics::builder()
        .backend(backend)
        .sink(sink.clone())
        .config(config)
        .build();
    (diagnostics, sink)
}
