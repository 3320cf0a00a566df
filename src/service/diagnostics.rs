//! Diagnostics service object.
//!
//! # Responsibilities
//! - Wire the resolvers to the logger
//! - Apply config reloads
//! - Report a serializable snapshot of what has been resolved

use std::sync::Arc;

use arc_swap::ArcSwap;
use serde::Serialize;

use crate::backend::{BackendProvider, Unavailable};
use crate::config::{DiagnosticsConfig, DisabledDebugPolicy};
use crate::logging::{LogSink, Logger, TracingSink};
use crate::observability::logging::TracingHandle;
use crate::resolver::{
    DebugFlagResolver, DebugFlagState, FixedDataDir, MetadataError, NoDataDir, OwnerIdResolver,
    ProcessMetadata,
};
use crate::service::module_info::{module_info, ModuleInfo};

/// Process-wide diagnostics: debug flag, owner detection and logging.
#[derive(Debug)]
pub struct Diagnostics {
    debug_flag: Arc<DebugFlagResolver>,
    owner: OwnerIdResolver,
    logger: Logger,
    tracing: Option<TracingHandle>,
    config: ArcSwap<DiagnosticsConfig>,
}

/// Point-in-time view of the service, without triggering resolution.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticsSnapshot {
    pub module: ModuleInfo,
    pub debug_flag: DebugFlagState,
    pub owner_user_id: Option<u32>,
    pub disabled_debug: DisabledDebugPolicy,
}

impl Diagnostics {
    pub fn builder() -> DiagnosticsBuilder {
        DiagnosticsBuilder::default()
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    pub fn debug_flag(&self) -> &Arc<DebugFlagResolver> {
        &self.debug_flag
    }

    pub fn owner(&self) -> &OwnerIdResolver {
        &self.owner
    }

    pub fn is_debug_enabled(&self) -> bool {
        self.debug_flag.is_enabled()
    }

    pub fn is_owner(&self) -> Result<bool, MetadataError> {
        self.owner.is_owner()
    }

    /// Config currently in effect.
    pub fn config(&self) -> Arc<DiagnosticsConfig> {
        self.config.load_full()
    }

    /// Apply a reloaded config: logger policy, and the tracing filter when a
    /// [`TracingHandle`] was supplied.
    pub fn apply_config(&self, config: DiagnosticsConfig) {
        let previous = self.config.load_full();

        if previous.process.data_dir != config.process.data_dir {
            tracing::warn!(
                "process.data_dir changed on reload; the owner id keeps its first resolved value"
            );
        }

        if let Some(handle) = &self.tracing {
            if let Err(e) = handle.apply(&config.logging) {
                tracing::warn!(error = %e, "Tracing filter not updated");
            }
        }

        self.logger.apply_config(config.logging.clone());
        self.config.store(Arc::new(config));
        tracing::info!("Diagnostics configuration applied");
    }

    pub fn snapshot(&self) -> DiagnosticsSnapshot {
        DiagnosticsSnapshot {
            module: *module_info(),
            debug_flag: self.debug_flag.state(),
            owner_user_id: self.owner.cached(),
            disabled_debug: self.logger.disabled_debug_policy(),
        }
    }
}

/// Builder for [`Diagnostics`].
///
/// Defaults: no backend, data directory from config, [`TracingSink`].
#[derive(Default)]
pub struct DiagnosticsBuilder {
    backend: Option<Box<dyn BackendProvider>>,
    metadata: Option<Box<dyn ProcessMetadata>>,
    sink: Option<Arc<dyn LogSink>>,
    tracing: Option<TracingHandle>,
    config: DiagnosticsConfig,
}

impl DiagnosticsBuilder {
    pub fn backend(mut self, provider: impl BackendProvider + 'static) -> Self {
        self.backend = Some(Box::new(provider));
        self
    }

    /// Override the data directory source. Takes precedence over `process.data_dir`.
    pub fn metadata(mut self, metadata: impl ProcessMetadata + 'static) -> Self {
        self.metadata = Some(Box::new(metadata));
        self
    }

    pub fn sink(mut self, sink: impl LogSink + 'static) -> Self {
        self.sink = Some(Arc::new(sink));
        self
    }

    /// Let config reloads update the installed subscriber's filter.
    pub fn tracing(mut self, handle: TracingHandle) -> Self {
        self.tracing = Some(handle);
        self
    }

    pub fn config(mut self, config: DiagnosticsConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Diagnostics {
        let backend: Box<dyn BackendProvider> = match self.backend {
            Some(backend) => backend,
            None => Box::new(Unavailable),
        };
        let metadata: Box<dyn ProcessMetadata> =
            match (self.metadata, &self.config.process.data_dir) {
                (Some(metadata), _) => metadata,
                (None, Some(dir)) => Box::new(FixedDataDir(dir.clone())),
                (None, None) => Box::new(NoDataDir),
            };
        let sink: Arc<dyn LogSink> = match self.sink {
            Some(sink) => sink,
            None => Arc::new(TracingSink),
        };

        let debug_flag = Arc::new(DebugFlagResolver::from_boxed(backend));
        let logger = Logger::new(debug_flag.clone(), sink, self.config.logging.clone());

        Diagnostics {
            debug_flag,
            owner: OwnerIdResolver::from_boxed(metadata),
            logger,
            tracing: self.tracing,
            config: ArcSwap::from_pointee(self.config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::LocalBackend;
    use crate::config::LogFormat;
    use crate::logging::{Level, MemorySink};
    use std::path::PathBuf;
    use tracing_subscriber::{reload, EnvFilter, Registry};

    #[test]
    fn test_defaults() {
        let diagnostics = Diagnostics::builder().sink(MemorySink::new()).build();

        assert!(!diagnostics.is_debug_enabled());
        assert!(matches!(
            diagnostics.is_owner(),
            Err(MetadataError::Unavailable(_))
        ));

        let snapshot = diagnostics.snapshot();
        assert_eq!(snapshot.debug_flag, DebugFlagState::Unknown);
        assert_eq!(snapshot.owner_user_id, None);
    }

    #[test]
    fn test_data_dir_from_config() {
        let mut config = DiagnosticsConfig::default();
        config.process.data_dir = Some(PathBuf::from("/data/user/11/com.example.app"));

        let diagnostics = Diagnostics::builder().config(config).build();
        assert!(!diagnostics.is_owner().unwrap());
        assert_eq!(diagnostics.snapshot().owner_user_id, Some(11));
    }

    #[test]
    fn test_apply_config_switches_policy() {
        let sink = Arc::new(MemorySink::new());
        let diagnostics = Diagnostics::builder()
            .backend(Arc::new(LocalBackend::ready_with(false)))
            .sink(sink.clone())
            .build();

        diagnostics.logger().debug("Tag", "dropped");
        assert!(sink.take().is_empty());

        let mut config = DiagnosticsConfig::default();
        config.logging.disabled_debug = DisabledDebugPolicy::Downgrade;
        diagnostics.apply_config(config);

        diagnostics.logger().debug("Tag", "kept");
        let records = sink.take();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].level, Level::Info);
        assert_eq!(
            diagnostics.snapshot().disabled_debug,
            DisabledDebugPolicy::Downgrade
        );
    }

    #[test]
    fn test_apply_config_reloads_tracing_filter() {
        let (_layer, handle) = reload::Layer::<EnvFilter, Registry>::new(EnvFilter::new("info"));
        let tracing = TracingHandle::new(handle, LogFormat::Pretty, false);
        let diagnostics = Diagnostics::builder()
            .sink(MemorySink::new())
            .tracing(tracing.clone())
            .build();

        let mut config = DiagnosticsConfig::default();
        config.logging.filter = "warn".into();
        diagnostics.apply_config(config);

        assert_eq!(tracing.current_filter().unwrap(), "warn");
        assert_eq!(diagnostics.config().logging.filter, "warn");
    }

    #[test]
    fn test_snapshot_serializes() {
        let diagnostics = Diagnostics::builder()
            .backend(Arc::new(LocalBackend::ready_with(true)))
            .metadata(FixedDataDir(PathBuf::from("/data/data/com.example.app")))
            .build();
        diagnostics.is_debug_enabled();
        diagnostics.is_owner().unwrap();

        let json = serde_json::to_value(diagnostics.snapshot()).unwrap();
        assert_eq!(json["debug_flag"], "enabled");
        assert_eq!(json["owner_user_id"], 0);
        assert_eq!(json["module"]["name"], "host-diag");
    }
}
