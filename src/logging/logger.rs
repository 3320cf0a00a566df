//! The leveled logger.

use std::error::Error;
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::config::{DisabledDebugPolicy, LoggingConfig};
use crate::logging::{Level, LogRecord, LogSink};
use crate::observability::metrics;
use crate::resolver::{DebugFlagResolver, DebugFlagState};

/// Dispatches records to a sink, downgrading DEBUG when debug is not on.
pub struct Logger {
    debug_flag: Arc<DebugFlagResolver>,
    sink: Arc<dyn LogSink>,
    config: ArcSwap<LoggingConfig>,
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("debug_flag", &self.debug_flag)
            .field("config", &self.config.load_full())
            .finish_non_exhaustive()
    }
}

impl Logger {
    pub fn new(
        debug_flag: Arc<DebugFlagResolver>,
        sink: Arc<dyn LogSink>,
        config: LoggingConfig,
    ) -> Self {
        Self {
            debug_flag,
            sink,
            config: ArcSwap::from_pointee(config),
        }
    }

    /// Swap in new logging settings. Takes effect on the next record.
    pub fn apply_config(&self, config: LoggingConfig) {
        self.config.store(Arc::new(config));
    }

    /// Policy currently applied to DEBUG records once debug is known to be off.
    pub fn disabled_debug_policy(&self) -> DisabledDebugPolicy {
        self.config.load().disabled_debug
    }

    pub fn log(&self, level: Level, tag: &str, message: impl Into<String>) {
        self.dispatch(LogRecord::new(level, tag, message));
    }

    pub fn log_with_cause<E>(&self, level: Level, tag: &str, message: impl Into<String>, cause: E)
    where
        E: Error + Send + Sync + 'static,
    {
        self.dispatch(LogRecord::new(level, tag, message).with_cause(cause));
    }

    pub fn info(&self, tag: &str, message: impl Into<String>) {
        self.log(Level::Info, tag, message);
    }

    pub fn debug(&self, tag: &str, message: impl Into<String>) {
        self.log(Level::Debug, tag, message);
    }

    pub fn warning(&self, tag: &str, message: impl Into<String>) {
        self.log(Level::Warning, tag, message);
    }

    pub fn error(&self, tag: &str, message: impl Into<String>) {
        self.log(Level::Error, tag, message);
    }

    /// Apply the level policy and hand the record to the sink.
    pub fn dispatch(&self, mut record: LogRecord) {
        let Some(level) = self.effective_level(record.level) else {
            metrics::record_debug_suppressed();
            return;
        };
        record.level = level;

        metrics::record_log_record(level);
        self.sink.write(&record);
    }

    /// The level a record is actually written at, or `None` to drop it.
    fn effective_level(&self, requested: Level) -> Option<Level> {
        if requested != Level::Debug || self.debug_flag.is_enabled() {
            return Some(requested);
        }

        match self.debug_flag.state() {
            // Settled by another thread since the check above.
            DebugFlagState::Enabled => Some(Level::Debug),
            DebugFlagState::Unknown => {
                metrics::record_debug_downgrade();
                Some(Level::Info)
            }
            DebugFlagState::Resolving | DebugFlagState::Disabled => {
                match self.disabled_debug_policy() {
                    DisabledDebugPolicy::Suppress => None,
                    DisabledDebugPolicy::Downgrade => {
                        metrics::record_debug_downgrade();
                        Some(Level::Info)
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendQuery, LocalBackend};
    use crate::logging::MemorySink;
    use std::sync::{OnceLock, Weak};

    fn logger_with(backend: Arc<LocalBackend>) -> (Logger, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let resolver = Arc::new(DebugFlagResolver::new(backend));
        let logger = Logger::new(resolver, sink.clone(), LoggingConfig::default());
        (logger, sink)
    }

    #[derive(Debug, thiserror::Error)]
    #[error("socket closed")]
    struct SocketClosed;

    #[test]
    fn test_debug_downgraded_before_backend_ready() {
        let (logger, sink) = logger_with(Arc::new(LocalBackend::new()));

        logger.log_with_cause(Level::Debug, "Hooks", "attaching", SocketClosed);

        let records = sink.take();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].level, Level::Info);
        assert_eq!(records[0].tag, "Hooks");
        assert_eq!(records[0].message, "attaching");
        assert_eq!(records[0].cause.as_ref().unwrap().to_string(), "socket closed");
    }

    #[test]
    fn test_debug_kept_when_enabled() {
        let (logger, sink) = logger_with(Arc::new(LocalBackend::ready_with(true)));

        logger.debug("Hooks", "attaching");
        assert_eq!(sink.take()[0].level, Level::Debug);
    }

    #[test]
    fn test_debug_suppressed_when_disabled() {
        let (logger, sink) = logger_with(Arc::new(LocalBackend::ready_with(false)));

        logger.debug("Hooks", "attaching");
        assert!(sink.take().is_empty());
    }

    #[test]
    fn test_downgrade_policy_when_disabled() {
        let (logger, sink) = logger_with(Arc::new(LocalBackend::ready_with(false)));
        logger.apply_config(LoggingConfig {
            disabled_debug: DisabledDebugPolicy::Downgrade,
            ..LoggingConfig::default()
        });

        logger.debug("Hooks", "attaching");
        let records = sink.take();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].level, Level::Info);
    }

    #[test]
    fn test_other_levels_untouched() {
        for debug in [true, false] {
            let (logger, sink) = logger_with(Arc::new(LocalBackend::ready_with(debug)));
            logger.warning("Hooks", "slow");
            logger.error("Hooks", "failed");
            logger.info("Hooks", "done");

            let levels: Vec<Level> = sink.take().iter().map(|r| r.level).collect();
            assert_eq!(levels, vec![Level::Warning, Level::Error, Level::Info]);
        }
    }

    /// Backend that logs through the logger while it is being asked for readiness.
    struct ChattyBackend {
        logger: OnceLock<Weak<Logger>>,
    }

    impl BackendQuery for ChattyBackend {
        fn is_service_ready(&self) -> bool {
            if let Some(logger) = self.logger.get().and_then(Weak::upgrade) {
                logger.debug("Backend", "checking readiness");
            }
            false
        }

        fn is_debug_enabled(&self) -> bool {
            false
        }
    }

    #[test]
    fn test_logging_from_backend_during_resolution() {
        let backend = Arc::new(ChattyBackend {
            logger: OnceLock::new(),
        });
        let sink = Arc::new(MemorySink::new());
        let resolver = Arc::new(DebugFlagResolver::new(backend.clone()));
        let logger = Arc::new(Logger::new(
            resolver.clone(),
            sink.clone(),
            LoggingConfig::default(),
        ));
        backend.logger.set(Arc::downgrade(&logger)).unwrap();

        logger.debug("Hooks", "outer");

        let records: Vec<(Level, String)> = sink
            .take()
            .into_iter()
            .map(|r| (r.level, r.message))
            .collect();
        assert_eq!(records, vec![(Level::Info, "outer".to_string())]);
        assert_eq!(resolver.state(), DebugFlagState::Unknown);
    }

    #[test]
    fn test_non_debug_never_contacts_backend() {
        let backend = Arc::new(LocalBackend::new());
        let (logger, _sink) = logger_with(backend.clone());

        logger.warning("Hooks", "slow");
        logger.info("Hooks", "done");
        assert_eq!(backend.query_count(), 0);
    }
}
