//! Configuration file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::DiagnosticsConfig;

/// Watches a config file and forwards configs that differ from the last one seen.
pub struct ConfigWatcher {
    path: PathBuf,
    current: DiagnosticsConfig,
    update_tx: mpsc::UnboundedSender<DiagnosticsConfig>,
}

impl ConfigWatcher {
    /// Create a watcher for `path`, starting from the config already in effect.
    ///
    /// Returns the watcher and a receiver for configuration updates.
    pub fn new(
        path: &Path,
        current: DiagnosticsConfig,
    ) -> (Self, mpsc::UnboundedReceiver<DiagnosticsConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                current,
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching. Dropping the returned watcher stops it.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let path = self.path.clone();
        let mut reload = Reload {
            path: self.path,
            last: self.current,
            update_tx: self.update_tx,
        };

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| {
                reload.on_event(res);
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = %path.display(), "Config watcher started");
        Ok(watcher)
    }
}

/// What a single file event led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReloadOutcome {
    Ignored,
    Unchanged,
    Delivered,
    Rejected,
    ReceiverClosed,
}

/// Reload state owned by the notify callback.
struct Reload {
    path: PathBuf,
    last: DiagnosticsConfig,
    update_tx: mpsc::UnboundedSender<DiagnosticsConfig>,
}

impl Reload {
    fn on_event(&mut self, res: notify::Result<Event>) -> ReloadOutcome {
        if self.update_tx.is_closed() {
            return ReloadOutcome::ReceiverClosed;
        }

        let event = match res {
            Ok(event) => event,
            Err(e) => {
                tracing::error!(error = %e, "Config watch error");
                return ReloadOutcome::Ignored;
            }
        };
        if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
            return ReloadOutcome::Ignored;
        }

        let config = match load_config(&self.path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    "Failed to reload config, keeping current configuration"
                );
                return ReloadOutcome::Rejected;
            }
        };

        // Editors often emit several events per save.
        if config == self.last {
            return ReloadOutcome::Unchanged;
        }

        if self.update_tx.send(config.clone()).is_err() {
            tracing::debug!("Config receiver dropped, ignoring further changes");
            return ReloadOutcome::ReceiverClosed;
        }

        tracing::info!(path = %self.path.display(), "Config reloaded");
        self.last = config;
        ReloadOutcome::Delivered
    }
}
