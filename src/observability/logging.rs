//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber for binaries and hosts that want one
//! - Pick pretty or JSON output from config
//! - Swap the filter when the config file is reloaded
//!
//! # Design Decisions
//! - `RUST_LOG` overrides the configured filter, including on reload
//! - Initialization is fallible so a host that already installed a subscriber keeps it
//! - The output format is fixed once the subscriber is installed

use thiserror::Error;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Registry,
};

use crate::config::{LogFormat, LoggingConfig};

/// Errors from installing or updating the tracing subscriber.
#[derive(Debug, Error)]
pub enum TracingError {
    #[error("failed to install tracing subscriber: {0}")]
    Init(#[from] TryInitError),

    #[error("failed to reload tracing filter: {0}")]
    Reload(#[from] reload::Error),
}

/// Handle to the installed subscriber's filter.
#[derive(Debug, Clone)]
pub struct TracingHandle {
    filter: reload::Handle<EnvFilter, Registry>,
    format: LogFormat,
    env_override: bool,
}

impl TracingHandle {
    /// Wrap a reload handle. `env_override` keeps `RUST_LOG` in charge of the filter.
    pub fn new(
        filter: reload::Handle<EnvFilter, Registry>,
        format: LogFormat,
        env_override: bool,
    ) -> Self {
        Self {
            filter,
            format,
            env_override,
        }
    }

    /// Apply the filter from a reloaded config.
    pub fn apply(&self, config: &LoggingConfig) -> Result<(), TracingError> {
        if config.format != self.format {
            tracing::warn!(
                current = ?self.format,
                requested = ?config.format,
                "logging.format changed on reload; restart to switch output format"
            );
        }

        if self.env_override {
            tracing::debug!("RUST_LOG is set, keeping its filter");
            return Ok(());
        }

        self.filter
            .reload(EnvFilter::new(config.filter.as_str()))?;
        tracing::info!(filter = %config.filter, "Tracing filter reloaded");
        Ok(())
    }

    /// The filter currently in effect, as directive text.
    pub fn current_filter(&self) -> Result<String, TracingError> {
        Ok(self.filter.with_current(|filter| filter.to_string())?)
    }
}

/// Install the global tracing subscriber.
pub fn init_tracing(config: &LoggingConfig) -> Result<TracingHandle, TracingError> {
    let (filter, env_override) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, true),
        Err(_) => (EnvFilter::new(config.filter.as_str()), false),
    };
    let (filter, handle) = reload::Layer::new(filter);
    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Json => registry.with(fmt::layer().json()).try_init()?,
        LogFormat::Pretty => registry.with(fmt::layer()).try_init()?,
    }

    Ok(TracingHandle::new(handle, config.format, env_override))
}
