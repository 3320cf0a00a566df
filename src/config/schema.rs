//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files,
//! and every field has a default so an empty file is a valid config.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for diagnostics.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct DiagnosticsConfig {
    /// Logger and tracing subscriber settings.
    pub logging: LoggingConfig,

    /// Process metadata overrides.
    pub process: ProcessConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Tracing filter directives (e.g., "info,host_diag=debug").
    /// `RUST_LOG` takes precedence when set.
    pub filter: String,

    /// Output format of the tracing subscriber.
    pub format: LogFormat,

    /// What to do with DEBUG records once debug is known to be off.
    pub disabled_debug: DisabledDebugPolicy,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            format: LogFormat::Pretty,
            disabled_debug: DisabledDebugPolicy::Suppress,
        }
    }
}

/// Tracing output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable, for development.
    #[default]
    Pretty,
    /// One JSON object per line, for production.
    Json,
}

/// Handling of DEBUG records when the backend said debug is off, or while
/// the flag is being resolved.
///
/// Records logged before the backend is ready are always downgraded to INFO.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DisabledDebugPolicy {
    /// Drop the record.
    #[default]
    Suppress,
    /// Write it at INFO.
    Downgrade,
}

/// Process metadata configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ProcessConfig {
    /// Private data directory of the process (e.g., "/data/user/0/com.example.app").
    pub data_dir: Option<PathBuf>,
}
