//! Metrics collection.
//!
//! # Metrics
//! - `diag_backend_queries_total` (counter): backend contacts made by the debug flag resolver
//! - `diag_log_records_total` (counter): records written, by effective level
//! - `diag_debug_downgrades_total` (counter): DEBUG records written at INFO
//! - `diag_debug_suppressed_total` (counter): DEBUG records dropped
//!
//! # Design Decisions
//! - Only the `metrics` facade is used; the host installs an exporter if it wants one
//! - Without a recorder every call is a no-op

use crate::logging::Level;

pub fn record_backend_query() {
    ::metrics::counter!("diag_backend_queries_total").increment(1);
}

pub fn record_log_record(level: Level) {
    ::metrics::counter!("diag_log_records_total", "level" => level.as_str()).increment(1);
}

pub fn record_debug_downgrade() {
    ::metrics::counter!("diag_debug_downgrades_total").increment(1);
}

pub fn record_debug_suppressed() {
    ::metrics::counter!("diag_debug_suppressed_total").increment(1);
}
