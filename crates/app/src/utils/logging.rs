//! Tracing setup and command execution logging.

use std::time::Duration;

use fieldops_domain::{FieldOpsError, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `directive` (the configured log
/// level) applies. Later calls are no-ops, so tests can call this freely.
pub fn init_tracing(directive: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Log the outcome of a command execution with structured fields.
///
/// Emits one `command_execution_success`/`failure` event per command so
/// the wrappers stay concise and the events stay uniform. `command` must
/// not carry sensitive values.
#[inline]
pub fn log_command_execution<T>(command: &str, elapsed: Duration, result: &Result<T>) {
    let duration_ms = elapsed.as_millis() as u64;

    match result {
        Ok(_) => info!(command, duration_ms, "command_execution_success"),
        Err(err) => warn!(
            command,
            duration_ms,
            error_type = error_label(err),
            error = %err,
            "command_execution_failure"
        ),
    }
}

/// Convert a `FieldOpsError` into a stable label suitable for log fields.
#[inline]
pub fn error_label(error: &FieldOpsError) -> &'static str {
    match error {
        FieldOpsError::Database(_) => "database",
        FieldOpsError::Config(_) => "config",
        FieldOpsError::Serialization(_) => "serialization",
        FieldOpsError::NotFound(_) => "not_found",
        FieldOpsError::InvalidInput(_) => "invalid_input",
        FieldOpsError::Internal(_) => "internal",
    }
}
