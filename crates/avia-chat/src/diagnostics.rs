//! Diagnostics sink for raw transport errors

use avia_client::Error;

/// Receives raw transport errors for operator visibility.
///
/// The rendering layer never sees these; users get the fixed fallback
/// message instead.
pub trait DiagnosticsSink: Send + Sync {
    /// Report one transport failure
    fn report(&self, error: &Error);
}

/// Default sink: logs through tracing.
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn report(&self, error: &Error) {
        tracing::error!("transport failure: {error}");
    }
}
