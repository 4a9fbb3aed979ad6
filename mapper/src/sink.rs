use error::MapError;
use tracing::error;

/// Receives mapping failures for observability. Reporting never changes the outcome of a call.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, message: &str, error: &MapError);
}

/// Emits every report as a `tracing` error event.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, message: &str, error: &MapError) {
        error!(%error, "{message}");
    }
}

/// Drops all reports.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&self, _message: &str, _error: &MapError) {}
}
