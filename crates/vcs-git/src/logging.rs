//! Log sink for invocation traces

/// Receives one debug line per git invocation.
///
/// Sinks cannot report failure; whatever they do with the message has no
/// effect on the operation that produced it.
pub trait LogSink: Send + Sync {
    fn debug(&self, message: &str);
}

/// Forwards messages to `tracing` at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn debug(&self, message: &str) {
        tracing::debug!(target: "vcs_git", "{}", message);
    }
}
