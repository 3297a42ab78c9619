//! Error types for the runtime helpers
use thiserror::Error;

/// Result type for runtime helper operations
pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Errors raised while setting up runtime helpers
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// A timer-backed helper was created outside of a Tokio runtime
    #[error("{helper} requires a Tokio runtime, but none is running on this thread")]
    NoRuntime {
        /// Name of the helper that needed the runtime
        helper: &'static str,
    },
}

impl RuntimeError {
    /// Create a "no runtime" error for the named helper
    #[must_use]
    pub fn no_runtime(helper: &'static str) -> Self {
        Self::NoRuntime { helper }
    }
}
