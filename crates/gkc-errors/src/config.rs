//! Configuration-map errors.

/// Errors raised while resolving a transport configuration map.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// A required key was absent from the configuration map.
    #[error("missing configuration key: {0}")]
    ConfigMissing(String),

    /// A key was present but held a value of the wrong type.
    #[error("configuration key {key} has the wrong type: {reason}")]
    ConfigTypeMismatch {
        /// The offending key.
        key: String,
        /// Human-readable reason.
        reason: String,
    },

    /// `comm_type` named a transport with no registered implementation.
    #[error("unknown comm_type: {0}")]
    UnknownCommType(String),
}
