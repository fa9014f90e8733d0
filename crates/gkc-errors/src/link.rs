//! Byte-stream transport errors.

/// Errors raised by a [`Link`](crate::link) implementation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LinkError {
    /// The underlying device (serial port, socket, …) could not be opened.
    #[error("device unavailable: {0}")]
    DeviceUnavailable(String),

    /// A write to the link failed partway or was rejected outright.
    #[error("write failed: {0}")]
    WriteFailed(String),

    /// The link was not open when the operation was attempted.
    #[error("link is closed")]
    Closed,
}
