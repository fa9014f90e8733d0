//! Session-controller errors.

use crate::{ConfigError, LinkError};

/// Errors a session-controller public API call can fail with.
///
/// Precondition violations ([`SessionError::PreconditionViolation`]) are
/// reported via a `false` return plus a WARNING log entry rather than by
/// this error type reaching the caller as a `Result::Err`. `SessionError`
/// is still useful for construction-time failures, which *are* fatal.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SessionError {
    /// Configuring or opening the link failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The link itself failed.
    #[error(transparent)]
    Link(#[from] LinkError),

    /// The two-step handshake did not complete within the allotted window.
    #[error("handshake did not complete within {0}ms")]
    HandshakeTimeout(u64),

    /// `Handshake2` arrived with no outstanding `Handshake1`.
    #[error("handshake received out of order")]
    HandshakeOutOfOrder,

    /// `Shutdown2` arrived with no outstanding `Shutdown1`.
    #[error("shutdown received out of order")]
    ShutdownOutOfOrder,

    /// The MCU's firmware major/minor version does not match this host's
    /// packet library version.
    #[error(
        "firmware major.minor mismatch: MCU reports {mcu_major}.{mcu_minor}, host is {host_major}.{host_minor}"
    )]
    FirmwareMajorMinorMismatch {
        /// MCU-reported major version.
        mcu_major: u8,
        /// MCU-reported minor version.
        mcu_minor: u8,
        /// Host packet-library major version.
        host_major: u8,
        /// Host packet-library minor version.
        host_minor: u8,
    },

    /// A requested state transition was not acknowledged by the MCU.
    #[error("state transition refused or timed out")]
    StateTransitionRefused,

    /// The call's precondition on the current lifecycle state was violated.
    #[error("operation not valid in current state: {0:?}")]
    PreconditionViolation(crate::session::LifecycleStateTag),
}

/// A lightweight, Display/Debug-only tag for the current lifecycle state,
/// used only to report [`SessionError::PreconditionViolation`] without this
/// crate depending on `gkc-protocol`'s richer `LifecycleState` type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleStateTag {
    /// No Config has been accepted yet.
    Uninitialized,
    /// Config accepted, MCU is bringing itself up.
    Initializing,
    /// MCU is ready but not driving.
    Inactive,
    /// MCU is actively driving.
    Active,
    /// MCU is shutting down.
    Shutdown,
    /// Terminal safety state; requires a power cycle to leave.
    Emergency,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    #[test]
    fn firmware_mismatch_message_has_both_versions() {
        let err = SessionError::FirmwareMajorMinorMismatch {
            mcu_major: 1,
            mcu_minor: 2,
            host_major: 0,
            host_minor: 1,
        };
        let msg = err.to_string();
        assert!(msg.contains("1.2"));
        assert!(msg.contains("0.1"));
    }

    #[test]
    fn config_error_converts_via_from() {
        let cfg_err = ConfigError::ConfigMissing("serial_port".into());
        let session_err: SessionError = cfg_err.into();
        assert!(matches!(session_err, SessionError::Config(_)));
    }
}
