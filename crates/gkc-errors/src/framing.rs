//! Frame and packet codec errors.
//!
//! These are recovered locally by the streaming parser and are not meant
//! to propagate to a session-controller caller; they exist so
//! `gkc-protocol`'s codec and its tests can name failures precisely.

/// Errors raised while encoding or decoding a frame envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    /// The frame did not begin with the start sentinel `0x02`.
    #[error("frame did not start with 0x02")]
    BadStart,

    /// The frame did not end with the end sentinel `0x03`.
    #[error("frame did not end with 0x03")]
    BadEnd,

    /// The declared payload length did not match the available bytes.
    #[error("frame length invalid")]
    BadLength,

    /// The CRC-16 over the payload did not match the trailing checksum.
    #[error("frame checksum mismatch")]
    BadChecksum,

    /// The payload was empty or exceeded 255 bytes.
    #[error("payload size out of range (must be 1..=255)")]
    PayloadTooLarge,
}

/// Errors raised while decoding a typed packet payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PacketError {
    /// The payload was too short for the fields its discriminator implies.
    #[error("payload shorter than expected for this packet type")]
    ShortPayload,

    /// The discriminator (first payload byte) did not match any known variant.
    #[error("unknown packet discriminator: {0:#04x}")]
    BadDiscriminator(u8),
}
