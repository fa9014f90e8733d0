//! The host packet-library's own version, compared against the MCU's
//! reported `FirmwareVersion`.

/// Major/minor/patch version of this packet-library implementation.
///
/// Frozen at major 0, minor 1, patch 0. Major and minor must match the
/// MCU's reported firmware version exactly; a patch mismatch is a
/// warning, not a fatal error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketVersion {
    /// Major version.
    pub major: u8,
    /// Minor version.
    pub minor: u8,
    /// Patch version.
    pub patch: u8,
}

impl PacketVersion {
    /// This crate's own packet-library version.
    pub const HOST: PacketVersion = PacketVersion {
        major: 0,
        minor: 1,
        patch: 0,
    };

    /// Whether `self` and `other` share the same major and minor version.
    pub fn major_minor_matches(self, other: PacketVersion) -> bool {
        self.major == other.major && self.minor == other.minor
    }
}
