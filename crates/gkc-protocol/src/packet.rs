//! The closed catalog of typed payload variants exchanged with the MCU.
//!
//! Every variant knows its own [`Packet::first_byte`] discriminator,
//! [`Packet::encode`] (discriminator followed by little-endian field
//! encodings), and [`Packet::decode`] (the inverse, given a payload slice
//! whose first byte has already been matched against that discriminator).
//!
//! All integers and floats are little-endian; there is no
//! `reinterpret_cast`-style struct punning here — every field is
//! serialized by hand so the wire layout never depends on host endianness
//! or struct padding.

use gkc_errors::PacketError;

/// `Handshake1` discriminator.
pub const FIRST_BYTE_HANDSHAKE1: u8 = 0x04;
/// `Handshake2` discriminator.
pub const FIRST_BYTE_HANDSHAKE2: u8 = 0x05;
/// `GetFirmwareVersion` discriminator.
pub const FIRST_BYTE_GET_FIRMWARE_VERSION: u8 = 0x06;
/// `FirmwareVersion` discriminator.
pub const FIRST_BYTE_FIRMWARE_VERSION: u8 = 0x07;
/// `ResetMcu` discriminator.
pub const FIRST_BYTE_RESET_MCU: u8 = 0xFF;
/// `Heartbeat` discriminator.
pub const FIRST_BYTE_HEARTBEAT: u8 = 0xAA;
/// `Config` discriminator.
pub const FIRST_BYTE_CONFIG: u8 = 0xA1;
/// `StateTransition` discriminator.
pub const FIRST_BYTE_STATE_TRANSITION: u8 = 0xA2;
/// `Control` discriminator.
pub const FIRST_BYTE_CONTROL: u8 = 0xA3;
/// `Sensor` discriminator.
pub const FIRST_BYTE_SENSOR: u8 = 0xA4;
/// `Shutdown1` discriminator.
pub const FIRST_BYTE_SHUTDOWN1: u8 = 0xB1;
/// `Shutdown2` discriminator.
pub const FIRST_BYTE_SHUTDOWN2: u8 = 0xB2;
/// `Log` discriminator.
pub const FIRST_BYTE_LOG: u8 = 0xC1;

/// MCU lifecycle state, as carried in `Heartbeat.state` and requested via
/// `StateTransition.requested_state`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    /// No Config has been accepted yet.
    #[default]
    Uninitialized,
    /// Config accepted; MCU is bringing itself up.
    Initializing,
    /// MCU is ready but not driving.
    Inactive,
    /// MCU is actively driving.
    Active,
    /// MCU is shutting down.
    Shutdown,
    /// Terminal safety state; only a power cycle can leave it.
    Emergency,
}

impl LifecycleState {
    /// Decodes a wire byte into a lifecycle state, if it names one.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Uninitialized),
            1 => Some(Self::Initializing),
            2 => Some(Self::Inactive),
            3 => Some(Self::Active),
            4 => Some(Self::Shutdown),
            5 => Some(Self::Emergency),
            _ => None,
        }
    }

    /// Encodes this state as its wire byte.
    pub fn to_u8(self) -> u8 {
        match self {
            Self::Uninitialized => 0,
            Self::Initializing => 1,
            Self::Inactive => 2,
            Self::Active => 3,
            Self::Shutdown => 4,
            Self::Emergency => 5,
        }
    }
}

/// `Log.severity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Informational message.
    Info,
    /// Warning, non-fatal.
    Warning,
    /// Error, operation failed.
    Error,
    /// Fatal error.
    Fatal,
    /// Critical, system-endangering error.
    Critical,
}

impl Severity {
    /// Decodes a wire byte into a severity; unknown values default to
    /// [`Severity::Error`] rather than being rejected, since a `Log` frame
    /// should never be made unusable just because its severity byte falls
    /// outside the known set.
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Info,
            1 => Self::Warning,
            2 => Self::Error,
            3 => Self::Fatal,
            4 => Self::Critical,
            _ => Self::Error,
        }
    }

    /// Encodes this severity as its wire byte.
    pub fn to_u8(self) -> u8 {
        match self {
            Self::Info => 0,
            Self::Warning => 1,
            Self::Error => 2,
            Self::Fatal => 3,
            Self::Critical => 4,
        }
    }
}

/// The `Config` payload's packed `Configurables` struct.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Configurables {
    /// Leftmost steering set-point.
    pub max_steering_left: f32,
    /// Rightmost steering set-point.
    pub max_steering_right: f32,
    /// Centered steering set-point.
    pub neutral_steering: f32,
    /// Maximum throttle set-point.
    pub max_throttle: f32,
    /// Minimum throttle set-point.
    pub min_throttle: f32,
    /// Zero-throttle set-point.
    pub zero_throttle: f32,
    /// Maximum brake set-point.
    pub max_brake: f32,
    /// Minimum brake set-point.
    pub min_brake: f32,
    /// Throttle calibration offset.
    pub throttle_offset: f32,
    /// Control-frame staleness timeout, in milliseconds.
    pub control_timeout_ms: u32,
    /// Overall comms staleness timeout, in milliseconds.
    pub comm_timeout_ms: u32,
    /// Sensor-frame staleness timeout, in milliseconds.
    pub sensor_timeout_ms: u32,
}

/// On-wire size of [`Configurables`]: 9 f32 fields + 3 u32 fields.
pub const CONFIGURABLES_WIRE_LEN: usize = 9 * 4 + 3 * 4;

impl Configurables {
    fn encode_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.max_steering_left.to_le_bytes());
        out.extend_from_slice(&self.max_steering_right.to_le_bytes());
        out.extend_from_slice(&self.neutral_steering.to_le_bytes());
        out.extend_from_slice(&self.max_throttle.to_le_bytes());
        out.extend_from_slice(&self.min_throttle.to_le_bytes());
        out.extend_from_slice(&self.zero_throttle.to_le_bytes());
        out.extend_from_slice(&self.max_brake.to_le_bytes());
        out.extend_from_slice(&self.min_brake.to_le_bytes());
        out.extend_from_slice(&self.throttle_offset.to_le_bytes());
        out.extend_from_slice(&self.control_timeout_ms.to_le_bytes());
        out.extend_from_slice(&self.comm_timeout_ms.to_le_bytes());
        out.extend_from_slice(&self.sensor_timeout_ms.to_le_bytes());
    }

    fn decode_from(bytes: &[u8]) -> Result<Self, PacketError> {
        if bytes.len() < CONFIGURABLES_WIRE_LEN {
            return Err(PacketError::ShortPayload);
        }
        let f32_at = |i: usize| f32::from_le_bytes(bytes[i * 4..i * 4 + 4].try_into().unwrap());
        let u32_at =
            |i: usize| u32::from_le_bytes(bytes[i * 4..i * 4 + 4].try_into().unwrap());
        Ok(Self {
            max_steering_left: f32_at(0),
            max_steering_right: f32_at(1),
            neutral_steering: f32_at(2),
            max_throttle: f32_at(3),
            min_throttle: f32_at(4),
            zero_throttle: f32_at(5),
            max_brake: f32_at(6),
            min_brake: f32_at(7),
            throttle_offset: f32_at(8),
            control_timeout_ms: u32_at(9),
            comm_timeout_ms: u32_at(10),
            sensor_timeout_ms: u32_at(11),
        })
    }
}

/// The `Sensor` payload's packed `SensorValues` struct.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorValues {
    /// Front-left wheel speed.
    pub wheel_speed_fl: f32,
    /// Front-right wheel speed.
    pub wheel_speed_fr: f32,
    /// Rear-left wheel speed.
    pub wheel_speed_rl: f32,
    /// Rear-right wheel speed.
    pub wheel_speed_rr: f32,
    /// Steering angle, radians.
    pub steering_angle_rad: f32,
    /// Steering servo angle, radians.
    pub servo_angle_rad: f32,
    /// Throttle position.
    pub throttle_pos: f32,
    /// Brake pressure.
    pub brake_pressure: f32,
    /// Bus voltage.
    pub voltage: f32,
    /// Bus amperage.
    pub amperage: f32,
    /// Brake fault flag.
    pub fault_brake: bool,
    /// Steering fault flag.
    pub fault_steering: bool,
    /// Throttle fault flag.
    pub fault_throttle: bool,
    /// Informational fault flag.
    pub fault_info: bool,
    /// Warning fault flag.
    pub fault_warning: bool,
    /// Error fault flag.
    pub fault_error: bool,
    /// Fatal fault flag.
    pub fault_fatal: bool,
}

/// On-wire size of [`SensorValues`]: 10 f32 fields + 7 bool (1-byte) fields.
pub const SENSOR_VALUES_WIRE_LEN: usize = 10 * 4 + 7;

impl SensorValues {
    fn encode_into(&self, out: &mut Vec<u8>) {
        for v in [
            self.wheel_speed_fl,
            self.wheel_speed_fr,
            self.wheel_speed_rl,
            self.wheel_speed_rr,
            self.steering_angle_rad,
            self.servo_angle_rad,
            self.throttle_pos,
            self.brake_pressure,
            self.voltage,
            self.amperage,
        ] {
            out.extend_from_slice(&v.to_le_bytes());
        }
        for b in [
            self.fault_brake,
            self.fault_steering,
            self.fault_throttle,
            self.fault_info,
            self.fault_warning,
            self.fault_error,
            self.fault_fatal,
        ] {
            out.push(u8::from(b));
        }
    }

    fn decode_from(bytes: &[u8]) -> Result<Self, PacketError> {
        if bytes.len() < SENSOR_VALUES_WIRE_LEN {
            return Err(PacketError::ShortPayload);
        }
        let f32_at = |i: usize| f32::from_le_bytes(bytes[i * 4..i * 4 + 4].try_into().unwrap());
        let bool_at = |i: usize| bytes[40 + i] != 0;
        Ok(Self {
            wheel_speed_fl: f32_at(0),
            wheel_speed_fr: f32_at(1),
            wheel_speed_rl: f32_at(2),
            wheel_speed_rr: f32_at(3),
            steering_angle_rad: f32_at(4),
            servo_angle_rad: f32_at(5),
            throttle_pos: f32_at(6),
            brake_pressure: f32_at(7),
            voltage: f32_at(8),
            amperage: f32_at(9),
            fault_brake: bool_at(0),
            fault_steering: bool_at(1),
            fault_throttle: bool_at(2),
            fault_info: bool_at(3),
            fault_warning: bool_at(4),
            fault_error: bool_at(5),
            fault_fatal: bool_at(6),
        })
    }
}

/// The closed set of typed payload variants exchanged with the MCU.
#[derive(Debug, Clone, PartialEq)]
pub enum Packet {
    /// First step of the handshake, host → MCU.
    Handshake1 {
        /// Random sequence number chosen by the host.
        seq_number: u32,
    },
    /// Second step of the handshake, MCU → host.
    Handshake2 {
        /// Must equal `Handshake1.seq_number + 1` for the handshake to be
        /// considered good.
        seq_number: u32,
    },
    /// Request the MCU's firmware version.
    GetFirmwareVersion,
    /// The MCU's firmware version, in response to `GetFirmwareVersion`.
    FirmwareVersion {
        /// Major version.
        major: u8,
        /// Minor version.
        minor: u8,
        /// Patch version.
        patch: u8,
    },
    /// Request a hard reset of the MCU.
    ResetMcu {
        /// Must match a fixed magic value the MCU firmware checks.
        magic_number: u32,
    },
    /// Periodic liveness and lifecycle-state frame.
    Heartbeat {
        /// Monotonically increasing (mod 256) counter.
        rolling_counter: u8,
        /// MCU-reported lifecycle state (ignored on frames the host sends).
        state: u8,
    },
    /// Push a full configuration to the MCU.
    Config {
        /// The packed configuration values.
        values: Configurables,
    },
    /// Request a lifecycle state transition.
    StateTransition {
        /// The requested lifecycle state, as its wire byte.
        requested_state: u8,
    },
    /// A throttle/steering/brake set-point.
    Control {
        /// Throttle set-point.
        throttle: f32,
        /// Steering set-point.
        steering: f32,
        /// Brake set-point.
        brake: f32,
    },
    /// A snapshot of MCU-side sensor readings.
    Sensor {
        /// The packed sensor values.
        values: SensorValues,
    },
    /// First step of the shutdown handshake, host → MCU.
    Shutdown1 {
        /// Random sequence number chosen by the host.
        seq_number: u32,
    },
    /// Second step of the shutdown handshake, MCU → host.
    Shutdown2 {
        /// Must equal `Shutdown1.seq_number + 1`.
        seq_number: u32,
    },
    /// A log line originating on the MCU.
    Log {
        /// Log severity.
        severity: Severity,
        /// UTF-8 log message (invalid sequences are replaced, not rejected).
        message: String,
    },
}

impl Packet {
    /// The discriminator byte this variant encodes as.
    pub fn first_byte(&self) -> u8 {
        match self {
            Packet::Handshake1 { .. } => FIRST_BYTE_HANDSHAKE1,
            Packet::Handshake2 { .. } => FIRST_BYTE_HANDSHAKE2,
            Packet::GetFirmwareVersion => FIRST_BYTE_GET_FIRMWARE_VERSION,
            Packet::FirmwareVersion { .. } => FIRST_BYTE_FIRMWARE_VERSION,
            Packet::ResetMcu { .. } => FIRST_BYTE_RESET_MCU,
            Packet::Heartbeat { .. } => FIRST_BYTE_HEARTBEAT,
            Packet::Config { .. } => FIRST_BYTE_CONFIG,
            Packet::StateTransition { .. } => FIRST_BYTE_STATE_TRANSITION,
            Packet::Control { .. } => FIRST_BYTE_CONTROL,
            Packet::Sensor { .. } => FIRST_BYTE_SENSOR,
            Packet::Shutdown1 { .. } => FIRST_BYTE_SHUTDOWN1,
            Packet::Shutdown2 { .. } => FIRST_BYTE_SHUTDOWN2,
            Packet::Log { .. } => FIRST_BYTE_LOG,
        }
    }

    /// Encodes this packet into a payload: discriminator followed by its
    /// field encodings, little-endian throughout.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = vec![self.first_byte()];
        match self {
            Packet::Handshake1 { seq_number } | Packet::Handshake2 { seq_number } => {
                out.extend_from_slice(&seq_number.to_le_bytes());
            }
            Packet::GetFirmwareVersion => {}
            Packet::FirmwareVersion { major, minor, patch } => {
                out.push(*major);
                out.push(*minor);
                out.push(*patch);
            }
            Packet::ResetMcu { magic_number } => {
                out.extend_from_slice(&magic_number.to_le_bytes());
            }
            Packet::Heartbeat { rolling_counter, state } => {
                out.push(*rolling_counter);
                out.push(*state);
            }
            Packet::Config { values } => values.encode_into(&mut out),
            Packet::StateTransition { requested_state } => out.push(*requested_state),
            Packet::Control { throttle, steering, brake } => {
                out.extend_from_slice(&throttle.to_le_bytes());
                out.extend_from_slice(&steering.to_le_bytes());
                out.extend_from_slice(&brake.to_le_bytes());
            }
            Packet::Sensor { values } => values.encode_into(&mut out),
            Packet::Shutdown1 { seq_number } | Packet::Shutdown2 { seq_number } => {
                out.extend_from_slice(&seq_number.to_le_bytes());
            }
            Packet::Log { severity, message } => {
                out.push(severity.to_u8());
                out.extend_from_slice(message.as_bytes());
            }
        }
        out
    }

    /// Decodes a payload (first byte already known to be `discriminator`)
    /// into a typed packet.
    pub fn decode(discriminator: u8, payload: &[u8]) -> Result<Self, PacketError> {
        debug_assert_eq!(payload.first().copied(), Some(discriminator));
        let rest = payload.get(1..).unwrap_or(&[]);

        let read_u32 = |b: &[u8]| -> Result<u32, PacketError> {
            b.get(0..4)
                .map(|s| u32::from_le_bytes(s.try_into().unwrap()))
                .ok_or(PacketError::ShortPayload)
        };

        match discriminator {
            FIRST_BYTE_HANDSHAKE1 => Ok(Packet::Handshake1 { seq_number: read_u32(rest)? }),
            FIRST_BYTE_HANDSHAKE2 => Ok(Packet::Handshake2 { seq_number: read_u32(rest)? }),
            FIRST_BYTE_GET_FIRMWARE_VERSION => Ok(Packet::GetFirmwareVersion),
            FIRST_BYTE_FIRMWARE_VERSION => {
                if rest.len() < 3 {
                    return Err(PacketError::ShortPayload);
                }
                Ok(Packet::FirmwareVersion { major: rest[0], minor: rest[1], patch: rest[2] })
            }
            FIRST_BYTE_RESET_MCU => Ok(Packet::ResetMcu { magic_number: read_u32(rest)? }),
            FIRST_BYTE_HEARTBEAT => {
                if rest.len() < 2 {
                    return Err(PacketError::ShortPayload);
                }
                Ok(Packet::Heartbeat { rolling_counter: rest[0], state: rest[1] })
            }
            FIRST_BYTE_CONFIG => Ok(Packet::Config { values: Configurables::decode_from(rest)? }),
            FIRST_BYTE_STATE_TRANSITION => {
                let requested_state = *rest.first().ok_or(PacketError::ShortPayload)?;
                Ok(Packet::StateTransition { requested_state })
            }
            FIRST_BYTE_CONTROL => {
                if rest.len() < 12 {
                    return Err(PacketError::ShortPayload);
                }
                let f32_at = |i: usize| f32::from_le_bytes(rest[i * 4..i * 4 + 4].try_into().unwrap());
                Ok(Packet::Control {
                    throttle: f32_at(0),
                    steering: f32_at(1),
                    brake: f32_at(2),
                })
            }
            FIRST_BYTE_SENSOR => Ok(Packet::Sensor { values: SensorValues::decode_from(rest)? }),
            FIRST_BYTE_SHUTDOWN1 => Ok(Packet::Shutdown1 { seq_number: read_u32(rest)? }),
            FIRST_BYTE_SHUTDOWN2 => Ok(Packet::Shutdown2 { seq_number: read_u32(rest)? }),
            FIRST_BYTE_LOG => {
                let severity_byte = *rest.first().ok_or(PacketError::ShortPayload)?;
                let message = String::from_utf8_lossy(&rest[1..]).into_owned();
                Ok(Packet::Log { severity: Severity::from_u8(severity_byte), message })
            }
            other => Err(PacketError::BadDiscriminator(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    fn configurables_fixture() -> Configurables {
        Configurables {
            max_steering_left: -1.0,
            max_steering_right: 1.0,
            neutral_steering: 0.0,
            max_throttle: 1.0,
            min_throttle: -1.0,
            zero_throttle: 0.0,
            max_brake: 1.0,
            min_brake: 0.0,
            throttle_offset: 0.05,
            control_timeout_ms: 500,
            comm_timeout_ms: 1_000,
            sensor_timeout_ms: 200,
        }
    }

    fn sensor_values_fixture() -> SensorValues {
        SensorValues {
            wheel_speed_fl: 1.1,
            wheel_speed_fr: 1.2,
            wheel_speed_rl: 1.3,
            wheel_speed_rr: 1.4,
            steering_angle_rad: 0.2,
            servo_angle_rad: 0.25,
            throttle_pos: 0.5,
            brake_pressure: 10.0,
            voltage: 48.0,
            amperage: 12.5,
            fault_brake: false,
            fault_steering: false,
            fault_throttle: true,
            fault_info: false,
            fault_warning: true,
            fault_error: false,
            fault_fatal: false,
        }
    }

    fn round_trip(packet: Packet) {
        let encoded = packet.encode();
        let decoded = Packet::decode(encoded[0], &encoded).expect("decodes");
        assert_eq!(decoded, packet);
    }

    #[test]
    fn round_trip_handshake1() {
        round_trip(Packet::Handshake1 { seq_number: 0x1234_5678 });
    }

    #[test]
    fn round_trip_handshake2() {
        round_trip(Packet::Handshake2 { seq_number: 0x1234_5679 });
    }

    #[test]
    fn round_trip_get_firmware_version() {
        round_trip(Packet::GetFirmwareVersion);
    }

    #[test]
    fn round_trip_firmware_version() {
        round_trip(Packet::FirmwareVersion { major: 0, minor: 1, patch: 3 });
    }

    #[test]
    fn round_trip_reset_mcu() {
        round_trip(Packet::ResetMcu { magic_number: 0xDEAD_BEEF });
    }

    #[test]
    fn round_trip_heartbeat() {
        round_trip(Packet::Heartbeat { rolling_counter: 7, state: 3 });
    }

    #[test]
    fn round_trip_config() {
        round_trip(Packet::Config { values: configurables_fixture() });
    }

    #[test]
    fn round_trip_state_transition() {
        round_trip(Packet::StateTransition { requested_state: LifecycleState::Active.to_u8() });
    }

    #[test]
    fn round_trip_control() {
        round_trip(Packet::Control { throttle: 0.5, steering: 0.25, brake: 1200.0 });
    }

    #[test]
    fn round_trip_sensor() {
        round_trip(Packet::Sensor { values: sensor_values_fixture() });
    }

    #[test]
    fn round_trip_shutdown1() {
        round_trip(Packet::Shutdown1 { seq_number: 42 });
    }

    #[test]
    fn round_trip_shutdown2() {
        round_trip(Packet::Shutdown2 { seq_number: 43 });
    }

    #[test]
    fn round_trip_log() {
        round_trip(Packet::Log { severity: Severity::Warning, message: "low voltage".to_string() });
    }

    #[test]
    fn log_decode_replaces_invalid_utf8() {
        let mut payload = vec![FIRST_BYTE_LOG, Severity::Error.to_u8()];
        payload.extend_from_slice(&[0xFF, 0xFE]);
        let decoded = Packet::decode(FIRST_BYTE_LOG, &payload).expect("decodes");
        match decoded {
            Packet::Log { message, .. } => assert!(message.contains('\u{FFFD}')),
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    /// Spec §8: control-send literal scenario. Payload begins with 0xA3
    /// followed by 12 bytes of little-endian f32, total 13 payload bytes.
    #[test]
    fn control_send_literal_bytes() {
        let packet = Packet::Control { throttle: 0.5, steering: 0.25, brake: 1200.0 };
        let encoded = packet.encode();
        assert_eq!(encoded.len(), 13);
        assert_eq!(encoded[0], 0xA3);
        assert_eq!(&encoded[1..5], &0.5f32.to_le_bytes());
        assert_eq!(&encoded[5..9], &0.25f32.to_le_bytes());
        assert_eq!(&encoded[9..13], &1200.0f32.to_le_bytes());
    }

    #[test]
    fn decode_rejects_unknown_discriminator() {
        assert_eq!(Packet::decode(0x09, &[0x09]), Err(PacketError::BadDiscriminator(0x09)));
    }

    #[test]
    fn decode_rejects_short_handshake_payload() {
        assert_eq!(
            Packet::decode(FIRST_BYTE_HANDSHAKE1, &[FIRST_BYTE_HANDSHAKE1, 0x01]),
            Err(PacketError::ShortPayload)
        );
    }

    #[test]
    fn lifecycle_state_round_trips_through_u8() {
        for state in [
            LifecycleState::Uninitialized,
            LifecycleState::Initializing,
            LifecycleState::Inactive,
            LifecycleState::Active,
            LifecycleState::Shutdown,
            LifecycleState::Emergency,
        ] {
            assert_eq!(LifecycleState::from_u8(state.to_u8()), Some(state));
        }
    }

    #[test]
    fn lifecycle_state_active_is_three() {
        // Spec §8's activate() scenario names Active(=3) explicitly.
        assert_eq!(LifecycleState::Active.to_u8(), 3);
    }

    #[test]
    fn unknown_lifecycle_byte_decodes_to_none() {
        assert_eq!(LifecycleState::from_u8(200), None);
    }
}
