//! The session/lifecycle controller: handshake negotiation,
//! firmware-version check, periodic heartbeat, lifecycle state tracking,
//! state-transition requests, emergency stop, shutdown handshake, sensor
//! caching, and the bounded log queue.
//!
//! Shaped like a long-lived safety-monitor actor: a struct holding
//! `Arc`-shared state, a background `tokio::spawn` loop driven by
//! `tokio::time::interval`, and async public methods that read/write that
//! shared state under a lock held only for the duration of the check.

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

use gkc_errors::{ConfigError, SessionError};
use gkc_protocol::packet::{Configurables, LifecycleState, Packet, SensorValues, Severity};
use gkc_protocol::{ParserStats, PacketVersion, StreamingParser};
use parking_lot::Mutex as SyncMutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::config::SessionConfig;
use crate::link::Link;
use crate::log_queue::{LogEntry, LogQueue};
use crate::serial_link::SerialLink;

/// How long [`GkcSession::connect`] waits for `handshake_good` before
/// failing with [`SessionError::HandshakeTimeout`].
const HANDSHAKE_TIMEOUT: Duration = Duration::from_millis(3_000);
/// Interval between outgoing `Heartbeat` frames.
const HEARTBEAT_INTERVAL: Duration = Duration::from_millis(1_000);
/// Poll granularity while waiting on `handshake_good` during connect.
const HANDSHAKE_POLL_INTERVAL: Duration = Duration::from_millis(20);
/// Capacity of the bounded, drop-oldest MCU-log FIFO.
const LOG_QUEUE_CAPACITY: usize = 256;

fn encode_packet_frame(packet: &Packet) -> Vec<u8> {
    match gkc_protocol::encode_frame(&packet.encode()) {
        Ok(frame) => frame,
        Err(err) => {
            tracing::error!(?err, first_byte = packet.first_byte(), "failed to frame outgoing packet");
            Vec::new()
        }
    }
}

struct SharedState {
    link: Arc<dyn Link>,
    parser: SyncMutex<StreamingParser>,
    current_state: SyncMutex<LifecycleState>,
    handshake_good: AtomicBool,
    initialized: AtomicBool,
    pending_handshake_seq: SyncMutex<Option<u32>>,
    pending_shutdown_seq: SyncMutex<Option<u32>>,
    sensors: SyncMutex<Option<SensorValues>>,
    logs: LogQueue,
    rolling_counter: AtomicU8,
    /// Set once by a fatal callback (`HandshakeOutOfOrder`,
    /// `FirmwareMajorMinorMismatch`) and never cleared; public API calls
    /// refuse to send once this is set, and the link is closed so the
    /// heartbeat loop winds down on its own.
    fatal: SyncMutex<Option<SessionError>>,
}

impl SharedState {
    fn poison(self: &Arc<Self>, err: SessionError) {
        let mut fatal = self.fatal.lock();
        if fatal.is_none() {
            self.note(Severity::Fatal, err.to_string());
            tracing::error!(error = %err, "session entering fatal state, closing link");
            *fatal = Some(err);
            let link = Arc::clone(&self.link);
            tokio::spawn(async move { link.close().await });
        }
    }

    /// Records a host-internal diagnostic both as a `tracing` event (for
    /// operators) and as a consumer-visible [`LogEntry`] (for the external
    /// node layer draining `get_next_log`). The two are additive: every
    /// scenario that narrates a decision also enqueues the matching log
    /// line.
    fn note(&self, severity: Severity, message: impl Into<String>) {
        let message = message.into();
        match severity {
            Severity::Info => tracing::info!("{message}"),
            Severity::Warning => tracing::warn!("{message}"),
            Severity::Error | Severity::Fatal | Severity::Critical => tracing::error!("{message}"),
        }
        self.logs.push(LogEntry { severity, message });
    }
}

fn handle_packet(shared: &Arc<SharedState>, packet: Packet) {
    match packet {
        Packet::Handshake2 { seq_number } => {
            let pending = *shared.pending_handshake_seq.lock();
            match pending {
                None => {
                    shared.poison(SessionError::HandshakeOutOfOrder);
                }
                Some(sent_seq) => {
                    if seq_number != sent_seq.wrapping_add(1) {
                        shared.handshake_good.store(false, Ordering::Relaxed);
                        shared.note(
                            Severity::Warning,
                            format!("handshake sequence mismatch: sent {sent_seq}, received {seq_number}"),
                        );
                    } else {
                        shared.handshake_good.store(true, Ordering::Relaxed);
                        shared.note(Severity::Info, "Received valid handshake from GKC.");
                    }
                }
            }
        }
        Packet::FirmwareVersion { major, minor, patch } => {
            let host = PacketVersion::HOST;
            let mcu = PacketVersion { major, minor, patch };
            if !mcu.major_minor_matches(host) {
                shared.poison(SessionError::FirmwareMajorMinorMismatch {
                    mcu_major: major,
                    mcu_minor: minor,
                    host_major: host.major,
                    host_minor: host.minor,
                });
            } else if patch != host.patch {
                shared.note(
                    Severity::Warning,
                    format!("firmware patch mismatch: MCU {patch}, host {}", host.patch),
                );
            } else {
                shared.note(Severity::Info, format!("firmware version matches host packet library ({major}.{minor}.{patch})"));
            }
        }
        Packet::Heartbeat { state, .. } => {
            if shared.initialized.load(Ordering::Relaxed) {
                match LifecycleState::from_u8(state) {
                    Some(new_state) => *shared.current_state.lock() = new_state,
                    None => shared.note(Severity::Warning, format!("unknown lifecycle state byte {state} in heartbeat, keeping previous state")),
                }
            }
        }
        Packet::Sensor { values } => {
            if shared.handshake_good.load(Ordering::Relaxed) {
                *shared.sensors.lock() = Some(values);
            }
        }
        Packet::Shutdown2 { seq_number } => {
            let pending = *shared.pending_shutdown_seq.lock();
            match pending {
                None => shared.poison(SessionError::ShutdownOutOfOrder),
                Some(sent_seq) => {
                    if seq_number != sent_seq.wrapping_add(1) {
                        shared.note(
                            Severity::Warning,
                            format!("shutdown sequence mismatch: sent {sent_seq}, received {seq_number}, retransmitting Shutdown1"),
                        );
                        let link = Arc::clone(&shared.link);
                        tokio::spawn(async move {
                            let frame = encode_packet_frame(&Packet::Shutdown1 { seq_number: sent_seq });
                            link.send(&frame).await;
                        });
                    } else {
                        *shared.pending_shutdown_seq.lock() = None;
                        shared.note(Severity::Info, "shutdown handshake complete");
                    }
                }
            }
        }
        Packet::Log { severity, message } => {
            shared.logs.push(LogEntry { severity, message });
        }
        // Host-originated/echoed types: Handshake1, GetFirmwareVersion, ResetMcu,
        // Config, StateTransition, Control, Shutdown1 are ignored on receipt.
        _ => {}
    }
}

/// The handshake/heartbeat/lifecycle controller owning a single [`Link`].
pub struct GkcSession {
    shared: Arc<SharedState>,
    heartbeat_handle: Option<JoinHandle<()>>,
}

impl GkcSession {
    /// Selects a link by `comm_type`, configures and opens it, performs
    /// the handshake, requests the firmware version, and starts the
    /// background heartbeat loop.
    ///
    /// Construction-time failures are fatal: fails if the link cannot be
    /// configured/opened or the handshake does not complete within
    /// [`HANDSHAKE_TIMEOUT`].
    pub async fn connect(config: SessionConfig) -> Result<Self, SessionError> {
        let link: Arc<dyn Link> = match config.comm_type()? {
            "serial" => Arc::new(SerialLink::new()),
            other => return Err(ConfigError::UnknownCommType(other.to_string()).into()),
        };

        link.configure(&config).await?;
        Self::handshake_over(link).await
    }

    /// Builds a session over an already-configured link, skipping
    /// `comm_type` resolution. Exists so integration tests can substitute
    /// an in-memory fake for the real serial transport; production
    /// callers should use [`GkcSession::connect`].
    pub async fn connect_with_link(link: Arc<dyn Link>) -> Result<Self, SessionError> {
        Self::handshake_over(link).await
    }

    async fn handshake_over(link: Arc<dyn Link>) -> Result<Self, SessionError> {
        let shared = Arc::new(SharedState {
            link: Arc::clone(&link),
            parser: SyncMutex::new(StreamingParser::new()),
            current_state: SyncMutex::new(LifecycleState::Uninitialized),
            handshake_good: AtomicBool::new(false),
            initialized: AtomicBool::new(false),
            pending_handshake_seq: SyncMutex::new(None),
            pending_shutdown_seq: SyncMutex::new(None),
            sensors: SyncMutex::new(None),
            logs: LogQueue::new(LOG_QUEUE_CAPACITY),
            rolling_counter: AtomicU8::new(0),
            fatal: SyncMutex::new(None),
        });

        let dispatch_shared = Arc::clone(&shared);
        let on_receive: crate::link::ReceiveHandler = Arc::new(move |bytes: &[u8]| {
            let packets = dispatch_shared.parser.lock().feed(bytes);
            for packet in packets {
                handle_packet(&dispatch_shared, packet);
            }
        });

        link.open(on_receive).await?;

        let handshake_seq: u32 = rand::random();
        *shared.pending_handshake_seq.lock() = Some(handshake_seq);
        let frame = encode_packet_frame(&Packet::Handshake1 { seq_number: handshake_seq });
        link.send(&frame).await;

        let deadline = Instant::now() + HANDSHAKE_TIMEOUT;
        while !shared.handshake_good.load(Ordering::Relaxed) && Instant::now() < deadline {
            tokio::time::sleep(HANDSHAKE_POLL_INTERVAL).await;
        }
        if !shared.handshake_good.load(Ordering::Relaxed) {
            link.close().await;
            return Err(SessionError::HandshakeTimeout(HANDSHAKE_TIMEOUT.as_millis() as u64));
        }

        let get_version_frame = encode_packet_frame(&Packet::GetFirmwareVersion);
        link.send(&get_version_frame).await;

        let heartbeat_shared = Arc::clone(&shared);
        let heartbeat_handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(HEARTBEAT_INTERVAL);
            loop {
                ticker.tick().await;
                if !heartbeat_shared.link.is_open() {
                    break;
                }
                let counter = heartbeat_shared.rolling_counter.fetch_add(1, Ordering::Relaxed);
                let frame = encode_packet_frame(&Packet::Heartbeat { rolling_counter: counter, state: 0 });
                heartbeat_shared.link.send(&frame).await;
            }
        });

        Ok(Self { shared, heartbeat_handle: Some(heartbeat_handle) })
    }

    fn precondition_violation(&self, operation: &str, required: LifecycleState) {
        let current = *self.shared.current_state.lock();
        self.shared.note(
            Severity::Warning,
            format!("{operation} refused: requires {required:?}, currently {current:?}"),
        );
    }

    /// True once a fatal callback (out-of-order handshake, firmware
    /// major/minor mismatch) has poisoned this session; every other public
    /// operation refuses outright once this is set.
    pub fn is_fatal(&self) -> bool {
        self.shared.fatal.lock().is_some()
    }

    async fn request_state_transition(
        &self,
        operation: &str,
        required: LifecycleState,
        requested: LifecycleState,
        timeout_ms: u64,
    ) -> bool {
        if self.is_fatal() {
            return false;
        }
        let current = *self.shared.current_state.lock();
        if current != required {
            self.precondition_violation(operation, required);
            return false;
        }

        let frame = encode_packet_frame(&Packet::StateTransition { requested_state: requested.to_u8() });
        self.shared.link.send(&frame).await;
        tokio::time::sleep(Duration::from_millis(timeout_ms)).await;
        *self.shared.current_state.lock() == requested
    }

    /// Sends a `Control` frame with the given set-points. Succeeds if the
    /// link accepted at least one byte.
    pub async fn send_control(&self, throttle: f32, steering: f32, brake: f32) -> bool {
        if self.is_fatal() {
            return false;
        }
        let frame = encode_packet_frame(&Packet::Control { throttle, steering, brake });
        self.shared.link.send(&frame).await > 0
    }

    /// Pushes `values` as a `Config` frame. Valid only from
    /// [`LifecycleState::Uninitialized`]. Succeeds if, after `timeout_ms`,
    /// the MCU has reported `Initializing` or `Inactive`.
    pub async fn initialize(&self, values: Configurables, timeout_ms: u64) -> bool {
        if self.is_fatal() {
            return false;
        }
        let current = *self.shared.current_state.lock();
        if current != LifecycleState::Uninitialized {
            self.precondition_violation("initialize", LifecycleState::Uninitialized);
            return false;
        }

        let frame = encode_packet_frame(&Packet::Config { values });
        self.shared.link.send(&frame).await;

        // Heartbeat-driven state updates are gated on `initialized`, so it
        // must be set before the wait, not after — otherwise no Heartbeat
        // can ever move `current_state` off `Uninitialized` and this call
        // could never succeed.
        self.shared.initialized.store(true, Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(timeout_ms)).await;

        let state = *self.shared.current_state.lock();
        let success = matches!(state, LifecycleState::Initializing | LifecycleState::Inactive);
        if !success {
            self.shared.initialized.store(false, Ordering::Relaxed);
        }
        success
    }

    /// Requests `Active` from `Inactive`.
    pub async fn activate(&self, timeout_ms: u64) -> bool {
        self.request_state_transition("activate", LifecycleState::Inactive, LifecycleState::Active, timeout_ms)
            .await
    }

    /// Requests `Inactive` from `Active`.
    ///
    /// Requests `Inactive` directly rather than reusing `activate`'s
    /// transition call.
    pub async fn deactivate(&self, timeout_ms: u64) -> bool {
        self.request_state_transition("deactivate", LifecycleState::Active, LifecycleState::Inactive, timeout_ms)
            .await
    }

    /// Requests `Emergency` from any state other than `Uninitialized`.
    pub async fn emergency_stop(&self, timeout_ms: u64) -> bool {
        if self.is_fatal() {
            return false;
        }
        let current = *self.shared.current_state.lock();
        if current == LifecycleState::Uninitialized {
            self.precondition_violation("emergency_stop", LifecycleState::Uninitialized);
            return false;
        }

        let frame = encode_packet_frame(&Packet::StateTransition { requested_state: LifecycleState::Emergency.to_u8() });
        self.shared.link.send(&frame).await;
        tokio::time::sleep(Duration::from_millis(timeout_ms)).await;
        *self.shared.current_state.lock() == LifecycleState::Emergency
    }

    /// Never succeeds: intentionally a no-op failure, since only a power
    /// cycle can leave `Emergency`.
    pub fn release_emergency_stop(&self) -> bool {
        self.shared.note(Severity::Error, "release_emergency_stop: not implemented");
        false
    }

    /// Requests `Emergency`, then sends `Shutdown1` with a random seq.
    /// Valid only from `Active` or `Inactive`. Succeeds if both frames
    /// were accepted by the link and `Shutdown2` completed the handshake
    /// within `timeout_ms`.
    pub async fn shutdown(&self, timeout_ms: u64) -> bool {
        if self.is_fatal() {
            return false;
        }
        let current = *self.shared.current_state.lock();
        if !matches!(current, LifecycleState::Active | LifecycleState::Inactive) {
            self.precondition_violation("shutdown", LifecycleState::Inactive);
            return false;
        }

        let transition_frame =
            encode_packet_frame(&Packet::StateTransition { requested_state: LifecycleState::Emergency.to_u8() });
        let sent_transition = self.shared.link.send(&transition_frame).await > 0;

        let seq: u32 = rand::random();
        *self.shared.pending_shutdown_seq.lock() = Some(seq);
        let shutdown_frame = encode_packet_frame(&Packet::Shutdown1 { seq_number: seq });
        let sent_shutdown1 = self.shared.link.send(&shutdown_frame).await > 0;

        tokio::time::sleep(Duration::from_millis(timeout_ms)).await;

        let completed = self.shared.pending_shutdown_seq.lock().is_none();
        sent_transition && sent_shutdown1 && completed
    }

    /// The latest cached sensor snapshot, if any has arrived since the
    /// handshake completed.
    pub fn get_sensors(&self) -> Option<SensorValues> {
        *self.shared.sensors.lock()
    }

    /// The current lifecycle state, as last reported via `Heartbeat`.
    pub fn get_state(&self) -> LifecycleState {
        *self.shared.current_state.lock()
    }

    /// Pops the oldest queued MCU-originated log entry, if any.
    pub fn get_next_log(&self) -> Option<LogEntry> {
        self.shared.logs.pop_front()
    }

    /// Snapshot of the streaming parser's resync/corruption counters.
    pub fn parser_stats(&self) -> ParserStats {
        self.shared.parser.lock().stats()
    }
}

impl Drop for GkcSession {
    /// Stops the heartbeat loop and closes the link. The receiver loop
    /// inside the link observes `is_open() == false` and exits on its own;
    /// closing from a synchronous `Drop` is done best-effort via a
    /// detached task since `Link::close` is async and `Drop::drop` cannot
    /// await.
    fn drop(&mut self) {
        if let Some(handle) = self.heartbeat_handle.take() {
            handle.abort();
        }
        let link = Arc::clone(&self.shared.link);
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            handle.spawn(async move { link.close().await });
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use gkc_protocol::packet::Severity;

    fn fresh_shared() -> Arc<SharedState> {
        Arc::new(SharedState {
            link: Arc::new(crate::serial_link::SerialLink::new()),
            parser: SyncMutex::new(StreamingParser::new()),
            current_state: SyncMutex::new(LifecycleState::Uninitialized),
            handshake_good: AtomicBool::new(false),
            initialized: AtomicBool::new(false),
            pending_handshake_seq: SyncMutex::new(None),
            pending_shutdown_seq: SyncMutex::new(None),
            sensors: SyncMutex::new(None),
            logs: LogQueue::new(LOG_QUEUE_CAPACITY),
            rolling_counter: AtomicU8::new(0),
            fatal: SyncMutex::new(None),
        })
    }

    #[test]
    fn handshake2_with_matching_seq_sets_good() {
        let shared = fresh_shared();
        *shared.pending_handshake_seq.lock() = Some(1);
        handle_packet(&shared, Packet::Handshake2 { seq_number: 2 });
        assert!(shared.handshake_good.load(Ordering::Relaxed));
    }

    #[test]
    fn handshake2_with_mismatched_seq_clears_good() {
        let shared = fresh_shared();
        shared.handshake_good.store(true, Ordering::Relaxed);
        *shared.pending_handshake_seq.lock() = Some(1);
        handle_packet(&shared, Packet::Handshake2 { seq_number: 99 });
        assert!(!shared.handshake_good.load(Ordering::Relaxed));
    }

    #[test]
    fn heartbeat_updates_state_only_when_initialized() {
        let shared = fresh_shared();
        handle_packet(&shared, Packet::Heartbeat { rolling_counter: 0, state: LifecycleState::Active.to_u8() });
        assert_eq!(*shared.current_state.lock(), LifecycleState::Uninitialized);

        shared.initialized.store(true, Ordering::Relaxed);
        handle_packet(&shared, Packet::Heartbeat { rolling_counter: 1, state: LifecycleState::Active.to_u8() });
        assert_eq!(*shared.current_state.lock(), LifecycleState::Active);
    }

    #[test]
    fn heartbeat_with_unknown_state_keeps_previous() {
        let shared = fresh_shared();
        shared.initialized.store(true, Ordering::Relaxed);
        *shared.current_state.lock() = LifecycleState::Inactive;
        handle_packet(&shared, Packet::Heartbeat { rolling_counter: 2, state: 200 });
        assert_eq!(*shared.current_state.lock(), LifecycleState::Inactive);
    }

    #[test]
    fn sensor_cached_only_after_handshake_good() {
        let shared = fresh_shared();
        let values = SensorValues {
            wheel_speed_fl: 0.0,
            wheel_speed_fr: 0.0,
            wheel_speed_rl: 0.0,
            wheel_speed_rr: 0.0,
            steering_angle_rad: 0.0,
            servo_angle_rad: 0.0,
            throttle_pos: 0.0,
            brake_pressure: 0.0,
            voltage: 0.0,
            amperage: 0.0,
            fault_brake: false,
            fault_steering: false,
            fault_throttle: false,
            fault_info: false,
            fault_warning: false,
            fault_error: false,
            fault_fatal: false,
        };
        handle_packet(&shared, Packet::Sensor { values });
        assert!(shared.sensors.lock().is_none());

        shared.handshake_good.store(true, Ordering::Relaxed);
        handle_packet(&shared, Packet::Sensor { values });
        assert_eq!(*shared.sensors.lock(), Some(values));
    }

    #[test]
    fn log_packet_enqueues_entry() {
        let shared = fresh_shared();
        handle_packet(&shared, Packet::Log { severity: Severity::Warning, message: "low voltage".to_string() });
        assert_eq!(shared.logs.len(), 1);
    }

    #[test]
    fn shutdown2_matching_seq_clears_pending() {
        let shared = fresh_shared();
        *shared.pending_shutdown_seq.lock() = Some(5);
        handle_packet(&shared, Packet::Shutdown2 { seq_number: 6 });
        assert!(shared.pending_shutdown_seq.lock().is_none());
    }
}
