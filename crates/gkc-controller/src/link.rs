//! The abstract byte-stream transport.
//!
//! An `async_trait`-based abstraction: an object-safe trait
//! implementations can be boxed behind `Arc<dyn Link>` and shared between
//! the caller, the heartbeat task, and the receiver task. Interior
//! mutability (not `&mut self`) is deliberate, since callers never get
//! exclusive access back once a session owns the link.

use std::sync::Arc;

use async_trait::async_trait;
use gkc_errors::LinkError;

use crate::config::SessionConfig;

/// A byte slice received off the link, handed to the session's streaming
/// parser. Must be short and non-blocking; subscribers must not block the
/// parser indefinitely.
pub type ReceiveHandler = Arc<dyn Fn(&[u8]) + Send + Sync>;

/// The transport kind a [`Link`] implementation identifies as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommIo {
    /// A serial (UART) byte stream.
    Serial,
    /// An Ethernet-based transport.
    Ethernet,
    /// A CAN-bus transport.
    Can,
}

/// An abstract, configurable, open/close-able byte-stream transport.
#[async_trait]
pub trait Link: Send + Sync {
    /// Parses link-specific keys out of `config` (e.g. `SerialLink` reads
    /// `serial_port` and `baud_rate`). Must be called before [`Link::open`].
    async fn configure(&self, config: &SessionConfig) -> Result<(), LinkError>;

    /// Acquires OS resources and starts a receive pump that invokes
    /// `on_receive` with each chunk of bytes read off the wire.
    async fn open(&self, on_receive: ReceiveHandler) -> Result<(), LinkError>;

    /// Whether the link currently holds an open transport.
    fn is_open(&self) -> bool;

    /// Idempotently tears down the transport and stops the receive pump.
    async fn close(&self);

    /// Writes `bytes`, returning how many were accepted. Returns `0`
    /// (never an error) if the link is not open.
    async fn send(&self, bytes: &[u8]) -> usize;

    /// The transport kind this implementation provides.
    fn get_io_type(&self) -> CommIo;
}
