//! Session/lifecycle controller and link transport for the go-kart
//! controller (GKC) host stack.
//!
//! This crate is the I/O half of the workspace: it owns an open serial
//! port (or other [`Link`] implementation), drives [`gkc_protocol`]'s
//! streaming parser over the bytes it reads, and exposes the session's
//! public contract (handshake, heartbeat, lifecycle transitions, sensor
//! cache, and log queue) as [`GkcSession`].
//!
//! # Modules
//!
//! - [`link`]: the abstract byte-stream transport trait.
//! - [`serial_link`]: a [`Link`] backed by an OS serial port.
//! - [`config`]: the `comm_type`-keyed configuration map.
//! - [`log_queue`]: the bounded, drop-oldest MCU-log FIFO.
//! - [`session`]: the session/lifecycle controller itself.

#![deny(unsafe_op_in_unsafe_fn)]

pub mod config;
pub mod link;
pub mod log_queue;
pub mod serial_link;
pub mod session;

pub use config::{ConfigValue, SessionConfig};
pub use link::{CommIo, Link, ReceiveHandler};
pub use log_queue::{LogEntry, LogQueue};
pub use serial_link::SerialLink;
pub use session::GkcSession;
