//! Wire protocol for the go-kart controller (GKC).
//!
//! This crate is intentionally I/O-free: it provides pure functions and
//! types for encoding and decoding frames and packets, plus a streaming
//! parser that can be fed arbitrary byte chunks. Nothing here touches a
//! serial port, a socket, or a clock — that is `gkc-controller`'s job.
//!
//! # Modules
//!
//! - [`crc`]: CRC-16-CCITT over payload bytes.
//! - [`frame`]: the `start | len | payload | crc | end` envelope.
//! - [`packet`]: the closed catalog of typed payload variants.
//! - [`parser`]: a self-synchronizing streaming decoder.
//! - [`version`]: the host packet-library's own version constants.

#![deny(unsafe_op_in_unsafe_fn)]

pub mod crc;
pub mod frame;
pub mod packet;
pub mod parser;
pub mod version;

pub use frame::{decode_frame, encode_frame};
pub use packet::Packet;
pub use parser::{ParserStats, StreamingParser};
pub use version::PacketVersion;
