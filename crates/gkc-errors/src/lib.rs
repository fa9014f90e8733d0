//! Centralized error types for the go-kart controller (GKC) host stack.
//!
//! Configuration, link, framing, packet, and session errors each get
//! their own [`thiserror::Error`] enum rather than one flat error type,
//! so each layer can be matched on precisely by its caller.
//!
//! # Propagation policy
//!
//! - [`FrameError`] and [`PacketError`] are recovered locally by the
//!   streaming parser (see `gkc-protocol`) and never escape to the session
//!   API; they exist here so the parser and its tests share one vocabulary.
//! - [`ConfigError`] and [`LinkError`] can fail session construction.
//! - [`SessionError`] covers everything a session-controller API call can
//!   fail with.

#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

pub mod config;
pub mod framing;
pub mod link;
pub mod session;

pub use config::ConfigError;
pub use framing::{FrameError, PacketError};
pub use link::LinkError;
pub use session::SessionError;
