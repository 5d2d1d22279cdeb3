//! Handshake verification core for an OpenBC-compatible dedicated server.
//!
//! A connecting client and the server must agree that the client is running
//! an unmodified (or officially-approved) copy of the game scripts before
//! any gameplay data is exchanged. This crate implements that agreement: a
//! four-round content-addressed checksum exchange, the bit-exact hashes it
//! depends on, the manifest of expected fingerprints, and the message
//! builders that bootstrap the session once a client passes.
//!
//! The transport that actually carries frames over a socket, the wider game
//! simulation, and dispatch for non-handshake opcodes are out of scope --
//! see the module docs on [`protocol`] for the action-pattern seam where a
//! surrounding transport plugs in.

pub mod codec;
pub mod config;
pub mod error;
pub mod hash;
pub mod manifest;
pub mod protocol;

pub use config::ServerConfig;
pub use error::{Error, Result};
pub use manifest::{load_manifest, Manifest};
pub use protocol::{Action, HandshakeDriver, SessionParams};
