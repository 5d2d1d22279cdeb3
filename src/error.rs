//! Error taxonomy for the handshake core.
//!
//! Every fallible entry point in this crate returns `Result<T>`. Nothing in
//! `hash`, `codec`, `manifest`, or `checksum` panics on attacker-controlled
//! input; panics are reserved for precondition violations in core-internal
//! code (an out-of-range round index passed by our own driver, not by a
//! client).

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A caller-provided encode buffer is too small to hold the frame.
    #[error("buffer too small: need {need} bytes, have {have}")]
    BufferTooSmall { need: usize, have: usize },

    /// A read ran past the end of the input buffer.
    #[error("unexpected end of frame")]
    Truncation,

    /// The first byte of a frame did not match the expected opcode.
    #[error("bad opcode: expected {expected:#04x}, got {actual:#04x}")]
    BadOpcode { expected: u8, actual: u8 },

    /// A parsed list (files, subdirs, sub-files) exceeded its declared cap.
    #[error("capacity exceeded: {what} has {count}, max {max}")]
    CapacityExceeded { what: &'static str, count: usize, max: usize },

    /// The manifest document does not conform to the expected schema.
    #[error("manifest malformed: {0}")]
    ManifestMalformed(String),

    /// Round index requested from the manifest is out of the valid 0..3 range.
    #[error("invalid round index: {0}")]
    InvalidRound(u8),

    /// The startup version fingerprint did not match the expected constant.
    #[error("version fingerprint mismatch: expected {expected:#010x}, got {actual:#010x}")]
    VersionMismatch { expected: u32, actual: u32 },

    /// I/O failure reading a manifest or config file. Boundary-only; never
    /// produced by the pure core.
    #[error("io error: {0}")]
    Io(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
