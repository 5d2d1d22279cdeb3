//! The two bit-exact fingerprint functions the handshake depends on.
//!
//! Both are weak by modern standards and exist only to reproduce a specific
//! historical binary's behaviour; do not reach for these outside handshake
//! verification.

mod name_hash;
mod content_hash;

pub use content_hash::content_hash;
pub use name_hash::{name_hash, VERSION_STRING, VERSION_STRING_HASH};

use crate::error::{Error, Result};

/// Re-derive `name_hash(VERSION_STRING)` and check it against the known
/// constant. Run once at startup before any connection is accepted; a
/// mismatch means the embedded permutation tables were corrupted or
/// transcribed incorrectly and the server must refuse to start.
pub fn verify_version_fingerprint() -> Result<()> {
    let actual = name_hash(VERSION_STRING.as_bytes());
    if actual != VERSION_STRING_HASH {
        return Err(Error::VersionMismatch { expected: VERSION_STRING_HASH, actual });
    }
    Ok(())
}

#[cfg(test)]
mod startup_tests {
    use super::*;

    #[test]
    fn startup_version_check_passes_with_embedded_tables() {
        assert!(verify_version_fingerprint().is_ok());
    }
}
