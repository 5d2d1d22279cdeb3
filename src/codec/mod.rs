//! Byte/bit-aligned frame codec.
//!
//! Handshake frames are almost entirely byte-aligned, except for a handful
//! of single-bit flags (`recursive`, `collisionDmg`, `checksumFlag`, ...)
//! that the historical protocol packs at the end of a frame. `BitWriter` and
//! `BitReader` track a byte cursor and a sub-byte bit cursor so both shapes
//! are expressible with the same primitive.

mod reader;
mod writer;

pub use reader::BitReader;
pub use writer::BitWriter;
