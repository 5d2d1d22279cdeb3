//! Four-lane Pearson-style substitution hash over raw bytes.
//!
//! Four single-byte accumulators are each run through their own 256-entry
//! permutation table, one input byte at a time: `h_i <- T_i[c ^ h_i]`. The
//! four final accumulators are concatenated big-endian into the 32-bit
//! result. The tables are fixed constants from the reference implementation;
//! an "equivalent" table of your own devising will not interoperate.

const TABLE_0: [u8; 256] = [
    0x1C, 0xD7, 0x98, 0xF7, 0xD5, 0xEF, 0xA3, 0x54, 0x7F, 0xCD, 0x05, 0xB0, 0x7D, 0x81, 0x13, 0xB6,
    0xDE, 0xA6, 0x52, 0xD9, 0x7C, 0x72, 0xB2, 0x0A, 0xB3, 0x75, 0xB4, 0x11, 0x22, 0x2A, 0x2C, 0xC4,
    0x5C, 0x37, 0x86, 0x06, 0xE1, 0x0D, 0x6D, 0x2E, 0x5F, 0x65, 0x21, 0x5E, 0xE2, 0x6F, 0x80, 0xCE,
    0x9C, 0xDA, 0x12, 0x28, 0xA1, 0x0B, 0x44, 0x45, 0xAA, 0xBA, 0x6B, 0x55, 0x88, 0xF9, 0x3E, 0x60,
    0x19, 0x93, 0x8E, 0x15, 0x33, 0x50, 0xF5, 0xAF, 0xFF, 0xEA, 0x4F, 0x53, 0x4A, 0x59, 0x4E, 0x3C,
    0x48, 0xAB, 0xA9, 0x04, 0xC1, 0x36, 0x5A, 0x20, 0xD2, 0x3D, 0xF6, 0x1D, 0xD8, 0xFC, 0x0E, 0xAD,
    0x1B, 0x3B, 0xC2, 0x35, 0x2B, 0xBF, 0x99, 0x43, 0x47, 0x42, 0xD6, 0x62, 0x97, 0xDC, 0x9F, 0x5B,
    0x83, 0xF8, 0x79, 0x1F, 0x7E, 0x38, 0x4B, 0xFA, 0x24, 0x16, 0xF3, 0xCA, 0x84, 0x29, 0xE5, 0xFE,
    0x58, 0x70, 0xC8, 0xEB, 0x26, 0x23, 0x27, 0xED, 0x85, 0x6A, 0xB1, 0x3F, 0x02, 0x7A, 0x17, 0x14,
    0xEE, 0x49, 0x1A, 0x32, 0x31, 0xC0, 0xDF, 0xB5, 0x5D, 0x9A, 0x00, 0xB8, 0xE7, 0x64, 0x8C, 0x73,
    0xF1, 0xE0, 0x78, 0x9E, 0xA2, 0xE4, 0x8B, 0x07, 0x0F, 0x77, 0x3A, 0xD0, 0xA0, 0x95, 0x25, 0xB9,
    0x6C, 0x01, 0xAC, 0xE6, 0x4C, 0x82, 0x10, 0x63, 0xA4, 0x61, 0x94, 0xE8, 0x41, 0xE9, 0x9B, 0x39,
    0x03, 0x40, 0xFD, 0x4D, 0xC3, 0x2F, 0xB7, 0xD4, 0xA5, 0xA8, 0xAE, 0xC7, 0x57, 0x0C, 0x87, 0x08,
    0xCF, 0x8D, 0x68, 0xF2, 0x96, 0x2D, 0x1E, 0x92, 0xBB, 0x7B, 0x18, 0x69, 0xD1, 0xBE, 0xDD, 0xC5,
    0x9D, 0x66, 0x30, 0xDB, 0xBC, 0x74, 0x67, 0x89, 0x71, 0xE3, 0xD3, 0x46, 0x8A, 0x09, 0xF4, 0x6E,
    0xFB, 0xF0, 0x8F, 0xA7, 0x51, 0x56, 0xCB, 0x34, 0xBD, 0xEC, 0x91, 0x76, 0x90, 0xC9, 0xC6, 0xCC,
];

const TABLE_1: [u8; 256] = [
    0x15, 0x73, 0xBC, 0x65, 0x83, 0x7A, 0xB3, 0x3B, 0x7D, 0xB1, 0x7B, 0x02, 0x1F, 0x8C, 0x49, 0xE6,
    0xEB, 0x84, 0xFD, 0xF7, 0x86, 0x47, 0x79, 0x2B, 0x0D, 0xF3, 0x9F, 0x7E, 0x9B, 0xFA, 0x17, 0x9D,
    0x44, 0xC3, 0xD1, 0xE0, 0x36, 0xE8, 0x66, 0x13, 0x09, 0x8B, 0xD5, 0x67, 0x48, 0x41, 0xCC, 0xBB,
    0x33, 0xD4, 0x08, 0x71, 0x92, 0xC0, 0xC7, 0xE9, 0xA0, 0x07, 0xC4, 0xAB, 0x64, 0x85, 0x94, 0x4C,
    0xEE, 0x6F, 0x40, 0x25, 0x51, 0x1D, 0x39, 0xAD, 0xD3, 0x03, 0x52, 0x4D, 0x59, 0xDD, 0x0F, 0xAF,
    0x3A, 0x58, 0x93, 0x23, 0x91, 0x6A, 0x88, 0xE7, 0x77, 0x12, 0xA6, 0x8D, 0x2D, 0xE3, 0xFB, 0xAA,
    0xE1, 0x0A, 0xD6, 0x38, 0xEA, 0xF1, 0xEC, 0x53, 0x5E, 0x6D, 0xC8, 0x06, 0xCB, 0xB9, 0x2A, 0xBE,
    0x35, 0x26, 0x98, 0x76, 0x2E, 0xDC, 0x90, 0xB2, 0x28, 0xB6, 0x34, 0x5F, 0xE2, 0x63, 0xA2, 0x4F,
    0x7F, 0x6E, 0x5A, 0x8F, 0xBA, 0xD2, 0x14, 0x43, 0x56, 0xA4, 0x81, 0x0E, 0xF6, 0x72, 0x9C, 0x57,
    0x70, 0xA7, 0xEF, 0xBF, 0x04, 0x0B, 0xAE, 0x5C, 0x3D, 0x20, 0x5B, 0x87, 0x4A, 0xCA, 0xB8, 0x97,
    0xDF, 0x7C, 0xDA, 0x2F, 0xB4, 0xF0, 0x80, 0xB0, 0x30, 0xD9, 0x78, 0xCE, 0x46, 0x3C, 0x37, 0xD7,
    0xBD, 0x75, 0x1E, 0xB7, 0xF5, 0x05, 0xC1, 0x11, 0x22, 0x00, 0x50, 0x82, 0xD0, 0xFF, 0xC5, 0x55,
    0x68, 0xFE, 0x1A, 0x9E, 0x42, 0x99, 0xA1, 0x19, 0x6B, 0xA5, 0xAC, 0xE4, 0xE5, 0x27, 0x2C, 0xB5,
    0x6C, 0x18, 0x74, 0xF4, 0x5D, 0x3E, 0x01, 0x21, 0x9A, 0xA3, 0xF2, 0x8A, 0xCD, 0xDE, 0xA9, 0xF8,
    0x54, 0x24, 0x62, 0x61, 0x69, 0x4B, 0x8E, 0xA8, 0xC9, 0x60, 0xD8, 0x1C, 0x4E, 0xC6, 0x3F, 0x96,
    0x31, 0x32, 0x29, 0x1B, 0x10, 0xCF, 0x16, 0x0C, 0x45, 0xFC, 0xDB, 0x89, 0x95, 0xC2, 0xED, 0xF9,
];

const TABLE_2: [u8; 256] = [
    0x06, 0x59, 0x85, 0x43, 0x0A, 0x8B, 0x55, 0x10, 0xC5, 0xD8, 0x05, 0x07, 0xBF, 0x64, 0x9C, 0x63,
    0x0D, 0xF0, 0xF4, 0x52, 0xC6, 0xA1, 0x7D, 0x7A, 0xA7, 0xA8, 0x1D, 0xDC, 0xEA, 0x95, 0x41, 0xD2,
    0x12, 0xFF, 0x35, 0xBC, 0xA3, 0x1E, 0xA4, 0x9A, 0x5C, 0x77, 0x83, 0x1F, 0xE4, 0xFD, 0x28, 0xDA,
    0xC2, 0xFA, 0x91, 0xF9, 0xE2, 0x46, 0x04, 0xBD, 0x40, 0xAD, 0x09, 0x8E, 0xAB, 0x2D, 0x30, 0x34,
    0xC9, 0xF2, 0xF5, 0x97, 0x15, 0xAF, 0x84, 0x5D, 0x7F, 0xEB, 0x82, 0x2B, 0xB1, 0x80, 0x65, 0xCD,
    0x6C, 0xAE, 0xD5, 0x31, 0xB0, 0x0B, 0x13, 0x89, 0x66, 0xEE, 0x4F, 0xB8, 0xDD, 0xAC, 0xD9, 0x60,
    0x33, 0x8C, 0x50, 0x75, 0x11, 0x37, 0x45, 0xB3, 0x71, 0xF6, 0xDB, 0x5F, 0x92, 0xCA, 0x7E, 0xE5,
    0x24, 0xE9, 0x4C, 0x6F, 0xD4, 0x26, 0xF1, 0x1C, 0x23, 0x74, 0x87, 0x54, 0xDF, 0x03, 0x02, 0x51,
    0xD0, 0x4A, 0xE3, 0x1A, 0x00, 0x4E, 0xC0, 0x76, 0x32, 0xB9, 0xD7, 0x27, 0x5B, 0xC7, 0x72, 0x98,
    0x20, 0xB6, 0x3C, 0x62, 0x39, 0xEF, 0xFC, 0xE8, 0x5A, 0xBB, 0xF7, 0x79, 0x6A, 0xE0, 0x7C, 0x16,
    0xFB, 0xBA, 0x4B, 0x1B, 0x48, 0x19, 0x93, 0x0C, 0x99, 0xBE, 0xD3, 0x6B, 0x61, 0x6D, 0xDE, 0x0F,
    0x9F, 0x3A, 0x78, 0x47, 0x29, 0xE6, 0xED, 0x69, 0xA0, 0x90, 0xA9, 0x21, 0x17, 0xA6, 0xCB, 0x81,
    0x2C, 0x38, 0x68, 0x9B, 0xC4, 0xC3, 0x53, 0x56, 0xD6, 0x36, 0xCC, 0x2A, 0x67, 0x08, 0xD1, 0x8F,
    0x14, 0x0E, 0x3D, 0xB4, 0xF8, 0xB7, 0xCE, 0xF3, 0x9D, 0x5E, 0x73, 0xC8, 0xE1, 0x86, 0xE7, 0x8A,
    0x57, 0x44, 0x3E, 0xCF, 0xB2, 0xC1, 0x7B, 0xB5, 0x8D, 0x58, 0x96, 0x94, 0x2F, 0x01, 0x88, 0x42,
    0x18, 0xAA, 0x2E, 0x3F, 0x70, 0x9E, 0x6E, 0x4D, 0xEC, 0x49, 0xFE, 0x22, 0x3B, 0xA5, 0x25, 0xA2,
];

const TABLE_3: [u8; 256] = [
    0xAD, 0x47, 0x0E, 0x8B, 0x33, 0x34, 0xEE, 0xB5, 0xA3, 0xAF, 0x3C, 0xFA, 0x7E, 0x6B, 0xA8, 0x23,
    0x9E, 0xC8, 0x32, 0x94, 0xDA, 0x6C, 0xDD, 0xBC, 0x88, 0x1C, 0x07, 0xD4, 0x2A, 0xB4, 0xFD, 0x46,
    0x22, 0xE8, 0x6A, 0xBB, 0xD3, 0x83, 0x8E, 0xE6, 0xA1, 0x20, 0xA5, 0x58, 0xD0, 0x3B, 0x9C, 0x5F,
    0xB8, 0xBD, 0x62, 0x50, 0x09, 0x11, 0xEB, 0xCE, 0x78, 0x03, 0x25, 0xF0, 0x95, 0x73, 0x0A, 0x19,
    0x4E, 0xF5, 0x2F, 0x4F, 0xDE, 0xCC, 0x37, 0xCA, 0x15, 0x68, 0xEA, 0x7F, 0x5B, 0x2B, 0xD1, 0x00,
    0x01, 0x84, 0x0B, 0x8A, 0x0F, 0x53, 0x66, 0xA2, 0x24, 0x75, 0x7D, 0x36, 0x52, 0xD5, 0xB9, 0x27,
    0x21, 0xC6, 0x16, 0xF8, 0x3E, 0x7A, 0xC7, 0x38, 0x1E, 0xF4, 0x17, 0x61, 0x74, 0x10, 0x31, 0x98,
    0xD7, 0xC0, 0xB0, 0xF2, 0x8F, 0x6D, 0x96, 0x72, 0x9D, 0xE4, 0x89, 0x04, 0x60, 0xC3, 0x69, 0x9F,
    0xAB, 0x02, 0xFC, 0xD6, 0xAE, 0x4B, 0xAC, 0xE0, 0xD9, 0x85, 0xC9, 0xF9, 0x51, 0xA6, 0x5A, 0x6F,
    0x3F, 0x93, 0x1D, 0xCB, 0x56, 0x39, 0x1F, 0x42, 0xFE, 0x57, 0x65, 0x7B, 0x99, 0x26, 0xAA, 0xDC,
    0x91, 0x80, 0x49, 0x28, 0xE1, 0xA0, 0xDF, 0x13, 0x35, 0xCD, 0x45, 0xE9, 0x79, 0x59, 0x71, 0x5D,
    0x08, 0x44, 0xB2, 0xB3, 0x3D, 0x5C, 0xBA, 0xFF, 0x86, 0x77, 0x30, 0xD8, 0x9B, 0x6E, 0x40, 0xA9,
    0x64, 0xED, 0xC2, 0xB6, 0x54, 0xF3, 0x0D, 0x9A, 0xEC, 0xF1, 0x67, 0xE2, 0x90, 0xC1, 0x14, 0xE3,
    0x4A, 0x5E, 0x41, 0xD2, 0x92, 0x3A, 0xFB, 0xA7, 0x4D, 0xDB, 0x1A, 0x43, 0xB1, 0x70, 0x05, 0xC4,
    0x18, 0xF7, 0xBF, 0x2C, 0xC5, 0x8C, 0x2D, 0x06, 0x7C, 0xB7, 0xE5, 0x63, 0x12, 0x76, 0xA4, 0xCF,
    0x1B, 0xEF, 0x4C, 0x0C, 0x8D, 0x82, 0x2E, 0x87, 0x48, 0xE7, 0x81, 0x29, 0x55, 0x97, 0xBE, 0xF6,
];

/// The version string both peers must agree on before anything else.
pub const VERSION_STRING: &str = "60";

/// `name_hash(VERSION_STRING)`, checked at startup before any connection is
/// accepted (see `hash::name_hash` docs and the crate-level startup check).
pub const VERSION_STRING_HASH: u32 = 0x7E0CE243;

/// Hash a raw byte string. Case-sensitive; operates on bytes, not characters.
pub fn name_hash(input: &[u8]) -> u32 {
    let mut h0: u8 = 0;
    let mut h1: u8 = 0;
    let mut h2: u8 = 0;
    let mut h3: u8 = 0;

    for &c in input {
        h0 = TABLE_0[(c ^ h0) as usize];
        h1 = TABLE_1[(c ^ h1) as usize];
        h2 = TABLE_2[(c ^ h2) as usize];
        h3 = TABLE_3[(c ^ h3) as usize];
    }

    ((h0 as u32) << 24) | ((h1 as u32) << 16) | ((h2 as u32) << 8) | (h3 as u32)
}
