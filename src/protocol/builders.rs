//! Encoders for the outbound handshake-related messages.
//!
//! Every builder takes a caller-provided buffer (the core never allocates
//! transport memory) and returns the number of bytes written.

use crate::codec::BitWriter;
use crate::error::Result;
use crate::protocol::opcodes::*;
use crate::protocol::rounds::{round, RoundDefinition, FINAL_ROUND};

fn write_checksum_request(buf: &mut [u8], def: RoundDefinition) -> Result<usize> {
    let mut w = BitWriter::new(buf);
    w.write_u8(OP_CHECKSUM_REQUEST)?;
    w.write_u8(def.round)?;
    w.write_lp_bytes(def.dir.as_bytes())?;
    w.write_lp_bytes(def.filter.as_bytes())?;
    w.write_bit(def.recursive)?;
    w.finish()
}

/// Build the request frame for rounds 0..3.
pub fn checksum_request(buf: &mut [u8], round_index: u8) -> Result<usize> {
    let def = round(round_index)
        .unwrap_or_else(|| panic!("checksum_request: round {round_index} out of range 0..3"));
    write_checksum_request(buf, def)
}

/// Build the optional final-round request (`round = 0xFF`).
pub fn checksum_request_final(buf: &mut [u8]) -> Result<usize> {
    write_checksum_request(buf, FINAL_ROUND)
}

/// Build the post-handshake `Settings` frame.
pub fn settings(
    buf: &mut [u8],
    game_time: f32,
    collision_dmg: bool,
    friendly_fire: bool,
    player_slot: u8,
    map_name: &str,
) -> Result<usize> {
    let mut w = BitWriter::new(buf);
    w.write_u8(OP_SETTINGS)?;
    w.write_f32(game_time)?;
    w.write_bit(collision_dmg)?;
    w.write_bit(friendly_fire)?;
    w.write_u8(player_slot)?;
    w.write_lp_bytes(map_name.as_bytes())?;
    w.write_bit(false)?; // checksumFlag, always clear on this path
    w.finish()
}

/// Build the `GameInit` frame. Carries no payload beyond the opcode.
pub fn game_init(buf: &mut [u8]) -> Result<usize> {
    let mut w = BitWriter::new(buf);
    w.write_u8(OP_GAME_INIT)?;
    w.finish()
}

/// Build a `MissionInit` frame. `time_limit` and `frag_limit` use `0xFF` to
/// mean "no limit"; `end_time` is only written when `time_limit != 0xFF`.
pub fn mission_init(
    buf: &mut [u8],
    player_limit: u8,
    system_index: u8,
    time_limit: u8,
    end_time: i32,
    frag_limit: u8,
) -> Result<usize> {
    let mut w = BitWriter::new(buf);
    w.write_u8(OP_MISSION_INIT)?;
    w.write_u8(player_limit)?;
    w.write_u8(system_index)?;
    w.write_u8(time_limit)?;
    if time_limit != 0xFF {
        w.write_i32(end_time)?;
    }
    w.write_u8(frag_limit)?;
    w.finish()
}

/// Build a `UICollisionSetting` frame.
pub fn ui_collision_setting(buf: &mut [u8], collision_enabled: bool) -> Result<usize> {
    let mut w = BitWriter::new(buf);
    w.write_u8(OP_UI_COLLISION_SETTING)?;
    w.write_bit(collision_enabled)?;
    w.finish()
}

/// Build a `BootPlayer` frame with the given reason.
pub fn boot_player(buf: &mut [u8], reason: BootReason) -> Result<usize> {
    let mut w = BitWriter::new(buf);
    w.write_u8(OP_BOOT_PLAYER)?;
    w.write_u8(reason as u8)?;
    w.finish()
}

/// Build a `DeletePlayerUI` frame.
///
/// Provisional shape carried over from a trace-derived minimal encoding
/// (opcode + game slot); see the open question recorded in DESIGN.md.
pub fn delete_player_ui(buf: &mut [u8], game_slot: u8) -> Result<usize> {
    let mut w = BitWriter::new(buf);
    w.write_u8(OP_DELETE_PLAYER_UI)?;
    w.write_u8(game_slot)?;
    w.finish()
}

/// Build a `DeletePlayerAnim` frame.
///
/// No trace of this opcode was captured; the encoding below (opcode plus a
/// length-prefixed name) is provisional, implemented for completeness.
pub fn delete_player_anim(buf: &mut [u8], name: &str) -> Result<usize> {
    let mut w = BitWriter::new(buf);
    w.write_u8(OP_DELETE_PLAYER_ANIM)?;
    w.write_lp_bytes(name.as_bytes())?;
    w.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checksum_request_round_zero_matches_captured_bytes() {
        let mut buf = [0u8; 32];
        let n = checksum_request(&mut buf, 0).unwrap();
        let expected = [
            0x20, 0x00, 0x08, 0x00, b's', b'c', b'r', b'i', b'p', b't', b's', b'/', 0x07, 0x00,
            b'A', b'p', b'p', b'.', b'p', b'y', b'c', 0x00,
        ];
        assert_eq!(&buf[..n], &expected[..]);
    }

    #[test]
    fn final_request_uses_final_round_definition() {
        let mut buf = [0u8; 64];
        let n = checksum_request_final(&mut buf).unwrap();
        assert_eq!(buf[1], 0xFF);
        assert_eq!(&buf[2..4], &[19, 0]); // "Scripts/Multiplayer".len()
        assert!(buf[..n].ends_with(&[0x01])); // recursive bit set
    }

    #[test]
    fn boot_player_checksum_is_two_bytes() {
        let mut buf = [0u8; 8];
        let n = boot_player(&mut buf, BootReason::Checksum).unwrap();
        assert_eq!(&buf[..n], &[0x04, 0x04]);
    }

    #[test]
    fn game_init_is_opcode_only() {
        let mut buf = [0u8; 4];
        let n = game_init(&mut buf).unwrap();
        assert_eq!(&buf[..n], &[0x01]);
    }

    #[test]
    fn mission_init_omits_end_time_when_unlimited() {
        let mut buf = [0u8; 16];
        let n = mission_init(&mut buf, 8, 2, 0xFF, 0, 10).unwrap();
        assert_eq!(&buf[..n], &[0x35, 8, 2, 0xFF, 10]);
    }

    #[test]
    fn mission_init_includes_end_time_when_limited() {
        let mut buf = [0u8; 16];
        let n = mission_init(&mut buf, 8, 2, 5, 1000, 0xFF).unwrap();
        assert_eq!(n, 9);
        assert_eq!(buf[3], 5);
        assert_eq!(i32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]), 1000);
        assert_eq!(buf[8], 0xFF);
    }

    #[test]
    fn buffer_too_small_is_reported() {
        let mut buf = [0u8; 2];
        assert!(checksum_request(&mut buf, 0).is_err());
    }
}
