//! Handshake wire protocol: opcodes, round table, message builders, the
//! checksum response parser/validator, and the driver that sequences them.

mod builders;
mod checksum;
mod driver;
mod opcodes;
mod rounds;

pub use builders::{
    boot_player, checksum_request, checksum_request_final, delete_player_anim,
    delete_player_ui, game_init, mission_init, settings, ui_collision_setting,
};
pub use checksum::{
    evaluate, evaluate_with_caps, parse_response, parse_response_with_caps, validate,
    ChecksumResponse, ResponseSubdir, Verdict,
};
pub use driver::{Action, HandshakeDriver, SessionParams};
pub use opcodes::{BootReason, ROUND_FINAL};
pub use rounds::{round, RoundDefinition, FINAL_ROUND, ROUNDS};
