//! The handshake driver: a pure, action-returning state machine.
//!
//! Grounded in the "action pattern" used elsewhere in the example corpus for
//! connection state machines -- the driver owns no socket and performs no
//! I/O. Each step consumes the current state plus one input event and
//! returns the next state plus zero or more output actions for a
//! surrounding transport to execute.

use crate::error::{Error, Result};
use crate::manifest::{CapacityConfig, Manifest};
use crate::protocol::builders;
use crate::protocol::checksum::{evaluate_with_caps, Verdict};
use crate::protocol::opcodes::BootReason;

/// An effect the surrounding transport must carry out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SendFrame(Vec<u8>),
    Boot(BootReason),
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    NotStarted,
    AwaitingRound(u8),
    AwaitingFinal,
    Done,
    Failed,
}

/// Parameters needed to build the post-handshake `Settings` frame. These
/// belong to the wider game simulation, out of scope here, but the driver
/// needs them to finish the bootstrap sequence.
#[derive(Debug, Clone)]
pub struct SessionParams {
    pub game_time: f32,
    pub collision_dmg: bool,
    pub friendly_fire: bool,
    pub player_slot: u8,
    pub map_name: String,
}

pub struct HandshakeDriver<'m> {
    manifest: &'m Manifest,
    params: SessionParams,
    attempt_final: bool,
    caps: CapacityConfig,
    state: State,
}

impl<'m> HandshakeDriver<'m> {
    pub fn new(manifest: &'m Manifest, params: SessionParams, attempt_final: bool) -> Self {
        Self::with_caps(manifest, params, attempt_final, CapacityConfig::default())
    }

    /// As [`Self::new`], but validating each round's response against the
    /// given capacity caps instead of the built-in defaults -- the caps a
    /// caller resolved from [`crate::config::ServerConfig`].
    pub fn with_caps(
        manifest: &'m Manifest,
        params: SessionParams,
        attempt_final: bool,
        caps: CapacityConfig,
    ) -> Self {
        Self { manifest, params, attempt_final, caps, state: State::NotStarted }
    }

    /// Begin the handshake: emits the round-0 request.
    pub fn begin(&mut self) -> Result<Vec<Action>> {
        if self.state != State::NotStarted {
            panic!("HandshakeDriver::begin called more than once");
        }
        let mut buf = [0u8; 64];
        let n = builders::checksum_request(&mut buf, 0)?;
        self.state = State::AwaitingRound(0);
        Ok(vec![Action::SendFrame(buf[..n].to_vec())])
    }

    /// Feed in the client's raw response frame for the round currently
    /// awaited, advancing the state machine.
    pub fn on_response(&mut self, frame: &[u8]) -> Result<Vec<Action>> {
        match self.state {
            State::AwaitingRound(round) => self.handle_round(round, frame),
            State::AwaitingFinal => self.handle_final(frame),
            State::NotStarted => panic!("HandshakeDriver::on_response called before begin"),
            State::Done | State::Failed => {
                panic!("HandshakeDriver::on_response called after the handshake concluded")
            }
        }
    }

    fn handle_round(&mut self, round: u8, frame: &[u8]) -> Result<Vec<Action>> {
        let expected = self
            .manifest
            .dir_for_round(round)
            .ok_or(Error::InvalidRound(round))?;

        let verdict = evaluate_with_caps(frame, expected, &self.caps);
        tracing::debug!(round, ?verdict, "round evaluated");
        if verdict != Verdict::Ok {
            tracing::warn!(round, ?verdict, dir_hash = format!("{:#010x}", expected.dir_name_hash), "checksum round failed");
            return self.fail();
        }
        tracing::info!(round, "round passed");

        if round < 3 {
            let mut buf = [0u8; 64];
            let n = builders::checksum_request(&mut buf, round + 1)?;
            self.state = State::AwaitingRound(round + 1);
            return Ok(vec![Action::SendFrame(buf[..n].to_vec())]);
        }

        if self.attempt_final && self.manifest.final_round_dir().is_some() {
            let mut buf = [0u8; 64];
            let n = builders::checksum_request_final(&mut buf)?;
            self.state = State::AwaitingFinal;
            return Ok(vec![Action::SendFrame(buf[..n].to_vec())]);
        }

        self.succeed()
    }

    fn handle_final(&mut self, frame: &[u8]) -> Result<Vec<Action>> {
        let expected = self
            .manifest
            .final_round_dir()
            .expect("AwaitingFinal state implies a final directory was configured");

        let verdict = evaluate_with_caps(frame, expected, &self.caps);
        tracing::debug!(round = 0xFFu8, ?verdict, "final round evaluated");
        if verdict != Verdict::Ok {
            tracing::warn!(?verdict, "final checksum round failed");
            return self.fail();
        }
        self.succeed()
    }

    fn fail(&mut self) -> Result<Vec<Action>> {
        self.state = State::Failed;
        tracing::info!("booting player: checksum failure");
        let mut buf = [0u8; 8];
        let n = builders::boot_player(&mut buf, BootReason::Checksum)?;
        Ok(vec![Action::SendFrame(buf[..n].to_vec()), Action::Boot(BootReason::Checksum)])
    }

    fn succeed(&mut self) -> Result<Vec<Action>> {
        self.state = State::Done;
        tracing::info!("handshake complete");
        let mut settings_buf = [0u8; 256];
        let settings_n = builders::settings(
            &mut settings_buf,
            self.params.game_time,
            self.params.collision_dmg,
            self.params.friendly_fire,
            self.params.player_slot,
            &self.params.map_name,
        )?;
        let mut init_buf = [0u8; 4];
        let init_n = builders::game_init(&mut init_buf)?;
        Ok(vec![
            Action::SendFrame(settings_buf[..settings_n].to_vec()),
            Action::SendFrame(init_buf[..init_n].to_vec()),
            Action::Complete,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::{DirectoryEntry, FileEntry};

    fn dir(hash: u32, files: Vec<FileEntry>) -> DirectoryEntry {
        DirectoryEntry { dir_name_hash: hash, recursive: false, files, subdirs: Vec::new() }
    }

    fn test_manifest() -> Manifest {
        Manifest {
            version_hash: 0x7E0CE243,
            dirs: [
                dir(0x4DAFCB2F, vec![FileEntry::new(0x373EB677, 0xF8A0A740)]),
                dir(0x4DAFCB2F, vec![FileEntry::new(0x8501E6A1, 0x11111111)]),
                dir(0xAAAAAAAA, vec![]),
                dir(0xBBBBBBBB, vec![]),
            ],
            final_dir: None,
        }
    }

    fn params() -> SessionParams {
        SessionParams {
            game_time: 0.0,
            collision_dmg: true,
            friendly_fire: false,
            player_slot: 0,
            map_name: "test".into(),
        }
    }

    fn response_for(round: u8, dir: &DirectoryEntry) -> Vec<u8> {
        let mut buf = vec![0x21, round];
        buf.extend_from_slice(&0u32.to_le_bytes());
        buf.extend_from_slice(&dir.dir_name_hash.to_le_bytes());
        buf.extend_from_slice(&(dir.files.len() as u16).to_le_bytes());
        for f in &dir.files {
            buf.extend_from_slice(&f.name_hash.to_le_bytes());
            buf.extend_from_slice(&f.content_hash.to_le_bytes());
        }
        if round == 2 || round == 0xFF {
            buf.extend_from_slice(&0u16.to_le_bytes());
        }
        buf
    }

    #[test]
    fn full_success_without_final_round() {
        let manifest = test_manifest();
        let mut driver = HandshakeDriver::new(&manifest, params(), false);
        let actions = driver.begin().unwrap();
        assert!(matches!(actions[0], Action::SendFrame(_)));

        for round in 0..=3u8 {
            let expected = manifest.dir_for_round(round).unwrap();
            let resp = response_for(round, expected);
            let actions = driver.on_response(&resp).unwrap();
            if round < 3 {
                assert_eq!(actions.len(), 1);
                assert!(matches!(actions[0], Action::SendFrame(_)));
            } else {
                assert_eq!(actions.len(), 3);
                assert_eq!(actions[2], Action::Complete);
            }
        }
    }

    #[test]
    fn failure_midway_emits_boot() {
        let manifest = test_manifest();
        let mut driver = HandshakeDriver::new(&manifest, params(), false);
        driver.begin().unwrap();

        let mut bad = response_for(0, manifest.dir_for_round(0).unwrap());
        // Corrupt the file's content hash.
        let len = bad.len();
        bad[len - 1] ^= 0xFF;

        let actions = driver.on_response(&bad).unwrap();
        assert!(actions.contains(&Action::Boot(BootReason::Checksum)));
    }
}
