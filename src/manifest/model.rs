//! In-memory shape of the expected hash tree.

use serde::{Deserialize, Serialize};

/// Capacity caps enforced by the loader and the checksum parser. Kept as
/// named constants rather than hardcoded magic numbers since both `manifest`
/// and `checksum` need to agree on them.
///
/// `MAX_DIRS` is not part of [`CapacityConfig`]: the round count is
/// structurally fixed by `Manifest::dirs` being a `[DirectoryEntry; 4]`
/// array, not a runtime-checked cap, so there is nothing for an override to
/// change.
pub const MAX_DIRS: usize = 4;
pub const MAX_FILES_PER_DIR: usize = 256;
pub const MAX_SUBDIRS_PER_DIR: usize = 8;
pub const MAX_FILES_PER_SUBDIR: usize = 128;

/// Overridable capacity caps, threaded from [`crate::config::ServerConfig`]
/// into the manifest loader (§4.C) and the checksum response parser (§4.E)
/// so a deployment can raise or lower them without a recompile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CapacityConfig {
    pub max_files_per_dir: usize,
    pub max_subdirs_per_dir: usize,
    pub max_files_per_subdir: usize,
}

impl Default for CapacityConfig {
    fn default() -> Self {
        Self {
            max_files_per_dir: MAX_FILES_PER_DIR,
            max_subdirs_per_dir: MAX_SUBDIRS_PER_DIR,
            max_files_per_subdir: MAX_FILES_PER_SUBDIR,
        }
    }
}

/// A single file's identity (name) and content fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileEntry {
    pub name_hash: u32,
    pub content_hash: u32,
}

impl FileEntry {
    pub fn new(name_hash: u32, content_hash: u32) -> Self {
        Self { name_hash, content_hash }
    }
}

/// A subdirectory inside a recursive top-level directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubdirectoryEntry {
    pub name_hash: u32,
    pub files: Vec<FileEntry>,
}

impl SubdirectoryEntry {
    pub fn find_file(&self, name_hash: u32) -> Option<&FileEntry> {
        self.files.iter().find(|f| f.name_hash == name_hash)
    }
}

/// One round's expected directory contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub dir_name_hash: u32,
    pub recursive: bool,
    pub files: Vec<FileEntry>,
    pub subdirs: Vec<SubdirectoryEntry>,
}

impl DirectoryEntry {
    pub fn find_file(&self, name_hash: u32) -> Option<&FileEntry> {
        self.files.iter().find(|f| f.name_hash == name_hash)
    }

    pub fn find_subdir(&self, name_hash: u32) -> Option<&SubdirectoryEntry> {
        self.subdirs.iter().find(|s| s.name_hash == name_hash)
    }
}

/// The full expected hash tree: a version fingerprint plus exactly four
/// round directories, indexed by round number 0..3.
///
/// `final_dir` is a fifth, optional entry for round 0xFF ("Scripts/
/// Multiplayer"). It is kept separate from `dirs` because §3 of the
/// original specification fixes `dir_count == 4`; the final round is an
/// optional fifth exchange layered on top, not part of the core four, so a
/// manifest document without a `final` section is still a complete manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub version_hash: u32,
    pub dirs: [DirectoryEntry; MAX_DIRS],
    pub final_dir: Option<DirectoryEntry>,
}

impl Manifest {
    /// The directory expected for round 0..3.
    pub fn dir_for_round(&self, round: u8) -> Option<&DirectoryEntry> {
        self.dirs.get(round as usize)
    }

    /// The directory expected for the optional final round (0xFF).
    pub fn final_round_dir(&self) -> Option<&DirectoryEntry> {
        self.final_dir.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dir() -> DirectoryEntry {
        DirectoryEntry {
            dir_name_hash: 0x4DAFCB2F,
            recursive: true,
            files: vec![FileEntry::new(0x373EB677, 0xF8A0A740), FileEntry::new(0x8501E6A1, 0x1)],
            subdirs: vec![SubdirectoryEntry {
                name_hash: 0xCAAFFDD4,
                files: vec![FileEntry::new(0x1, 0x2)],
            }],
        }
    }

    #[test]
    fn dir_find_file_locates_by_name_hash() {
        let d = dir();
        assert_eq!(d.find_file(0x373EB677).unwrap().content_hash, 0xF8A0A740);
        assert!(d.find_file(0xDEADBEEF).is_none());
    }

    #[test]
    fn subdir_find_file_locates_by_name_hash() {
        let sub = &dir().subdirs[0];
        assert_eq!(sub.find_file(0x1).unwrap().content_hash, 0x2);
        assert!(sub.find_file(0x99).is_none());
    }

    #[test]
    fn dir_find_subdir_locates_by_name_hash() {
        let d = dir();
        assert_eq!(d.find_subdir(0xCAAFFDD4).unwrap().files.len(), 1);
        assert!(d.find_subdir(0x12345678).is_none());
    }

    #[test]
    fn capacity_config_default_matches_manifest_model_constants() {
        let caps = CapacityConfig::default();
        assert_eq!(caps.max_files_per_dir, MAX_FILES_PER_DIR);
        assert_eq!(caps.max_subdirs_per_dir, MAX_SUBDIRS_PER_DIR);
        assert_eq!(caps.max_files_per_subdir, MAX_FILES_PER_SUBDIR);
    }
}
