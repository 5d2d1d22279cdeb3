//! Parser and validator for the client's checksum response (opcode 0x21).

use crate::codec::BitReader;
use crate::error::{Error, Result};
use crate::manifest::{CapacityConfig, DirectoryEntry, FileEntry, SubdirectoryEntry};
use crate::protocol::opcodes::{OP_CHECKSUM_RESPONSE, ROUND_FINAL};

/// One subdirectory's files, as reported in a recursive-round response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseSubdir {
    pub name_hash: u32,
    pub files: Vec<FileEntry>,
}

/// The client's parsed reply to a `ChecksumRequest`.
///
/// `ref_hash` is parsed but never consulted by validation -- its role in the
/// historical protocol is unknown; it is retained here for completeness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumResponse {
    pub round_index: u8,
    pub ref_hash: u32,
    pub dir_hash: u32,
    pub empty: bool,
    pub files: Vec<FileEntry>,
    pub subdirs: Vec<ResponseSubdir>,
}

fn recursive_for_round(round_index: u8) -> bool {
    round_index == 2 || round_index == ROUND_FINAL
}

fn read_file_entry(r: &mut BitReader) -> Result<FileEntry> {
    let name_hash = r.read_u32()?;
    let content_hash = r.read_u32()?;
    Ok(FileEntry::new(name_hash, content_hash))
}

fn read_files(r: &mut BitReader, cap: usize, what: &'static str) -> Result<Vec<FileEntry>> {
    let count = r.read_u16()? as usize;
    if count > cap {
        return Err(Error::CapacityExceeded { what, count, max: cap });
    }
    (0..count).map(|_| read_file_entry(r)).collect()
}

/// Parse a response frame using the default capacity caps.
///
/// `PARSE_ERROR` (surfaced as this function's `Err`) covers a wrong opcode,
/// truncation, and any capacity overrun. Never allocates on the failing
/// path.
pub fn parse_response(buf: &[u8]) -> Result<ChecksumResponse> {
    parse_response_with_caps(buf, &CapacityConfig::default())
}

/// Parse a response frame, enforcing the given capacity caps instead of the
/// built-in defaults. Callers that resolved a [`crate::config::ServerConfig`]
/// should pass its `capacities` here so an operator's overrides actually
/// take effect.
pub fn parse_response_with_caps(buf: &[u8], caps: &CapacityConfig) -> Result<ChecksumResponse> {
    let mut r = BitReader::new(buf);

    let opcode = r.read_u8()?;
    if opcode != OP_CHECKSUM_RESPONSE {
        return Err(Error::BadOpcode { expected: OP_CHECKSUM_RESPONSE, actual: opcode });
    }

    let round_index = r.read_u8()?;
    let ref_hash = r.read_u32()?;
    let dir_hash = r.read_u32()?;
    let files = read_files(&mut r, caps.max_files_per_dir, "files per directory")?;

    let subdirs = if recursive_for_round(round_index) {
        let subdir_count = r.read_u16()? as usize;
        if subdir_count > caps.max_subdirs_per_dir {
            return Err(Error::CapacityExceeded {
                what: "subdirectories per directory",
                count: subdir_count,
                max: caps.max_subdirs_per_dir,
            });
        }
        let mut subdirs = Vec::with_capacity(subdir_count);
        for _ in 0..subdir_count {
            let name_hash = r.read_u32()?;
            let sub_files = read_files(&mut r, caps.max_files_per_subdir, "files per subdirectory")?;
            subdirs.push(ResponseSubdir { name_hash, files: sub_files });
        }
        subdirs
    } else {
        Vec::new()
    };

    // Open question resolution: the client's "I have nothing" report is
    // encoded as round 0xFF with an empty file tree; see DESIGN.md.
    let empty = round_index == ROUND_FINAL && files.is_empty() && subdirs.is_empty();

    Ok(ChecksumResponse { round_index, ref_hash, dir_hash, empty, files, subdirs })
}

/// Outcome of validating one parsed response against a manifest directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Ok,
    EmptyDir,
    DirMismatch,
    FileMissing,
    FileMismatch,
    ParseError,
}

/// A manifest-side container with the by-name-hash file lookup the parent
/// `DirectoryEntry`/`SubdirectoryEntry` both expose, so `files_match` can
/// call it instead of re-scanning the file list itself.
trait FileLookup {
    fn files(&self) -> &[FileEntry];
    fn find_file(&self, name_hash: u32) -> Option<&FileEntry>;
}

impl FileLookup for DirectoryEntry {
    fn files(&self) -> &[FileEntry] {
        &self.files
    }

    fn find_file(&self, name_hash: u32) -> Option<&FileEntry> {
        DirectoryEntry::find_file(self, name_hash)
    }
}

impl FileLookup for SubdirectoryEntry {
    fn files(&self) -> &[FileEntry] {
        &self.files
    }

    fn find_file(&self, name_hash: u32) -> Option<&FileEntry> {
        SubdirectoryEntry::find_file(self, name_hash)
    }
}

fn files_match(response_files: &[FileEntry], manifest: &impl FileLookup) -> Verdict {
    for rf in response_files {
        if let Some(mf) = manifest.find_file(rf.name_hash) {
            if mf.content_hash != rf.content_hash {
                return Verdict::FileMismatch;
            }
        }
        // A response file absent from the manifest is tolerated (mod content).
    }
    for mf in manifest.files() {
        if !response_files.iter().any(|rf| rf.name_hash == mf.name_hash) {
            return Verdict::FileMissing;
        }
    }
    Verdict::Ok
}

/// Validate a parsed response against the `DirectoryEntry` the *server*
/// expects for this round (never the round the client claims to be
/// answering).
///
/// Evaluation short-circuits on the first failure, in the order: empty
/// report, directory identity, top-level files, top-level completeness,
/// subdirectory files/completeness.
pub fn validate(response: &ChecksumResponse, expected: &DirectoryEntry) -> Verdict {
    if response.empty {
        return if expected.files.is_empty() && expected.subdirs.is_empty() {
            Verdict::Ok
        } else {
            Verdict::FileMissing
        };
    }

    if response.dir_hash != expected.dir_name_hash {
        return Verdict::DirMismatch;
    }

    match files_match(&response.files, expected) {
        Verdict::Ok => {}
        other => return other,
    }

    for expected_sub in &expected.subdirs {
        let Some(resp_sub) = response.subdirs.iter().find(|s| s.name_hash == expected_sub.name_hash) else {
            return Verdict::FileMissing;
        };
        match files_match(&resp_sub.files, expected_sub) {
            Verdict::Ok => {}
            other => return other,
        }
    }
    // Extra subdirectories in the response are tolerated (step 5).

    Verdict::Ok
}

/// Parse and validate a response frame in one step, folding `PARSE_ERROR`
/// into the same `Verdict` the driver acts on, using the default capacity
/// caps.
pub fn evaluate(buf: &[u8], expected: &DirectoryEntry) -> Verdict {
    evaluate_with_caps(buf, expected, &CapacityConfig::default())
}

/// Parse and validate a response frame, enforcing the given capacity caps.
pub fn evaluate_with_caps(buf: &[u8], expected: &DirectoryEntry, caps: &CapacityConfig) -> Verdict {
    match parse_response_with_caps(buf, caps) {
        Ok(response) => validate(&response, expected),
        Err(_) => Verdict::ParseError,
    }
}
