//! JSON manifest document loading.
//!
//! The document is the only JSON shape this crate parses; hash fields are
//! hex strings (`"0x7E0CE243"`) rather than bare integers so the document
//! reads the same as the fingerprints printed in logs and CLI output.

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::manifest::model::{
    CapacityConfig, DirectoryEntry, FileEntry, Manifest, SubdirectoryEntry, MAX_DIRS,
};

#[derive(Debug, Deserialize)]
struct RawFile {
    name_hash: String,
    content_hash: String,
}

#[derive(Debug, Deserialize)]
struct RawSubdir {
    name_hash: String,
    #[serde(default)]
    files: Vec<RawFile>,
}

#[derive(Debug, Deserialize)]
struct RawDirectory {
    dir_name_hash: String,
    #[serde(default)]
    recursive: bool,
    #[serde(default)]
    files: Vec<RawFile>,
    #[serde(default)]
    subdirs: Vec<RawSubdir>,
}

#[derive(Debug, Deserialize)]
struct RawManifest {
    version_string_hash: String,
    directories: Vec<RawDirectory>,
    #[serde(default)]
    r#final: Option<RawDirectory>,
}

fn parse_hex_u32(field: &str, s: &str) -> Result<u32> {
    let digits = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
    u32::from_str_radix(digits, 16)
        .map_err(|e| Error::ManifestMalformed(format!("field {field}: bad hex value {s:?}: {e}")))
}

fn convert_file(raw: RawFile) -> Result<FileEntry> {
    let name_hash = parse_hex_u32("files[].name_hash", &raw.name_hash)?;
    let content_hash = parse_hex_u32("files[].content_hash", &raw.content_hash)?;
    Ok(FileEntry::new(name_hash, content_hash))
}

fn convert_files(raw: Vec<RawFile>, cap: usize, what: &'static str) -> Result<Vec<FileEntry>> {
    if raw.len() > cap {
        return Err(Error::CapacityExceeded { what, count: raw.len(), max: cap });
    }
    raw.into_iter().map(convert_file).collect()
}

fn convert_subdir(raw: RawSubdir, caps: &CapacityConfig) -> Result<SubdirectoryEntry> {
    let name_hash = parse_hex_u32("subdirs[].name_hash", &raw.name_hash)?;
    let files = convert_files(raw.files, caps.max_files_per_subdir, "files per subdirectory")?;
    Ok(SubdirectoryEntry { name_hash, files })
}

fn convert_directory(raw: RawDirectory, caps: &CapacityConfig) -> Result<DirectoryEntry> {
    let dir_name_hash = parse_hex_u32("directories[].dir_name_hash", &raw.dir_name_hash)?;
    let files = convert_files(raw.files, caps.max_files_per_dir, "files per directory")?;

    if raw.subdirs.len() > caps.max_subdirs_per_dir {
        return Err(Error::CapacityExceeded {
            what: "subdirectories per directory",
            count: raw.subdirs.len(),
            max: caps.max_subdirs_per_dir,
        });
    }
    if !raw.recursive && !raw.subdirs.is_empty() {
        return Err(Error::ManifestMalformed(
            "non-recursive directory must not carry subdirectories".into(),
        ));
    }
    let subdirs = raw
        .subdirs
        .into_iter()
        .map(|s| convert_subdir(s, caps))
        .collect::<Result<Vec<_>>>()?;

    Ok(DirectoryEntry { dir_name_hash, recursive: raw.recursive, files, subdirs })
}

/// Parse a manifest document from its JSON text, using the default
/// capacity caps from [`CapacityConfig`].
///
/// The `directories` array must contain exactly [`MAX_DIRS`] entries;
/// anything else is `ManifestMalformed`, never a panic. An optional
/// top-level `final` object supplies the directory for the optional
/// round-0xFF exchange (see [`Manifest::final_round_dir`]).
pub fn load_manifest(text: &str) -> Result<Manifest> {
    load_manifest_with_caps(text, &CapacityConfig::default())
}

/// Parse a manifest document, enforcing the given capacity caps instead of
/// the built-in defaults. Callers that resolved a
/// [`crate::config::ServerConfig`] should pass its `capacities` here so an
/// operator's overrides actually take effect.
pub fn load_manifest_with_caps(text: &str, caps: &CapacityConfig) -> Result<Manifest> {
    match load_manifest_inner(text, caps) {
        Ok(manifest) => {
            tracing::info!(dirs = manifest.dirs.len(), "manifest loaded");
            Ok(manifest)
        }
        Err(err) => {
            tracing::warn!(%err, "manifest load failed");
            Err(err)
        }
    }
}

fn load_manifest_inner(text: &str, caps: &CapacityConfig) -> Result<Manifest> {
    let raw: RawManifest =
        serde_json::from_str(text).map_err(|e| Error::ManifestMalformed(e.to_string()))?;

    let version_hash = parse_hex_u32("version_string_hash", &raw.version_string_hash)?;

    if raw.directories.len() != MAX_DIRS {
        return Err(Error::ManifestMalformed(format!(
            "expected exactly {MAX_DIRS} directories, found {}",
            raw.directories.len()
        )));
    }

    let mut dirs_vec = Vec::with_capacity(MAX_DIRS);
    for dir in raw.directories {
        dirs_vec.push(convert_directory(dir, caps)?);
    }
    let dirs: [DirectoryEntry; MAX_DIRS] = dirs_vec
        .try_into()
        .map_err(|_| Error::ManifestMalformed("directory list length mismatch".into()))?;

    let final_dir = raw.r#final.map(|d| convert_directory(d, caps)).transpose()?;

    Ok(Manifest { version_hash, dirs, final_dir })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"
    {
        "version_string_hash": "0x7E0CE243",
        "directories": [
            { "dir_name_hash": "0x4DAFCB2F", "recursive": false,
              "files": [{"name_hash":"0x373EB677","content_hash":"0xF8A0A740"}] },
            { "dir_name_hash": "0x4DAFCB2F", "recursive": false,
              "files": [{"name_hash":"0x8501E6A1","content_hash":"0x11111111"}] },
            { "dir_name_hash": "0x11223344", "recursive": true,
              "files": [],
              "subdirs": [{"name_hash":"0xCAAFFDD4","files":[{"name_hash":"0x1","content_hash":"0x2"}]}] },
            { "dir_name_hash": "0x55667788", "recursive": false, "files": [] }
        ]
    }
    "#;

    #[test]
    fn loads_well_formed_document() {
        let m = load_manifest(DOC).unwrap();
        assert_eq!(m.version_hash, 0x7E0CE243);
        assert_eq!(m.dirs[0].dir_name_hash, 0x4DAFCB2F);
        assert!(m.dirs[2].recursive);
        assert_eq!(m.dirs[2].subdirs[0].name_hash, 0xCAAFFDD4);
        assert!(m.final_dir.is_none());
    }

    #[test]
    fn four_entries_required() {
        let doc = r#"{"version_string_hash":"0x1","directories":[]}"#;
        assert!(matches!(load_manifest(doc), Err(Error::ManifestMalformed(_))));
    }

    #[test]
    fn bad_hex_is_malformed() {
        let doc = r#"{"version_string_hash":"not-hex","directories":[]}"#;
        assert!(matches!(load_manifest(doc), Err(Error::ManifestMalformed(_))));
    }

    #[test]
    fn non_recursive_with_subdirs_is_rejected() {
        let doc = r#"
        {
            "version_string_hash": "0x1",
            "directories": [
                { "dir_name_hash": "0x1", "recursive": false, "files": [],
                  "subdirs": [{"name_hash":"0x2","files":[]}] },
                { "dir_name_hash": "0x1", "recursive": false, "files": [] },
                { "dir_name_hash": "0x1", "recursive": false, "files": [] },
                { "dir_name_hash": "0x1", "recursive": false, "files": [] }
            ]
        }"#;
        assert!(matches!(load_manifest(doc), Err(Error::ManifestMalformed(_))));
    }

    #[test]
    fn capacity_cap_enforced() {
        let files: Vec<String> = (0..300)
            .map(|i| format!(r#"{{"name_hash":"0x{i:x}","content_hash":"0x1"}}"#))
            .collect();
        let doc = format!(
            r#"{{"version_string_hash":"0x1","directories":[
                {{"dir_name_hash":"0x1","recursive":false,"files":[{}]}},
                {{"dir_name_hash":"0x1","recursive":false,"files":[]}},
                {{"dir_name_hash":"0x1","recursive":false,"files":[]}},
                {{"dir_name_hash":"0x1","recursive":false,"files":[]}}
            ]}}"#,
            files.join(",")
        );
        assert!(matches!(load_manifest(&doc), Err(Error::CapacityExceeded { .. })));
    }

    #[test]
    fn explicit_caps_override_the_defaults() {
        let strict = CapacityConfig { max_files_per_dir: 1, ..CapacityConfig::default() };
        let doc = r#"
        {
            "version_string_hash": "0x1",
            "directories": [
                { "dir_name_hash": "0x1", "recursive": false,
                  "files": [{"name_hash":"0x1","content_hash":"0x1"},
                            {"name_hash":"0x2","content_hash":"0x1"}] },
                { "dir_name_hash": "0x1", "recursive": false, "files": [] },
                { "dir_name_hash": "0x1", "recursive": false, "files": [] },
                { "dir_name_hash": "0x1", "recursive": false, "files": [] }
            ]
        }"#;
        assert!(matches!(
            load_manifest_with_caps(doc, &strict),
            Err(Error::CapacityExceeded { .. })
        ));
        assert!(load_manifest(doc).is_ok());
    }

    #[test]
    fn final_section_is_optional_but_parsed_when_present() {
        let doc = r#"
        {
            "version_string_hash": "0x1",
            "directories": [
                { "dir_name_hash": "0x1", "recursive": false, "files": [] },
                { "dir_name_hash": "0x1", "recursive": false, "files": [] },
                { "dir_name_hash": "0x1", "recursive": false, "files": [] },
                { "dir_name_hash": "0x1", "recursive": false, "files": [] }
            ],
            "final": { "dir_name_hash": "0xAABBCCDD", "recursive": true, "files": [],
                       "subdirs": [{"name_hash":"0x1","files":[]}] }
        }"#;
        let m = load_manifest(doc).unwrap();
        let f = m.final_round_dir().unwrap();
        assert_eq!(f.dir_name_hash, 0xAABBCCDD);
        assert!(f.recursive);
    }
}
